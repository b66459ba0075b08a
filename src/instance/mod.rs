//! ALWABP problem instance.
//!
//! An instance is the immutable problem description: the task count, the
//! worker count (which is also the station count, one worker per
//! station), the per-worker processing-time matrix with incapacity cells,
//! and the precedence relation together with adjacency lists derived from
//! it once at construction.

mod model;
mod parse;

pub use model::{Instance, MalformedInstance};

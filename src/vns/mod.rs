//! Variable Neighborhood Search (VNS) for ALWABP.
//!
//! A single-solution metaheuristic that systematically changes
//! neighborhood structures during the search. Each step draws a random
//! perturbation (shaking) in the current neighborhood and descends from
//! it with VND, a deterministic first-improvement descent over the task
//! reassignment and worker swap neighborhoods. Improvement over the
//! current solution resets the search to the smallest neighborhood;
//! otherwise the next, larger neighborhood is tried.
//!
//! # References
//!
//! - Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//!   *Computers & Operations Research* 24(11), 1097-1100.
//! - Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//!   Principles and applications", *European Journal of Operational Research* 130(3), 449-467.

mod config;
mod local_search;
mod runner;
mod shaking;

pub use config::{VnsConfig, DEFAULT_SEED};
pub use local_search::{task_reassignment_search, vnd, worker_swap_search};
pub use runner::{VnsResult, VnsRunner};
pub use shaking::shake;

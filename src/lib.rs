//! Variable Neighborhood Search solver for the assembly line worker
//! assignment and balancing problem (ALWABP).
//!
//! ALWABP assigns a set of precedence-constrained tasks to work
//! stations, each staffed by exactly one worker with task-specific
//! (possibly disqualifying) processing times, minimizing the cycle
//! time: the maximum total workload over all stations.
//!
//! The crate is organized bottom-up:
//!
//! - [`instance`]: the immutable problem description, derived precedence
//!   adjacency, and the plain-text instance format.
//! - [`solution`]: the task→station / worker→station assignment pair
//!   with its evaluation, ordering, and report formatting.
//! - [`constructive`]: randomized greedy construction of starting
//!   solutions (topological task placement over a random worker
//!   permutation).
//! - [`vns`]: shaking neighborhoods, the two first-improvement local
//!   searches composed into VND, and the VNS driver.
//!
//! The search is single-threaded, allocation-only, and deterministic for
//! a given seed: all randomness flows through an explicit generator, so
//! independent runs over different instances or seeds can be farmed out
//! as isolated parallel units by an external orchestrator.

pub mod constructive;
pub mod instance;
pub mod solution;
pub mod vns;

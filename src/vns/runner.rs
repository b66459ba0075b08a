//! Variable Neighborhood Search execution engine.
//!
//! # Algorithm (Basic VNS)
//!
//! 1. Construct the starting solution (best of a few greedy multi-starts)
//! 2. While the iteration cap and time budget allow, for k = 1..=k_max:
//!    a. **Shaking**: generate a feasible x' in N_k(current)
//!    b. **Descent**: apply VND to x' → x''
//!    c. **Move or not**: if x'' beats current, accept it and reset
//!    k = 1; otherwise k = k + 1
//! 3. Return the initial solution (for improvement reporting) and the
//!    best solution found
//!
//! # Reference
//!
//! Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//! *Computers & Operations Research* 24(11), 1097-1100.

use std::time::{Duration, Instant};

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::{VnsConfig, DEFAULT_SEED};
use super::local_search::vnd;
use super::shaking::shake;
use crate::constructive::{generate_initial_solution_multi, ConstructionFailure};
use crate::instance::Instance;
use crate::solution::Solution;

/// Result of a VNS run.
#[derive(Debug, Clone)]
pub struct VnsResult<'a> {
    /// The starting solution, kept untouched so callers can measure the
    /// improvement the search achieved.
    pub initial: Solution<'a>,
    /// Best solution found.
    pub best: Solution<'a>,
    /// Outer iterations executed.
    pub iterations: usize,
    /// Wall-clock time spent.
    pub elapsed: Duration,
    /// Set when construction gave up and the search ran on a flagged
    /// infeasible start.
    pub construction_failure: Option<ConstructionFailure>,
}

/// Variable Neighborhood Search runner.
pub struct VnsRunner;

impl VnsRunner {
    /// Runs VNS with a private generator seeded from the configuration.
    pub fn run<'a>(instance: &'a Instance, config: &VnsConfig) -> VnsResult<'a> {
        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or(DEFAULT_SEED));
        Self::run_with_rng(instance, config, &mut rng)
    }

    /// Runs VNS drawing all randomness from the caller's generator.
    ///
    /// Two calls with identically seeded generators produce identical
    /// results; no process-global random state is touched, so
    /// independent invocations can run in parallel under an external
    /// orchestrator.
    pub fn run_with_rng<'a, R: Rng>(
        instance: &'a Instance,
        config: &VnsConfig,
        rng: &mut R,
    ) -> VnsResult<'a> {
        assert!(config.k_max >= 1, "k_max must be at least 1");

        let start = Instant::now();
        let out_of_time = || config.time_limit.is_some_and(|limit| start.elapsed() >= limit);

        let construction = generate_initial_solution_multi(instance, config.num_starts, rng);
        if let Some(failure) = construction.failure {
            // The search still runs; the result reports infeasibility
            warn!("starting from a flagged infeasible solution: {failure}");
        }

        let initial = construction.solution.clone();
        let mut current = construction.solution;
        let mut best = current.clone();

        let mut iteration = 0;
        'search: while iteration < config.max_iterations && !out_of_time() {
            let mut k = 1;
            while k <= config.k_max {
                if out_of_time() {
                    break 'search;
                }

                let shaken = shake(&current, k, rng);
                let candidate = vnd(shaken);

                if candidate.is_better_than(&current) {
                    current = candidate;
                    if current.is_better_than(&best) {
                        best = current.clone();
                    }
                    k = 1;
                } else {
                    k += 1;
                }
            }

            iteration += 1;
            debug!(
                "iteration {iteration}: best cycle time {}",
                best.cycle_time()
            );
        }

        VnsResult {
            initial,
            best,
            iterations: iteration,
            elapsed: start.elapsed(),
            construction_failure: construction.failure,
        }
    }
}

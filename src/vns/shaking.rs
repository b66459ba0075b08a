//! Shaking: randomized perturbation indexed by neighborhood size.

use log::trace;
use rand::seq::index;
use rand::Rng;

use crate::solution::Solution;

/// Attempts with fresh randomness before giving up on a neighborhood.
const MAX_ATTEMPTS: usize = 10;

/// Generates a feasible neighbor of `solution` in the k-th neighborhood.
///
/// The perturbation scope grows with `k`:
/// - k=1: swap the stations of two distinct random tasks
/// - k=2: reassign up to 3 random tasks, each to an independently random
///   station
/// - k=3: swap the workers of two distinct random stations and reassign
///   up to 2 random tasks
/// - any other `k`, or an instance too small for the move: bump one
///   random task's station by one, modulo the station count
///
/// Every candidate passes a capability pre-check over all tasks and a
/// precedence check before the full evaluation. After 10 rejected
/// candidates the input solution is returned unchanged: a bounded no-op,
/// not an error, so the outer loop's cost per step stays bounded.
pub fn shake<'a, R: Rng>(solution: &Solution<'a>, k: usize, rng: &mut R) -> Solution<'a> {
    let instance = solution.instance();
    let n = instance.num_tasks();
    let stations = instance.num_stations();

    for _ in 0..MAX_ATTEMPTS {
        let mut task_station = solution.task_station().to_vec();
        let mut worker_station = solution.worker_station().to_vec();

        match k {
            1 if n >= 2 => {
                let picked = index::sample(rng, n, 2);
                task_station.swap(picked.index(0), picked.index(1));
            }
            2 if n >= 1 && stations >= 1 => {
                for _ in 0..n.min(3) {
                    let task = rng.random_range(0..n);
                    task_station[task] = Some(rng.random_range(0..stations));
                }
            }
            3 if stations >= 2 => {
                let picked = index::sample(rng, stations, 2);
                worker_station.swap(picked.index(0), picked.index(1));
                for _ in 0..n.min(2) {
                    let task = rng.random_range(0..n);
                    task_station[task] = Some(rng.random_range(0..stations));
                }
            }
            _ => {
                if n > 0 && stations > 0 {
                    let task = rng.random_range(0..n);
                    task_station[task] = task_station[task].map(|s| (s + 1) % stations);
                }
            }
        }

        if !instance.capability_feasible(&task_station, &worker_station) {
            continue;
        }
        if !instance.precedence_feasible(&task_station) {
            continue;
        }

        let mut candidate = Solution::new(instance, task_station, worker_station);
        candidate.evaluate();
        if candidate.is_feasible() {
            return candidate;
        }
    }

    trace!("no feasible neighbor in N_{k} after {MAX_ATTEMPTS} attempts");
    solution.clone()
}

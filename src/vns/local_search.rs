//! First-improvement local searches and their VND composition.
//!
//! Both searches aim at the bottleneck station (the station holding the
//! maximum workload, ties going to the lowest index) and accept the
//! first strictly improving feasible neighbor, restarting the bottleneck
//! scan from scratch after every accepted move. Candidates are compared
//! against the best solution found so far within the search, not against
//! the neighbor just tried.

use crate::solution::Solution;

/// Relocates tasks out of the bottleneck station (first improvement).
///
/// For every task currently in the bottleneck station, tries every other
/// station, checking precedence feasibility and the destination worker's
/// capability before paying for a full evaluation. Terminates when no
/// single-task relocation improves the current solution, or immediately
/// when the current solution is infeasible or some station time is
/// infinite.
pub fn task_reassignment_search(solution: Solution<'_>) -> Solution<'_> {
    let instance = solution.instance();
    let n = instance.num_tasks();
    let stations = instance.num_stations();

    let mut current = solution;

    loop {
        current.evaluate();
        if !current.is_feasible() || current.station_times().iter().any(|t| t.is_infinite()) {
            return current;
        }

        let Some(bottleneck) = bottleneck_station(current.station_times()) else {
            return current;
        };

        let mut improved = false;

        'moves: for task in 0..n {
            if current.task_station()[task] != Some(bottleneck) {
                continue;
            }

            for target in 0..stations {
                if target == bottleneck {
                    continue;
                }

                let mut task_station = current.task_station().to_vec();
                task_station[task] = Some(target);

                if !instance.precedence_feasible(&task_station) {
                    continue;
                }
                if !instance.is_capable(current.worker_station()[target], task) {
                    continue;
                }

                let mut neighbor =
                    Solution::new(instance, task_station, current.worker_station().to_vec());
                neighbor.evaluate();

                if neighbor.is_feasible() && neighbor.is_better_than(&current) {
                    current = neighbor;
                    improved = true;
                    break 'moves;
                }
            }
        }

        if !improved {
            return current;
        }
    }
}

/// Swaps the bottleneck station's worker with other stations' workers
/// (first improvement).
///
/// Both stations of a swap change workers, so the capability pre-check
/// re-validates the tasks of both rosters before the full evaluation.
/// Termination mirrors [`task_reassignment_search`].
pub fn worker_swap_search(solution: Solution<'_>) -> Solution<'_> {
    let instance = solution.instance();
    let stations = instance.num_stations();

    let mut current = solution;

    loop {
        current.evaluate();
        if !current.is_feasible() || current.station_times().iter().any(|t| t.is_infinite()) {
            return current;
        }

        let Some(bottleneck) = bottleneck_station(current.station_times()) else {
            return current;
        };

        let mut improved = false;

        for other in 0..stations {
            if other == bottleneck {
                continue;
            }

            let mut worker_station = current.worker_station().to_vec();
            worker_station.swap(bottleneck, other);

            let rosters_capable =
                current
                    .task_station()
                    .iter()
                    .enumerate()
                    .all(|(task, station)| match *station {
                        Some(s) if s == bottleneck || s == other => {
                            instance.is_capable(worker_station[s], task)
                        }
                        _ => true,
                    });
            if !rosters_capable {
                continue;
            }

            let mut neighbor =
                Solution::new(instance, current.task_station().to_vec(), worker_station);
            neighbor.evaluate();

            if neighbor.is_feasible() && neighbor.is_better_than(&current) {
                current = neighbor;
                improved = true;
                break;
            }
        }

        if !improved {
            return current;
        }
    }
}

/// Variable Neighborhood Descent over the two local searches: task
/// reassignment at ℓ=1, worker swap at ℓ=2, resetting to ℓ=1 whenever a
/// search improves. Terminates when neither improves in sequence.
pub fn vnd(solution: Solution<'_>) -> Solution<'_> {
    let mut current = solution;
    let mut level = 1;

    while level <= 2 {
        let candidate = if level == 1 {
            task_reassignment_search(current.clone())
        } else {
            worker_swap_search(current.clone())
        };

        if candidate.is_better_than(&current) {
            current = candidate;
            level = 1;
        } else {
            level += 1;
        }
    }

    current
}

/// Index of the station with the maximum workload; ties go to the first
/// one in scan order.
fn bottleneck_station(station_times: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (s, &t) in station_times.iter().enumerate() {
        match best {
            Some(b) if station_times[b] >= t => {}
            _ => best = Some(s),
        }
    }
    best
}

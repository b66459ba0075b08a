//! Solution data, evaluation, ordering, and output formatting.

use std::fmt;

use crate::instance::Instance;

/// One candidate assignment for an ALWABP instance.
///
/// Two coupled structures form the core state: `task_station[i]` is the
/// station holding task `i` (`None` while unassigned during
/// construction), and `worker_station[s]` is the worker staffing station
/// `s`, kept as a permutation of all workers. The [`Instance`] is
/// borrowed read-only; the assignment arrays are owned by the solution
/// and never aliased with another solution's.
///
/// Feasibility, per-station workloads, and cycle time are cached by
/// [`evaluate`](Self::evaluate). A freshly built solution reports
/// infeasible until evaluated. Solutions are cheap, short-lived values:
/// shaking and local search build them in bulk and drop the ones that do
/// not improve.
#[derive(Debug, Clone)]
pub struct Solution<'a> {
    instance: &'a Instance,
    task_station: Vec<Option<usize>>,
    worker_station: Vec<usize>,
    is_feasible: bool,
    cycle_time: f64,
    station_times: Vec<f64>,
}

impl<'a> Solution<'a> {
    /// Builds an unevaluated solution from explicit assignment arrays.
    pub fn new(
        instance: &'a Instance,
        task_station: Vec<Option<usize>>,
        worker_station: Vec<usize>,
    ) -> Self {
        Self {
            instance,
            task_station,
            worker_station,
            is_feasible: false,
            cycle_time: f64::INFINITY,
            station_times: Vec::new(),
        }
    }

    /// The instance this solution assigns.
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Station of each task (`None` = unassigned).
    pub fn task_station(&self) -> &[Option<usize>] {
        &self.task_station
    }

    /// Worker staffing each station.
    pub fn worker_station(&self) -> &[usize] {
        &self.worker_station
    }

    /// Whether the last evaluation found the solution feasible.
    pub fn is_feasible(&self) -> bool {
        self.is_feasible
    }

    /// Maximum station workload, or +∞ when infeasible.
    pub fn cycle_time(&self) -> f64 {
        self.cycle_time
    }

    /// Total workload per station, all +∞ when infeasible.
    pub fn station_times(&self) -> &[f64] {
        &self.station_times
    }

    /// Recomputes feasibility, station workloads, and cycle time from
    /// scratch.
    ///
    /// No incremental state is kept; a full pass is O(n + precedences).
    /// The order of checks is: valid station indices, precedence pairs,
    /// then per-station accumulation with an incapacity short-circuit.
    /// Idempotent; the only effect is on this solution's cached fields.
    pub fn evaluate(&mut self) {
        let inst = self.instance;
        let stations = inst.num_stations();

        if self.worker_station.len() != stations
            || self
                .worker_station
                .iter()
                .any(|&w| w >= inst.num_workers())
            || self
                .task_station
                .iter()
                .any(|s| s.is_none_or(|s| s >= stations))
        {
            self.mark_infeasible();
            return;
        }

        for &(i, j) in inst.precedences() {
            if self.task_station[i] > self.task_station[j] {
                self.mark_infeasible();
                return;
            }
        }

        let mut station_times = vec![0.0; stations];
        for (task, station) in self.task_station.iter().enumerate() {
            if let Some(s) = *station {
                let worker = self.worker_station[s];
                match inst.time(worker, task) {
                    Some(t) => station_times[s] += t,
                    None => {
                        self.mark_infeasible();
                        return;
                    }
                }
            }
        }

        self.cycle_time = station_times.iter().copied().fold(0.0, f64::max);
        self.station_times = station_times;
        self.is_feasible = true;
    }

    fn mark_infeasible(&mut self) {
        self.is_feasible = false;
        self.cycle_time = f64::INFINITY;
        self.station_times = vec![f64::INFINITY; self.instance.num_stations()];
    }

    /// Ordering used throughout the search: a feasible solution is
    /// strictly better than an infeasible one regardless of cycle time;
    /// among feasible solutions a strictly smaller cycle time wins. Ties
    /// are not distinguished.
    pub fn is_better_than(&self, other: &Self) -> bool {
        if self.is_feasible != other.is_feasible {
            return self.is_feasible;
        }
        self.cycle_time < other.cycle_time
    }
}

/// Report format: the cycle time (or an infeasibility marker), then one
/// line per station with its worker and sorted task list, all 1-based.
///
/// Pure formatting; the caller must have evaluated the solution first.
impl fmt::Display for Solution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_feasible {
            writeln!(f, "{}", f64::INFINITY)?;
            return write!(f, "Infeasible solution");
        }

        writeln!(f, "{:.6}", self.cycle_time)?;

        let stations = self.instance.num_stations();
        let mut station_tasks = vec![Vec::new(); stations];
        for (task, station) in self.task_station.iter().enumerate() {
            if let Some(s) = *station {
                station_tasks[s].push(task + 1);
            }
        }

        for (s, tasks) in station_tasks.iter().enumerate() {
            let list = tasks
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            write!(
                f,
                "Station {}: Worker {} -> Tasks: {}",
                s + 1,
                self.worker_station[s] + 1,
                list
            )?;
            if s + 1 < stations {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 3 tasks, 2 workers, worker 1 incapable of task 2, precedence 1 → 2
    fn instance() -> Instance {
        Instance::new(
            vec![
                vec![Some(2.0), Some(4.0)],
                vec![Some(3.0), Some(1.0)],
                vec![Some(5.0), None],
            ],
            vec![(1, 2)],
        )
        .expect("valid instance")
    }

    #[test]
    fn test_evaluate_sums_station_times() {
        let inst = instance();
        let mut sol = Solution::new(&inst, vec![Some(0), Some(1), Some(0)], vec![0, 1]);
        sol.evaluate();

        assert!(sol.is_feasible());
        assert_eq!(sol.station_times(), &[7.0, 1.0]);
        assert_eq!(sol.cycle_time(), 7.0, "cycle time is the max station time");
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let inst = instance();
        let mut sol = Solution::new(&inst, vec![Some(0), Some(0), Some(0)], vec![0, 1]);

        sol.evaluate();
        let first = (
            sol.is_feasible(),
            sol.cycle_time(),
            sol.station_times().to_vec(),
        );
        sol.evaluate();
        let second = (
            sol.is_feasible(),
            sol.cycle_time(),
            sol.station_times().to_vec(),
        );

        assert_eq!(first, second);
    }

    #[test]
    fn test_unevaluated_solution_reports_infeasible() {
        let inst = instance();
        let sol = Solution::new(&inst, vec![Some(0); 3], vec![0, 1]);
        assert!(!sol.is_feasible());
        assert!(sol.cycle_time().is_infinite());
    }

    #[test]
    fn test_evaluate_rejects_unassigned_task() {
        let inst = instance();
        let mut sol = Solution::new(&inst, vec![Some(0), None, Some(0)], vec![0, 1]);
        sol.evaluate();

        assert!(!sol.is_feasible());
        assert!(sol.cycle_time().is_infinite());
        assert!(sol.station_times().iter().all(|t| t.is_infinite()));
    }

    #[test]
    fn test_evaluate_rejects_station_out_of_range() {
        let inst = instance();
        let mut sol = Solution::new(&inst, vec![Some(0), Some(2), Some(0)], vec![0, 1]);
        sol.evaluate();
        assert!(!sol.is_feasible());
    }

    #[test]
    fn test_evaluate_rejects_precedence_violation() {
        let inst = instance();
        // precedence (task 0 → task 1) with task 0 on the later station
        let mut sol = Solution::new(&inst, vec![Some(1), Some(0), Some(1)], vec![0, 1]);
        sol.evaluate();
        assert!(!sol.is_feasible());
    }

    #[test]
    fn test_evaluate_allows_same_station_precedence() {
        let inst = instance();
        let mut sol = Solution::new(&inst, vec![Some(0), Some(0), Some(0)], vec![0, 1]);
        sol.evaluate();

        assert!(sol.is_feasible());
        assert_eq!(sol.cycle_time(), 10.0);
    }

    #[test]
    fn test_evaluate_rejects_incapable_worker() {
        let inst = instance();
        // task 2 on station 1 staffed by worker 1, which cannot perform it
        let mut sol = Solution::new(&inst, vec![Some(0), Some(0), Some(1)], vec![0, 1]);
        sol.evaluate();
        assert!(!sol.is_feasible());
    }

    #[test]
    fn test_evaluate_with_swapped_workers() {
        let inst = instance();
        // worker 1 on station 0, worker 0 on station 1: task 2 must use worker 0
        let mut sol = Solution::new(&inst, vec![Some(0), Some(0), Some(1)], vec![1, 0]);
        sol.evaluate();

        assert!(sol.is_feasible());
        assert_eq!(sol.station_times(), &[5.0, 5.0]);
        assert_eq!(sol.cycle_time(), 5.0);
    }

    #[test]
    fn test_ordering_feasible_beats_infeasible() {
        let inst = instance();
        let mut feasible = Solution::new(&inst, vec![Some(0), Some(0), Some(0)], vec![0, 1]);
        feasible.evaluate();
        let mut infeasible = Solution::new(&inst, vec![Some(1), Some(0), Some(0)], vec![0, 1]);
        infeasible.evaluate();

        assert!(feasible.is_better_than(&infeasible));
        assert!(!infeasible.is_better_than(&feasible));
    }

    #[test]
    fn test_ordering_smaller_cycle_time_wins() {
        let inst = instance();
        let mut wide = Solution::new(&inst, vec![Some(0), Some(0), Some(0)], vec![0, 1]);
        wide.evaluate();
        let mut tight = Solution::new(&inst, vec![Some(0), Some(1), Some(0)], vec![0, 1]);
        tight.evaluate();

        assert!(tight.cycle_time() < wide.cycle_time());
        assert!(tight.is_better_than(&wide));
        assert!(!wide.is_better_than(&tight));
    }

    #[test]
    fn test_ordering_ties_are_not_distinguished() {
        let inst = instance();
        let mut a = Solution::new(&inst, vec![Some(0), Some(0), Some(0)], vec![0, 1]);
        a.evaluate();
        let b = a.clone();

        assert!(!a.is_better_than(&b));
        assert!(!b.is_better_than(&a));
    }

    #[test]
    fn test_display_matches_evaluated_cycle_time() {
        let inst = instance();
        let mut sol = Solution::new(&inst, vec![Some(0), Some(1), Some(0)], vec![0, 1]);
        sol.evaluate();

        let rendered = sol.to_string();
        let first_line = rendered.lines().next().expect("non-empty output");
        let printed: f64 = first_line.parse().expect("cycle time parses back");
        assert!((printed - sol.cycle_time()).abs() < 1e-6);
    }

    #[test]
    fn test_display_lists_stations_with_sorted_tasks() {
        let inst = instance();
        let mut sol = Solution::new(&inst, vec![Some(0), Some(1), Some(1)], vec![1, 0]);
        sol.evaluate();
        assert!(sol.is_feasible());

        let rendered = sol.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Station 1: Worker 2 -> Tasks: 1");
        assert_eq!(lines[2], "Station 2: Worker 1 -> Tasks: 2 3");
    }

    #[test]
    fn test_display_infeasible_marker() {
        let inst = instance();
        let mut sol = Solution::new(&inst, vec![None; 3], vec![0, 1]);
        sol.evaluate();

        let rendered = sol.to_string();
        assert_eq!(rendered, "inf\nInfeasible solution");
    }
}

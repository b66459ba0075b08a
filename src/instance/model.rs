//! Instance data and derived precedence adjacency.

use thiserror::Error;

/// Errors raised while building or parsing an [`Instance`].
///
/// All of these are fatal: no partially constructed instance is ever
/// handed back to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedInstance {
    /// The input ended before the task count was read.
    #[error("missing task count")]
    MissingTaskCount,
    /// The task count line did not parse as a non-negative integer.
    #[error("invalid task count: '{line}'")]
    InvalidTaskCount {
        /// The offending input line.
        line: String,
    },
    /// The input ended before all time-matrix rows were read.
    #[error("missing time row for task {row}")]
    MissingTimeRow {
        /// 1-based index of the missing row.
        row: usize,
    },
    /// A time-matrix cell did not parse as a time or the `Inf` marker.
    #[error("invalid time '{token}' in row {row}")]
    InvalidTime {
        /// 1-based index of the row holding the cell.
        row: usize,
        /// The offending token.
        token: String,
    },
    /// A time-matrix row has a different column count than the first row.
    #[error("row {row} has {found} columns, expected {expected}")]
    RowLengthMismatch {
        /// 1-based index of the inconsistent row.
        row: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count actually found.
        found: usize,
    },
    /// A precedence line is not a pair of integers.
    #[error("invalid precedence line: '{line}'")]
    InvalidPrecedence {
        /// The offending input line.
        line: String,
    },
    /// A precedence pair references a task outside `1..=num_tasks`.
    #[error("precedence references task {task}, instance has {num_tasks} tasks")]
    PrecedenceOutOfBounds {
        /// The out-of-range 1-based task index.
        task: usize,
        /// Number of tasks in the instance.
        num_tasks: usize,
    },
}

/// An immutable ALWABP instance.
///
/// Holds `n` tasks and `k` workers. The number of stations equals the
/// number of workers: every station is staffed by exactly one worker and
/// every worker occupies exactly one station.
///
/// Processing times are stored transposed as `task_times[worker][task]`,
/// with `None` marking a worker as incapable of a task (the instance
/// format's infinite-time cells). Precedence pairs `(i, j)` mean task `i`
/// must be assigned to a station index no greater than task `j`'s; they
/// are kept 0-based together with per-task predecessor and successor
/// lists built in a single pass over the pair list.
#[derive(Debug, Clone)]
pub struct Instance {
    num_tasks: usize,
    num_workers: usize,
    task_times: Vec<Vec<Option<f64>>>,
    precedences: Vec<(usize, usize)>,
    predecessors: Vec<Vec<usize>>,
    successors: Vec<Vec<usize>>,
}

impl Instance {
    /// Builds an instance from a row-major time matrix (`rows[task][worker]`,
    /// `None` = incapable) and a list of 1-based precedence pairs.
    ///
    /// The worker count is taken from the first row. Fails if any row has
    /// a different column count than the first or if a precedence pair
    /// falls outside `1..=num_tasks`.
    pub fn new(
        rows: Vec<Vec<Option<f64>>>,
        precedences: Vec<(usize, usize)>,
    ) -> Result<Self, MalformedInstance> {
        let num_tasks = rows.len();
        let num_workers = rows.first().map_or(0, Vec::len);

        for (index, row) in rows.iter().enumerate() {
            if row.len() != num_workers {
                return Err(MalformedInstance::RowLengthMismatch {
                    row: index + 1,
                    expected: num_workers,
                    found: row.len(),
                });
            }
        }

        // Transpose so that lookups are task_times[worker][task]
        let task_times: Vec<Vec<Option<f64>>> = (0..num_workers)
            .map(|w| rows.iter().map(|row| row[w]).collect())
            .collect();

        let mut pairs = Vec::with_capacity(precedences.len());
        let mut predecessors = vec![Vec::new(); num_tasks];
        let mut successors = vec![Vec::new(); num_tasks];

        for (i, j) in precedences {
            for task in [i, j] {
                if task == 0 || task > num_tasks {
                    return Err(MalformedInstance::PrecedenceOutOfBounds { task, num_tasks });
                }
            }
            let (i, j) = (i - 1, j - 1);
            pairs.push((i, j));
            successors[i].push(j);
            predecessors[j].push(i);
        }

        Ok(Self {
            num_tasks,
            num_workers,
            task_times,
            precedences: pairs,
            predecessors,
            successors,
        })
    }

    /// Number of tasks.
    pub fn num_tasks(&self) -> usize {
        self.num_tasks
    }

    /// Number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Number of stations. Always equal to [`num_workers`](Self::num_workers).
    pub fn num_stations(&self) -> usize {
        self.num_workers
    }

    /// Processing time of `task` under `worker`, or `None` if the worker
    /// is incapable of the task.
    pub fn time(&self, worker: usize, task: usize) -> Option<f64> {
        self.task_times[worker][task]
    }

    /// Whether `worker` can perform `task` at all.
    pub fn is_capable(&self, worker: usize, task: usize) -> bool {
        self.task_times[worker][task].is_some()
    }

    /// The precedence pairs, 0-based.
    pub fn precedences(&self) -> &[(usize, usize)] {
        &self.precedences
    }

    /// Tasks that must not be assigned after `task` (0-based).
    pub fn predecessors(&self, task: usize) -> &[usize] {
        &self.predecessors[task]
    }

    /// Tasks that must not be assigned before `task` (0-based).
    pub fn successors(&self, task: usize) -> &[usize] {
        &self.successors[task]
    }

    /// Checks a raw task→station assignment against the precedence
    /// relation.
    ///
    /// Returns `false` if any task is unassigned or assigned out of
    /// `[0, num_stations)`, or if any pair `(i, j)` has task `i` on a
    /// higher station than task `j`. Same-station pairs are allowed.
    pub fn precedence_feasible(&self, task_station: &[Option<usize>]) -> bool {
        let stations = self.num_workers;
        if task_station
            .iter()
            .any(|s| s.is_none_or(|s| s >= stations))
        {
            return false;
        }
        self.precedences
            .iter()
            .all(|&(i, j)| task_station[i] <= task_station[j])
    }

    /// Checks that every assigned task lands on a station whose worker is
    /// capable of it. Unassigned tasks fail the check.
    pub fn capability_feasible(
        &self,
        task_station: &[Option<usize>],
        worker_station: &[usize],
    ) -> bool {
        task_station.iter().enumerate().all(|(task, station)| {
            station.is_some_and(|s| {
                s < worker_station.len() && self.is_capable(worker_station[s], task)
            })
        })
    }
}

//! Search configuration.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Seed used when the configuration does not provide one.
pub const DEFAULT_SEED: u64 = 42;

/// Configuration parameters for the VNS driver.
///
/// # Examples
///
/// ```
/// use alwabp_vns::vns::VnsConfig;
///
/// let config = VnsConfig::default()
///     .with_max_iterations(1000)
///     .with_seed(7);
/// assert_eq!(config.max_iterations, 1000);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VnsConfig {
    /// Maximum number of outer iterations (complete passes through the
    /// shaking neighborhood ladder).
    pub max_iterations: usize,
    /// Largest shaking neighborhood index; `k` runs over `1..=k_max`.
    pub k_max: usize,
    /// Independent greedy constructions the starting solution is drawn
    /// from.
    pub num_starts: usize,
    /// Wall-clock budget; `None` runs to the iteration cap.
    pub time_limit: Option<Duration>,
    /// Random seed (`None` for the default seed).
    pub seed: Option<u64>,
}

impl Default for VnsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            k_max: 3,
            num_starts: 3,
            time_limit: None,
            seed: None,
        }
    }
}

impl VnsConfig {
    /// Sets the maximum number of outer iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the largest shaking neighborhood index.
    pub fn with_k_max(mut self, k_max: usize) -> Self {
        self.k_max = k_max;
        self
    }

    /// Sets the number of independent construction starts.
    pub fn with_num_starts(mut self, num_starts: usize) -> Self {
        self.num_starts = num_starts;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

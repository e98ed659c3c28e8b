use serde::Serialize;

use crate::error::{Result, SplitError};
use crate::partition::worker::Worker;

/// Mean and maximum total weight over a worker set.
///
/// Computed on demand and passed by value; any change to a worker makes an
/// existing value stale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadStatistics {
    pub mean_weight: f64,
    pub max_weight: u64,
}

impl LoadStatistics {
    pub fn compute<H>(workers: &[Worker<H>]) -> Result<Self> {
        Self::from_totals_iter(workers.iter().map(Worker::total_weight))
    }

    pub fn from_totals(totals: &[u64]) -> Result<Self> {
        Self::from_totals_iter(totals.iter().copied())
    }

    fn from_totals_iter(totals: impl Iterator<Item = u64>) -> Result<Self> {
        let mut count = 0usize;
        let mut sum = 0u128;
        let mut max_weight = 0u64;
        for total in totals {
            count += 1;
            sum += u128::from(total);
            max_weight = max_weight.max(total);
        }
        if count == 0 {
            return Err(SplitError::InvalidArgument(
                "load statistics need at least one worker".to_string(),
            ));
        }
        Ok(Self {
            mean_weight: sum as f64 / count as f64,
            max_weight,
        })
    }

    /// Relative deviation of `total` from the mean, normalized by the max.
    /// All-empty worker sets have no deviation, so a zero max yields 0.
    pub fn skew_of(&self, total: u64) -> f64 {
        if self.max_weight == 0 {
            return 0.0;
        }
        (total as f64 - self.mean_weight) / self.max_weight as f64
    }
}

//! Aggregate absolute skew: the sum of |skew| over every worker.

use crate::error::Result;
use crate::partition::stats::LoadStatistics;
use crate::partition::worker::Worker;

/// Sum of the workers' current skews in absolute value.
///
/// Reads whatever skew each worker last computed, so call [`refresh`] first
/// after any change to the set.
pub fn aggregate_skew<H>(workers: &[Worker<H>]) -> f64 {
    workers.iter().map(|w| w.skew().abs()).sum()
}

/// Aggregate skew of a set of totals, computed from the totals alone.
pub fn aggregate_skew_of_totals(totals: &[u64]) -> Result<f64> {
    let stats = LoadStatistics::from_totals(totals)?;
    Ok(totals.iter().map(|&t| stats.skew_of(t).abs()).sum())
}

/// Recompute statistics for the set and refresh every worker's skew.
pub fn refresh<H>(workers: &mut [Worker<H>]) -> Result<LoadStatistics> {
    let stats = LoadStatistics::compute(workers)?;
    for worker in workers.iter_mut() {
        worker.refresh_skew(&stats);
    }
    Ok(stats)
}

use serde::Serialize;

use crate::config::{CandidateEvaluation, PartitionConfig, TieBreak};
use crate::error::{Result, SplitError};
use crate::partition::item::Item;
use crate::partition::skew;
use crate::partition::stats::LoadStatistics;
use crate::partition::worker::Worker;

/// Final items and total weight of one worker.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerLoad<H> {
    /// 1-based worker number, in creation order.
    pub worker: usize,
    pub total_weight: u64,
    pub items: Vec<Item<H>>,
}

/// Result of a partitioning run.
#[derive(Debug, Clone, Serialize)]
pub struct Assignment<H> {
    pub workers: Vec<WorkerLoad<H>>,
    pub stats: LoadStatistics,
    pub aggregate_skew: f64,
}

impl<H> Assignment<H> {
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Sum of all workers' totals
    pub fn total_weight(&self) -> u64 {
        self.workers.iter().map(|w| w.total_weight).sum()
    }

    pub fn item_count(&self) -> usize {
        self.workers.iter().map(|w| w.items.len()).sum()
    }

    /// Per-worker totals in worker order
    pub fn totals(&self) -> Vec<u64> {
        self.workers.iter().map(|w| w.total_weight).collect()
    }

    fn from_workers(workers: Vec<Worker<H>>) -> Result<Self> {
        let stats = LoadStatistics::compute(&workers)?;
        let aggregate_skew: f64 = workers
            .iter()
            .map(|w| stats.skew_of(w.total_weight()).abs())
            .sum();
        let workers = workers
            .into_iter()
            .map(|w| WorkerLoad {
                worker: w.id() + 1,
                total_weight: w.total_weight(),
                items: w.into_items(),
            })
            .collect();
        Ok(Self {
            workers,
            stats,
            aggregate_skew,
        })
    }
}

/// Spreads items over a fixed number of workers, keeping every worker's
/// total as close to the mean as a greedy search allows.
#[derive(Debug, Clone, Default)]
pub struct Partitioner {
    config: PartitionConfig,
}

impl Partitioner {
    pub fn new(config: PartitionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// Partition `items` in input order.
    ///
    /// With `n <= k` items every item gets a worker of its own. Otherwise the
    /// first `k` items seed `k` workers and each remaining item is placed on
    /// the worker that yields the lowest aggregate skew, ties resolved by the
    /// configured [`TieBreak`]. Runs in O(n·k²).
    ///
    /// # Errors
    ///
    /// [`SplitError::InvalidArgument`] when the worker count is zero, there
    /// are no items, a handle appears twice, or the weights sum past
    /// `u64::MAX`. Nothing is produced in any of these cases.
    pub fn partition<H: Clone + PartialEq>(&self, items: Vec<Item<H>>) -> Result<Assignment<H>> {
        let k = self.config.workers;
        let n = items.len();
        if k == 0 {
            return Err(SplitError::InvalidArgument(
                "worker count must be at least 1".to_string(),
            ));
        }
        if n == 0 {
            return Err(SplitError::InvalidArgument(
                "no items to partition".to_string(),
            ));
        }
        validate_items(&items)?;

        let mut items = items.into_iter();
        let mut workers: Vec<Worker<H>> = items
            .by_ref()
            .take(k)
            .enumerate()
            .map(|(id, item)| Worker::seeded(id, item))
            .collect();

        if n <= k {
            tracing::debug!(items = n, workers = workers.len(), "Direct assignment");
            return Assignment::from_workers(workers);
        }

        skew::refresh(&mut workers)?;
        for item in items {
            let best = self.best_worker(&mut workers, &item)?;
            tracing::trace!(worker = best + 1, weight = item.weight, "Item placed");
            workers[best].add_item(item);
            skew::refresh(&mut workers)?;
        }

        let assignment = Assignment::from_workers(workers)?;
        tracing::debug!(
            items = n,
            workers = k,
            tie_break = %self.config.tie_break,
            evaluation = %self.config.evaluation,
            aggregate_skew = assignment.aggregate_skew,
            "Greedy assignment complete"
        );
        Ok(assignment)
    }

    /// Index of the worker whose placement of `item` gives the lowest
    /// aggregate skew. Leaves `workers` as it found it.
    fn best_worker<H: Clone + PartialEq>(
        &self,
        workers: &mut [Worker<H>],
        item: &Item<H>,
    ) -> Result<usize> {
        let mut totals: Vec<u64> = workers.iter().map(Worker::total_weight).collect();
        let mut best: Option<(f64, usize)> = None;

        for index in 0..workers.len() {
            let candidate = match self.config.evaluation {
                CandidateEvaluation::ClosedForm => {
                    Self::closed_form_skew(&mut totals, index, item.weight)?
                }
                CandidateEvaluation::Speculative => Self::speculative_skew(workers, index, item)?,
            };
            best = match best {
                Some((best_skew, _)) if !self.prefers(candidate, best_skew) => best,
                _ => Some((candidate, index)),
            };
        }

        if self.config.evaluation == CandidateEvaluation::Speculative {
            skew::refresh(workers)?;
        }

        best.map(|(_, index)| index).ok_or_else(|| {
            SplitError::InvalidArgument("no workers to place item on".to_string())
        })
    }

    fn prefers(&self, candidate: f64, best: f64) -> bool {
        match self.config.tie_break {
            TieBreak::First => candidate < best,
            TieBreak::Last => candidate <= best,
        }
    }

    fn closed_form_skew(totals: &mut [u64], index: usize, weight: u64) -> Result<f64> {
        totals[index] += weight;
        let skew = skew::aggregate_skew_of_totals(totals);
        totals[index] -= weight;
        skew
    }

    fn speculative_skew<H: Clone + PartialEq>(
        workers: &mut [Worker<H>],
        index: usize,
        item: &Item<H>,
    ) -> Result<f64> {
        workers[index].add_item(item.clone());
        skew::refresh(workers)?;
        let candidate = skew::aggregate_skew(workers);
        workers[index].remove_item(&item.handle)?;
        Ok(candidate)
    }
}

/// Reject duplicate handles and weights whose sum overflows. With the sum in
/// range no worker total can overflow either.
fn validate_items<H: PartialEq>(items: &[Item<H>]) -> Result<()> {
    let mut total = 0u64;
    for (i, item) in items.iter().enumerate() {
        total = total.checked_add(item.weight).ok_or_else(|| {
            SplitError::InvalidArgument("total item weight overflows u64".to_string())
        })?;
        if items[..i].iter().any(|earlier| earlier.handle == item.handle) {
            return Err(SplitError::InvalidArgument(format!(
                "item {} duplicates an earlier item",
                i
            )));
        }
    }
    Ok(())
}

/// Partition `items` over `workers` workers with the default settings.
pub fn partition<H: Clone + PartialEq>(
    items: Vec<Item<H>>,
    workers: usize,
) -> Result<Assignment<H>> {
    Partitioner::new(PartitionConfig::new(workers)).partition(items)
}

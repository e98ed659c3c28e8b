//! Skew-minimizing partitioning of weighted items onto a fixed worker count.
//!
//! # Components
//!
//! - [`Item`]: a handle with a byte weight
//! - [`Worker`]: accumulates items and a running total, tracks its own skew
//! - [`LoadStatistics`]: mean and max total across a worker set
//! - [`skew`]: aggregate absolute skew, the objective being minimized
//! - [`Partitioner`]: two-phase assignment producing an [`Assignment`]
//!
//! # Algorithm
//!
//! With no more items than workers, each item gets its own worker (phase A).
//! Otherwise the first `k` items seed `k` workers and every remaining item goes
//! to whichever worker leaves the lowest aggregate skew (phase B).

pub mod item;
pub mod partitioner;
pub mod skew;
pub mod stats;
pub mod worker;

pub use item::Item;
pub use partitioner::{partition, Assignment, Partitioner, WorkerLoad};
pub use stats::LoadStatistics;
pub use worker::Worker;

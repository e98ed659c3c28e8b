use crate::error::{Result, SplitError};
use crate::partition::item::Item;
use crate::partition::stats::LoadStatistics;

/// A weighted bag of items.
///
/// `total_weight` always equals the sum of the held items' weights and is kept
/// up to date on every add and remove. `skew` is only meaningful right after
/// [`Worker::refresh_skew`] was called with statistics computed over the
/// current worker set.
#[derive(Debug, Clone)]
pub struct Worker<H> {
    id: usize,
    items: Vec<Item<H>>,
    total_weight: u64,
    skew: f64,
}

impl<H> Worker<H> {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            items: Vec::new(),
            total_weight: 0,
            skew: 0.0,
        }
    }

    /// Create a worker already holding its seed item
    pub fn seeded(id: usize, item: Item<H>) -> Self {
        let mut worker = Self::new(id);
        worker.add_item(item);
        worker
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn items(&self) -> &[Item<H>] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Item<H>> {
        self.items
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn skew(&self) -> f64 {
        self.skew
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add_item(&mut self, item: Item<H>) {
        self.total_weight += item.weight;
        self.items.push(item);
    }

    /// Recompute skew against statistics of the current worker set.
    pub fn refresh_skew(&mut self, stats: &LoadStatistics) {
        self.skew = stats.skew_of(self.total_weight);
    }
}

impl<H: PartialEq> Worker<H> {
    pub fn contains(&self, handle: &H) -> bool {
        self.items.iter().any(|i| &i.handle == handle)
    }

    /// Remove the most recently added item with the given handle and return it.
    pub fn remove_item(&mut self, handle: &H) -> Result<Item<H>> {
        let pos = self
            .items
            .iter()
            .rposition(|i| &i.handle == handle)
            .ok_or(SplitError::ItemNotFound { worker: self.id })?;
        let item = self.items.remove(pos);
        self.total_weight -= item.weight;
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates_total() {
        let mut worker = Worker::new(0);
        worker.add_item(Item::new("a", 10));
        worker.add_item(Item::new("b", 32));

        assert_eq!(worker.total_weight(), 42);
        assert_eq!(worker.len(), 2);
        assert_eq!(worker.items()[0].handle, "a");
        assert_eq!(worker.items()[1].handle, "b");
    }

    #[test]
    fn remove_restores_total_and_order() {
        let mut worker = Worker::seeded(1, Item::new("a", 10));
        worker.add_item(Item::new("b", 5));
        worker.add_item(Item::new("c", 7));

        let removed = worker.remove_item(&"b").unwrap();
        assert_eq!(removed.weight, 5);
        assert_eq!(worker.total_weight(), 17);
        let handles: Vec<_> = worker.items().iter().map(|i| i.handle).collect();
        assert_eq!(handles, vec!["a", "c"]);
    }

    #[test]
    fn remove_missing_item_fails() {
        let mut worker = Worker::seeded(3, Item::new("a", 10));
        let err = worker.remove_item(&"missing").unwrap_err();
        assert!(matches!(err, SplitError::ItemNotFound { worker: 3 }));
        assert_eq!(worker.total_weight(), 10);
    }

    #[test]
    fn refresh_skew_uses_supplied_stats() {
        let mut worker = Worker::seeded(0, Item::new("a", 30));
        let stats = LoadStatistics::from_totals(&[30, 10]).unwrap();
        worker.refresh_skew(&stats);
        // (30 - 20) / 30
        assert!((worker.skew() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn skew_is_stale_until_refreshed() {
        let mut worker = Worker::seeded(0, Item::new("a", 30));
        let stats = LoadStatistics::from_totals(&[30, 10]).unwrap();
        worker.refresh_skew(&stats);
        let before = worker.skew();

        worker.add_item(Item::new("b", 100));
        assert_eq!(worker.skew(), before);
    }

    #[test]
    fn contains_by_handle() {
        let worker = Worker::seeded(0, Item::new("a", 1));
        assert!(worker.contains(&"a"));
        assert!(!worker.contains(&"b"));
        assert!(!Worker::<&str>::new(1).contains(&"a"));
    }
}

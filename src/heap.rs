use crate::errors::HeapError;
use crate::collections::FxHashSet;

use std::{collections::BinaryHeap, hash::Hash, cmp::Ordering};


/// Which end of the key range is polled first
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    Min,
    Max,
}


/// Heap entry
/// - `key` is already flipped for `Order::Min`, so the std max-heap always pops the largest key
/// - `seq` breaks ties: earlier insertions pop first
#[derive(Debug)]
struct Entry<T> {
    key: f64,
    seq: u64,
    item: T,
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.total_cmp(&other.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<T> Eq for Entry<T> {}


/// Priority queue over items with a floating point key
///
/// Items are unique: adding an item equal to one already queued is rejected.
/// Uniqueness is decided by the item's own `Eq`, never by its key, so two
/// distinct items may share a priority.
#[derive(Debug)]
pub struct Heap<T> {
    order: Order,
    entries: BinaryHeap<Entry<T>>,
    members: FxHashSet<T>,
    next_seq: u64,
}

impl<T> Heap<T>
where
    T: Hash + Eq + Clone,
{

    pub fn new(order: Order) -> Self {
        Self {
            order,
            entries: BinaryHeap::new(),
            members: FxHashSet::default(),
            next_seq: 0,
        }
    }

    pub fn min() -> Self {
        Self::new(Order::Min)
    }

    pub fn max() -> Self {
        Self::new(Order::Max)
    }

    /// Queue `item` with `priority`
    /// Fails with `HeapError::Duplicate` if an equal item is already queued
    pub fn add(&mut self, item: T, priority: f64) -> Result<(), HeapError> {
        if self.members.contains(&item) {
            return Err(HeapError::Duplicate);
        }
        self.members.insert(item.clone());

        // adding 0.0 folds -0.0 into 0.0 so both signs compare equal
        let key = match self.order {
            Order::Max => priority + 0.0,
            Order::Min => -priority + 0.0,
        };
        self.entries.push(Entry { key, seq: self.next_seq, item });
        self.next_seq += 1;
        Ok(())
    }

    /// Remove and return the item with the extreme key
    pub fn poll(&mut self) -> Result<T, HeapError> {
        let Entry { item, .. } = self.entries.pop().ok_or(HeapError::Empty)?;
        self.members.remove(&item);
        Ok(item)
    }

    /// Priority of the item `poll` would return next
    pub fn peek_priority(&self) -> Option<f64> {
        self.entries.peek().map(|entry| match self.order {
            Order::Max => entry.key,
            Order::Min => -entry.key,
        })
    }

    pub fn contains(&self, item: &T) -> bool {
        self.members.contains(item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Insertion-ordered color counts.

use std::collections::HashMap;
use std::hash::Hash;

/// Counts per key, remembering the order keys were first seen.
///
/// Sorting by count is stable, so equal counts keep first-seen order and
/// results do not depend on hash iteration order.
#[derive(Debug, Clone)]
pub(crate) struct Histogram<K> {
    index: HashMap<K, usize>,
    bins: Vec<(K, usize)>,
}

impl<K: Eq + Hash + Clone> Histogram<K> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            bins: Vec::new(),
        }
    }

    /// Add `n` to the count for `key`.
    pub fn add(&mut self, key: K, n: usize) {
        match self.index.get(&key) {
            Some(&i) => self.bins[i].1 += n,
            None => {
                self.index.insert(key.clone(), self.bins.len());
                self.bins.push((key, n));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Bins in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &(K, usize)> {
        self.bins.iter()
    }

    /// Bins by descending count, first-seen order among equal counts.
    pub fn into_sorted(self) -> Vec<(K, usize)> {
        let mut bins = self.bins;
        bins.sort_by(|a, b| b.1.cmp(&a.1));
        bins
    }
}

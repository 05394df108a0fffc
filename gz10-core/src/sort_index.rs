//! Sorted identifier index
//!
//! Maps identifiers back to their storage row when the identifier column is
//! not sorted on disk. The index pairs every identifier with its original row,
//! stable-sorts the pairs by identifier, and answers lookups by binary search.
//!
//! Duplicate identifiers resolve to the first pair in sorted order, which
//! (because the sort is stable) is the lowest original row.

use alloc::vec::Vec;
use core::borrow::Borrow;

/// Identifiers in ascending order, each paired with its original row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortIndex<K> {
    entries: Vec<(K, usize)>,
}

impl<K: Ord> SortIndex<K> {
    /// Build the index from identifiers in storage order. O(n log n).
    pub fn build<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut entries: Vec<(K, usize)> = ids
            .into_iter()
            .enumerate()
            .map(|(row, id)| (id, row))
            .collect();
        // Stable: equal identifiers keep their storage order
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Self { entries }
    }

    /// Original row of `key`, or `None` when the key is absent
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let at = self
            .entries
            .partition_point(|(id, _)| Borrow::<Q>::borrow(id) < key);
        match self.entries.get(at) {
            Some((id, row)) if Borrow::<Q>::borrow(id) == key => Some(*row),
            _ => None,
        }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.position(key).is_some()
    }
}

impl<K> SortIndex<K> {
    /// Number of indexed rows
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers in ascending order
    pub fn sorted_ids(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(id, _)| id)
    }

    /// Storage rows in sorted-identifier order (the sorting permutation)
    pub fn permutation(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|&(_, row)| row)
    }
}

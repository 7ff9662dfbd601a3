//! Age Index - bucket-ordered container keyed by a bounded integer
//!
//! One bucket per key in `[0, max_key]`, each bucket a singly linked chain.
//! Inserting prepends to the chain, so insertion is O(1) and a full ordered
//! walk is O(n + max_key). Elements sharing a key come out most recent first.
//!
//! Example: inserting (3, a), (1, b), (2, c), (1, d), (2, e) walks ascending
//! as [d, b, e, c, a].
//!
//! Not synchronized; the owner guards it.

use std::iter::FusedIterator;
use std::ops::Range;
use thiserror::Error;

use crate::order::Order;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgeIndexError {
    #[error("index capacity must be greater than 0, got {0}")]
    InvalidCapacity(i32),
    #[error("key {key} is outside the range [0, {max_key}]")]
    OutOfRange { key: i32, max_key: i32 },
}

/// Chain link. `next` points into the same node slab.
#[derive(Debug, Clone)]
struct Node<T> {
    item: T,
    next: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct AgeIndex<T> {
    heads: Vec<Option<usize>>,
    nodes: Vec<Node<T>>,
    max_key: i32,
}

impl<T> AgeIndex<T> {
    pub fn new(max_key: i32) -> Result<Self, AgeIndexError> {
        if max_key < 1 {
            return Err(AgeIndexError::InvalidCapacity(max_key));
        }
        Ok(Self {
            heads: vec![None; max_key as usize + 1],
            nodes: Vec::new(),
            max_key,
        })
    }

    /// Prepend `item` to the bucket for `key`. O(1).
    pub fn insert(&mut self, key: i32, item: T) -> Result<(), AgeIndexError> {
        if key < 0 || key > self.max_key {
            return Err(AgeIndexError::OutOfRange {
                key,
                max_key: self.max_key,
            });
        }
        let bucket = key as usize;
        let slot = self.nodes.len();
        self.nodes.push(Node {
            item,
            next: self.heads[bucket],
        });
        self.heads[bucket] = Some(slot);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn max_key(&self) -> i32 {
        self.max_key
    }

    pub fn iter(&self, order: Order) -> Iter<'_, T> {
        Iter {
            index: self,
            buckets: 0..self.heads.len(),
            order,
            cursor: None,
            remaining: self.nodes.len(),
        }
    }

    /// Lowest key first; within a key, most recently inserted first.
    pub fn ascending(&self) -> Iter<'_, T> {
        self.iter(Order::Asc)
    }

    /// Highest key first; within a key, most recently inserted first.
    pub fn descending(&self) -> Iter<'_, T> {
        self.iter(Order::Desc)
    }

    /// Materialize the whole index in the given order. O(n + max_key).
    pub fn to_ordered_vec(&self, order: Order) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.iter(order).cloned());
        out
    }
}

impl<'a, T> IntoIterator for &'a AgeIndex<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.ascending()
    }
}

/// Lazy walk over an [`AgeIndex`]. Every call to `iter` starts a fresh one.
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    index: &'a AgeIndex<T>,
    buckets: Range<usize>,
    order: Order,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn next_bucket(&mut self) -> Option<usize> {
        match self.order {
            Order::Asc => self.buckets.next(),
            Order::Desc => self.buckets.next_back(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor.is_none() {
            let bucket = self.next_bucket()?;
            self.cursor = self.index.heads[bucket];
        }
        let index = self.index;
        let node = &index.nodes[self.cursor?];
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> AgeIndex<i32> {
        let mut index = AgeIndex::new(5).unwrap();
        for key in [1, 4, 0, 2, 5, 3] {
            index.insert(key, key).unwrap();
        }
        index
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            AgeIndex::<()>::new(0).unwrap_err(),
            AgeIndexError::InvalidCapacity(0)
        );
        assert!(AgeIndex::<()>::new(-3).is_err());
    }

    #[test]
    fn test_key_out_of_range() {
        let mut index = AgeIndex::new(1).unwrap();
        assert_eq!(
            index.insert(2, "too old"),
            Err(AgeIndexError::OutOfRange { key: 2, max_key: 1 })
        );
        assert!(index.insert(-1, "negative").is_err());
        assert!(index.is_empty());

        // Both bounds are inclusive
        index.insert(0, "zero").unwrap();
        index.insert(1, "one").unwrap();
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_integer_asc_order() {
        let index = filled();
        assert_eq!(index.len(), 6);
        assert_eq!(index.to_ordered_vec(Order::Asc), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_integer_desc_order() {
        let index = filled();
        assert_eq!(index.to_ordered_vec(Order::Desc), vec![5, 4, 3, 2, 1, 0]);

        let mut asc = index.to_ordered_vec(Order::Asc);
        asc.reverse();
        assert_eq!(asc, index.to_ordered_vec(Order::Desc));
    }

    #[test]
    fn test_same_key_is_most_recent_first() {
        let mut index = AgeIndex::new(3).unwrap();
        index.insert(1, "x").unwrap();
        index.insert(1, "y").unwrap();
        assert_eq!(index.to_ordered_vec(Order::Asc), vec!["y", "x"]);
        assert_eq!(index.to_ordered_vec(Order::Desc), vec!["y", "x"]);
    }

    #[test]
    fn test_mixed_keys_walk() {
        let mut index = AgeIndex::new(3).unwrap();
        for (key, item) in [(3, "a"), (1, "b"), (2, "c"), (1, "d"), (2, "e")] {
            index.insert(key, item).unwrap();
        }
        assert_eq!(
            index.to_ordered_vec(Order::Asc),
            vec!["d", "b", "e", "c", "a"]
        );
        assert_eq!(
            index.to_ordered_vec(Order::Desc),
            vec!["a", "e", "c", "d", "b"]
        );
    }

    #[test]
    fn test_snapshot_sizes_match() {
        let mut index = AgeIndex::new(100).unwrap();
        for n in 0..250 {
            index.insert((n * 37) % 101, n).unwrap();
        }
        let asc = index.to_ordered_vec(Order::Asc);
        let mut desc = index.to_ordered_vec(Order::Desc);
        assert_eq!(index.len(), 250);
        assert_eq!(asc.len(), 250);
        assert_eq!(desc.len(), 250);

        // Buckets reverse, chains do not
        desc.reverse();
        let mut asc_keys: Vec<i32> = asc.iter().map(|n| (n * 37) % 101).collect();
        let desc_keys: Vec<i32> = desc.iter().map(|n| (n * 37) % 101).collect();
        assert!(asc_keys.windows(2).all(|w| w[0] <= w[1]));
        asc_keys.sort_unstable();
        assert_eq!(asc_keys, desc_keys);
    }

    #[test]
    fn test_iterators_are_restartable() {
        let index = filled();
        let first: Vec<_> = index.ascending().copied().collect();
        let second: Vec<_> = index.ascending().copied().collect();
        assert_eq!(first, second);

        let mut it = index.descending();
        assert_eq!(it.len(), 6);
        assert_eq!(it.next(), Some(&5));
        assert_eq!(it.len(), 5);
        assert_eq!((&index).into_iter().next(), Some(&0));
    }

    #[test]
    fn test_empty_index_walks_nothing() {
        let index = AgeIndex::<u8>::new(10).unwrap();
        assert_eq!(index.ascending().next(), None);
        assert!(index.to_ordered_vec(Order::Desc).is_empty());
    }
}

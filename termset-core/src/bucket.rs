//! Bucket - sorted bounded run of terms
//!
//! A bucket is the unit of storage inside a set: a dynamically sized array of
//! terms kept strictly increasing under the total order of [`Term`]. The set
//! bounds every bucket by its configured `max_bucket_size`; the bucket itself
//! only guarantees sortedness and uniqueness, and may briefly exceed the bound
//! by one item after an insert until the owner splits it.
//!
//! ## Range predicate
//!
//! [`Bucket::item_compare`] is the three-way predicate the set binary-searches
//! the bucket list with. It compares a bucket *as a range* against a single
//! item, answering which side of the bucket the item falls on. An empty bucket
//! answers `Equal` so that it acts as a universal sink for the first insert.

use crate::term::Term;
use std::cmp::Ordering;
use std::slice;

/// Outcome of a bucket-level insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketAddResult {
    /// Item was inserted at this position within the bucket
    Added(usize),
    /// An equal item already sits at this position; the incoming item was freed
    Duplicate(usize),
}

/// Sorted bounded array of terms
///
/// Owns its items: dropping the bucket releases every contained term.
#[derive(Debug, Default)]
pub struct Bucket {
    items: Vec<Term>,
}

impl Bucket {
    /// Create an empty bucket with no allocation
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create an empty bucket with reserved capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Wrap an already-sorted, duplicate-free item run as a bucket
    ///
    /// Caller contract: `items` is strictly increasing under the term order.
    /// Used by bulk loading, where the caller vouches for the input.
    pub fn from_sorted_items(items: Vec<Term>) -> Self {
        Self { items }
    }

    /// Insert an item at its sorted position, detecting duplicates
    ///
    /// Binary-searches for the item. On a hit the incoming item is dropped and
    /// the index of the existing copy is reported; otherwise the item is
    /// inserted at its lower bound. Sortedness and uniqueness hold afterwards.
    /// The bucket may now exceed the owner's size limit by one; the owner is
    /// expected to split it.
    pub fn add(&mut self, item: Term) -> BucketAddResult {
        match self.items.binary_search(&item) {
            // Incoming `item` is dropped here, freeing its subtree
            Ok(existing) => BucketAddResult::Duplicate(existing),
            Err(insertion) => {
                self.items.insert(insertion, item);
                BucketAddResult::Added(insertion)
            }
        }
    }

    /// Split off the upper half into a new bucket
    ///
    /// Partitions at `len / 2`: this bucket retains the lower half, the
    /// returned bucket takes ownership of the upper half (no clones). The new
    /// bucket is allocated with the same capacity as this one so both sides
    /// can refill without reallocation. An empty bucket splits into another
    /// empty, unallocated bucket.
    pub fn split(&mut self) -> Bucket {
        if self.items.is_empty() {
            return Bucket::new();
        }

        let mid = self.items.len() / 2;
        let mut upper = Vec::with_capacity(self.items.capacity());
        upper.extend(self.items.drain(mid..));
        Bucket { items: upper }
    }

    /// Range predicate: which side of this bucket does `item` fall on?
    ///
    /// - Empty bucket: `Equal` (universal sink)
    /// - `item` below the first element: `Greater` (the bucket is greater)
    /// - `item` above the last element: `Less`
    /// - Otherwise, including equality with either boundary: `Equal`
    pub fn item_compare(&self, item: &Term) -> Ordering {
        let (Some(first), Some(last)) = (self.items.first(), self.items.last()) else {
            return Ordering::Equal;
        };

        if item < first {
            Ordering::Greater
        } else if item > last {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }

    /// Binary-search for an exact item, returning its index on a hit
    pub fn find(&self, item: &Term) -> Option<usize> {
        self.items.binary_search(item).ok()
    }

    /// Borrow the item at `index`
    pub fn get(&self, index: usize) -> Option<&Term> {
        self.items.get(index)
    }

    /// Remove and return the item at `index`, shifting the tail down
    ///
    /// Panics if `index` is out of bounds; callers locate indices through
    /// [`Bucket::find`] first.
    pub fn remove(&mut self, index: usize) -> Term {
        self.items.remove(index)
    }

    /// Number of items in the bucket
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the bucket holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Reserved capacity of the underlying array
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Smallest item, if any
    pub fn first(&self) -> Option<&Term> {
        self.items.first()
    }

    /// Largest item, if any
    pub fn last(&self) -> Option<&Term> {
        self.items.last()
    }

    /// Iterate items in sorted order
    pub fn iter(&self) -> slice::Iter<'_, Term> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Bucket {
    type Item = &'a Term;
    type IntoIter = slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

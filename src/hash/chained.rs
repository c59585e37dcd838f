//! A fixed-capacity chained hash table of hashable items.
//!
//! Items hash to one of a fixed number of buckets and are appended to
//! that bucket's chain, so the table is a multiset: equal items coexist
//! and all land in the same chain, which is what makes duplicate
//! enumeration with resumed searches a single-chain scan.
//!
//! # Complexity
//!
//! With n items in c buckets, chains average n/c items.
//!
//! | Operation   | Average  | Worst |
//! |-------------|----------|-------|
//! | `insert`    | O(1)     | O(1)  |
//! | `search`    | O(n/c)   | O(n)  |
//! | `delete`    | O(n/c)   | O(n)  |
//! | `go_forth`  | O(1) amortized over a full traversal | O(c) |
//!
//! # Examples
//!
//! ```rust
//! use cursory::prelude::*;
//!
//! let mut table = ChainedHashTable::new(16);
//! table.insert("rook");
//! table.insert("pawn");
//! table.insert("pawn");
//!
//! assert_eq!(table.frequency(&"pawn"), 2);
//!
//! table.search(&"rook");
//! assert!(table.item_exists());
//! ```

use std::hash::Hash;

use smallvec::SmallVec;

use crate::cursor::{Cursor, CursorSaving, LinearCursor, SearchMode, Searchable};
use crate::error::{ContainerError, Result};

use super::{CursorState, HashTablePosition, bucket_index};

/// A chained hash table with a fixed bucket count, allowing duplicates.
///
/// The linear ordering runs bucket by bucket and is therefore
/// hash-dependent, not sorted; it is stable as long as the table is not
/// mutated.
#[derive(Debug, Clone)]
pub struct ChainedHashTable<I> {
    buckets: Vec<SmallVec<[I; 2]>>,
    count: usize,
    cursor: CursorState,
    search_mode: SearchMode,
}

impl<I: Hash + Eq> ChainedHashTable<I> {
    /// Creates an empty table with `capacity` buckets (at least one),
    /// with the cursor in the before position.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            buckets: std::iter::repeat_with(SmallVec::new)
                .take(capacity.max(1))
                .collect(),
            count: 0,
            cursor: CursorState::Before,
            search_mode: SearchMode::Restart,
        }
    }

    /// Returns the number of items in the table.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` iff the table has no items.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of buckets.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Inserts `item` at the end of its bucket's chain. Duplicates are
    /// allowed; the cursor does not move.
    pub fn insert(&mut self, item: I) {
        let bucket = bucket_index(&item, self.buckets.len());
        self.buckets[bucket].push(item);
        self.count += 1;
    }

    /// Returns `true` iff an item equal to `target` is present, without
    /// moving the cursor.
    #[must_use]
    pub fn has(&self, target: &I) -> bool {
        let bucket = bucket_index(target, self.buckets.len());
        self.buckets[bucket].contains(target)
    }

    /// Returns the number of items equal to `target`. They all share one
    /// bucket, so this scans a single chain.
    #[must_use]
    pub fn frequency(&self, target: &I) -> usize {
        let bucket = bucket_index(target, self.buckets.len());
        self.buckets[bucket]
            .iter()
            .filter(|item| *item == target)
            .count()
    }

    /// Returns the first stored item equal to `target` without moving
    /// the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ItemNotFound`] when no such item is
    /// present.
    pub fn obtain(&self, target: &I) -> Result<&I> {
        let bucket = bucket_index(target, self.buckets.len());
        self.buckets[bucket]
            .iter()
            .find(|item| *item == target)
            .ok_or(ContainerError::ItemNotFound)
    }

    /// Deletes the first item equal to `target`. A cursor positioned at
    /// the deleted item moves to its successor in the linear ordering.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ItemNotFound`] when no such item is
    /// present.
    pub fn delete(&mut self, target: &I) -> Result<()> {
        let bucket = bucket_index(target, self.buckets.len());
        let position = self.buckets[bucket]
            .iter()
            .position(|item| item == target)
            .ok_or(ContainerError::ItemNotFound)?;

        self.remove_at(bucket, position);

        Ok(())
    }

    /// Deletes the current item and moves the cursor to its successor in
    /// the linear ordering.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::NoCurrentItem`] when the cursor is not
    /// positioned at an item.
    pub fn delete_item(&mut self) -> Result<()> {
        let CursorState::At { bucket, offset } = self.cursor else {
            return Err(ContainerError::NoCurrentItem);
        };

        self.remove_at(bucket, offset);

        Ok(())
    }

    /// Removes every item, keeping the bucket count, and returns the
    /// cursor to the before position.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.count = 0;
        self.cursor = CursorState::Before;
    }

    fn remove_at(&mut self, bucket: usize, position: usize) {
        self.buckets[bucket].remove(position);
        self.count -= 1;

        // Chain removal shifts the successors left, so a cursor in the
        // same chain needs its offset adjusted.
        if let CursorState::At {
            bucket: at_bucket,
            offset,
        } = self.cursor
        {
            if at_bucket == bucket && offset > position {
                self.cursor = CursorState::At {
                    bucket,
                    offset: offset - 1,
                };
            } else if at_bucket == bucket
                && offset == position
                && offset >= self.buckets[bucket].len()
            {
                // The deleted item was the cursor's and had no chain
                // successor to shift into its slot.
                self.advance_to_occupied(bucket + 1);
            }
        }
    }

    /// Places the cursor on the first item of the first non-empty bucket
    /// at or after `from_bucket`, or in the after position.
    fn advance_to_occupied(&mut self, from_bucket: usize) {
        for bucket in from_bucket..self.buckets.len() {
            if !self.buckets[bucket].is_empty() {
                self.cursor = CursorState::At { bucket, offset: 0 };
                return;
            }
        }

        self.cursor = CursorState::After;
    }
}

// ============================================================
// Cursor protocol
// ============================================================

impl<I: Hash + Eq> Cursor for ChainedHashTable<I> {
    type Item = I;

    fn item(&self) -> Result<&I> {
        match self.cursor {
            CursorState::At { bucket, offset } => Ok(&self.buckets[bucket][offset]),
            CursorState::Before | CursorState::After => Err(ContainerError::NoCurrentItem),
        }
    }

    fn item_exists(&self) -> bool {
        matches!(self.cursor, CursorState::At { .. })
    }
}

impl<I: Hash + Eq> LinearCursor for ChainedHashTable<I> {
    fn before(&self) -> bool {
        self.cursor == CursorState::Before
    }

    fn after(&self) -> bool {
        self.cursor == CursorState::After
    }

    fn go_first(&mut self) -> Result<()> {
        if self.count == 0 {
            return Err(ContainerError::ContainerEmpty);
        }

        self.advance_to_occupied(0);

        Ok(())
    }

    fn go_forth(&mut self) -> Result<()> {
        match self.cursor {
            CursorState::After => Err(ContainerError::AfterTheEnd),
            CursorState::Before => self.go_first(),
            CursorState::At { bucket, offset } => {
                if offset + 1 < self.buckets[bucket].len() {
                    self.cursor = CursorState::At {
                        bucket,
                        offset: offset + 1,
                    };
                } else {
                    self.advance_to_occupied(bucket + 1);
                }
                Ok(())
            }
        }
    }

    fn go_before(&mut self) {
        self.cursor = CursorState::Before;
    }

    fn go_after(&mut self) {
        self.cursor = CursorState::After;
    }
}

impl<I: Hash + Eq> Searchable for ChainedHashTable<I> {
    /// Scans the chain `target` hashes to. Under [`SearchMode::Resume`]
    /// the scan continues from the successor of the current position
    /// within that same chain, which is where any remaining duplicates
    /// must be.
    fn search(&mut self, target: &I) {
        let (bucket, from) = match (self.search_mode, self.cursor) {
            (SearchMode::Resume, CursorState::At { bucket, offset }) => (bucket, offset + 1),
            (SearchMode::Resume, CursorState::After) => return,
            _ => (bucket_index(target, self.buckets.len()), 0),
        };

        for offset in from..self.buckets[bucket].len() {
            if self.buckets[bucket][offset] == *target {
                self.cursor = CursorState::At { bucket, offset };
                return;
            }
        }

        self.cursor = CursorState::After;
    }

    fn search_mode(&self) -> SearchMode {
        self.search_mode
    }

    fn set_search_mode(&mut self, mode: SearchMode) {
        self.search_mode = mode;
    }
}

impl<I: Hash + Eq> CursorSaving for ChainedHashTable<I> {
    type Position = HashTablePosition;

    fn current_position(&self) -> HashTablePosition {
        HashTablePosition { state: self.cursor }
    }

    fn go_position(&mut self, position: &HashTablePosition) {
        self.cursor = position.state;
    }
}

// ============================================================
// Tests
// ============================================================

//! A growing chained hash table of keyed items.
//!
//! [`KeyedChainedHashTable`] hashes each item by the key it carries and
//! keeps keys unique. Unlike [`ChainedHashTable`](super::ChainedHashTable)
//! the bucket vector is not fixed: when inserting pushes the load factor
//! (items per bucket) over the configured limit, the bucket count
//! doubles and every item is rehashed.
//!
//! # Examples
//!
//! ```rust
//! use cursory::prelude::*;
//!
//! struct Account {
//!     number: u32,
//!     balance: i64,
//! }
//!
//! impl Keyed for Account {
//!     type Key = u32;
//!
//!     fn key(&self) -> &u32 {
//!         &self.number
//!     }
//! }
//!
//! let mut table = KeyedChainedHashTable::new();
//! table.insert(Account { number: 1042, balance: 250 })?;
//!
//! assert_eq!(table.obtain(&1042)?.balance, 250);
//! assert!(table.insert(Account { number: 1042, balance: 0 }).is_err());
//! # Ok::<(), cursory::error::ContainerError>(())
//! ```

use std::hash::Hash;

use smallvec::SmallVec;

use crate::cursor::{Cursor, CursorSaving, Keyed, KeyedCursor, LinearCursor, SearchMode};
use crate::error::{ContainerError, Result};

use super::{CursorState, HashTablePosition, bucket_index};

/// The bucket count a [`KeyedChainedHashTable::new`] table starts with.
pub const DEFAULT_CAPACITY: usize = 32;

/// The load factor above which the bucket vector doubles.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 1.5;

/// A chained hash table of [`Keyed`] items with unique keys, growing by
/// doubling when the load factor limit is exceeded.
///
/// The linear ordering runs bucket by bucket; a rehash reshuffles it and
/// returns the cursor to the before position.
#[derive(Debug, Clone)]
pub struct KeyedChainedHashTable<I> {
    buckets: Vec<SmallVec<[I; 2]>>,
    count: usize,
    cursor: CursorState,
    search_mode: SearchMode,
    max_load_factor: f64,
}

impl<I: Keyed> KeyedChainedHashTable<I>
where
    I::Key: Hash,
{
    /// Creates an empty table with [`DEFAULT_CAPACITY`] buckets and the
    /// [`DEFAULT_MAX_LOAD_FACTOR`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with `capacity` buckets (at least one) and
    /// the [`DEFAULT_MAX_LOAD_FACTOR`].
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_load_factor(capacity, DEFAULT_MAX_LOAD_FACTOR)
    }

    /// Creates an empty table with `capacity` buckets (at least one)
    /// that doubles when the load factor exceeds `max_load_factor`
    /// (clamped to a positive value).
    #[must_use]
    pub fn with_capacity_and_load_factor(capacity: usize, max_load_factor: f64) -> Self {
        Self {
            buckets: std::iter::repeat_with(SmallVec::new)
                .take(capacity.max(1))
                .collect(),
            count: 0,
            cursor: CursorState::Before,
            search_mode: SearchMode::Restart,
            max_load_factor: max_load_factor.max(f64::MIN_POSITIVE),
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

    /// Returns the current number of buckets.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current ratio of items to buckets.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.buckets.len() as f64
    }

    /// Returns the load factor limit that triggers growth.
    #[must_use]
    pub const fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Returns the active search mode.
    #[must_use]
    pub const fn search_mode(&self) -> SearchMode {
        self.search_mode
    }

    /// Sets the search mode consulted by [`search`](Self::search) and
    /// [`search_ceiling_of`](Self::search_ceiling_of).
    pub fn set_search_mode(&mut self, mode: SearchMode) {
        self.search_mode = mode;
    }

    /// Makes every following search start from the beginning.
    pub fn restart_searches(&mut self) {
        self.set_search_mode(SearchMode::Restart);
    }

    /// Makes every following search continue past the current position.
    pub fn resume_searches(&mut self) {
        self.set_search_mode(SearchMode::Resume);
    }

    /// Inserts `item`, growing the table if the load factor limit is
    /// then exceeded. A grow rehashes every item and returns the cursor
    /// to the before position; otherwise the cursor does not move.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::DuplicateItems`] when an item with the
    /// same key is already present.
    pub fn insert(&mut self, item: I) -> Result<()> {
        if self.has(item.key()) {
            return Err(ContainerError::DuplicateItems);
        }

        let bucket = bucket_index(item.key(), self.buckets.len());
        self.buckets[bucket].push(item);
        self.count += 1;

        if self.load_factor() > self.max_load_factor {
            self.expand();
        }

        Ok(())
    }

    /// Returns `true` iff an item with key `key` is present, without
    /// moving the cursor.
    #[must_use]
    pub fn has(&self, key: &I::Key) -> bool {
        self.locate(key).is_some()
    }

    /// Returns the item with key `key` without moving the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ItemNotFound`] when no item has that
    /// key.
    pub fn obtain(&self, key: &I::Key) -> Result<&I> {
        self.locate(key)
            .map(|(bucket, offset)| &self.buckets[bucket][offset])
            .ok_or(ContainerError::ItemNotFound)
    }

    /// Replaces the stored item carrying the same key as `item`. The
    /// cursor does not move.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ItemNotFound`] when no item has that
    /// key.
    pub fn set(&mut self, item: I) -> Result<()> {
        let (bucket, offset) = self
            .locate(item.key())
            .ok_or(ContainerError::ItemNotFound)?;

        self.buckets[bucket][offset] = item;

        Ok(())
    }

    /// Replaces the current item with `item`, which must carry the same
    /// key.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::NoCurrentItem`] when the cursor is not
    /// positioned at an item, and [`ContainerError::InvalidArgument`]
    /// when the keys differ (the item would then be in the wrong
    /// bucket).
    pub fn set_item(&mut self, item: I) -> Result<()> {
        let CursorState::At { bucket, offset } = self.cursor else {
            return Err(ContainerError::NoCurrentItem);
        };
        if item.key() != self.buckets[bucket][offset].key() {
            return Err(ContainerError::InvalidArgument);
        }

        self.buckets[bucket][offset] = item;

        Ok(())
    }

    /// Deletes the item with key `key`. A cursor positioned at the
    /// deleted item moves to its successor in the linear ordering.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ItemNotFound`] when no item has that
    /// key.
    pub fn delete(&mut self, key: &I::Key) -> Result<()> {
        let (bucket, offset) = self.locate(key).ok_or(ContainerError::ItemNotFound)?;

        self.remove_at(bucket, offset);

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

    /// Moves the cursor to the item with key `key`, or to the after
    /// position when no item has that key. Under [`SearchMode::Resume`]
    /// the search only scans onward from the current position within the
    /// key's chain, so it misses the item if the cursor is already past
    /// it.
    pub fn search(&mut self, key: &I::Key) {
        let (bucket, from) = match (self.search_mode, self.cursor) {
            (SearchMode::Resume, CursorState::At { bucket, offset }) => (bucket, offset + 1),
            (SearchMode::Resume, CursorState::After) => return,
            _ => (bucket_index(key, self.buckets.len()), 0),
        };

        for offset in from..self.buckets[bucket].len() {
            if self.buckets[bucket][offset].key() == key {
                self.cursor = CursorState::At { bucket, offset };
                return;
            }
        }

        self.cursor = CursorState::After;
    }

    /// Moves the cursor to the next item (in the linear, hash-dependent
    /// ordering) whose key is greater than or equal to `key`; with no
    /// such item the cursor ends in the after position. Under
    /// [`SearchMode::Restart`] the scan covers the whole table from the
    /// first item, under [`SearchMode::Resume`] it continues past the
    /// current position.
    pub fn search_ceiling_of(&mut self, key: &I::Key) {
        match self.search_mode {
            SearchMode::Restart => self.advance_to_occupied(0),
            SearchMode::Resume => match self.cursor {
                CursorState::Before => self.advance_to_occupied(0),
                CursorState::At { .. } => self.step(),
                CursorState::After => return,
            },
        }

        while let CursorState::At { bucket, offset } = self.cursor {
            if *self.buckets[bucket][offset].key() >= *key {
                return;
            }
            self.step();
        }
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

    // ------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------

    fn locate(&self, key: &I::Key) -> Option<(usize, usize)> {
        let bucket = bucket_index(key, self.buckets.len());
        self.buckets[bucket]
            .iter()
            .position(|item| item.key() == key)
            .map(|offset| (bucket, offset))
    }

    /// Doubles the bucket vector and rehashes every item. Item order is
    /// reshuffled, so the cursor returns to the before position.
    fn expand(&mut self) {
        let doubled = self.buckets.len() * 2;
        let old_buckets = std::mem::replace(
            &mut self.buckets,
            std::iter::repeat_with(SmallVec::new).take(doubled).collect(),
        );

        for chain in old_buckets {
            for item in chain {
                let bucket = bucket_index(item.key(), doubled);
                self.buckets[bucket].push(item);
            }
        }

        self.cursor = CursorState::Before;
    }

    fn remove_at(&mut self, bucket: usize, position: usize) {
        self.buckets[bucket].remove(position);
        self.count -= 1;

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
                self.advance_to_occupied(bucket + 1);
            }
        }
    }

    fn advance_to_occupied(&mut self, from_bucket: usize) {
        for bucket in from_bucket..self.buckets.len() {
            if !self.buckets[bucket].is_empty() {
                self.cursor = CursorState::At { bucket, offset: 0 };
                return;
            }
        }

        self.cursor = CursorState::After;
    }

    /// One step of the linear ordering, assuming the cursor is at an
    /// item.
    fn step(&mut self) {
        if let CursorState::At { bucket, offset } = self.cursor {
            if offset + 1 < self.buckets[bucket].len() {
                self.cursor = CursorState::At {
                    bucket,
                    offset: offset + 1,
                };
            } else {
                self.advance_to_occupied(bucket + 1);
            }
        }
    }
}

impl<I: Keyed> Default for KeyedChainedHashTable<I>
where
    I::Key: Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================
// Cursor protocol
// ============================================================

impl<I: Keyed> Cursor for KeyedChainedHashTable<I>
where
    I::Key: Hash,
{
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

impl<I: Keyed> LinearCursor for KeyedChainedHashTable<I>
where
    I::Key: Hash,
{
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
            CursorState::At { .. } => {
                self.step();
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

impl<I: Keyed> CursorSaving for KeyedChainedHashTable<I>
where
    I::Key: Hash,
{
    type Position = HashTablePosition;

    fn current_position(&self) -> HashTablePosition {
        HashTablePosition { state: self.cursor }
    }

    fn go_position(&mut self, position: &HashTablePosition) {
        self.cursor = position.state;
    }
}

impl<I: Keyed> KeyedCursor for KeyedChainedHashTable<I> where I::Key: Hash {}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Entry {
        id: u32,
        label: &'static str,
    }

    impl Entry {
        const fn new(id: u32, label: &'static str) -> Self {
            Self { id, label }
        }
    }

    impl Keyed for Entry {
        type Key = u32;

        fn key(&self) -> &u32 {
            &self.id
        }
    }

    #[test]
    fn test_defaults() {
        let table = KeyedChainedHashTable::<Entry>::new();

        assert_eq!(table.capacity(), 32);
        assert!((table.max_load_factor() - 1.5).abs() < f64::EPSILON);
        assert!(table.is_empty());
    }

    #[test]
    fn test_insert_and_obtain_by_key() {
        let mut table = KeyedChainedHashTable::new();
        table.insert(Entry::new(7, "seven")).unwrap();
        table.insert(Entry::new(8, "eight")).unwrap();

        assert_eq!(table.obtain(&7).unwrap().label, "seven");
        assert_eq!(table.obtain(&9), Err(ContainerError::ItemNotFound));
        assert!(table.has(&8));
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let mut table = KeyedChainedHashTable::new();
        table.insert(Entry::new(7, "first")).unwrap();

        assert_eq!(
            table.insert(Entry::new(7, "second")),
            Err(ContainerError::DuplicateItems)
        );
        assert_eq!(table.obtain(&7).unwrap().label, "first");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_growth_doubles_capacity_when_load_factor_exceeded() {
        let mut table = KeyedChainedHashTable::new();

        // 48 items fill a 32-bucket table exactly to the 1.5 limit; the
        // 49th pushes past it and doubles the bucket count.
        for id in 0..48 {
            table.insert(Entry::new(id, "packed")).unwrap();
            assert_eq!(table.capacity(), 32);
        }

        table.insert(Entry::new(48, "tipping")).unwrap();

        assert_eq!(table.capacity(), 64);
        assert_eq!(table.len(), 49);
        assert!(table.load_factor() <= table.max_load_factor());
        for id in 0..49 {
            assert!(table.has(&id));
        }
    }

    #[test]
    fn test_rehash_resets_cursor_to_before() {
        let mut table = KeyedChainedHashTable::with_capacity(1);
        table.insert(Entry::new(1, "one")).unwrap();
        table.go_first().unwrap();

        // Load factor 2.0 > 1.5 triggers an immediate grow.
        table.insert(Entry::new(2, "two")).unwrap();

        assert!(table.before());
    }

    #[test]
    fn test_set_replaces_by_key() {
        let mut table = KeyedChainedHashTable::new();
        table.insert(Entry::new(7, "old")).unwrap();

        table.set(Entry::new(7, "new")).unwrap();

        assert_eq!(table.obtain(&7).unwrap().label, "new");
        assert_eq!(
            table.set(Entry::new(9, "missing")),
            Err(ContainerError::ItemNotFound)
        );
    }

    #[test]
    fn test_set_item_requires_matching_key() {
        let mut table = KeyedChainedHashTable::new();
        table.insert(Entry::new(7, "old")).unwrap();
        table.search(&7);

        assert_eq!(
            table.set_item(Entry::new(8, "other")),
            Err(ContainerError::InvalidArgument)
        );
        table.set_item(Entry::new(7, "new")).unwrap();
        assert_eq!(table.item().unwrap().label, "new");
    }

    #[test]
    fn test_search_positions_cursor_and_reports_keys() {
        let mut table = KeyedChainedHashTable::new();
        table.insert(Entry::new(7, "seven")).unwrap();

        table.search(&7);
        assert_eq!(table.item_key(), Ok(&7));
        let (key, item) = table.key_item_pair().unwrap();
        assert_eq!(*key, 7);
        assert_eq!(item.label, "seven");

        table.search(&9);
        assert!(table.after());
        assert_eq!(table.item_key(), Err(ContainerError::NoCurrentItem));
    }

    #[test]
    fn test_delete_by_key_and_traversal() {
        let mut table = KeyedChainedHashTable::new();
        for id in 0..10 {
            table.insert(Entry::new(id, "entry")).unwrap();
        }

        table.delete(&4).unwrap();
        assert_eq!(table.delete(&4), Err(ContainerError::ItemNotFound));

        let mut seen = Vec::new();
        table.go_first().unwrap();
        while table.item_exists() {
            seen.push(table.item().unwrap().id);
            table.go_forth().unwrap();
        }
        seen.sort_unstable();

        assert_eq!(seen, [0, 1, 2, 3, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_delete_item_moves_cursor_to_successor() {
        let mut table = KeyedChainedHashTable::with_capacity_and_load_factor(1, f64::MAX);
        for id in [1, 2, 3] {
            table.insert(Entry::new(id, "chained")).unwrap();
        }

        table.go_first().unwrap();
        let second = {
            table.go_forth().unwrap();
            table.item().unwrap().id
        };
        table.delete_item().unwrap();

        assert!(table.item_exists());
        assert_ne!(table.item().unwrap().id, second);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_search_ceiling_scans_in_linear_order() {
        // A single bucket makes the linear order the insertion order.
        let mut table = KeyedChainedHashTable::with_capacity_and_load_factor(1, f64::MAX);
        for id in [10, 40, 20, 30] {
            table.insert(Entry::new(id, "entry")).unwrap();
        }

        table.search_ceiling_of(&15);
        assert_eq!(table.item_key(), Ok(&40));

        table.resume_searches();
        table.search_ceiling_of(&15);
        assert_eq!(table.item_key(), Ok(&20));

        table.search_ceiling_of(&35);
        assert!(table.after());
    }
}

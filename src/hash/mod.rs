//! Chained hash tables with cursor-based access.
//!
//! Two tables share the bucket-vector representation, the two-level
//! cursor (bucket index plus offset within the bucket's chain), and the
//! linear ordering it induces (bucket by bucket, chain order within a
//! bucket):
//!
//! - [`ChainedHashTable`]: a fixed-capacity multiset of hashable items.
//!   Duplicates are allowed and enumerable with resumed searches.
//! - [`KeyedChainedHashTable`]: a table of [`Keyed`](crate::cursor::Keyed)
//!   items hashed by key. Keys are unique and the bucket vector grows
//!   (with a full rehash) when the load factor limit is exceeded.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

mod chained;
mod keyed;

pub use chained::ChainedHashTable;
pub use keyed::KeyedChainedHashTable;

/// Maps `value` to a bucket index in `0..capacity`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn bucket_index<T: Hash + ?Sized>(value: &T, capacity: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish() as usize % capacity
}

/// The two-level cursor of a chained hash table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CursorState {
    Before,
    At { bucket: usize, offset: usize },
    After,
}

/// A saved cursor position of a chained hash table, as returned by
/// [`CursorSaving::current_position`](crate::cursor::CursorSaving).
///
/// A position is invalidated by any mutation of the table it came from;
/// a rehash in particular reshuffles every bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashTablePosition {
    pub(crate) state: CursorState,
}

//! # cursory
//!
//! A library of container data structures built around a uniform,
//! cursor-based iteration and search protocol.
//!
//! ## Overview
//!
//! Every container in this crate exposes a *cursor*: a movable "current
//! item" position that is always in exactly one of three states: before
//! the first item, at a valid item, or after the last item. On top of
//! that shared vocabulary the crate provides:
//!
//! - **Cursor Protocol**: the [`Cursor`], [`LinearCursor`],
//!   [`CursorSaving`], [`Searchable`] and [`KeyedCursor`] traits, plus the
//!   persistent restart/resume [`SearchMode`]
//! - **Ordered Trees**: [`OrderedTree`], an unbalanced binary search tree,
//!   and [`AvlTree`], its height-balanced extension
//! - **2-3 Tree**: [`TwoThreeTree`], a multi-way search tree whose leaves
//!   form a doubly-linked chain for sorted iteration
//! - **Hash Tables**: [`ChainedHashTable`] (non-unique membership) and
//!   [`KeyedChainedHashTable`] (unique keys with load-factor rehashing)
//!
//! All structures are in-memory, single-threaded and unsynchronized.
//! Precondition violations are reported through [`ContainerError`] rather
//! than sentinel values; only internal-consistency defects panic.
//!
//! ## Example
//!
//! ```rust
//! use cursory::prelude::*;
//!
//! let mut tree = AvlTree::new();
//! tree.insert(2);
//! tree.insert(1);
//! tree.insert(3);
//!
//! tree.search(&2);
//! assert_eq!(tree.item(), Ok(&2));
//!
//! tree.search(&99);
//! assert!(!tree.item_exists());
//! ```
//!
//! [`Cursor`]: cursor::Cursor
//! [`LinearCursor`]: cursor::LinearCursor
//! [`CursorSaving`]: cursor::CursorSaving
//! [`Searchable`]: cursor::Searchable
//! [`KeyedCursor`]: cursor::KeyedCursor
//! [`SearchMode`]: cursor::SearchMode
//! [`ContainerError`]: error::ContainerError
//! [`OrderedTree`]: tree::OrderedTree
//! [`AvlTree`]: tree::AvlTree
//! [`TwoThreeTree`]: tree::TwoThreeTree
//! [`ChainedHashTable`]: hash::ChainedHashTable
//! [`KeyedChainedHashTable`]: hash::KeyedChainedHashTable

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

/// Prelude module for convenient imports.
///
/// Re-exports the cursor protocol traits, the error type, and every
/// container.
///
/// # Usage
///
/// ```rust
/// use cursory::prelude::*;
/// ```
pub mod prelude {
    pub use crate::cursor::{
        Cursor, CursorSaving, Keyed, KeyedCursor, LinearCursor, SearchMode, Searchable,
    };
    pub use crate::error::{ContainerError, Result};
    pub use crate::hash::{ChainedHashTable, KeyedChainedHashTable};
    pub use crate::tree::{AvlTree, OrderedTree, TwoThreeTree};
}

pub mod cursor;
pub mod error;
pub mod hash;
pub mod tree;

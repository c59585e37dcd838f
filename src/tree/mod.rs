//! Ordered tree containers with cursor-based access.
//!
//! Three tree containers share the cursor protocol from
//! [`crate::cursor`]:
//!
//! - [`OrderedTree`]: a plain binary search tree. Duplicates allowed,
//!   no rebalancing, so worst-case operations are O(n).
//! - [`AvlTree`]: a height-balanced binary search tree. Duplicates
//!   allowed, all search and mutation operations are O(log n).
//! - [`TwoThreeTree`]: a 2-3 tree over [`Keyed`](crate::cursor::Keyed)
//!   items with all items in linked leaves, giving O(log n) keyed
//!   operations plus O(1) in-order stepping and O(1) minimum/maximum.
//!
//! All three store their nodes in an index-based arena owned by the
//! container, so cursors are plain indices rather than references and
//! mutation requires no aliasing tricks.

mod arena;
mod avl;
mod ordered;
mod two_three;

pub use avl::AvlTree;
pub use ordered::OrderedTree;
pub use two_three::{Iter, TwoThreeTree, TwoThreeTreePosition};

//! An unbalanced binary search tree with cursor-based access.
//!
//! [`OrderedTree`] keeps its items in binary-search-tree order without
//! any rebalancing, so its shape (and therefore its performance) depends
//! on the insertion order. Equal items are inserted into the right
//! subtree, which is what lets a resumed search enumerate duplicates.
//!
//! # Complexity
//!
//! | Operation     | Average  | Worst |
//! |---------------|----------|-------|
//! | `insert`      | O(log n) | O(n)  |
//! | `search`      | O(log n) | O(n)  |
//! | `has`         | O(log n) | O(n)  |
//! | `delete_item` | O(log n) | O(n)  |
//!
//! # Examples
//!
//! ```rust
//! use cursory::prelude::*;
//!
//! let mut tree = OrderedTree::new();
//! tree.insert(50);
//! tree.insert(25);
//! tree.insert(75);
//!
//! tree.search(&25);
//! assert_eq!(tree.item(), Ok(&25));
//!
//! tree.delete_item()?;
//! assert!(!tree.has(&25));
//! # Ok::<(), cursory::error::ContainerError>(())
//! ```

use std::cmp::Ordering;

use crate::cursor::{Cursor, SearchMode, Searchable};
use crate::error::{ContainerError, Result};

use super::arena::Arena;

// ============================================================
// Node
// ============================================================

#[derive(Debug, Clone)]
struct Node<I> {
    item: I,
    left: Option<usize>,
    right: Option<usize>,
}

// ============================================================
// OrderedTree
// ============================================================

/// An unbalanced binary search tree allowing duplicate items.
///
/// The cursor is a node reference paired with its parent reference. It
/// has two sentinel states in place of the usual before/after pair:
/// *above* the root (the state of a fresh or freshly restarted search)
/// and *below* a leaf (the state after a failed search).
#[derive(Debug, Clone)]
pub struct OrderedTree<I> {
    arena: Arena<Node<I>>,
    root: Option<usize>,
    cur: Option<usize>,
    parent: Option<usize>,
    length: usize,
    search_mode: SearchMode,
}

impl<I: Ord> OrderedTree<I> {
    /// Creates an empty tree with the cursor in the above position.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            cur: None,
            parent: None,
            length: 0,
            search_mode: SearchMode::Restart,
        }
    }

    /// Returns the number of items in the tree.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` iff the tree has no items.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns `true` iff the cursor is above the root.
    #[must_use]
    #[inline]
    pub const fn above(&self) -> bool {
        self.cur.is_none() && self.parent.is_none()
    }

    /// Returns `true` iff the cursor is below a leaf, the state a failed
    /// search leaves it in.
    #[must_use]
    #[inline]
    pub const fn below(&self) -> bool {
        self.cur.is_none() && (self.parent.is_some() || self.is_empty())
    }

    /// Returns the height of the tree; an empty tree has height 0.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height_below(self.root)
    }

    fn height_below(&self, root: Option<usize>) -> usize {
        root.map_or(0, |index| {
            let node = self.arena.get(index);
            1 + self
                .height_below(node.left)
                .max(self.height_below(node.right))
        })
    }

    /// Returns `true` iff an item equal to `target` is present. Unlike
    /// [`search`](Searchable::search) this never moves the cursor.
    #[must_use]
    pub fn has(&self, target: &I) -> bool {
        let mut walk = self.root;

        while let Some(index) = walk {
            let node = self.arena.get(index);
            walk = match target.cmp(&node.item) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return true,
            };
        }

        false
    }

    /// Inserts `item`, descending left on strictly smaller comparisons
    /// and right otherwise. Equal items therefore end up in the right
    /// subtree of the first occurrence. The cursor does not move.
    pub fn insert(&mut self, item: I) {
        let new_index = self.arena.alloc(Node {
            item,
            left: None,
            right: None,
        });

        match self.root {
            None => self.root = Some(new_index),
            Some(root) => {
                let mut current = root;

                loop {
                    let goes_left =
                        self.arena.get(new_index).item < self.arena.get(current).item;
                    let next = if goes_left {
                        self.arena.get(current).left
                    } else {
                        self.arena.get(current).right
                    };

                    match next {
                        Some(child) => current = child,
                        None => {
                            if goes_left {
                                self.arena.get_mut(current).left = Some(new_index);
                            } else {
                                self.arena.get_mut(current).right = Some(new_index);
                            }
                            break;
                        }
                    }
                }
            }
        }

        self.length += 1;
    }

    /// Deletes the current item.
    ///
    /// A node with at most one child is spliced out and the cursor moves
    /// to the replacing child (ending up below when there is none). A
    /// node with two children instead receives the item of its in-order
    /// successor, whose node is spliced out; the cursor stays put and
    /// now refers to the successor item.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::NoCurrentItem`] when the cursor is not
    /// positioned at an item.
    pub fn delete_item(&mut self) -> Result<()> {
        let Some(current) = self.cur else {
            return Err(ContainerError::NoCurrentItem);
        };

        let node = self.arena.get(current);
        let (left, right) = (node.left, node.right);

        if let (Some(_), Some(right_child)) = (left, right) {
            // The in-order successor is the leftmost node of the right
            // subtree; it has no left child, so splicing it is the
            // one-child case.
            let mut successor_parent = current;
            let mut successor = right_child;

            while let Some(next) = self.arena.get(successor).left {
                successor_parent = successor;
                successor = next;
            }

            let successor_right = self.arena.get(successor).right;
            if successor_parent == current {
                self.arena.get_mut(successor_parent).right = successor_right;
            } else {
                self.arena.get_mut(successor_parent).left = successor_right;
            }

            let removed = self.arena.release(successor);
            self.arena.get_mut(current).item = removed.item;
        } else {
            let child = left.or(right);

            match self.parent {
                None => self.root = child,
                Some(parent) => {
                    if self.arena.get(parent).left == Some(current) {
                        self.arena.get_mut(parent).left = child;
                    } else {
                        self.arena.get_mut(parent).right = child;
                    }
                }
            }

            self.arena.release(current);
            self.cur = child;
        }

        self.length -= 1;

        Ok(())
    }

    /// Removes every item and returns the cursor to the above position.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.cur = None;
        self.parent = None;
        self.length = 0;
    }
}

impl<I: Ord> Default for OrderedTree<I> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================
// Cursor protocol
// ============================================================

impl<I: Ord> Cursor for OrderedTree<I> {
    type Item = I;

    fn item(&self) -> Result<&I> {
        self.cur
            .map(|index| &self.arena.get(index).item)
            .ok_or(ContainerError::NoCurrentItem)
    }

    fn item_exists(&self) -> bool {
        self.cur.is_some()
    }
}

impl<I: Ord> Searchable for OrderedTree<I> {
    /// Descends from the root (or, when resuming from a current item,
    /// from its right subtree) comparing `target` against each node. On
    /// a hit the cursor stops at the matching node; on a miss it ends up
    /// below the leaf where `target` would be inserted.
    fn search(&mut self, target: &I) {
        if self.search_mode == SearchMode::Restart || self.above() {
            self.parent = None;
            self.cur = self.root;
        } else if let Some(current) = self.cur {
            // Duplicates live in the right subtree, so resuming past the
            // current match means descending right once before comparing.
            self.parent = Some(current);
            self.cur = self.arena.get(current).right;
        }

        while let Some(current) = self.cur {
            let node = self.arena.get(current);
            match target.cmp(&node.item) {
                Ordering::Less => {
                    self.parent = Some(current);
                    self.cur = node.left;
                }
                Ordering::Greater => {
                    self.parent = Some(current);
                    self.cur = node.right;
                }
                Ordering::Equal => break,
            }
        }
    }

    fn search_mode(&self) -> SearchMode {
        self.search_mode
    }

    fn set_search_mode(&mut self, mode: SearchMode) {
        self.search_mode = mode;
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ordered_within<I: Ord>(
        tree: &OrderedTree<I>,
        root: Option<usize>,
        low: Option<&I>,
        high: Option<&I>,
    ) -> bool {
        let Some(index) = root else {
            return true;
        };
        let node = tree.arena.get(index);

        low.is_none_or(|bound| *bound <= node.item)
            && high.is_none_or(|bound| node.item < *bound)
            && ordered_within(tree, node.left, low, Some(&node.item))
            && ordered_within(tree, node.right, Some(&node.item), high)
    }

    fn assert_search_order(tree: &OrderedTree<i32>) {
        assert!(ordered_within(tree, tree.root, None, None));
    }

    #[test]
    fn test_insert_preserves_search_order() {
        let mut tree = OrderedTree::new();

        for item in [50, 25, 75, 10, 30, 60, 90, 30, 50] {
            tree.insert(item);
            assert_search_order(&tree);
        }

        assert_eq!(tree.len(), 9);
    }

    #[test]
    fn test_fresh_tree_cursor_is_above() {
        let tree = OrderedTree::<i32>::new();

        assert!(tree.above());
        assert!(!tree.item_exists());
    }

    #[test]
    fn test_empty_tree_is_both_above_and_below() {
        let tree = OrderedTree::<i32>::new();

        assert!(tree.above());
        assert!(tree.below());
        assert_eq!(tree.item(), Err(ContainerError::NoCurrentItem));
    }

    #[test]
    fn test_failed_search_lands_below() {
        let mut tree = OrderedTree::new();
        tree.insert(50);
        tree.insert(25);

        tree.search(&60);

        assert!(!tree.item_exists());
        assert!(tree.below());
        assert!(!tree.above());
    }

    #[test]
    fn test_resumed_search_enumerates_duplicates() {
        let mut tree = OrderedTree::new();
        for item in [40, 20, 40, 60, 40] {
            tree.insert(item);
        }
        tree.resume_searches();

        let mut hits = 0;
        tree.search(&40);
        while tree.item_exists() {
            hits += 1;
            tree.search(&40);
        }

        assert_eq!(hits, 3);
    }

    #[test]
    fn test_restart_search_repeats_first_match() {
        let mut tree = OrderedTree::new();
        for item in [40, 20, 40] {
            tree.insert(item);
        }

        tree.search(&40);
        tree.search(&40);

        assert!(tree.item_exists());
        assert_eq!(tree.item(), Ok(&40));
    }

    #[test]
    fn test_delete_leaf_moves_cursor_below() {
        let mut tree = OrderedTree::new();
        tree.insert(50);
        tree.insert(25);

        tree.search(&25);
        tree.delete_item().unwrap();

        assert!(!tree.item_exists());
        assert!(tree.below());
        assert!(!tree.has(&25));
        assert_eq!(tree.len(), 1);
        assert_search_order(&tree);
    }

    #[test]
    fn test_delete_one_child_node_moves_cursor_to_child() {
        let mut tree = OrderedTree::new();
        for item in [50, 25, 10] {
            tree.insert(item);
        }

        tree.search(&25);
        tree.delete_item().unwrap();

        assert_eq!(tree.item(), Ok(&10));
        assert!(!tree.has(&25));
        assert_search_order(&tree);
    }

    #[test]
    fn test_delete_interior_node_installs_successor() {
        let mut tree = OrderedTree::new();
        for item in [50, 25, 75, 60, 90, 55] {
            tree.insert(item);
        }

        tree.search(&50);
        tree.delete_item().unwrap();

        assert_eq!(tree.item(), Ok(&55));
        assert!(!tree.has(&50));
        assert_eq!(tree.len(), 5);
        assert_search_order(&tree);
    }

    #[test]
    fn test_delete_root_of_singleton_empties_tree() {
        let mut tree = OrderedTree::new();
        tree.insert(1);

        tree.search(&1);
        tree.delete_item().unwrap();

        assert!(tree.is_empty());
        assert!(tree.below());
    }

    #[test]
    fn test_delete_without_current_item_fails() {
        let mut tree = OrderedTree::<i32>::new();

        assert_eq!(tree.delete_item(), Err(ContainerError::NoCurrentItem));
    }

    #[test]
    fn test_height_of_degenerate_chain() {
        let mut tree = OrderedTree::new();
        for item in 1..=5 {
            tree.insert(item);
        }

        assert_eq!(tree.height(), 5);
    }

    #[test]
    fn test_clear_resets_cursor_and_length() {
        let mut tree = OrderedTree::new();
        tree.insert(3);
        tree.search(&3);

        tree.clear();

        assert!(tree.is_empty());
        assert!(tree.above());
        assert!(!tree.item_exists());
    }
}

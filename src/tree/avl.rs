//! A height-balanced binary search tree with cursor-based access.
//!
//! [`AvlTree`] keeps the *AVL property*: at every node the heights of
//! the two subtrees differ by at most one. Each node stores the heights
//! of both of its subtrees, so imbalance detection is O(1) per node and
//! every operation below is O(log n) in the worst case.
//!
//! Balance is restored bottom-up along the mutation path. A critically
//! imbalanced node (imbalance of magnitude two) is repaired with a
//! single rotation when its taller child leans the same way or is level,
//! and with a double rotation when the taller child leans the other way.
//!
//! # Complexity
//!
//! | Operation     | Worst    |
//! |---------------|----------|
//! | `insert`      | O(log n) |
//! | `search`      | O(log n) |
//! | `has`         | O(log n) |
//! | `delete`      | O(log n) |
//! | `delete_item` | O(log n) |
//! | `height`      | O(1)     |
//!
//! # Examples
//!
//! ```rust
//! use cursory::prelude::*;
//!
//! let mut tree = AvlTree::new();
//! for item in 1..=7 {
//!     tree.insert(item);
//! }
//!
//! // Ascending insertion would degenerate an unbalanced tree; here the
//! // rotations keep the height logarithmic.
//! assert_eq!(tree.height(), 3);
//!
//! tree.search(&4);
//! tree.delete_item()?;
//! assert!(!tree.has(&4));
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
    left_height: usize,
    right_height: usize,
}

// ============================================================
// AvlTree
// ============================================================

/// A height-balanced binary search tree allowing duplicate items.
///
/// The cursor surface is the same as [`OrderedTree`](super::OrderedTree):
/// a node reference with *above* and *below* sentinel states, positioned
/// by [`search`](Searchable::search). Equal items are accepted and go to
/// the right on insertion, but rotations may later move a duplicate into
/// a left subtree, so a resumed search is not guaranteed to visit every
/// occurrence; use [`OrderedTree`](super::OrderedTree) when duplicate
/// enumeration matters.
#[derive(Debug, Clone)]
pub struct AvlTree<I> {
    arena: Arena<Node<I>>,
    root: Option<usize>,
    cur: Option<usize>,
    parent: Option<usize>,
    length: usize,
    search_mode: SearchMode,
}

impl<I: Ord> AvlTree<I> {
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
    /// Constant time, read from the stored subtree heights.
    #[must_use]
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    /// Returns `true` iff an item equal to `target` is present, without
    /// moving the cursor.
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

    /// Inserts `item` and restores the AVL property along the insertion
    /// path. Equal items go to the right subtree. The cursor does not
    /// move.
    pub fn insert(&mut self, item: I) {
        let new_index = self.arena.alloc(Node {
            item,
            left: None,
            right: None,
            left_height: 0,
            right_height: 0,
        });

        self.root = Some(self.insert_at(self.root, new_index));
        self.length += 1;
    }

    /// Deletes one occurrence of `target` and restores the AVL property
    /// along the deletion path. The cursor returns to the above
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ItemNotFound`] when no item equal to
    /// `target` is present.
    pub fn delete(&mut self, target: &I) -> Result<()>
    where
        I: Clone,
    {
        if !self.has(target) {
            return Err(ContainerError::ItemNotFound);
        }

        self.root = self.delete_at(self.root, target);
        self.length -= 1;
        self.cur = None;
        self.parent = None;

        Ok(())
    }

    /// Deletes the current item and restores the AVL property.
    ///
    /// The cursor is repositioned on the in-order successor of the
    /// deleted item's node, captured before the mutation. When that node
    /// had no right subtree the cursor instead searches for the deleted
    /// value again, stopping at a remaining duplicate or ending up
    /// below.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::NoCurrentItem`] when the cursor is not
    /// positioned at an item.
    pub fn delete_item(&mut self) -> Result<()>
    where
        I: Clone,
    {
        let Some(current) = self.cur else {
            return Err(ContainerError::NoCurrentItem);
        };

        let deleted = self.arena.get(current).item.clone();
        let successor = self.arena.get(current).right.map(|right| {
            let mut walk = right;
            while let Some(next) = self.arena.get(walk).left {
                walk = next;
            }
            self.arena.get(walk).item.clone()
        });

        self.root = self.delete_at(self.root, &deleted);
        self.length -= 1;

        // Rebalancing may have recycled node slots, so the cursor is
        // re-established by value rather than patched in place.
        self.search_from_root(successor.as_ref().unwrap_or(&deleted));

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

    // ------------------------------------------------------------
    // Balance bookkeeping
    // ------------------------------------------------------------

    fn subtree_height(&self, root: Option<usize>) -> usize {
        root.map_or(0, |index| {
            let node = self.arena.get(index);
            1 + node.left_height.max(node.right_height)
        })
    }

    /// Positive when the left subtree is taller, negative when the right
    /// subtree is taller.
    #[allow(clippy::cast_possible_wrap)]
    fn signed_imbalance(&self, index: usize) -> isize {
        let node = self.arena.get(index);
        node.left_height as isize - node.right_height as isize
    }

    fn set_left(&mut self, index: usize, child: Option<usize>) {
        let height = self.subtree_height(child);
        let node = self.arena.get_mut(index);
        node.left = child;
        node.left_height = height;
    }

    fn set_right(&mut self, index: usize, child: Option<usize>) {
        let height = self.subtree_height(child);
        let node = self.arena.get_mut(index);
        node.right = child;
        node.right_height = height;
    }

    // ------------------------------------------------------------
    // Rotations
    // ------------------------------------------------------------

    /// Rotates the subtree rooted at `root` to the right and returns the
    /// new subtree root (the former left child).
    fn rotate_right(&mut self, root: usize) -> usize {
        let pivot = self
            .arena
            .get(root)
            .left
            .expect("right rotation requires a left child");
        let inner = self.arena.get(pivot).right;

        self.set_left(root, inner);
        self.set_right(pivot, Some(root));

        pivot
    }

    /// Mirror image of [`rotate_right`](Self::rotate_right).
    fn rotate_left(&mut self, root: usize) -> usize {
        let pivot = self
            .arena
            .get(root)
            .right
            .expect("left rotation requires a right child");
        let inner = self.arena.get(pivot).left;

        self.set_right(root, inner);
        self.set_left(pivot, Some(root));

        pivot
    }

    /// Repairs a critical imbalance at `root`, if any, and returns the
    /// root of the repaired subtree.
    fn restore_balance(&mut self, root: usize) -> usize {
        let imbalance = self.signed_imbalance(root);

        if imbalance > 1 {
            let left = self
                .arena
                .get(root)
                .left
                .expect("critically left-heavy node lacks a left child");

            if self.signed_imbalance(left) >= 0 {
                self.rotate_right(root)
            } else {
                let new_left = self.rotate_left(left);
                self.set_left(root, Some(new_left));
                self.rotate_right(root)
            }
        } else if imbalance < -1 {
            let right = self
                .arena
                .get(root)
                .right
                .expect("critically right-heavy node lacks a right child");

            if self.signed_imbalance(right) <= 0 {
                self.rotate_left(root)
            } else {
                let new_right = self.rotate_right(right);
                self.set_right(root, Some(new_right));
                self.rotate_left(root)
            }
        } else {
            root
        }
    }

    // ------------------------------------------------------------
    // Recursive mutation
    // ------------------------------------------------------------

    fn insert_at(&mut self, root: Option<usize>, new_index: usize) -> usize {
        let Some(index) = root else {
            return new_index;
        };

        if self.arena.get(new_index).item < self.arena.get(index).item {
            let child = self.arena.get(index).left;
            let new_child = self.insert_at(child, new_index);
            self.set_left(index, Some(new_child));
        } else {
            let child = self.arena.get(index).right;
            let new_child = self.insert_at(child, new_index);
            self.set_right(index, Some(new_child));
        }

        self.restore_balance(index)
    }

    fn delete_at(&mut self, root: Option<usize>, target: &I) -> Option<usize>
    where
        I: Clone,
    {
        let index = root.expect("deletion target vanished during descent");

        match target.cmp(&self.arena.get(index).item) {
            Ordering::Less => {
                let child = self.arena.get(index).left;
                let new_child = self.delete_at(child, target);
                self.set_left(index, new_child);
                Some(self.restore_balance(index))
            }
            Ordering::Greater => {
                let child = self.arena.get(index).right;
                let new_child = self.delete_at(child, target);
                self.set_right(index, new_child);
                Some(self.restore_balance(index))
            }
            Ordering::Equal => {
                let node = self.arena.get(index);
                match (node.left, node.right) {
                    (None, None) => {
                        self.arena.release(index);
                        None
                    }
                    (Some(child), None) | (None, Some(child)) => {
                        self.arena.release(index);
                        Some(child)
                    }
                    (Some(_), Some(right)) => {
                        // Two children: install the in-order successor
                        // value here, then delete its old node from the
                        // right subtree.
                        let mut walk = right;
                        while let Some(next) = self.arena.get(walk).left {
                            walk = next;
                        }
                        let successor = self.arena.get(walk).item.clone();

                        let new_right = self.delete_at(Some(right), &successor);
                        self.arena.get_mut(index).item = successor;
                        self.set_right(index, new_right);
                        Some(self.restore_balance(index))
                    }
                }
            }
        }
    }

    // ------------------------------------------------------------
    // Cursor positioning
    // ------------------------------------------------------------

    fn search_from_root(&mut self, target: &I) {
        self.parent = None;
        self.cur = self.root;
        self.descend_to(target);
    }

    fn descend_to(&mut self, target: &I) {
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
}

impl<I: Ord> Default for AvlTree<I> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================
// Cursor protocol
// ============================================================

impl<I: Ord> Cursor for AvlTree<I> {
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

impl<I: Ord> Searchable for AvlTree<I> {
    fn search(&mut self, target: &I) {
        if self.search_mode == SearchMode::Restart || self.above() {
            self.parent = None;
            self.cur = self.root;
        } else if let Some(current) = self.cur {
            self.parent = Some(current);
            self.cur = self.arena.get(current).right;
        }

        self.descend_to(target);
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

    fn assert_avl_at<I: Ord>(tree: &AvlTree<I>, root: Option<usize>) -> usize {
        let Some(index) = root else {
            return 0;
        };
        let node = tree.arena.get(index);

        let left = assert_avl_at(tree, node.left);
        let right = assert_avl_at(tree, node.right);

        assert_eq!(node.left_height, left, "stale stored left height");
        assert_eq!(node.right_height, right, "stale stored right height");
        assert!(
            left.abs_diff(right) <= 1,
            "AVL property violated: subtree heights {left} and {right}"
        );

        if let Some(child) = node.left {
            assert!(tree.arena.get(child).item < node.item);
        }
        if let Some(child) = node.right {
            assert!(tree.arena.get(child).item >= node.item);
        }

        1 + left.max(right)
    }

    fn assert_avl(tree: &AvlTree<i32>) {
        let height = assert_avl_at(tree, tree.root);
        assert_eq!(tree.height(), height);
    }

    #[test]
    fn test_ascending_insertions_stay_balanced() {
        let mut tree = AvlTree::new();

        for item in 1..=100 {
            tree.insert(item);
            assert_avl(&tree);
        }

        assert_eq!(tree.len(), 100);
        assert_eq!(tree.height(), 7);
    }

    #[test]
    fn test_double_rotation_cases() {
        // Left-right: 3, 1, 2 forces a rotation at the root where the
        // left child leans right.
        let mut tree = AvlTree::new();
        for item in [3, 1, 2] {
            tree.insert(item);
        }
        assert_avl(&tree);
        assert_eq!(tree.height(), 2);

        // Right-left mirror.
        let mut tree = AvlTree::new();
        for item in [1, 3, 2] {
            tree.insert(item);
        }
        assert_avl(&tree);
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn test_delete_rebalances() {
        let mut tree = AvlTree::new();
        for item in [8, 4, 12, 2, 6, 10, 14, 1] {
            tree.insert(item);
        }

        // Removing from the right spine leaves the left side taller.
        tree.delete(&14).unwrap();
        tree.delete(&10).unwrap();
        tree.delete(&12).unwrap();

        assert_avl(&tree);
        assert_eq!(tree.len(), 5);
        for item in [8, 4, 2, 6, 1] {
            assert!(tree.has(&item));
        }
    }

    #[test]
    fn test_delete_missing_item_fails() {
        let mut tree = AvlTree::new();
        tree.insert(1);

        assert_eq!(tree.delete(&2), Err(ContainerError::ItemNotFound));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_delete_item_lands_on_successor() {
        let mut tree = AvlTree::new();
        for item in [20, 10, 30, 25, 35] {
            tree.insert(item);
        }

        tree.search(&20);
        tree.delete_item().unwrap();

        assert_eq!(tree.item(), Ok(&25));
        assert!(!tree.has(&20));
        assert_avl(&tree);
    }

    #[test]
    fn test_delete_item_of_maximum_lands_below() {
        let mut tree = AvlTree::new();
        for item in [20, 10, 30] {
            tree.insert(item);
        }

        tree.search(&30);
        tree.delete_item().unwrap();

        assert!(!tree.item_exists());
        assert!(tree.below());
        assert_avl(&tree);
    }

    #[test]
    fn test_delete_item_without_current_item_fails() {
        let mut tree = AvlTree::<i32>::new();

        assert_eq!(tree.delete_item(), Err(ContainerError::NoCurrentItem));
    }

    #[test]
    fn test_duplicate_items_each_deletable() {
        let mut tree = AvlTree::new();
        for item in [5, 5, 1] {
            tree.insert(item);
        }

        tree.delete(&5).unwrap();
        assert!(tree.has(&5));
        assert_avl(&tree);

        tree.delete(&5).unwrap();
        assert!(!tree.has(&5));
        assert_eq!(tree.delete(&5), Err(ContainerError::ItemNotFound));
    }

    #[test]
    fn test_interleaved_inserts_and_deletes_preserve_avl() {
        let mut tree = AvlTree::new();

        for item in 0..50 {
            tree.insert(item * 7 % 50);
        }
        for item in 0..25 {
            tree.delete(&(item * 7 % 50)).unwrap();
            assert_avl(&tree);
        }

        assert_eq!(tree.len(), 25);
    }
}

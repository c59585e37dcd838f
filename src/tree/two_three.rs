//! A 2-3 tree with all items in linked leaves.
//!
//! [`TwoThreeTree`] stores [`Keyed`] items in the leaves of a perfectly
//! height-balanced tree whose internal nodes hold only separator keys
//! and two or three children. The leaves are additionally threaded into
//! a doubly linked chain in ascending key order, which is what gives the
//! container its linear cursor: stepping to the next item is a single
//! link dereference rather than a tree walk.
//!
//! Insertion splits overfull nodes on the way back up; deletion repairs
//! underfull nodes by stealing a child from a three-child sibling or, if
//! both siblings hold only two, by merging into one of them.
//!
//! # Complexity
//!
//! | Operation           | Worst           |
//! |---------------------|-----------------|
//! | `insert`            | O(log n)        |
//! | `search`, `obtain`  | O(log n)        |
//! | `delete`            | O(log n)        |
//! | `go_forth`          | O(1)            |
//! | `minimum`, `maximum`| O(1)            |
//! | `search_ceiling_of` | O(n)            |
//!
//! # Examples
//!
//! ```rust
//! use cursory::prelude::*;
//!
//! let mut tree = TwoThreeTree::new();
//! for key in [30_u32, 10, 50, 20, 40] {
//!     tree.insert(key)?;
//! }
//!
//! // The leaf chain yields items in ascending key order.
//! let items: Vec<u32> = tree.iter().copied().collect();
//! assert_eq!(items, [10, 20, 30, 40, 50]);
//!
//! tree.search_ceiling_of(&25);
//! assert_eq!(tree.item(), Ok(&30));
//! # Ok::<(), cursory::error::ContainerError>(())
//! ```

use std::fmt;

use crate::cursor::{Cursor, CursorSaving, Keyed, KeyedCursor, LinearCursor, SearchMode};
use crate::error::{ContainerError, Result};

use super::arena::Arena;

// ============================================================
// Nodes
// ============================================================

struct LeafNode<I> {
    item: I,
    next: Option<usize>,
    prev: Option<usize>,
}

/// `key1` separates `left` from `middle` (it is the smallest key in the
/// `middle` subtree); `key2` separates `middle` from `right` likewise.
/// A two-child node has `key2` and `right` absent. `key1` and `middle`
/// are only ever absent transiently, while deletion repair is running.
struct InternalNode<K> {
    key1: Option<K>,
    key2: Option<K>,
    left: usize,
    middle: Option<usize>,
    right: Option<usize>,
}

enum Node<I: Keyed> {
    Leaf(LeafNode<I>),
    Internal(InternalNode<I::Key>),
}

/// The subtree slot of an internal node a descent step chooses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    Left,
    Middle,
    Right,
}

// ============================================================
// TwoThreeTree
// ============================================================

/// A saved cursor position of a [`TwoThreeTree`], capturing both the
/// current leaf and its predecessor so the before/after sentinel states
/// survive the round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoThreeTreePosition {
    cursor: Option<usize>,
    prev: Option<usize>,
}

/// A 2-3 tree of [`Keyed`] items with linked leaves and a linear cursor.
///
/// Keys are unique; inserting a duplicate key is rejected with
/// [`ContainerError::DuplicateItems`]. The cursor walks the leaf chain
/// in ascending key order between the usual before and after sentinel
/// states.
pub struct TwoThreeTree<I: Keyed> {
    arena: Arena<Node<I>>,
    root: Option<usize>,
    smallest: Option<usize>,
    largest: Option<usize>,
    cursor: Option<usize>,
    prev: Option<usize>,
    length: usize,
    search_mode: SearchMode,
}

impl<I: Keyed> TwoThreeTree<I>
where
    I::Key: Clone,
{
    /// Creates an empty tree with the cursor in the before position.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            smallest: None,
            largest: None,
            cursor: None,
            prev: None,
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

    /// Returns the number of levels including the leaf level; an empty
    /// tree has height 0.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut walk = self.root;

        while let Some(index) = walk {
            height += 1;
            walk = match self.arena.get(index) {
                Node::Leaf(_) => None,
                Node::Internal(node) => Some(node.left),
            };
        }

        height
    }

    /// Returns the item with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ContainerEmpty`] when the tree has no
    /// items.
    pub fn minimum(&self) -> Result<&I> {
        self.smallest
            .map(|index| &self.leaf(index).item)
            .ok_or(ContainerError::ContainerEmpty)
    }

    /// Returns the item with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ContainerEmpty`] when the tree has no
    /// items.
    pub fn maximum(&self) -> Result<&I> {
        self.largest
            .map(|index| &self.leaf(index).item)
            .ok_or(ContainerError::ContainerEmpty)
    }

    /// Returns `true` iff an item with key `key` is present, without
    /// moving the cursor.
    #[must_use]
    pub fn has(&self, key: &I::Key) -> bool {
        self.find_leaf(key).is_some()
    }

    /// Returns the item with key `key` without moving the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ItemNotFound`] when no item has that
    /// key.
    pub fn obtain(&self, key: &I::Key) -> Result<&I> {
        self.find_leaf(key)
            .map(|index| &self.leaf(index).item)
            .ok_or(ContainerError::ItemNotFound)
    }

    /// Returns an iterator over the items in ascending key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, I> {
        Iter {
            tree: self,
            walk: self.smallest,
        }
    }

    /// Returns the active search mode.
    #[must_use]
    pub const fn search_mode(&self) -> SearchMode {
        self.search_mode
    }

    /// Sets the search mode; only [`search_ceiling_of`] consults it.
    ///
    /// [`search_ceiling_of`]: Self::search_ceiling_of
    pub fn set_search_mode(&mut self, mode: SearchMode) {
        self.search_mode = mode;
    }

    /// Makes every following ceiling search start from the smallest key.
    pub fn restart_searches(&mut self) {
        self.set_search_mode(SearchMode::Restart);
    }

    /// Makes every following ceiling search continue past the current
    /// cursor position.
    pub fn resume_searches(&mut self) {
        self.set_search_mode(SearchMode::Resume);
    }

    /// Moves the cursor to the item with key `key`, or to the after
    /// position when no item has that key.
    pub fn search(&mut self, key: &I::Key) {
        match self.find_leaf(key) {
            Some(index) => {
                self.prev = self.leaf(index).prev;
                self.cursor = Some(index);
            }
            None => self.go_after(),
        }
    }

    /// Moves the cursor to the first item whose key is greater than or
    /// equal to `key`, scanning the leaf chain; under
    /// [`SearchMode::Resume`] the scan continues past the current
    /// position instead of restarting at the smallest key. With no such
    /// item the cursor ends in the after position.
    pub fn search_ceiling_of(&mut self, key: &I::Key) {
        match self.search_mode {
            SearchMode::Restart => {
                self.cursor = self.smallest;
                self.prev = None;
            }
            SearchMode::Resume => {
                if self.before() {
                    self.cursor = self.smallest;
                    self.prev = None;
                } else if let Some(current) = self.cursor {
                    self.prev = Some(current);
                    self.cursor = self.leaf(current).next;
                }
            }
        }

        while let Some(current) = self.cursor {
            if *self.leaf(current).item.key() >= *key {
                break;
            }
            self.prev = Some(current);
            self.cursor = self.leaf(current).next;
        }
    }

    /// Inserts `item`, splitting overfull nodes up the insertion path.
    /// The cursor does not move.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::DuplicateItems`] when an item with the
    /// same key is already present.
    pub fn insert(&mut self, item: I) -> Result<()> {
        if self.has(item.key()) {
            return Err(ContainerError::DuplicateItems);
        }

        match self.root {
            None => {
                let leaf = self.arena.alloc(Node::Leaf(LeafNode {
                    item,
                    next: None,
                    prev: None,
                }));
                self.root = Some(leaf);
                self.smallest = Some(leaf);
                self.largest = Some(leaf);
            }
            Some(root) => {
                if let Some((extra, separator)) = self.insert_below(root, item) {
                    let new_root = self.arena.alloc(Node::Internal(InternalNode {
                        key1: Some(separator),
                        key2: None,
                        left: root,
                        middle: Some(extra),
                        right: None,
                    }));
                    self.root = Some(new_root);
                }
            }
        }

        self.length += 1;

        Ok(())
    }

    /// Deletes the item with key `key`, repairing underfull nodes up the
    /// deletion path. A cursor positioned at the deleted item moves to
    /// its successor.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ItemNotFound`] when no item has that
    /// key.
    pub fn delete(&mut self, key: &I::Key) -> Result<()> {
        let Some(victim) = self.find_leaf(key) else {
            return Err(ContainerError::ItemNotFound);
        };

        // Move the cursor off the dying leaf before the links go away.
        let (dying_prev, dying_next) = {
            let leaf = self.leaf(victim);
            (leaf.prev, leaf.next)
        };
        if self.cursor == Some(victim) {
            self.cursor = dying_next;
            self.prev = dying_prev;
        } else if self.prev == Some(victim) {
            self.prev = dying_prev;
        }

        let root = self.root.expect("non-empty tree without a root");
        if victim == root {
            self.unlink_leaf(victim);
            self.arena.release(victim);
            self.root = None;
        } else {
            self.delete_below(root, key);
            if let Node::Internal(node) = self.arena.get(root) {
                if node.middle.is_none() {
                    let promoted = node.left;
                    self.arena.release(root);
                    self.root = Some(promoted);
                }
            }
        }

        self.length -= 1;

        Ok(())
    }

    /// Deletes the current item and moves the cursor to its successor.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::NoCurrentItem`] when the cursor is not
    /// positioned at an item.
    pub fn delete_item(&mut self) -> Result<()> {
        let key = self.item()?.key().clone();
        self.delete(&key)
    }

    /// Replaces the current item with `item`, which must carry the same
    /// key.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::NoCurrentItem`] when the cursor is not
    /// positioned at an item, and [`ContainerError::InvalidArgument`]
    /// when the keys differ (that would silently break the separator
    /// keys above the leaf).
    pub fn set_item(&mut self, item: I) -> Result<()> {
        let Some(current) = self.cursor else {
            return Err(ContainerError::NoCurrentItem);
        };
        if item.key() != self.leaf(current).item.key() {
            return Err(ContainerError::InvalidArgument);
        }

        self.leaf_mut(current).item = item;

        Ok(())
    }

    /// Removes every item and returns the cursor to the before position.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.smallest = None;
        self.largest = None;
        self.cursor = None;
        self.prev = None;
        self.length = 0;
    }

    // ------------------------------------------------------------
    // Node accessors
    // ------------------------------------------------------------

    fn leaf(&self, index: usize) -> &LeafNode<I> {
        match self.arena.get(index) {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => panic!("expected a leaf node"),
        }
    }

    fn leaf_mut(&mut self, index: usize) -> &mut LeafNode<I> {
        match self.arena.get_mut(index) {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => panic!("expected a leaf node"),
        }
    }

    fn internal(&self, index: usize) -> &InternalNode<I::Key> {
        match self.arena.get(index) {
            Node::Internal(node) => node,
            Node::Leaf(_) => panic!("expected an internal node"),
        }
    }

    fn internal_mut(&mut self, index: usize) -> &mut InternalNode<I::Key> {
        match self.arena.get_mut(index) {
            Node::Internal(node) => node,
            Node::Leaf(_) => panic!("expected an internal node"),
        }
    }

    fn is_leaf(&self, index: usize) -> bool {
        matches!(self.arena.get(index), Node::Leaf(_))
    }

    fn branch_for(&self, index: usize, key: &I::Key) -> Branch {
        let node = self.internal(index);

        if node.key1.as_ref().is_none_or(|key1| key < key1) {
            Branch::Left
        } else if node.key2.as_ref().is_none_or(|key2| key < key2) {
            Branch::Middle
        } else {
            Branch::Right
        }
    }

    fn child(&self, index: usize, branch: Branch) -> usize {
        let node = self.internal(index);
        match branch {
            Branch::Left => node.left,
            Branch::Middle => node.middle.expect("descent chose a missing middle subtree"),
            Branch::Right => node.right.expect("descent chose a missing right subtree"),
        }
    }

    fn find_leaf(&self, key: &I::Key) -> Option<usize> {
        let mut walk = self.root?;

        while !self.is_leaf(walk) {
            walk = self.child(walk, self.branch_for(walk, key));
        }

        (self.leaf(walk).item.key() == key).then_some(walk)
    }

    // ------------------------------------------------------------
    // Insertion
    // ------------------------------------------------------------

    /// Inserts `item` into the subtree rooted at `index`. A split
    /// returns the spawned sibling (immediately right of `index`) and
    /// the separator key between the two, for the caller to absorb.
    fn insert_below(&mut self, index: usize, item: I) -> Option<(usize, I::Key)> {
        if self.is_leaf(index) {
            // A leaf holds one item, so arriving here always splits. The
            // items are arranged so the existing leaf keeps the smaller
            // one and the new leaf sits immediately after it in the
            // chain.
            let mut item = item;
            if item.key() < self.leaf(index).item.key() {
                std::mem::swap(&mut item, &mut self.leaf_mut(index).item);
            }

            let separator = item.key().clone();
            let old_next = self.leaf(index).next;
            let new_leaf = self.arena.alloc(Node::Leaf(LeafNode {
                item,
                next: old_next,
                prev: Some(index),
            }));
            self.leaf_mut(index).next = Some(new_leaf);
            match old_next {
                Some(next) => self.leaf_mut(next).prev = Some(new_leaf),
                None => self.largest = Some(new_leaf),
            }

            return Some((new_leaf, separator));
        }

        let branch = self.branch_for(index, item.key());
        let child = self.child(index, branch);
        let (extra, separator) = self.insert_below(child, item)?;

        if self.internal(index).right.is_none() {
            // Room for a third child.
            let node = self.internal_mut(index);
            match branch {
                Branch::Left => {
                    node.right = node.middle.take();
                    node.key2 = node.key1.take();
                    node.middle = Some(extra);
                    node.key1 = Some(separator);
                }
                Branch::Middle => {
                    node.right = Some(extra);
                    node.key2 = Some(separator);
                }
                Branch::Right => unreachable!("a two-child node has no right branch"),
            }
            return None;
        }

        // Full node: keep the two leftmost of the four children here,
        // spawn a sibling holding the other two, and pass the key
        // between child two and child three up to the caller.
        match branch {
            Branch::Left => {
                let (middle, right, key1, key2) = {
                    let node = self.internal_mut(index);
                    (
                        node.middle.take(),
                        node.right.take(),
                        node.key1.take(),
                        node.key2.take(),
                    )
                };
                let spawned = self.arena.alloc(Node::Internal(InternalNode {
                    key1: key2,
                    key2: None,
                    left: middle.expect("full node missing its middle child"),
                    middle: right,
                    right: None,
                }));

                let node = self.internal_mut(index);
                node.middle = Some(extra);
                node.key1 = Some(separator);

                Some((spawned, key1.expect("full node missing its first key")))
            }
            Branch::Middle => {
                let (right, key2) = {
                    let node = self.internal_mut(index);
                    (node.right.take(), node.key2.take())
                };
                let spawned = self.arena.alloc(Node::Internal(InternalNode {
                    key1: key2,
                    key2: None,
                    left: extra,
                    middle: right,
                    right: None,
                }));

                Some((spawned, separator))
            }
            Branch::Right => {
                let (right, key2) = {
                    let node = self.internal_mut(index);
                    (node.right.take(), node.key2.take())
                };
                let spawned = self.arena.alloc(Node::Internal(InternalNode {
                    key1: Some(separator),
                    key2: None,
                    left: right.expect("full node missing its right child"),
                    middle: Some(extra),
                    right: None,
                }));

                Some((spawned, key2.expect("full node missing its second key")))
            }
        }
    }

    // ------------------------------------------------------------
    // Deletion
    // ------------------------------------------------------------

    fn unlink_leaf(&mut self, index: usize) {
        let (prev, next) = {
            let leaf = self.leaf(index);
            (leaf.prev, leaf.next)
        };

        match prev {
            Some(before) => self.leaf_mut(before).next = next,
            None => self.smallest = next,
        }
        match next {
            Some(after) => self.leaf_mut(after).prev = prev,
            None => self.largest = prev,
        }
    }

    /// Deletes the leaf holding `key` from the subtree rooted at the
    /// internal node `index`, which has at least two children on entry
    /// and may be left with one on return for the caller to repair.
    fn delete_below(&mut self, index: usize, key: &I::Key) {
        let branch = self.branch_for(index, key);
        let child = self.child(index, branch);

        if self.is_leaf(child) {
            self.unlink_leaf(child);
            self.arena.release(child);

            let node = self.internal_mut(index);
            match branch {
                Branch::Left => {
                    node.left = node
                        .middle
                        .take()
                        .expect("two-three node lost its middle child");
                    node.key1 = node.key2.take();
                    node.middle = node.right.take();
                }
                Branch::Middle => {
                    node.key1 = node.key2.take();
                    node.middle = node.right.take();
                }
                Branch::Right => {
                    node.key2 = None;
                    node.right = None;
                }
            }
        } else {
            self.delete_below(child, key);
            if self.internal(child).middle.is_none() {
                self.repair(index, branch, child);
            }
        }
    }

    /// Restores `child` (down to a single subtree) to two children, in
    /// the original repair order: steal from the left sibling, steal
    /// from the right sibling, then merge into whichever sibling exists.
    fn repair(&mut self, parent: usize, branch: Branch, child: usize) {
        if self.steal_left(parent, branch, child)
            || self.steal_right(parent, branch, child)
            || self.give_left(parent, branch, child)
            || self.give_right(parent, branch, child)
        {
            return;
        }

        panic!("two-three deletion repair exhausted every strategy");
    }

    /// Takes the rightmost child of a three-child left sibling.
    fn steal_left(&mut self, parent: usize, branch: Branch, child: usize) -> bool {
        let sibling = match branch {
            Branch::Left => return false,
            Branch::Middle => self.internal(parent).left,
            Branch::Right => self
                .internal(parent)
                .middle
                .expect("right branch without a middle sibling"),
        };
        if self.internal(sibling).right.is_none() {
            return false;
        }

        let (moved, moved_key) = {
            let node = self.internal_mut(sibling);
            (
                node.right.take().expect("checked right child vanished"),
                node.key2.take().expect("three-child node missing key2"),
            )
        };

        // The old separator descends into the repaired child; the donated
        // subtree's smallest key becomes the new separator.
        let slot = match branch {
            Branch::Middle => &mut self.internal_mut(parent).key1,
            _ => &mut self.internal_mut(parent).key2,
        };
        let separator = slot
            .replace(moved_key)
            .expect("separator missing between siblings");

        let node = self.internal_mut(child);
        node.middle = Some(node.left);
        node.left = moved;
        node.key1 = Some(separator);

        true
    }

    /// Takes the leftmost child of a three-child right sibling.
    fn steal_right(&mut self, parent: usize, branch: Branch, child: usize) -> bool {
        let sibling = match branch {
            Branch::Left => self
                .internal(parent)
                .middle
                .expect("left branch without a middle sibling"),
            Branch::Middle => match self.internal(parent).right {
                Some(right) => right,
                None => return false,
            },
            Branch::Right => return false,
        };
        if self.internal(sibling).right.is_none() {
            return false;
        }

        let (moved, promoted_key) = {
            let node = self.internal_mut(sibling);
            let moved = node.left;
            node.left = node
                .middle
                .take()
                .expect("three-child node missing its middle child");
            node.middle = node.right.take();
            let promoted = node.key1.take().expect("three-child node missing key1");
            node.key1 = node.key2.take();
            (moved, promoted)
        };

        let slot = match branch {
            Branch::Left => &mut self.internal_mut(parent).key1,
            _ => &mut self.internal_mut(parent).key2,
        };
        let separator = slot
            .replace(promoted_key)
            .expect("separator missing between siblings");

        let node = self.internal_mut(child);
        node.middle = Some(moved);
        node.key1 = Some(separator);

        true
    }

    /// Merges the repaired child's single subtree into a two-child left
    /// sibling, removing the child from the parent.
    fn give_left(&mut self, parent: usize, branch: Branch, child: usize) -> bool {
        let sibling = match branch {
            Branch::Left => return false,
            Branch::Middle => self.internal(parent).left,
            Branch::Right => self
                .internal(parent)
                .middle
                .expect("right branch without a middle sibling"),
        };

        let separator = match branch {
            Branch::Middle => self.internal_mut(parent).key1.take(),
            _ => self.internal_mut(parent).key2.take(),
        }
        .expect("separator missing between siblings");

        let orphan = self.internal(child).left;
        {
            let node = self.internal_mut(sibling);
            node.right = Some(orphan);
            node.key2 = Some(separator);
        }
        self.arena.release(child);

        let node = self.internal_mut(parent);
        match branch {
            Branch::Middle => {
                node.middle = node.right.take();
                node.key1 = node.key2.take();
            }
            _ => node.right = None,
        }

        true
    }

    /// Merges the repaired child's single subtree into a two-child right
    /// sibling; only reachable when the child is the leftmost branch.
    fn give_right(&mut self, parent: usize, branch: Branch, child: usize) -> bool {
        if branch != Branch::Left {
            return false;
        }

        let sibling = self
            .internal(parent)
            .middle
            .expect("left branch without a middle sibling");
        let separator = self
            .internal_mut(parent)
            .key1
            .take()
            .expect("separator missing between siblings");

        let orphan = self.internal(child).left;
        {
            let node = self.internal_mut(sibling);
            node.right = node.middle.take();
            node.key2 = node.key1.take();
            node.middle = Some(node.left);
            node.left = orphan;
            node.key1 = Some(separator);
        }
        self.arena.release(child);

        let node = self.internal_mut(parent);
        node.left = node
            .middle
            .take()
            .expect("left branch without a middle sibling");
        node.key1 = node.key2.take();
        node.middle = node.right.take();

        true
    }
}

impl<I: Keyed> Default for TwoThreeTree<I>
where
    I::Key: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Keyed + fmt::Debug> fmt::Debug for TwoThreeTree<I>
where
    I::Key: Clone,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// ============================================================
// Iteration
// ============================================================

/// An iterator over a [`TwoThreeTree`]'s items in ascending key order,
/// created by [`TwoThreeTree::iter`]. It walks the leaf chain and never
/// touches internal nodes.
pub struct Iter<'a, I: Keyed> {
    tree: &'a TwoThreeTree<I>,
    walk: Option<usize>,
}

impl<'a, I: Keyed> Iterator for Iter<'a, I>
where
    I::Key: Clone,
{
    type Item = &'a I;

    fn next(&mut self) -> Option<&'a I> {
        let current = self.walk?;
        let leaf = self.tree.leaf(current);
        self.walk = leaf.next;
        Some(&leaf.item)
    }
}

// ============================================================
// Cursor protocol
// ============================================================

impl<I: Keyed> Cursor for TwoThreeTree<I>
where
    I::Key: Clone,
{
    type Item = I;

    fn item(&self) -> Result<&I> {
        self.cursor
            .map(|index| &self.leaf(index).item)
            .ok_or(ContainerError::NoCurrentItem)
    }

    fn item_exists(&self) -> bool {
        self.cursor.is_some()
    }
}

impl<I: Keyed> LinearCursor for TwoThreeTree<I>
where
    I::Key: Clone,
{
    fn before(&self) -> bool {
        self.cursor.is_none() && self.prev.is_none()
    }

    fn after(&self) -> bool {
        (self.cursor.is_none() && self.prev.is_some()) || self.is_empty()
    }

    fn go_first(&mut self) -> Result<()> {
        if self.is_empty() {
            return Err(ContainerError::ContainerEmpty);
        }

        self.cursor = self.smallest;
        self.prev = None;

        Ok(())
    }

    fn go_forth(&mut self) -> Result<()> {
        if self.after() {
            return Err(ContainerError::AfterTheEnd);
        }
        if self.before() {
            return self.go_first();
        }

        let current = self.cursor.expect("cursor lost between sentinel states");
        self.prev = Some(current);
        self.cursor = self.leaf(current).next;

        Ok(())
    }

    fn go_before(&mut self) {
        self.cursor = None;
        self.prev = None;
    }

    fn go_after(&mut self) {
        self.cursor = None;
        self.prev = self.largest;
    }
}

impl<I: Keyed> CursorSaving for TwoThreeTree<I>
where
    I::Key: Clone,
{
    type Position = TwoThreeTreePosition;

    fn current_position(&self) -> TwoThreeTreePosition {
        TwoThreeTreePosition {
            cursor: self.cursor,
            prev: self.prev,
        }
    }

    fn go_position(&mut self, position: &TwoThreeTreePosition) {
        self.cursor = position.cursor;
        self.prev = position.prev;
    }
}

impl<I: Keyed> KeyedCursor for TwoThreeTree<I> where I::Key: Clone {}

// ============================================================
// Tests
// ============================================================

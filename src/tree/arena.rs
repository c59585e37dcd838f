//! Index-based node storage shared by the tree containers.
//!
//! Nodes live in a slot vector owned by the container and refer to each
//! other by index, so cursors and parent links are plain `usize` values
//! with no ownership entanglement. Released slots are recycled through a
//! free list.

/// A slot vector with a free list. Indices stay stable across
/// allocations and releases, so stored links never need fixing up.
#[derive(Debug, Clone)]
pub(super) struct Arena<N> {
    slots: Vec<Option<N>>,
    free: Vec<usize>,
}

impl<N> Arena<N> {
    pub(super) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Stores `node` and returns its index, preferring a recycled slot.
    pub(super) fn alloc(&mut self, node: N) -> usize {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                index
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Removes the node at `index` and recycles its slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot is already free; that means a dangling index
    /// escaped, which is an internal invariant violation.
    pub(super) fn release(&mut self, index: usize) -> N {
        let node = self.slots[index]
            .take()
            .expect("released arena slot is already free");
        self.free.push(index);
        node
    }

    /// # Panics
    ///
    /// Panics if the slot is free.
    pub(super) fn get(&self, index: usize) -> &N {
        self.slots[index]
            .as_ref()
            .expect("dereferenced arena slot is free")
    }

    /// # Panics
    ///
    /// Panics if the slot is free.
    pub(super) fn get_mut(&mut self, index: usize) -> &mut N {
        self.slots[index]
            .as_mut()
            .expect("dereferenced arena slot is free")
    }

    /// Drops every node and forgets the free list.
    pub(super) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

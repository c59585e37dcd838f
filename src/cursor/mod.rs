//! The cursor protocol shared by every container.
//!
//! A *cursor* is a movable "current item" indicator over a container. It
//! is always in exactly one of three states:
//!
//! - **before** the first item in the container's linear ordering,
//! - **at** a valid item (`item_exists()` is true exactly here),
//! - **after** the last item.
//!
//! The traits in this module split the protocol into capabilities, so
//! each container implements only the parts its representation supports:
//!
//! - [`Cursor`]: read access to the current item
//! - [`LinearCursor`]: movement through the container's linear ordering
//! - [`CursorSaving`]: opaque position snapshots
//! - [`Searchable`]: cursor-positioning search with a persistent
//!   restart/resume [`SearchMode`]
//! - [`KeyedCursor`]: key access for containers of [`Keyed`] items
//!
//! Cursors are views, never owners: a position refers into the container
//! and is invalidated by structural mutation (for example deletion of the
//! referenced node). Using an invalidated position, or a position
//! obtained from a different container instance, is a precondition
//! violation with unspecified (though memory-safe) results.

use crate::error::Result;

/// The persistent search behavior of a container.
///
/// The active mode is container-wide state that persists until it is
/// explicitly changed; it is not a per-call parameter.
///
/// # Examples
///
/// ```rust
/// use cursory::prelude::*;
///
/// let mut table = ChainedHashTable::new(8);
/// table.insert(7);
///
/// // Under Restart, repeated searches keep finding the same item.
/// table.set_search_mode(SearchMode::Restart);
/// table.search(&7);
/// table.search(&7);
/// assert!(table.item_exists());
///
/// // Under Resume, a repeated search moves past it instead.
/// table.set_search_mode(SearchMode::Resume);
/// table.search(&7);
/// assert!(!table.item_exists());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Every search starts over from the beginning of the linear
    /// ordering; only the first match is ever reachable.
    #[default]
    Restart,
    /// Every search continues from the successor of the current cursor
    /// position, so repeated searches enumerate duplicate occurrences.
    Resume,
}

/// Read access to a container's current item.
pub trait Cursor {
    /// The type of item stored in the container.
    type Item;

    /// Returns a reference to the current item.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::NoCurrentItem`] when the cursor is in
    /// the before or after position.
    ///
    /// [`ContainerError::NoCurrentItem`]: crate::error::ContainerError::NoCurrentItem
    fn item(&self) -> Result<&Self::Item>;

    /// Returns `true` iff the cursor is positioned at a valid item.
    fn item_exists(&self) -> bool;
}

/// Movement through a container's linear ordering.
pub trait LinearCursor: Cursor {
    /// Returns `true` iff the cursor is before the first item.
    fn before(&self) -> bool;

    /// Returns `true` iff the cursor is after the last item.
    fn after(&self) -> bool;

    /// Moves the cursor to the first item in the linear ordering.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ContainerEmpty`] when the container has
    /// no items.
    ///
    /// [`ContainerError::ContainerEmpty`]: crate::error::ContainerError::ContainerEmpty
    fn go_first(&mut self) -> Result<()>;

    /// Advances the cursor one step in the linear ordering. From the
    /// before position this behaves like [`go_first`](Self::go_first).
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::AfterTheEnd`] when the cursor is
    /// already in the after position.
    ///
    /// [`ContainerError::AfterTheEnd`]: crate::error::ContainerError::AfterTheEnd
    fn go_forth(&mut self) -> Result<()>;

    /// Moves the cursor to the before position. Always succeeds, even on
    /// an empty container.
    fn go_before(&mut self);

    /// Moves the cursor to the after position. Always succeeds, even on
    /// an empty container.
    fn go_after(&mut self);
}

/// Capture and restore of cursor positions as opaque tokens.
pub trait CursorSaving {
    /// An immutable snapshot of a cursor position. It contains only the
    /// fields needed to resume iteration, never a copy of the container.
    type Position;

    /// Captures the current cursor position.
    fn current_position(&self) -> Self::Position;

    /// Restores a previously captured cursor position.
    ///
    /// The position must have been obtained from this container
    /// instance, and no structural mutation may have invalidated it in
    /// the meantime; violating either precondition leaves the cursor in
    /// an unspecified state.
    fn go_position(&mut self, position: &Self::Position);
}

/// Cursor-positioning search with persistent restart/resume behavior.
pub trait Searchable: Cursor {
    /// Moves the cursor to the next occurrence of `target` in the
    /// container's linear ordering, or leaves `item_exists()` false when
    /// there is none.
    ///
    /// Under [`SearchMode::Restart`] the search starts over from the
    /// beginning; under [`SearchMode::Resume`] it continues from the
    /// successor of the current position.
    fn search(&mut self, target: &Self::Item);

    /// Returns the active search mode.
    fn search_mode(&self) -> SearchMode;

    /// Sets the search mode. The mode persists until changed again.
    fn set_search_mode(&mut self, mode: SearchMode);

    /// Makes every following search start from the beginning of the
    /// linear ordering.
    fn restart_searches(&mut self) {
        self.set_search_mode(SearchMode::Restart);
    }

    /// Makes every following search continue from the successor of the
    /// current cursor position.
    fn resume_searches(&mut self) {
        self.set_search_mode(SearchMode::Resume);
    }
}

/// An item that carries its own comparable key.
///
/// Keyed containers store items of any type implementing this trait and
/// index them by the returned key.
///
/// # Examples
///
/// ```rust
/// use cursory::cursor::Keyed;
///
/// struct Skill {
///     name: String,
///     cost: u32,
/// }
///
/// impl Keyed for Skill {
///     type Key = String;
///
///     fn key(&self) -> &String {
///         &self.name
///     }
/// }
/// # let _ = Skill { name: "Shield Bash".to_string(), cost: 5 };
/// ```
pub trait Keyed {
    /// The key type items are ordered and looked up by.
    type Key: Ord;

    /// Returns the key of this item.
    fn key(&self) -> &Self::Key;
}

/// Key access for cursors over [`Keyed`] items.
pub trait KeyedCursor: Cursor
where
    Self::Item: Keyed,
{
    /// Returns the key of the current item.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::NoCurrentItem`] when the cursor is not
    /// positioned at a valid item.
    ///
    /// [`ContainerError::NoCurrentItem`]: crate::error::ContainerError::NoCurrentItem
    fn item_key(&self) -> Result<&<Self::Item as Keyed>::Key> {
        self.item().map(Keyed::key)
    }

    /// Returns the current key-item pair.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::NoCurrentItem`] when the cursor is not
    /// positioned at a valid item.
    ///
    /// [`ContainerError::NoCurrentItem`]: crate::error::ContainerError::NoCurrentItem
    fn key_item_pair(&self) -> Result<(&<Self::Item as Keyed>::Key, &Self::Item)> {
        self.item().map(|item| (item.key(), item))
    }
}

// Self-keyed primitives, so plain ordered values can be stored in keyed
// containers directly. A blanket impl over `Ord` would forbid every
// downstream key-carrying struct, hence the enumeration.
macro_rules! self_keyed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Keyed for $ty {
                type Key = $ty;

                fn key(&self) -> &$ty {
                    self
                }
            }
        )*
    };
}

self_keyed!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, char, bool, String,
);

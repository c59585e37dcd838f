//! Error types for container operations.
//!
//! Every precondition violation in this crate is reported as a
//! [`ContainerError`] at the point of detection. No operation silently
//! does nothing or returns a sentinel value in place of signaling
//! failure, none of these conditions are retried internally, and a failed
//! operation always leaves the container in the state it was in
//! immediately before the call.
//!
//! Internal-consistency violations that should be unreachable (for
//! example a 2-3 tree deletion repair exhausting every strategy) are not
//! part of this taxonomy: they indicate a defect in the container itself
//! and abort via `panic!` rather than being returned to the caller.

use std::fmt;

/// A specialized `Result` type for container operations.
pub type Result<T> = std::result::Result<T, ContainerError>;

/// The failure taxonomy shared by every container in this crate.
///
/// Each variant corresponds to one specific, caller-causable precondition
/// violation. Operations document which variants they can produce.
///
/// # Examples
///
/// ```rust
/// use cursory::error::ContainerError;
///
/// let error = ContainerError::NoCurrentItem;
/// assert_eq!(
///     format!("{error}"),
///     "the cursor is not positioned at a valid item"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerError {
    /// The operation requires at least one item, but the container is
    /// empty.
    ContainerEmpty,
    /// The operation requires spare capacity in a fixed-capacity
    /// container, but none remains.
    ContainerFull,
    /// The operation requires `item_exists()` to be true, but the cursor
    /// is in the before or after position.
    NoCurrentItem,
    /// A lookup or delete-by-key found no matching entry.
    ItemNotFound,
    /// An insert targeted a key or item already present in a
    /// no-duplicates container.
    DuplicateItems,
    /// `go_forth` was called while the cursor was already in the after
    /// position.
    AfterTheEnd,
    /// A supplied parameter does not belong to or match this container
    /// instance.
    InvalidArgument,
}

impl fmt::Display for ContainerError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::ContainerEmpty => "the container is empty",
            Self::ContainerFull => "the container is full",
            Self::NoCurrentItem => "the cursor is not positioned at a valid item",
            Self::ItemNotFound => "no matching item exists in the container",
            Self::DuplicateItems => "an equal item is already present in the container",
            Self::AfterTheEnd => "the cursor is already past the end of the container",
            Self::InvalidArgument => "the argument does not match this container",
        };
        write!(formatter, "{message}")
    }
}

impl std::error::Error for ContainerError {}

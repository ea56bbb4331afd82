//! The closed result taxonomy shared by every container operation.
//!
//! Each public operation on a container returns exactly one [`Success`] or
//! [`Failure`] variant through the [`ContainerResult`] alias. Expected
//! failure modes are values, never panics; panics are reserved for
//! boundary violations through the raw view and for construction-time
//! programming errors.

use thiserror::Error;

/// Result type returned by every safe container operation.
pub type ContainerResult<T> = Result<Success<T>, Failure<T>>;

/// A successful container operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Success<T> {
    /// A slot read succeeded
    GetItem(T),
    /// A slot write succeeded
    SetItem,
    /// A slot was located
    FindSlot(usize),
    /// The verification predicate held for the given item
    VerifyItem(T),
    /// Two slots exchanged contents
    SwapItem,
    /// The entire requested amount was placed
    FullAddItem,
    /// Only part of the requested amount fit
    PartialAddItem {
        /// The portion that did not fit
        leftover: T,
    },
    /// The entire requested amount was removed
    FullTakeItem(T),
    /// Only part of the requested amount was available and was removed
    PartialTakeItem {
        /// What was actually removed
        taken: T,
        /// The requested portion that was not present
        leftover: T,
    },
}

/// A failed container operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure<T> {
    /// Index outside the container
    #[error("slot index {0} is out of bounds")]
    BadIndex(usize),

    /// Add target index outside the container
    #[error("add target slot {index} is out of bounds")]
    AddBadIndex {
        /// The offending index
        index: usize,
        /// The item that was being added
        item: T,
    },

    /// Swap source index outside the container
    #[error("swap source slot {0} is out of bounds")]
    BadFromIndex(usize),

    /// Swap destination index outside the container
    #[error("swap destination slot {0} is out of bounds")]
    BadToIndex(usize),

    /// Swap requested between a slot and itself
    #[error("cannot swap slot {0} with itself")]
    SameToFromIndex(usize),

    /// Target slot already holds a valid item
    #[error("slot {0} is already occupied")]
    SlotOccupied(usize),

    /// Add target slot already holds a valid item
    #[error("add target slot {index} is already occupied")]
    AddSlotOccupied {
        /// The occupied index
        index: usize,
        /// The item occupying it
        item: T,
    },

    /// Verification found an item of a different kind
    #[error("item id mismatch: expected {expected:?}, found {found:?}")]
    ItemIdMismatch {
        /// The item the caller asked about
        expected: T,
        /// The item actually in the slot
        found: T,
    },

    /// No room and the item cannot merge into an existing stack
    #[error("container is full")]
    ContainerFull(T),

    /// No slot holds this item's id at all
    #[error("item {0:?} not found in container")]
    ItemNotFound(T),

    /// No sentinel slot available
    #[error("no free slots")]
    NoFreeSlots,

    /// Attempted to add the empty-slot sentinel as real stock
    #[error("cannot add the empty item")]
    InvalidItemAddition,

    /// The amount present is less than requested
    #[error("not enough of the item present")]
    NotEnoughItemAmount,

    /// The amount present differs from the exact amount requested
    #[error("item amount does not match exactly")]
    NotExactItemAmount,
}

impl<T> Success<T> {
    /// The located slot index, when this is a [`Success::FindSlot`].
    #[must_use]
    pub fn slot(&self) -> Option<usize> {
        match self {
            Self::FindSlot(index) => Some(*index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        let failure: Failure<()> = Failure::BadIndex(9);
        assert_eq!(failure.to_string(), "slot index 9 is out of bounds");

        let failure: Failure<()> = Failure::SameToFromIndex(2);
        assert_eq!(failure.to_string(), "cannot swap slot 2 with itself");
    }

    #[test]
    fn test_find_slot_accessor() {
        let found: Success<()> = Success::FindSlot(3);
        assert_eq!(found.slot(), Some(3));
        assert_eq!(Success::<()>::SetItem.slot(), None);
    }
}

//! # Rucksack Container
//!
//! A generic, fixed-capacity slotted container for stackable and
//! non-stackable items:
//! - [`Container`](container::Container), the safe API: slot lookup,
//!   verification, add/take/swap, shifting, and stack consolidation
//! - [`RawSlots`](raw::RawSlots), the invariant-skipping view for call
//!   sites that validated their preconditions up front
//! - A closed [`Success`](result::Success)/[`Failure`](result::Failure)
//!   taxonomy returned by every mutating operation
//!
//! Containers are generic over the
//! [`SlotItem`](rucksack_common::slot_item::SlotItem) capability and never
//! depend on a concrete item type. A container is a synchronous,
//! single-owner, in-memory structure; persistence and transport belong to
//! the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod container;
pub mod raw;
pub mod result;

#[cfg(test)]
mod testing;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::container::*;
    pub use crate::raw::*;
    pub use crate::result::*;
}

pub use prelude::*;

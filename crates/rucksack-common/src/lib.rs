//! # Rucksack Common
//!
//! Item-level foundations for Rucksack containers:
//! - The [`SlotItem`](slot_item::SlotItem) capability trait that containers
//!   are generic over
//! - A concrete [`Item`](item::Item) value type
//! - Item definitions and the binary definition store loader
//! - Random item-list generation for test fixtures

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod definition;
pub mod item;
pub mod random;
pub mod slot_item;
pub mod store;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::definition::*;
    pub use crate::item::*;
    pub use crate::random::*;
    pub use crate::slot_item::*;
    pub use crate::store::*;
}

pub use prelude::*;

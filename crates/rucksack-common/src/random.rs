//! Random item-list generation for test fixtures.

use std::ops::Range;

use crate::item::Item;

/// Generates `len` random items with ids and amounts drawn from the given
/// ranges.
///
/// Ids below zero come out as [`Item::EMPTY`], so an id range starting at a
/// negative value sprinkles empty slots through the list. Handy for
/// populating containers in tests and benchmarks.
#[must_use]
pub fn random_item_list(len: usize, id_range: Range<i16>, amount_range: Range<i32>) -> Vec<Item> {
    (0..len)
        .map(|_| {
            Item::new(
                fastrand::i16(id_range.clone()),
                fastrand::i32(amount_range.clone()),
            )
        })
        .collect()
}

//! Test-only item type with predictable stackability.

use rucksack_common::slot_item::SlotItem;

/// A minimal capability implementation for container tests: even ids are
/// stackable, odd ids are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TestItem {
    pub(crate) id: i16,
    pub(crate) amount: i32,
}

impl SlotItem for TestItem {
    fn item_id(&self) -> i16 {
        self.id
    }

    fn amount(&self) -> i32 {
        self.amount
    }

    fn is_stackable(&self) -> bool {
        self.id >= 0 && self.id % 2 == 0
    }

    fn from_parts(id: i16, amount: i32) -> Self {
        if id < 0 {
            Self { id: -1, amount: 0 }
        } else {
            Self { id, amount }
        }
    }
}

/// Shorthand constructor.
pub(crate) fn item(id: i16, amount: i32) -> TestItem {
    TestItem::from_parts(id, amount)
}

/// The empty-slot sentinel.
pub(crate) fn empty() -> TestItem {
    TestItem::empty()
}

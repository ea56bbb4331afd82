//! The concrete item value type.

use serde::{Deserialize, Serialize};

use crate::definition;
use crate::slot_item::SlotItem;

/// A quantity of one kind of item, as stored in a container slot.
///
/// Stackability is not stored on the value; it is resolved through the
/// process-wide [`DefinitionTable`](crate::definition::DefinitionTable)
/// installed via [`definition::install`]. An item whose definition has not
/// been loaded is treated as non-stackable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    id: i16,
    amount: i32,
}

impl Item {
    /// The sentinel marking an empty slot.
    pub const EMPTY: Self = Self { id: -1, amount: 0 };

    /// Creates an item, normalizing any negative id to [`Item::EMPTY`].
    #[must_use]
    pub const fn new(id: i16, amount: i32) -> Self {
        if id < 0 {
            Self::EMPTY
        } else {
            Self { id, amount }
        }
    }

    /// Creates a single item of the given kind.
    #[must_use]
    pub const fn one(id: i16) -> Self {
        Self::new(id, 1)
    }

    /// The item's kind identifier.
    #[must_use]
    pub const fn id(self) -> i16 {
        self.id
    }
}

impl SlotItem for Item {
    fn item_id(&self) -> i16 {
        self.id
    }

    fn amount(&self) -> i32 {
        self.amount
    }

    fn is_stackable(&self) -> bool {
        match definition::installed() {
            Some(table) => {
                let def = table.get(self.id);
                def.stackable || def.noted
            }
            None => false,
        }
    }

    fn from_parts(id: i16, amount: i32) -> Self {
        Self::new(id, amount)
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_negative_ids() {
        assert_eq!(Item::new(-7, 500), Item::EMPTY);
        assert_eq!(Item::from_parts(-1, 3), Item::EMPTY);
    }

    #[test]
    fn test_one_has_amount_one() {
        let item = Item::one(42);
        assert_eq!(item.id(), 42);
        assert_eq!(item.amount(), 1);
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(Item::default(), Item::EMPTY);
    }
}

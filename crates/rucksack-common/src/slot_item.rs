//! The capability trait that decouples containers from any concrete item
//! representation.

/// Largest amount a single slot may hold.
///
/// All stacking arithmetic treats this as a hard ceiling: anything beyond it
/// becomes an explicit leftover returned to the caller, never a wrapped or
/// truncated amount.
pub const MAX_AMOUNT: i32 = i32::MAX;

/// Read/construct access to an opaque item value.
///
/// Containers are generic over this trait and never touch a concrete item
/// type directly. A conforming implementation must guarantee that
/// [`from_parts`](SlotItem::from_parts) with any negative id yields a value
/// indistinguishable from the sentinel (`id == -1`, `amount == 0`), and that
/// valid items carry a non-negative amount.
pub trait SlotItem: Clone {
    /// The item's kind identifier. Negative ids mark the sentinel.
    fn item_id(&self) -> i16;

    /// How many of this item the value represents.
    fn amount(&self) -> i32;

    /// Whether this item's kind consolidates into a single stack.
    fn is_stackable(&self) -> bool;

    /// Builds an item from an id and an amount. Any negative id must
    /// produce the sentinel.
    fn from_parts(id: i16, amount: i32) -> Self;

    /// The sentinel value marking an empty slot.
    fn empty() -> Self {
        Self::from_parts(-1, 0)
    }

    /// Whether this value is a real item rather than the sentinel.
    fn is_valid(&self) -> bool {
        self.item_id() >= 0
    }

    /// Whether this value is the sentinel.
    fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Whether `self` and `other` are the same kind of item. Amounts are
    /// ignored.
    fn shares_id_with(&self, other: &Self) -> bool {
        self.item_id() == other.item_id()
    }

    /// Whether at least `amount` of this item is present.
    fn has_at_least(&self, amount: i32) -> bool {
        self.amount() >= amount
    }

    /// Combines the amounts of two same-kind items.
    ///
    /// When the ids differ this returns `other` unchanged. Callers rely on
    /// that exact policy (partial-take leftovers are built through it), so
    /// it is part of the contract rather than an accident to be fixed.
    /// The combined amount saturates at [`MAX_AMOUNT`].
    fn plus(&self, other: &Self) -> Self {
        if self.shares_id_with(other) {
            Self::from_parts(self.item_id(), self.amount().saturating_add(other.amount()))
        } else {
            other.clone()
        }
    }

    /// Subtracts `other`'s amount from this item's amount.
    ///
    /// When the ids differ this returns `other` unchanged, mirroring
    /// [`plus`](SlotItem::plus).
    fn minus(&self, other: &Self) -> Self {
        if self.shares_id_with(other) {
            Self::from_parts(self.item_id(), self.amount() - other.amount())
        } else {
            other.clone()
        }
    }
}

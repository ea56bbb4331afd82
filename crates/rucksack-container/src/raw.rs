//! Invariant-skipping access to a container's backing slots.
//!
//! [`RawSlots`] exists for call sites that have already established their
//! preconditions through the safe API and want to skip the recoverable
//! result bookkeeping. Out-of-range indices are boundary violations and
//! panic through ordinary slice indexing; nothing here returns a
//! [`Failure`](crate::result::Failure).

use rucksack_common::slot_item::{SlotItem, MAX_AMOUNT};

/// A non-owning, invariant-skipping view over a container's slots.
///
/// Borrowed from [`Container::raw`](crate::container::Container::raw); the
/// view lives only as long as the container it came from.
#[derive(Debug)]
pub struct RawSlots<'a, T> {
    slots: &'a mut [T],
    always_stackable: bool,
}

impl<'a, T: SlotItem> RawSlots<'a, T> {
    pub(crate) fn new(slots: &'a mut [T], always_stackable: bool) -> Self {
        Self {
            slots,
            always_stackable,
        }
    }

    /// The item in `slot_index`. Panics on an out-of-range index.
    #[must_use]
    pub fn get(&self, slot_index: usize) -> &T {
        &self.slots[slot_index]
    }

    /// Overwrites `slot_index` with `item`, occupied or not. Panics on an
    /// out-of-range index.
    pub fn set(&mut self, slot_index: usize, item: T) {
        self.slots[slot_index] = item;
    }

    /// Index of the first sentinel slot.
    #[must_use]
    pub fn first_free_slot(&self) -> Option<usize> {
        self.slots.iter().position(T::is_invalid)
    }

    /// Number of sentinel slots.
    #[must_use]
    pub fn free_slot_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_invalid()).count()
    }

    /// Index of the first slot holding at least one item of kind `id`.
    #[must_use]
    pub fn find_slot_for_id(&self, id: i16) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.item_id() == id && slot.has_at_least(1))
    }

    /// Index of the first slot holding at least `item`'s amount of
    /// `item`'s kind.
    #[must_use]
    pub fn find_slot_for_at_least(&self, item: &T) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.shares_id_with(item) && slot.has_at_least(item.amount()))
    }

    /// Performs the stacking math of an add without any capacity or
    /// sentinel preconditions.
    ///
    /// Unlike the safe add, target-slot resolution here consults only the
    /// container-wide stacking flag, not the item's own stackability.
    /// Returns the leftover that did not fit (the sentinel when everything
    /// fit). Panics when no usable target slot exists.
    pub fn add_item(&mut self, item: T, slot_index: usize) -> T {
        let target = if self.always_stackable {
            self.find_slot_for_id(item.item_id())
                .or_else(|| self.first_free_slot())
                .expect("raw add requires a matching stack or a free slot")
        } else {
            slot_index
        };

        let leftover_amount;
        if self.always_stackable || item.is_stackable() {
            let contained_amount = self.slots[target].amount();
            let max_addable = MAX_AMOUNT - contained_amount;
            let added = item.amount().min(max_addable);
            leftover_amount = item.amount() - added;
            self.slots[target] = T::from_parts(item.item_id(), contained_amount + added);
        } else {
            let units = self.free_slot_count().min(item.amount().max(0) as usize);
            leftover_amount = item.amount() - units as i32;
            for _ in 0..units {
                let free = self
                    .first_free_slot()
                    .expect("free slot count already checked");
                self.slots[free] = T::from_parts(item.item_id(), 1);
            }
        }

        if leftover_amount > 0 {
            T::from_parts(item.item_id(), leftover_amount)
        } else {
            T::empty()
        }
    }

    /// Empties `slot_index` and returns what was there. Panics on an
    /// out-of-range index.
    pub fn take_from_slot(&mut self, slot_index: usize) -> T {
        std::mem::replace(&mut self.slots[slot_index], T::empty())
    }

    /// Subtracts `item` from `slot_index` and returns the post-subtraction
    /// stack, which is also what remains in the slot.
    ///
    /// No amount normalization happens here: a subtraction landing on zero
    /// or below is stored as-is, and a mismatched id stores `item` itself
    /// (the [`SlotItem::minus`] mismatch policy). Callers are expected to
    /// have verified the slot first.
    pub fn take_up_to(&mut self, slot_index: usize, item: &T) -> T {
        let remaining = self.slots[slot_index].minus(item);
        self.slots[slot_index] = remaining.clone();
        remaining
    }

    /// Exchanges the contents of two slots with no validation.
    pub fn swap_slot_contents(&mut self, from_slot: usize, to_slot: usize) {
        self.slots.swap(from_slot, to_slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Container;
    use crate::testing::{item, TestItem};

    #[test]
    fn test_raw_set_overwrites_occupied_slots() {
        let mut container = Container::with_contents(false, vec![item(1, 1), item(2, 2)]);
        let mut raw = container.raw();
        raw.set(0, item(5, 5));
        assert_eq!(*raw.get(0), item(5, 5));
    }

    #[test]
    fn test_raw_add_returns_leftover() {
        let mut container =
            Container::with_contents(false, vec![item(2, MAX_AMOUNT - 3), TestItem::empty()]);
        let mut raw = container.raw();
        let leftover = raw.add_item(item(2, 10), 0);
        assert_eq!(*raw.get(0), item(2, MAX_AMOUNT));
        assert_eq!(leftover, item(2, 7));
    }

    #[test]
    fn test_raw_add_spreads_unstackable_units() {
        let mut container = Container::new(3, false);
        let mut raw = container.raw();
        let leftover = raw.add_item(item(1, 5), 0);
        assert_eq!(leftover, item(1, 2));
        for slot in 0..3 {
            assert_eq!(*raw.get(slot), item(1, 1));
        }
    }

    #[test]
    fn test_raw_take_up_to_returns_post_subtraction_stack() {
        let mut container = Container::with_contents(false, vec![item(1, 5)]);
        let mut raw = container.raw();
        let remaining = raw.take_up_to(0, &item(1, 3));
        assert_eq!(remaining, item(1, 2));
        assert_eq!(*raw.get(0), item(1, 2));
    }

    #[test]
    fn test_raw_find_without_wrapping() {
        let mut container = Container::with_contents(false, vec![item(1, 2), TestItem::empty()]);
        let raw = container.raw();
        assert_eq!(raw.find_slot_for_id(1), Some(0));
        assert_eq!(raw.find_slot_for_id(9), None);
        assert_eq!(raw.find_slot_for_at_least(&item(1, 3)), None);
        assert_eq!(raw.first_free_slot(), Some(1));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_raw_out_of_range_panics() {
        let mut container = Container::<TestItem>::new(2, false);
        let raw = container.raw();
        let _ = raw.get(5);
    }
}

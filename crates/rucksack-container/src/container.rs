//! The safe container API.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use rucksack_common::slot_item::{SlotItem, MAX_AMOUNT};

use crate::raw::RawSlots;
use crate::result::{ContainerResult, Failure, Success};

/// Which end of the container items slide toward when shifting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftDirection {
    /// Valid items slide toward slot 0
    Left,
    /// Valid items slide toward the last slot
    Right,
}

/// A fixed-capacity, ordered sequence of item slots.
///
/// The slot count is fixed at construction and never changes. Every slot
/// holds either the sentinel or a valid item with a positive amount; a
/// mutation that would land on exactly zero writes the sentinel instead.
/// All mutation goes through operations returning a
/// [`ContainerResult`] — expected failures are values, never panics — or,
/// knowingly, through the invariant-skipping [`RawSlots`] view.
///
/// `always_stackable` forces every item kind in this container to
/// consolidate into a single slot per id (a bank, as opposed to a
/// backpack), independent of each item's own stackability flag.
///
/// Not safe for concurrent mutation; the surrounding system is expected to
/// serialize access, one owner per container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container<T> {
    slots: Vec<T>,
    always_stackable: bool,
}

/// Equality compares slot contents only, not the stacking flag, so a
/// backpack and a bank holding the same items compare equal.
impl<T: PartialEq> PartialEq for Container<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl<T: SlotItem> Container<T> {
    /// Creates a container of `size` sentinel slots.
    #[must_use]
    pub fn new(size: usize, always_stackable: bool) -> Self {
        Self {
            slots: vec![T::empty(); size],
            always_stackable,
        }
    }

    /// Creates a container sized and filled from `contents`.
    #[must_use]
    pub fn with_contents(always_stackable: bool, contents: Vec<T>) -> Self {
        Self {
            slots: contents,
            always_stackable,
        }
    }

    /// Creates a container with a declared size and initial contents.
    ///
    /// # Panics
    ///
    /// Panics when `contents.len() != size`; a mismatch is a programming
    /// error, not a runtime condition.
    #[must_use]
    pub fn from_parts(size: usize, always_stackable: bool, contents: Vec<T>) -> Self {
        assert_eq!(
            contents.len(),
            size,
            "initial contents length does not match declared container size"
        );
        Self::with_contents(always_stackable, contents)
    }

    /// Number of slots.
    #[must_use]
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Whether every item kind consolidates into one slot here.
    #[must_use]
    pub const fn always_stackable(&self) -> bool {
        self.always_stackable
    }

    /// Read access to the backing slots.
    #[must_use]
    pub fn slots(&self) -> &[T] {
        &self.slots
    }

    /// The invariant-skipping view over this container's slots.
    ///
    /// Intended for call sites that already established their
    /// preconditions through the safe API; misuse panics instead of
    /// returning a [`Failure`].
    pub fn raw(&mut self) -> RawSlots<'_, T> {
        RawSlots::new(&mut self.slots, self.always_stackable)
    }

    /// A deep, independent copy carrying a different stacking flag.
    ///
    /// Plain [`Clone`] keeps the flag; this is the rollback-style variant
    /// for moving contents between backpack- and bank-like containers.
    #[must_use]
    pub fn copy_with_stackability(&self, always_stackable: bool) -> Self {
        Self {
            slots: self.slots.clone(),
            always_stackable,
        }
    }

    /// The first sentinel slot: `FindSlot` or `NoFreeSlots`.
    pub fn first_free_slot(&self) -> ContainerResult<T> {
        match self.first_free_index() {
            Some(index) => Ok(Success::FindSlot(index)),
            None => Err(Failure::NoFreeSlots),
        }
    }

    /// Number of sentinel slots.
    #[must_use]
    pub fn free_slot_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_invalid()).count()
    }

    /// Whether any slot shares an item id with `item`.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.slots.iter().any(|slot| slot.shares_id_with(item))
    }

    /// Whether `slot_index` lies within the container.
    #[must_use]
    pub fn is_valid_slot(&self, slot_index: usize) -> bool {
        slot_index < self.slots.len()
    }

    /// Whether `slot_index` holds a valid item. Panics on an out-of-range
    /// index.
    #[must_use]
    pub fn slot_is_occupied(&self, slot_index: usize) -> bool {
        self.slots[slot_index].is_valid()
    }

    /// Whether no free slot remains.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.first_free_index().is_none()
    }

    /// Whether at least one free slot remains.
    #[must_use]
    pub fn has_space(&self) -> bool {
        !self.is_full()
    }

    /// Reads the item in `slot_index`: `GetItem` or `BadIndex`.
    pub fn get(&self, slot_index: usize) -> ContainerResult<T> {
        Ok(Success::GetItem(self.checked_slot(slot_index)?.clone()))
    }

    /// Writes `item` into `slot_index`: `SetItem`, `SlotOccupied`, or
    /// `BadIndex`.
    ///
    /// Overwriting is never silent: a slot holding a valid item must be
    /// taken from before it can be set again.
    pub fn set(&mut self, slot_index: usize, item: T) -> ContainerResult<T> {
        if !self.is_valid_slot(slot_index) {
            return Err(Failure::BadIndex(slot_index));
        }
        if self.slot_is_occupied(slot_index) {
            return Err(Failure::SlotOccupied(slot_index));
        }
        self.slots[slot_index] = item;
        Ok(Success::SetItem)
    }

    /// Verifies `item` against the slot's contents with an arbitrary
    /// condition: `VerifyItem`, `ItemIdMismatch`, or `BadIndex`.
    pub fn verify(
        &self,
        item: T,
        slot_index: usize,
        condition: impl FnOnce(&T) -> bool,
    ) -> ContainerResult<T> {
        let contained = self.checked_slot(slot_index)?;
        if condition(contained) {
            Ok(Success::VerifyItem(item))
        } else {
            Err(Failure::ItemIdMismatch {
                expected: item,
                found: contained.clone(),
            })
        }
    }

    /// Verifies the slot holds exactly `item`'s amount of `item`'s kind.
    /// Adds `NotExactItemAmount` to the `verify` contract.
    pub fn verify_exact(&self, item: T, slot_index: usize) -> ContainerResult<T> {
        let contained = self.checked_slot(slot_index)?;
        if !contained.shares_id_with(&item) {
            return Err(Failure::ItemIdMismatch {
                expected: item,
                found: contained.clone(),
            });
        }
        if contained.amount() != item.amount() {
            return Err(Failure::NotExactItemAmount);
        }
        Ok(Success::VerifyItem(item))
    }

    /// Verifies the slot holds at least `item`'s amount of `item`'s kind.
    /// Adds `NotEnoughItemAmount` to the `verify` contract.
    pub fn verify_at_least(&self, item: T, slot_index: usize) -> ContainerResult<T> {
        let contained = self.checked_slot(slot_index)?;
        if !contained.shares_id_with(&item) {
            return Err(Failure::ItemIdMismatch {
                expected: item,
                found: contained.clone(),
            });
        }
        if contained.amount() < item.amount() {
            return Err(Failure::NotEnoughItemAmount);
        }
        Ok(Success::VerifyItem(item))
    }

    /// Verifies the slot holds at least one of `item`'s kind.
    pub fn verify_one(&self, item: T, slot_index: usize) -> ContainerResult<T> {
        let contained = self.checked_slot(slot_index)?;
        if contained.shares_id_with(&item) {
            Ok(Success::VerifyItem(item))
        } else {
            Err(Failure::ItemIdMismatch {
                expected: item,
                found: contained.clone(),
            })
        }
    }

    /// Finds the first slot sharing `item`'s id, requiring at least
    /// `item`'s amount there: `FindSlot`, `ItemNotFound`, or
    /// `NotEnoughItemAmount`.
    ///
    /// Only the first slot with a matching id is considered; a later,
    /// larger stack of the same kind does not satisfy the amount check.
    pub fn find_slot_for_at_least(&self, item: T) -> ContainerResult<T> {
        let Some(found) = self.slots.iter().position(|slot| slot.shares_id_with(&item)) else {
            return Err(Failure::ItemNotFound(item));
        };
        if self.slots[found].has_at_least(item.amount()) {
            Ok(Success::FindSlot(found))
        } else {
            Err(Failure::NotEnoughItemAmount)
        }
    }

    /// Finds the first slot holding at least one item of kind `id`.
    pub fn find_slot_for_id(&self, id: i16) -> ContainerResult<T> {
        self.find_slot_for_at_least(T::from_parts(id, 1))
    }

    /// Finds the first slot holding at least one of `item`'s kind.
    pub fn find_slot_for_item(&self, item: &T) -> ContainerResult<T> {
        self.find_slot_for_at_least(T::from_parts(item.item_id(), 1))
    }

    /// Empties `slot_index` unconditionally, returning whatever was there
    /// (possibly the sentinel): `FullTakeItem` or `BadIndex`.
    pub fn take_from_slot(&mut self, slot_index: usize) -> ContainerResult<T> {
        if !self.is_valid_slot(slot_index) {
            return Err(Failure::BadIndex(slot_index));
        }
        let taken = self.raw().take_from_slot(slot_index);
        Ok(Success::FullTakeItem(taken))
    }

    /// Takes up to `item`'s amount of `item`'s kind from `slot_index`.
    ///
    /// With enough present, subtracts and returns
    /// `FullTakeItem(requested)`, writing the sentinel when the slot lands
    /// on exactly zero. With too little present, empties the slot instead
    /// and returns `PartialTakeItem` with what was there and the shortfall.
    /// Propagates `BadIndex` and `ItemIdMismatch` from verification.
    pub fn take_up_to(&mut self, slot_index: usize, item: T) -> ContainerResult<T> {
        match self.verify_at_least(item.clone(), slot_index) {
            Ok(_) => {
                let remaining = self.slots[slot_index].minus(&item);
                self.slots[slot_index] = if remaining.amount() == 0 {
                    T::empty()
                } else {
                    remaining
                };
                Ok(Success::FullTakeItem(item))
            }
            Err(Failure::NotEnoughItemAmount) => {
                let taken = self.raw().take_from_slot(slot_index);
                let leftover = item.minus(&taken);
                Ok(Success::PartialTakeItem { taken, leftover })
            }
            Err(other) => Err(other),
        }
    }

    /// Exchanges the contents of two distinct slots: `SwapItem`,
    /// `BadFromIndex`, `BadToIndex`, or `SameToFromIndex`.
    pub fn swap_slot_contents(&mut self, from_slot: usize, to_slot: usize) -> ContainerResult<T> {
        if !self.is_valid_slot(from_slot) {
            return Err(Failure::BadFromIndex(from_slot));
        }
        if !self.is_valid_slot(to_slot) {
            return Err(Failure::BadToIndex(to_slot));
        }
        if from_slot == to_slot {
            return Err(Failure::SameToFromIndex(from_slot));
        }
        let from_item = self.raw().take_from_slot(from_slot);
        let to_item = self.raw().take_from_slot(to_slot);
        self.raw().set(from_slot, to_item);
        self.raw().set(to_slot, from_item);
        Ok(Success::SwapItem)
    }

    /// Adds `item`, preferring the first free slot.
    pub fn add_item(&mut self, item: T) -> ContainerResult<T> {
        let preferred = self.first_free_index().unwrap_or(0);
        self.add_item_at(item, preferred)
    }

    /// Adds `item` with a placement hint.
    ///
    /// A full container fails with `ContainerFull` unless the item can
    /// merge into an existing stack (present and stacking, by either the
    /// container-wide or the per-item rule). The sentinel is rejected with
    /// `InvalidItemAddition` before any slot math. Stacking items merge
    /// into their existing stack (or claim the first free slot), capped at
    /// [`MAX_AMOUNT`]; non-stacking items occupy one slot per unit, each
    /// unit landing in the first free slot found — the hint does not
    /// override unit placement. Whatever does not fit comes back as
    /// `PartialAddItem`; otherwise `FullAddItem`.
    pub fn add_item_at(&mut self, item: T, slot_index: usize) -> ContainerResult<T> {
        let stacks = self.always_stackable || item.is_stackable();
        if self.is_full() && !(stacks && self.contains(&item)) {
            return Err(Failure::ContainerFull(item));
        }
        if item.is_invalid() {
            return Err(Failure::InvalidItemAddition);
        }

        let leftover_amount;
        if stacks {
            let target = self
                .index_of_id(item.item_id())
                .or_else(|| self.first_free_index())
                .unwrap_or(slot_index);
            let contained_amount = self.slots[target].amount();
            let max_addable = MAX_AMOUNT - contained_amount;
            let added = item.amount().min(max_addable);
            leftover_amount = item.amount() - added;
            let merged = contained_amount + added;
            self.slots[target] = if merged == 0 {
                T::empty()
            } else {
                T::from_parts(item.item_id(), merged)
            };
        } else {
            let units = self.free_slot_count().min(item.amount().max(0) as usize);
            leftover_amount = item.amount() - units as i32;
            for _ in 0..units {
                let Some(free) = self.first_free_index() else {
                    break;
                };
                self.slots[free] = T::from_parts(item.item_id(), 1);
            }
        }

        if leftover_amount > 0 {
            Ok(Success::PartialAddItem {
                leftover: T::from_parts(item.item_id(), leftover_amount),
            })
        } else {
            Ok(Success::FullAddItem)
        }
    }

    /// Whether `item`'s full amount would fit, mirroring the add
    /// algorithm's capacity math without mutating.
    #[must_use]
    pub fn has_room_for(&self, item: &T) -> bool {
        let max_addable = if self.always_stackable || item.is_stackable() {
            match self.index_of_id(item.item_id()) {
                Some(target) => MAX_AMOUNT - self.slots[target].amount(),
                None => return self.free_slot_count() > 0,
            }
        } else {
            self.free_slot_count() as i32
        };
        item.amount() <= max_addable
    }

    /// Slides all valid items toward one end, preserving their relative
    /// order, in a single pass with no allocation.
    ///
    /// Uses one "next slot to fill" cursor; preferable to [`fast_shift`]
    /// for large containers where the scratch allocation hurts.
    ///
    /// [`fast_shift`]: Container::fast_shift
    pub fn memory_friendly_shift(&mut self, direction: ShiftDirection) {
        let len = self.slots.len() as isize;
        let step: isize = match direction {
            ShiftDirection::Left => 1,
            ShiftDirection::Right => -1,
        };
        let mut next_to_fill: Option<usize> = None;
        let mut current: isize = match direction {
            ShiftDirection::Left => 0,
            ShiftDirection::Right => len - 1,
        };

        while current >= 0 && current < len {
            let slot = current as usize;
            if self.slots[slot].is_invalid() {
                if next_to_fill.is_none() {
                    next_to_fill = Some(slot);
                }
                current += step;
                continue;
            }
            if let Some(fill) = next_to_fill {
                let taken = self.raw().take_from_slot(slot);
                self.raw().set(fill, taken);
                current = fill as isize + step;
                next_to_fill = None;
                continue;
            }
            current += step;
        }
    }

    /// Slides all valid items toward one end via a stable partition into a
    /// scratch sequence.
    ///
    /// Produces exactly the arrangement [`memory_friendly_shift`] would,
    /// trading an allocation for fewer element moves; preferable for
    /// smaller containers.
    ///
    /// [`memory_friendly_shift`]: Container::memory_friendly_shift
    pub fn fast_shift(&mut self, direction: ShiftDirection) {
        let (valid, empty): (Vec<T>, Vec<T>) =
            self.slots.iter().cloned().partition(|slot| slot.is_valid());
        let arranged = match direction {
            ShiftDirection::Left => valid.into_iter().chain(empty),
            ShiftDirection::Right => empty.into_iter().chain(valid),
        };
        for (slot, item) in arranged.enumerate() {
            self.raw().set(slot, item);
        }
    }

    /// Consolidates every item kind into the fewest possible stacks.
    ///
    /// Slots are grouped by id in first-seen order (the sentinel id forms
    /// a group like any other); within a group, amounts accumulate into
    /// one stack until the next amount would pass [`MAX_AMOUNT`], at which
    /// point the full stack is flushed and the accumulator restarts with
    /// the overflow. The resulting stacks are placed contiguously in
    /// group order and every slot past the last stack becomes the
    /// sentinel. Ignores per-item stackability: this is the one operation
    /// that merges multiple stacks of a non-stackable kind.
    pub fn shift_collapse(&mut self) {
        let mut group_order: Vec<(i16, Vec<i32>)> = Vec::new();
        let mut group_index: AHashMap<i16, usize> = AHashMap::new();
        for slot in &self.slots {
            let id = slot.item_id();
            let at = *group_index.entry(id).or_insert_with(|| {
                group_order.push((id, Vec::new()));
                group_order.len() - 1
            });
            group_order[at].1.push(slot.amount());
        }

        let mut consolidated: Vec<T> = Vec::with_capacity(self.slots.len());
        for (id, amounts) in group_order {
            let mut accumulated: i32 = 0;
            let mut carry: i32 = 0;
            let last = amounts.len() - 1;
            for (position, amount) in amounts.into_iter().enumerate() {
                let max_addable = MAX_AMOUNT - accumulated;
                if amount > max_addable {
                    carry = amount - max_addable;
                    accumulated = MAX_AMOUNT;
                } else {
                    accumulated += amount;
                }
                if carry > 0 {
                    consolidated.push(T::from_parts(id, accumulated));
                    accumulated = carry;
                    carry = 0;
                }
                if position == last {
                    consolidated.push(T::from_parts(id, accumulated));
                }
            }
        }

        for (slot, current) in self.slots.iter_mut().enumerate() {
            *current = match consolidated.get(slot) {
                Some(item) => item.clone(),
                None => T::empty(),
            };
        }
    }

    fn checked_slot(&self, slot_index: usize) -> Result<&T, Failure<T>> {
        self.slots
            .get(slot_index)
            .ok_or(Failure::BadIndex(slot_index))
    }

    fn first_free_index(&self) -> Option<usize> {
        self.slots.iter().position(T::is_invalid)
    }

    /// First slot holding at least one item of kind `id`.
    fn index_of_id(&self, id: i16) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.item_id() == id && slot.has_at_least(1))
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::testing::TestItem;
    use proptest::prelude::*;

    fn arb_slot() -> impl Strategy<Value = TestItem> {
        prop_oneof![
            Just(TestItem::from_parts(-1, 0)),
            (0i16..6, 1i32..100).prop_map(|(id, amount)| TestItem::from_parts(id, amount)),
        ]
    }

    fn arb_slots() -> impl Strategy<Value = Vec<TestItem>> {
        proptest::collection::vec(arb_slot(), 0..24)
    }

    proptest! {
        #[test]
        fn prop_shift_algorithms_agree(slots in arb_slots(), left in any::<bool>()) {
            let direction = if left {
                ShiftDirection::Left
            } else {
                ShiftDirection::Right
            };
            let mut fast = Container::with_contents(false, slots.clone());
            let mut friendly = Container::with_contents(false, slots);
            fast.fast_shift(direction);
            friendly.memory_friendly_shift(direction);
            prop_assert_eq!(fast.slots(), friendly.slots());
        }

        #[test]
        fn prop_shift_preserves_valid_items_in_order(slots in arb_slots()) {
            let valid_before: Vec<TestItem> =
                slots.iter().filter(|slot| slot.is_valid()).copied().collect();
            let mut bag = Container::with_contents(false, slots);
            bag.fast_shift(ShiftDirection::Left);

            let valid_after: Vec<TestItem> = bag
                .slots()
                .iter()
                .filter(|slot| slot.is_valid())
                .copied()
                .collect();
            prop_assert_eq!(&valid_before, &valid_after);
            // Compaction means all valid items sit at the front.
            prop_assert!(bag.slots()[..valid_after.len()]
                .iter()
                .all(TestItem::is_valid));
        }

        #[test]
        fn prop_collapse_is_idempotent(slots in arb_slots()) {
            let mut once = Container::with_contents(true, slots);
            once.shift_collapse();
            let mut twice = once.clone();
            twice.shift_collapse();
            prop_assert_eq!(once.slots(), twice.slots());
        }

        #[test]
        fn prop_stacking_overflow_conserves_amounts(
            existing in 1i32..MAX_AMOUNT,
            incoming in 1i32..MAX_AMOUNT,
        ) {
            let mut bag =
                Container::with_contents(false, vec![TestItem::from_parts(2, existing)]);
            let result = bag.add_item(TestItem::from_parts(2, incoming));

            let leftover = match result {
                Ok(Success::FullAddItem) => 0,
                Ok(Success::PartialAddItem { leftover }) => leftover.amount,
                other => return Err(TestCaseError::fail(format!("unexpected {other:?}"))),
            };
            let stacked = bag.slots()[0].amount;

            prop_assert!(stacked <= MAX_AMOUNT);
            prop_assert_eq!(
                i64::from(stacked) + i64::from(leftover),
                i64::from(existing) + i64::from(incoming)
            );
        }
    }
}

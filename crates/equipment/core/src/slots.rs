//! Equipment slots and the slot table state machine.
//!
//! Every slot is either empty or holds one item id. Accessory and artifact
//! slots come in interchangeable pairs; an item keeps the slot it was given
//! until it is unequipped, so freeing the first slot of a pair never moves
//! the item in the second.

use strum::{EnumCount, IntoEnumIterator};

use crate::item::{ArmorSubtype, ItemCategory};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum Slot {
    Weapon,
    HeadArmor,
    BodyArmor,
    LegArmor,
    HandArmor,
    Accessory1,
    Accessory2,
    Artifact1,
    Artifact2,
}

impl Slot {
    /// Slots an item of `category` may occupy, in fill order.
    pub const fn candidates(category: ItemCategory) -> &'static [Slot] {
        match category {
            ItemCategory::Weapon => &[Slot::Weapon],
            ItemCategory::Armor(ArmorSubtype::Head) => &[Slot::HeadArmor],
            ItemCategory::Armor(ArmorSubtype::Body) => &[Slot::BodyArmor],
            ItemCategory::Armor(ArmorSubtype::Legs) => &[Slot::LegArmor],
            ItemCategory::Armor(ArmorSubtype::Hands) => &[Slot::HandArmor],
            ItemCategory::Accessory => &[Slot::Accessory1, Slot::Accessory2],
            ItemCategory::Artifact => &[Slot::Artifact1, Slot::Artifact2],
        }
    }

    pub fn accepts(self, category: ItemCategory) -> bool {
        Slot::candidates(category).contains(&self)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// A requested slot that cannot hold the item's category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{category} cannot be placed in slot {slot}")]
pub struct IncompatibleSlot {
    pub slot: Slot,
    pub category: ItemCategory,
}

/// Where an equip will put an item and what it pushes out.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotAssignment {
    pub slot: Slot,
    /// Item currently in the target slot, if it is a different item.
    pub displaced: Option<String>,
    /// Slot the item is moving out of, if it is worn elsewhere.
    pub moved_from: Option<Slot>,
}

impl SlotAssignment {
    /// True when the item already sits in the target slot.
    pub fn is_noop(&self) -> bool {
        self.displaced.is_none() && self.moved_from.is_none()
    }
}

/// Occupancy of every slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotTable {
    slots: [Option<String>; Slot::COUNT],
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.slots[slot.index()].as_deref()
    }

    pub fn is_empty(&self, slot: Slot) -> bool {
        self.slots[slot.index()].is_none()
    }

    /// Slot holding `item_id`, if any.
    pub fn slot_of(&self, item_id: &str) -> Option<Slot> {
        Slot::iter().find(|slot| self.get(*slot) == Some(item_id))
    }

    /// Occupied slots in slot order.
    pub fn occupied(&self) -> impl Iterator<Item = (Slot, &str)> {
        Slot::iter().filter_map(|slot| self.get(slot).map(|id| (slot, id)))
    }

    /// Puts `item_id` into `slot`, returning the previous occupant.
    pub fn set(&mut self, slot: Slot, item_id: impl Into<String>) -> Option<String> {
        self.slots[slot.index()].replace(item_id.into())
    }

    /// Empties `slot`, returning the previous occupant.
    pub fn clear(&mut self, slot: Slot) -> Option<String> {
        self.slots[slot.index()].take()
    }

    /// Decides the target slot for equipping `item_id`.
    ///
    /// - An explicit `preferred` slot must accept the category.
    /// - An item already worn in a matching slot stays there.
    /// - Otherwise the first empty candidate is used, falling back to the
    ///   first candidate when every candidate is occupied.
    pub fn plan(
        &self,
        item_id: &str,
        category: ItemCategory,
        preferred: Option<Slot>,
    ) -> Result<SlotAssignment, IncompatibleSlot> {
        let candidates = Slot::candidates(category);
        let current = self.slot_of(item_id);

        let slot = match preferred {
            Some(slot) if !slot.accepts(category) => {
                return Err(IncompatibleSlot { slot, category });
            }
            Some(slot) => slot,
            None => current
                .filter(|slot| slot.accepts(category))
                .or_else(|| candidates.iter().copied().find(|slot| self.is_empty(*slot)))
                .unwrap_or(candidates[0]),
        };

        Ok(SlotAssignment {
            slot,
            displaced: self
                .get(slot)
                .filter(|occupant| *occupant != item_id)
                .map(str::to_string),
            moved_from: current.filter(|from| *from != slot),
        })
    }

    /// Applies a planned assignment. Only the target slot (and the item's
    /// previous slot, when moving) change.
    pub fn apply(&mut self, item_id: &str, assignment: &SlotAssignment) {
        if let Some(from) = assignment.moved_from {
            self.clear(from);
        }
        self.set(assignment.slot, item_id);
    }
}

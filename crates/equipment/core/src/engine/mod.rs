//! Equip/unequip transitions over a host-owned loadout.
//!
//! The [`LoadoutEngine`] is the only way the slot table changes. Every
//! transition runs on a working copy of the [`Loadout`] and is committed only
//! once it has fully succeeded, so a rejected equip leaves the loadout
//! exactly as it was. After every committed transition the whole loadout is
//! re-evaluated, with final stats taken from the engine's [`StatsProvider`].

mod errors;

pub use errors::{EquipRejection, MalformedItemReason};

use std::collections::BTreeMap;

use crate::evaluate::{BonusContext, LoadoutEvaluation, evaluate_with};
use crate::item::Item;
use crate::requirements::{RequirementCheck, check_requirements};
use crate::slots::{Slot, SlotTable};
use crate::stats::{LocalStats, StatsProvider};

/// Worn items and the slots they occupy.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    slots: SlotTable,
    items: BTreeMap<String, Item>,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &SlotTable {
        &self.slots
    }

    /// The item in `slot`, if any.
    pub fn item_in(&self, slot: Slot) -> Option<&Item> {
        self.slots.get(slot).and_then(|id| self.items.get(id))
    }

    pub fn slot_of(&self, item_id: &str) -> Option<Slot> {
        self.slots.slot_of(item_id)
    }

    /// Worn items in slot order.
    pub fn worn(&self) -> impl Iterator<Item = &Item> {
        self.slots
            .occupied()
            .filter_map(|(_, id)| self.items.get(id))
    }

    pub fn worn_count(&self) -> usize {
        self.slots.occupied().count()
    }

    fn remove_from(&mut self, slot: Slot) -> Option<Item> {
        let id = self.slots.clear(slot)?;
        let mut item = self.items.remove(&id)?;
        item.equipped = false;
        Some(item)
    }
}

/// Result of a successful equip.
#[derive(Clone, Debug, PartialEq)]
pub struct EquipOutcome {
    pub slot: Slot,
    /// Item pushed out of the target slot.
    pub displaced: Option<Item>,
    /// Previous slot of the item, when it moved.
    pub moved_from: Option<Slot>,
    /// Requirement check that allowed the equip, including skipped entries.
    pub requirements: RequirementCheck,
    pub evaluation: LoadoutEvaluation,
}

/// Result of unequipping an occupied slot.
#[derive(Clone, Debug, PartialEq)]
pub struct UnequipOutcome {
    pub slot: Slot,
    pub removed: Item,
    pub evaluation: LoadoutEvaluation,
}

/// Applies equip transitions to a borrowed loadout.
pub struct LoadoutEngine<'a> {
    loadout: &'a mut Loadout,
    provider: &'a dyn StatsProvider,
}

impl<'a> LoadoutEngine<'a> {
    /// Engine that computes final stats locally.
    pub fn new(loadout: &'a mut Loadout) -> Self {
        Self::with_provider(loadout, &LocalStats)
    }

    /// Engine that asks `provider` for final stats first and falls back to
    /// local computation when it cannot answer for the evaluated loadout.
    pub fn with_provider(loadout: &'a mut Loadout, provider: &'a dyn StatsProvider) -> Self {
        Self { loadout, provider }
    }

    pub fn loadout(&self) -> &Loadout {
        self.loadout
    }

    /// Equips an item into the slot chosen by the slot rules.
    pub fn equip(
        &mut self,
        item: Item,
        context: &BonusContext<'_>,
    ) -> Result<EquipOutcome, EquipRejection> {
        self.equip_into(item, None, context)
    }

    /// Equips an item, optionally into a specific slot of its category.
    ///
    /// Order: item validation, requirement check, slot planning, then the
    /// working copy is updated, re-evaluated and committed.
    pub fn equip_into(
        &mut self,
        mut item: Item,
        preferred: Option<Slot>,
        context: &BonusContext<'_>,
    ) -> Result<EquipOutcome, EquipRejection> {
        if item.id.trim().is_empty() {
            return Err(EquipRejection::malformed(
                item.id,
                MalformedItemReason::MissingId,
            ));
        }

        let Some(category) = item.category() else {
            return Err(EquipRejection::malformed(
                item.id,
                MalformedItemReason::UnknownCategory { name: item.name },
            ));
        };

        let requirements = check_requirements(&item, context.snapshot);
        if !requirements.can_equip {
            tracing::debug!(
                item = %item.id,
                failed = requirements.failed.len(),
                "equip rejected: requirements not met"
            );
            return Err(EquipRejection::RequirementsNotMet {
                item_id: item.id,
                failed: requirements.failed,
            });
        }

        let assignment = self
            .loadout
            .slots
            .plan(&item.id, category, preferred)
            .map_err(|err| EquipRejection::IncompatibleSlot {
                item_id: item.id.clone(),
                slot: err.slot,
                category: err.category,
            })?;

        let mut working = self.loadout.clone();
        let displaced = match assignment.displaced {
            Some(_) => working.remove_from(assignment.slot),
            None => None,
        };
        if let Some(from) = assignment.moved_from {
            working.slots.clear(from);
        }
        working.slots.set(assignment.slot, item.id.clone());
        item.equipped = true;
        working.items.insert(item.id.clone(), item);

        let evaluation = evaluate_with(working.worn(), context, self.provider);

        tracing::debug!(
            slot = %assignment.slot,
            displaced = ?displaced.as_ref().map(|item| &item.id),
            moved_from = ?assignment.moved_from,
            "equipped item"
        );

        *self.loadout = working;

        Ok(EquipOutcome {
            slot: assignment.slot,
            displaced,
            moved_from: assignment.moved_from,
            requirements,
            evaluation,
        })
    }

    /// Empties a slot. Returns `None` (and changes nothing) if it was empty.
    pub fn unequip(&mut self, slot: Slot, context: &BonusContext<'_>) -> Option<UnequipOutcome> {
        let mut working = self.loadout.clone();
        let removed = working.remove_from(slot)?;

        let evaluation = evaluate_with(working.worn(), context, self.provider);
        tracing::debug!(%slot, item = %removed.id, "unequipped item");

        *self.loadout = working;
        Some(UnequipOutcome {
            slot,
            removed,
            evaluation,
        })
    }

    /// Unequips an item wherever it is worn.
    pub fn unequip_item(
        &mut self,
        item_id: &str,
        context: &BonusContext<'_>,
    ) -> Option<UnequipOutcome> {
        let slot = self.loadout.slot_of(item_id)?;
        self.unequip(slot, context)
    }

    /// Evaluates the current loadout without changing it.
    pub fn evaluate(&self, context: &BonusContext<'_>) -> LoadoutEvaluation {
        evaluate_with(self.loadout.worn(), context, self.provider)
    }
}

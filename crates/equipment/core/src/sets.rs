//! Multi-item set bonuses.
//!
//! A set grants tiered bonuses once enough distinct pieces are worn. Tiers
//! are independent and cumulative: wearing four pieces of a `{2, 4}` set
//! activates both tiers.

use std::collections::{BTreeMap, BTreeSet};

use crate::bonus::{BonusOrigin, BonusRecord, BonusSource, EffectDescriptor, extract_from};
use crate::item::Item;

/// One activation threshold of a set.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct SetTier {
    pub required_count: u32,
    pub effects: Vec<EffectDescriptor>,
}

impl SetTier {
    pub fn new(required_count: u32, effects: Vec<EffectDescriptor>) -> Self {
        Self {
            required_count,
            effects,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct SetDefinition {
    pub set_id: String,
    pub name: Option<String>,
    pub tiers: Vec<SetTier>,
}

impl SetDefinition {
    pub fn new(set_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            set_id: set_id.into(),
            name: Some(name.into()),
            tiers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tier(mut self, required_count: u32, effects: Vec<EffectDescriptor>) -> Self {
        self.tiers.push(SetTier::new(required_count, effects));
        self
    }

    /// The set name, or its id when unnamed.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.set_id)
    }

    /// Tiers active at `pieces`, in ascending threshold order.
    pub fn active_tiers(&self, pieces: u32) -> impl Iterator<Item = &SetTier> {
        let mut tiers: Vec<_> = self
            .tiers
            .iter()
            .filter(|tier| tier.required_count <= pieces)
            .collect();
        tiers.sort_by_key(|tier| tier.required_count);
        tiers.into_iter()
    }

    /// Smallest threshold not yet reached.
    pub fn next_threshold(&self, pieces: u32) -> Option<u32> {
        self.tiers
            .iter()
            .map(|tier| tier.required_count)
            .filter(|&count| count > pieces)
            .min()
    }
}

/// How far a worn set is from its next tier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetProgress {
    pub set_id: String,
    pub pieces: u32,
    pub next_threshold: Option<u32>,
}

/// All known set definitions, keyed by set id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetCatalog {
    sets: BTreeMap<String, SetDefinition>,
}

impl SetCatalog {
    pub const fn new() -> Self {
        Self {
            sets: BTreeMap::new(),
        }
    }

    /// Adds or replaces a definition.
    pub fn insert(&mut self, definition: SetDefinition) -> Option<SetDefinition> {
        self.sets.insert(definition.set_id.clone(), definition)
    }

    pub fn get(&self, set_id: &str) -> Option<&SetDefinition> {
        self.sets.get(set_id)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SetDefinition> {
        self.sets.values()
    }

    /// Piece counts and next thresholds for every known set being worn.
    pub fn progress<'i>(&self, items: impl IntoIterator<Item = &'i Item>) -> Vec<SetProgress> {
        count_pieces(items)
            .into_iter()
            .filter_map(|(set_id, pieces)| {
                let definition = self.get(set_id)?;
                Some(SetProgress {
                    set_id: set_id.to_string(),
                    pieces,
                    next_threshold: definition.next_threshold(pieces),
                })
            })
            .collect()
    }
}

impl FromIterator<SetDefinition> for SetCatalog {
    fn from_iter<I: IntoIterator<Item = SetDefinition>>(iter: I) -> Self {
        let mut catalog = SetCatalog::new();
        for definition in iter {
            catalog.insert(definition);
        }
        catalog
    }
}

/// Distinct worn pieces per set id. Items without a set are ignored.
fn count_pieces<'i>(items: impl IntoIterator<Item = &'i Item>) -> BTreeMap<&'i str, u32> {
    let mut members: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for item in items {
        if let Some(set_id) = item.set_id.as_deref() {
            members.entry(set_id).or_default().insert(item.id.as_str());
        }
    }

    members
        .into_iter()
        .map(|(set_id, ids)| (set_id, u32::try_from(ids.len()).unwrap_or(u32::MAX)))
        .collect()
}

/// Bonus records from every active set tier.
pub fn resolve_set_bonuses<'i>(
    items: impl IntoIterator<Item = &'i Item>,
    catalog: &SetCatalog,
) -> Vec<BonusRecord> {
    let mut records = Vec::new();

    for (set_id, pieces) in count_pieces(items) {
        let Some(definition) = catalog.get(set_id) else {
            tracing::debug!(set_id, pieces, "ignoring unknown set");
            continue;
        };

        for tier in definition.active_tiers(pieces) {
            let origin = BonusOrigin::new(
                BonusSource::SetBonus,
                format!("set:{set_id}:{}", tier.required_count),
                format!(
                    "{} ({}-piece)",
                    definition.display_name(),
                    tier.required_count
                ),
            );
            records.extend(extract_from(&tier.effects, &origin));
        }
    }

    records
}

//! Derived stats: final character statistics from base values and bonuses.
//!
//! Attribute bonuses are applied first; the derived formulas then read the
//! boosted attributes:
//!
//! ```text
//! max_health = base_max_health + vitality × health_per_vitality + MaxHealth
//! max_energy = base_max_energy + intellect × energy_per_intellect + EnergyMax
//! attack     = base_attack     + strength × attack_per_strength  + PhysicalDamage
//! defense    = base_defense    + vitality × defense_per_vitality + PhysicalDefense
//! speed      = base_speed      + agility  × speed_per_agility    + Speed
//! ```
//!
//! Every other aggregated kind is passed through unchanged.

use crate::bonus::{
    AggregatedBonuses, Attribute, CombatStat, CultivationStat, Element, UtilityStat,
};

/// The six primary attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttributeValues {
    pub strength: f64,
    pub agility: f64,
    pub vitality: f64,
    pub intellect: f64,
    pub perception: f64,
    pub luck: f64,
}

impl AttributeValues {
    pub fn get(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Vitality => self.vitality,
            Attribute::Intellect => self.intellect,
            Attribute::Perception => self.perception,
            Attribute::Luck => self.luck,
        }
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut f64 {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Agility => &mut self.agility,
            Attribute::Vitality => &mut self.vitality,
            Attribute::Intellect => &mut self.intellect,
            Attribute::Perception => &mut self.perception,
            Attribute::Luck => &mut self.luck,
        }
    }

    #[must_use]
    pub fn with(mut self, attribute: Attribute, value: f64) -> Self {
        *self.get_mut(attribute) = value;
        self
    }
}

/// Character values before any bonus is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct BaseAttributes {
    pub attributes: AttributeValues,
    pub base_max_health: f64,
    pub base_max_energy: f64,
    pub base_attack: f64,
    pub base_defense: f64,
    pub base_speed: f64,
}

impl BaseAttributes {
    pub const DEFAULT_MAX_HEALTH: f64 = 100.0;
    pub const DEFAULT_MAX_ENERGY: f64 = 50.0;
    pub const DEFAULT_SPEED: f64 = 10.0;

    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute, value: f64) -> Self {
        self.attributes = self.attributes.with(attribute, value);
        self
    }
}

impl Default for BaseAttributes {
    fn default() -> Self {
        Self {
            attributes: AttributeValues::default(),
            base_max_health: Self::DEFAULT_MAX_HEALTH,
            base_max_energy: Self::DEFAULT_MAX_ENERGY,
            base_attack: 0.0,
            base_defense: 0.0,
            base_speed: Self::DEFAULT_SPEED,
        }
    }
}

/// Coefficients of the derived-stat formulas.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct StatFormulas {
    pub health_per_vitality: f64,
    pub energy_per_intellect: f64,
    pub attack_per_strength: f64,
    pub defense_per_vitality: f64,
    pub speed_per_agility: f64,
    /// Magic attack gained per intellect point. Off by default.
    pub magic_per_intellect: f64,
}

impl StatFormulas {
    pub const DEFAULT: Self = Self {
        health_per_vitality: 10.0,
        energy_per_intellect: 8.0,
        attack_per_strength: 2.0,
        defense_per_vitality: 1.5,
        speed_per_agility: 2.0,
        magic_per_intellect: 0.0,
    };
}

impl Default for StatFormulas {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Per-element values (resistances or affinities, in percent).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElementalValues {
    pub fire: f64,
    pub water: f64,
    pub earth: f64,
    pub air: f64,
    pub light: f64,
    pub dark: f64,
}

impl ElementalValues {
    pub fn get(&self, element: Element) -> f64 {
        match element {
            Element::Fire => self.fire,
            Element::Water => self.water,
            Element::Earth => self.earth,
            Element::Air => self.air,
            Element::Light => self.light,
            Element::Dark => self.dark,
        }
    }

    fn from_bonuses(bonuses: &AggregatedBonuses) -> Self {
        Self {
            fire: bonuses.total(Element::Fire),
            water: bonuses.total(Element::Water),
            earth: bonuses.total(Element::Earth),
            air: bonuses.total(Element::Air),
            light: bonuses.total(Element::Light),
            dark: bonuses.total(Element::Dark),
        }
    }
}

/// Fully computed character statistics. Every field is always populated.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct FinalStats {
    /// Attributes after bonuses.
    pub attributes: AttributeValues,

    pub max_health: f64,
    pub max_energy: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub magic_attack: f64,
    pub magic_defense: f64,

    pub crit_chance: f64,
    pub crit_damage: f64,
    pub dodge_chance: f64,

    pub energy_regen: f64,
    pub comprehension_rate: f64,
    pub breakthrough_chance: f64,

    pub elemental: ElementalValues,

    pub merchant_discount: f64,
    pub item_find: f64,
}

/// Computes final stats. Kinds without bonuses contribute 0.
pub fn compute_final_stats(
    base: &BaseAttributes,
    bonuses: &AggregatedBonuses,
    formulas: &StatFormulas,
) -> FinalStats {
    use strum::IntoEnumIterator;

    let mut attributes = base.attributes;
    for attribute in Attribute::iter() {
        *attributes.get_mut(attribute) += bonuses.total(attribute);
    }

    let combat = |stat: CombatStat| bonuses.total(stat);
    let cultivation = |stat: CultivationStat| bonuses.total(stat);

    FinalStats {
        attributes,

        max_health: base.base_max_health
            + attributes.vitality * formulas.health_per_vitality
            + combat(CombatStat::MaxHealth),
        max_energy: base.base_max_energy
            + attributes.intellect * formulas.energy_per_intellect
            + cultivation(CultivationStat::EnergyMax),
        attack: base.base_attack
            + attributes.strength * formulas.attack_per_strength
            + combat(CombatStat::PhysicalDamage),
        defense: base.base_defense
            + attributes.vitality * formulas.defense_per_vitality
            + combat(CombatStat::PhysicalDefense),
        speed: base.base_speed
            + attributes.agility * formulas.speed_per_agility
            + combat(CombatStat::Speed),
        magic_attack: attributes.intellect * formulas.magic_per_intellect
            + combat(CombatStat::MagicDamage),
        magic_defense: combat(CombatStat::MagicDefense),

        crit_chance: combat(CombatStat::CritChance),
        crit_damage: combat(CombatStat::CritDamage),
        dodge_chance: combat(CombatStat::DodgeChance),

        energy_regen: cultivation(CultivationStat::EnergyRegen),
        comprehension_rate: cultivation(CultivationStat::ComprehensionRate),
        breakthrough_chance: cultivation(CultivationStat::BreakthroughChance),

        elemental: ElementalValues::from_bonuses(bonuses),

        merchant_discount: bonuses.total(UtilityStat::MerchantDiscount),
        item_find: bonuses.total(UtilityStat::ItemFind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::{BonusRecord, BonusSource, aggregate};

    fn record(kind: impl Into<crate::bonus::StatKind>, value: f64) -> BonusRecord {
        BonusRecord::numeric(kind, value, BonusSource::Equipment, "item", "Item")
    }

    #[test]
    fn attribute_bonus_feeds_derived_formulas() {
        let base = BaseAttributes::default().with_attribute(Attribute::Strength, 10.0);
        let bonuses = aggregate(&[record(Attribute::Strength, 15.0)]);

        let stats = compute_final_stats(&base, &bonuses, &StatFormulas::default());
        assert_eq!(stats.attributes.strength, 25.0);
        assert_eq!(stats.attack, base.base_attack + 25.0 * 2.0);
    }

    #[test]
    fn flat_combat_bonuses_are_added_after_formulas() {
        let base = BaseAttributes::default()
            .with_attribute(Attribute::Vitality, 4.0)
            .with_attribute(Attribute::Agility, 3.0);
        let bonuses = aggregate(&[
            record(CombatStat::MaxHealth, 25.0),
            record(CombatStat::PhysicalDefense, 2.0),
            record(CombatStat::Speed, 1.0),
        ]);

        let stats = compute_final_stats(&base, &bonuses, &StatFormulas::default());
        assert_eq!(stats.max_health, 100.0 + 40.0 + 25.0);
        assert_eq!(stats.defense, 6.0 + 2.0);
        assert_eq!(stats.speed, 10.0 + 6.0 + 1.0);
    }

    #[test]
    fn other_kinds_pass_through() {
        let bonuses = aggregate(&[
            record(CombatStat::CritChance, 7.0),
            record(Element::Water, 12.0),
            record(UtilityStat::MerchantDiscount, 5.0),
            record(CultivationStat::EnergyRegen, 1.5),
            record(CombatStat::MagicDamage, 9.0),
        ]);

        let stats = compute_final_stats(&BaseAttributes::default(), &bonuses, &StatFormulas::default());
        assert_eq!(stats.crit_chance, 7.0);
        assert_eq!(stats.elemental.get(Element::Water), 12.0);
        assert_eq!(stats.elemental.fire, 0.0);
        assert_eq!(stats.merchant_discount, 5.0);
        assert_eq!(stats.energy_regen, 1.5);
        assert_eq!(stats.magic_attack, 9.0);
    }

    #[test]
    fn custom_formulas_change_coefficients() {
        let base = BaseAttributes::default().with_attribute(Attribute::Intellect, 10.0);
        let formulas = StatFormulas {
            magic_per_intellect: 3.0,
            energy_per_intellect: 1.0,
            ..StatFormulas::default()
        };

        let stats = compute_final_stats(&base, &AggregatedBonuses::default(), &formulas);
        assert_eq!(stats.magic_attack, 30.0);
        assert_eq!(stats.max_energy, 50.0 + 10.0);
    }
}

//! Effect-to-bonus extraction.
//!
//! Converts raw [`EffectDescriptor`] lists into canonical [`BonusRecord`]s.
//! Extraction is total: an entry that cannot be interpreted is skipped and
//! reported through `tracing` (and [`extract_with_diagnostics`]), while every
//! other entry is still extracted.

use super::effect::{EffectClass, EffectDescriptor, EffectError};
use super::kind::{
    Attribute, BonusSource, CombatStat, CultivationStat, Element, StatKind, UtilityStat, lookup,
};
use super::record::{BonusEffect, BonusOrigin, BonusRecord, SpecialPerk, Timestamp};
use crate::error::Diagnostic;

/// A skipped effect descriptor.
pub type EffectDiagnostic = Diagnostic<EffectError>;

const COMBAT_ALIASES: &[(&str, CombatStat)] = &[
    ("attack", CombatStat::PhysicalDamage),
    ("damage", CombatStat::PhysicalDamage),
    ("magicAttack", CombatStat::MagicDamage),
    ("spellDamage", CombatStat::MagicDamage),
    ("defense", CombatStat::PhysicalDefense),
    ("armor", CombatStat::PhysicalDefense),
    ("crit", CombatStat::CritChance),
    ("critMultiplier", CombatStat::CritDamage),
    ("dodge", CombatStat::DodgeChance),
    ("evasion", CombatStat::DodgeChance),
    ("health", CombatStat::MaxHealth),
    ("hp", CombatStat::MaxHealth),
    ("maxHp", CombatStat::MaxHealth),
    ("movementSpeed", CombatStat::Speed),
];

const CULTIVATION_ALIASES: &[(&str, CultivationStat)] = &[
    ("energy", CultivationStat::EnergyMax),
    ("maxEnergy", CultivationStat::EnergyMax),
    ("qi", CultivationStat::EnergyMax),
    ("qiRegen", CultivationStat::EnergyRegen),
    ("comprehension", CultivationStat::ComprehensionRate),
    ("breakthrough", CultivationStat::BreakthroughChance),
];

const UTILITY_ALIASES: &[(&str, UtilityStat)] = &[
    ("discount", UtilityStat::MerchantDiscount),
    ("shopDiscount", UtilityStat::MerchantDiscount),
    ("lootFind", UtilityStat::ItemFind),
];

/// Extracts bonus records from an effect list.
///
/// Malformed entries are skipped and logged; this function never fails.
pub fn extract(
    effects: &[EffectDescriptor],
    source: BonusSource,
    origin_id: &str,
    origin_label: &str,
) -> Vec<BonusRecord> {
    extract_from(effects, &BonusOrigin::new(source, origin_id, origin_label))
}

/// Like [`extract`], stamping every record with an expiry time.
pub fn extract_expiring(
    effects: &[EffectDescriptor],
    source: BonusSource,
    origin_id: &str,
    origin_label: &str,
    expires_at: Option<Timestamp>,
) -> Vec<BonusRecord> {
    let origin = BonusOrigin::new(source, origin_id, origin_label).expiring_at(expires_at);
    extract_from(effects, &origin)
}

/// Extracts records for a prepared origin.
pub fn extract_from(effects: &[EffectDescriptor], origin: &BonusOrigin) -> Vec<BonusRecord> {
    extract_with_diagnostics(effects, origin).0
}

/// Extracts records and also returns every skipped entry with its reason.
pub fn extract_with_diagnostics(
    effects: &[EffectDescriptor],
    origin: &BonusOrigin,
) -> (Vec<BonusRecord>, Vec<EffectDiagnostic>) {
    let mut records = Vec::with_capacity(effects.len());
    let mut skipped = Vec::new();

    for (index, effect) in effects.iter().enumerate() {
        match extract_one(effect, index, &origin.id) {
            Ok(bonus) => records.push(origin.record(bonus)),
            Err(error) => {
                tracing::warn!(
                    origin = %origin.id,
                    source = %origin.source,
                    index,
                    code = crate::error::EngineError::error_code(&error),
                    "skipping effect: {}",
                    error
                );
                skipped.push(Diagnostic::new(origin.id.clone(), index, error));
            }
        }
    }

    (records, skipped)
}

fn extract_one(
    effect: &EffectDescriptor,
    index: usize,
    origin_id: &str,
) -> Result<BonusEffect, EffectError> {
    match effect.effect_class {
        EffectClass::Special => Ok(BonusEffect::Special(special_perk(effect, index, origin_id))),
        EffectClass::Unknown => Err(EffectError::UnknownEffectClass),
        class => {
            let kind = resolve_kind(class, effect)?;
            let value = effect
                .value
                .as_ref()
                .ok_or(EffectError::MissingValue)?
                .coerce()?;
            Ok(BonusEffect::Numeric { kind, value })
        }
    }
}

/// Maps an effect class and target (or element) to its numeric stat kind.
pub fn resolve_kind(class: EffectClass, effect: &EffectDescriptor) -> Result<StatKind, EffectError> {
    let unknown_target = || EffectError::UnknownTarget {
        class,
        target: effect.target.clone(),
    };

    match class {
        EffectClass::StatBoost => Attribute::from_alias(&effect.target)
            .map(StatKind::Attribute)
            .ok_or_else(unknown_target),
        EffectClass::CombatBoost => lookup(&effect.target, COMBAT_ALIASES)
            .map(StatKind::Combat)
            .ok_or_else(unknown_target),
        EffectClass::CultivationBoost => lookup(&effect.target, CULTIVATION_ALIASES)
            .map(StatKind::Cultivation)
            .ok_or_else(unknown_target),
        EffectClass::UtilityBoost => lookup(&effect.target, UTILITY_ALIASES)
            .map(StatKind::Utility)
            .ok_or_else(unknown_target),
        EffectClass::ElementalBoost => {
            let element = effect
                .element
                .as_deref()
                .map(str::trim)
                .filter(|element| !element.is_empty())
                .ok_or(EffectError::MissingElement)?;
            lookup::<Element>(element, &[])
                .map(StatKind::Elemental)
                .ok_or_else(|| EffectError::UnknownElement {
                    element: element.to_string(),
                })
        }
        EffectClass::Special | EffectClass::Unknown => Err(EffectError::UnknownEffectClass),
    }
}

fn special_perk(effect: &EffectDescriptor, index: usize, origin_id: &str) -> SpecialPerk {
    let id = effect
        .id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| format!("{origin_id}:special:{index}"));
    let name = effect
        .name
        .clone()
        .or_else(|| Some(effect.target.clone()).filter(|target| !target.is_empty()))
        .unwrap_or_else(|| id.clone());
    let description = effect.description.clone().unwrap_or_default();

    SpecialPerk {
        id,
        name,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::effect::EffectValue;

    fn origin() -> BonusOrigin {
        BonusOrigin::new(BonusSource::Equipment, "azure-sword", "Azure Sword")
    }

    #[test]
    fn stat_boost_maps_to_attribute() {
        let records = extract(
            &[EffectDescriptor::stat("strength", "15")],
            BonusSource::Equipment,
            "azure-sword",
            "Azure Sword",
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind(), Some(StatKind::Attribute(Attribute::Strength)));
        assert_eq!(records[0].value(), Some(15.0));
        assert_eq!(records[0].origin_label, "Azure Sword");
        assert_eq!(records[0].source, BonusSource::Equipment);
    }

    #[test]
    fn aliases_and_spellings_resolve() {
        let effects = [
            EffectDescriptor::stat("Intelligence", 3),
            EffectDescriptor::combat("crit_chance", 5),
            EffectDescriptor::combat("hp", 40),
            EffectDescriptor::cultivation("qi", 25),
            EffectDescriptor::utility("discount", 10),
        ];
        let kinds: Vec<_> = extract_from(&effects, &origin())
            .iter()
            .filter_map(BonusRecord::kind)
            .collect();

        assert_eq!(
            kinds,
            vec![
                StatKind::Attribute(Attribute::Intellect),
                StatKind::Combat(CombatStat::CritChance),
                StatKind::Combat(CombatStat::MaxHealth),
                StatKind::Cultivation(CultivationStat::EnergyMax),
                StatKind::Utility(UtilityStat::MerchantDiscount),
            ]
        );
    }

    #[test]
    fn malformed_entry_is_skipped_and_reported() {
        let effects = [
            EffectDescriptor::stat("strength", "not-a-number"),
            EffectDescriptor::stat("agility", 4),
        ];

        let (records, skipped) = extract_with_diagnostics(&effects, &origin());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind(), Some(StatKind::Attribute(Attribute::Agility)));
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].index, 0);
        assert!(matches!(skipped[0].error, EffectError::UnparseableValue { .. }));
    }

    #[test]
    fn unknown_target_and_class_are_skipped() {
        let mut unknown_class = EffectDescriptor::stat("strength", 1);
        unknown_class.effect_class = EffectClass::Unknown;

        let effects = [
            EffectDescriptor::stat("charisma", 5),
            EffectDescriptor::combat("teleport", 5),
            unknown_class,
        ];
        let (records, skipped) = extract_with_diagnostics(&effects, &origin());

        assert!(records.is_empty());
        assert_eq!(skipped.len(), 3);
        assert!(matches!(skipped[0].error, EffectError::UnknownTarget { .. }));
        assert_eq!(skipped[2].error, EffectError::UnknownEffectClass);
    }

    #[test]
    fn missing_value_is_skipped() {
        let mut effect = EffectDescriptor::combat("attack", 1);
        effect.value = None;

        let (records, skipped) = extract_with_diagnostics(&[effect], &origin());
        assert!(records.is_empty());
        assert_eq!(skipped[0].error, EffectError::MissingValue);
    }

    #[test]
    fn elemental_boost_requires_a_canonical_element() {
        let mut missing = EffectDescriptor::elemental("fire", 10);
        missing.element = Some("   ".to_string());

        let effects = [
            EffectDescriptor::elemental("Fire", 10),
            missing,
            EffectDescriptor::elemental("lightning", 10),
        ];
        let (records, skipped) = extract_with_diagnostics(&effects, &origin());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind(), Some(StatKind::Elemental(Element::Fire)));
        assert_eq!(skipped[0].error, EffectError::MissingElement);
        assert!(matches!(skipped[1].error, EffectError::UnknownElement { .. }));
    }

    #[test]
    fn special_passes_through_with_synthetic_id() {
        let mut anonymous = EffectDescriptor::special(None, "Lotus Aura", "Calms nearby beasts");
        anonymous.value = Some(EffectValue::from("ignored"));

        let effects = [
            EffectDescriptor::special(Some("phoenix-rebirth"), "Phoenix Rebirth", "Revive once"),
            anonymous,
        ];
        let records = extract_from(&effects, &origin());

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(BonusRecord::is_special));
        assert_eq!(records[0].perk().map(|p| p.id.as_str()), Some("phoenix-rebirth"));
        assert_eq!(
            records[1].perk().map(|p| p.id.as_str()),
            Some("azure-sword:special:1")
        );
        assert_eq!(records[1].value(), None);
    }

    #[test]
    fn expiring_extraction_stamps_records() {
        let records = extract_expiring(
            &[EffectDescriptor::combat("attack", 5)],
            BonusSource::StatusEffect,
            "rage",
            "Rage",
            Some(Timestamp(100)),
        );
        assert_eq!(records[0].expires_at, Some(Timestamp(100)));
        assert!(records[0].is_expired(Timestamp(100)));
        assert!(!records[0].is_expired(Timestamp(99)));
    }
}

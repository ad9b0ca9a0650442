use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use equipment_core::{
    AggregationRules, AggregationStrategy, Attribute, AttributeSnapshot, BaseAttributes,
    BonusContext, BonusRecord, BonusSource, CombatStat, EffectClass, EffectDescriptor,
    EffectSource, Element, EngineConfig, Item, ItemType, StatFormulas, StatKind, UtilityStat,
    aggregate, aggregate_with, canonicalize, check_requirements, evaluate_loadout, extract,
};

fn mixed_records() -> Vec<BonusRecord> {
    let values = [3.5, -1.25, 12.0, 0.1, 0.2, 7.75, 1e-3, 40.0];
    let kinds: [StatKind; 5] = [
        Attribute::Strength.into(),
        CombatStat::CritChance.into(),
        Element::Fire.into(),
        Element::Water.into(),
        UtilityStat::MerchantDiscount.into(),
    ];

    kinds
        .iter()
        .flat_map(|kind| {
            values.iter().enumerate().map(move |(i, value)| {
                BonusRecord::numeric(
                    *kind,
                    *value,
                    BonusSource::Equipment,
                    format!("item-{i}"),
                    "Item",
                )
            })
        })
        .collect()
}

#[test]
fn aggregation_is_bit_identical_under_permutation() {
    let records = mixed_records();
    let expected = aggregate(&records);
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..20 {
        let mut shuffled = records.clone();
        shuffled.shuffle(&mut rng);
        let actual = aggregate(&shuffled);

        for (kind, bonus) in expected.iter() {
            let value = actual.total(kind);
            assert_eq!(value.to_bits(), bonus.value.to_bits(), "{kind}");
        }
    }
}

#[test]
fn strategy_examples() {
    let strength = extract(
        &[EffectDescriptor::stat("strength", 5)],
        BonusSource::Equipment,
        "a",
        "A",
    )
    .into_iter()
    .chain(extract(
        &[EffectDescriptor::stat("strength", "3")],
        BonusSource::Technique,
        "b",
        "B",
    ))
    .collect::<Vec<_>>();
    assert_eq!(aggregate(&strength).total(Attribute::Strength), 8.0);

    let fire = extract(
        &[
            EffectDescriptor::elemental("fire", 10),
            EffectDescriptor::elemental("fire", 20),
        ],
        BonusSource::Equipment,
        "c",
        "C",
    );
    let total = aggregate(&fire).total(Element::Fire);
    assert!((total - 32.0).abs() < 1e-9, "{total}");

    let discounts = extract(
        &[
            EffectDescriptor::utility("merchantDiscount", 5),
            EffectDescriptor::utility("discount", 12),
        ],
        BonusSource::SpiritCompanion,
        "d",
        "D",
    );
    assert_eq!(aggregate(&discounts).total(UtilityStat::MerchantDiscount), 12.0);

    let rules = AggregationRules::new().with_override(Element::Fire, AggregationStrategy::Additive);
    assert_eq!(aggregate_with(&fire, &rules, None).total(Element::Fire), 30.0);
}

#[test]
fn malformed_effects_are_tolerated() {
    let mut no_class = EffectDescriptor::stat("strength", 1);
    no_class.effect_class = EffectClass::Unknown;
    let mut no_element = EffectDescriptor::elemental("fire", 5);
    no_element.element = None;

    let effects = [
        EffectDescriptor::stat("strength", "not-a-number"),
        EffectDescriptor::stat("strength", "\"4\""),
        no_class,
        no_element,
        EffectDescriptor::combat("unknownTarget", 9),
        EffectDescriptor::special(None, "Dragon Scale", "Immune to burning"),
        EffectDescriptor::stat("strength", f64::NAN),
    ];

    let records = extract(&effects, BonusSource::Equipment, "cursed", "Cursed Blade");
    assert_eq!(records.len(), 2);

    let bonuses = aggregate(&records);
    assert_eq!(bonuses.total(Attribute::Strength), 4.0);
    assert_eq!(bonuses.specials().len(), 1);
    assert_eq!(
        bonuses.specials()[0].perk().map(|perk| perk.id.as_str()),
        Some("cursed:special:5")
    );
}

#[test]
fn alias_pairs_are_symmetric_in_requirements() {
    let pairs = [
        ("intelligence", "intellect"),
        ("dexterity", "agility"),
        ("spirit", "perception"),
        ("health", "vitality"),
    ];

    for (alias, canonical) in pairs {
        assert_eq!(canonicalize(alias), canonicalize(canonical));

        for (requirement_name, snapshot_name) in [(alias, canonical), (canonical, alias)] {
            let item = Item::new("x", "Sword", ItemType::Weapon).with_requirement(requirement_name, 10.0);

            let passing = AttributeSnapshot::new().with_attribute(snapshot_name, 10.0);
            let failing = AttributeSnapshot::new().with_attribute(snapshot_name, 9.0);

            assert!(check_requirements(&item, &passing).can_equip);
            let result = check_requirements(&item, &failing);
            assert!(!result.can_equip);
            assert_eq!(result.failed[0].attribute, canonical);
        }
    }
}

#[test]
fn strength_bonus_raises_attack() {
    let base = BaseAttributes::default().with_attribute(Attribute::Strength, 10.0);
    let config = EngineConfig::default();
    let context = BonusContext::with_base(&base).with_config(&config);
    let gauntlets = Item::new("g", "Titan Gauntlets", ItemType::Armor)
        .with_effect(EffectDescriptor::stat("strength", "15"));

    let evaluation = evaluate_loadout([&gauntlets], &context);
    assert_eq!(evaluation.stats.attributes.strength, 25.0);
    assert_eq!(evaluation.stats.attack, base.base_attack + 25.0 * 2.0);
}

#[test]
fn configured_formulas_and_rules_flow_through_evaluation() {
    let base = BaseAttributes::default().with_attribute(Attribute::Strength, 10.0);
    let config = EngineConfig::default()
        .with_formulas(StatFormulas {
            attack_per_strength: 3.0,
            ..StatFormulas::default()
        })
        .with_aggregation(
            AggregationRules::new().with_override(CombatStat::PhysicalDamage, AggregationStrategy::HighestOnly),
        );
    let techniques = [
        EffectSource::new("a", "Tiger Fist", vec![EffectDescriptor::combat("attack", 4)]),
        EffectSource::new("b", "Crane Kick", vec![EffectDescriptor::combat("attack", 6)]),
    ];
    let context = BonusContext::with_base(&base)
        .with_config(&config)
        .with_techniques(&techniques);

    let evaluation = evaluate_loadout(std::iter::empty(), &context);
    assert_eq!(evaluation.stats.attack, 10.0 * 3.0 + 6.0);
}

//! Full loadout evaluation.
//!
//! Runs the whole pipeline over every bonus source the host supplies, in a
//! fixed order:
//!
//! 1. worn equipment
//! 2. techniques
//! 3. status effects (expired ones dropped when a clock is given)
//! 4. spirit companions
//! 5. cultivation stage and level
//! 6. set bonuses
//! 7. aggregation
//! 8. final stats

use crate::bonus::{
    AggregatedBonuses, BonusRecord, BonusSource, EffectDescriptor, Timestamp, aggregate_with,
    extract, extract_expiring,
};
use crate::config::EngineConfig;
use crate::cultivation::{CultivationProgress, CultivationStage, CultivationTable};
use crate::item::Item;
use crate::requirements::AttributeSnapshot;
use crate::sets::{SetCatalog, resolve_set_bonuses};
use crate::stats::{
    BaseAttributes, FinalStats, LoadoutFingerprint, LocalStats, StatsProvider, StatsRequest,
    StatsSourceKind, resolve_stats,
};

/// A named list of effects that is not an item: a technique, a status
/// effect or a spirit companion.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct EffectSource {
    pub id: String,
    pub label: String,
    pub effects: Vec<EffectDescriptor>,
    /// Only honoured for status effects.
    pub expires_at: Option<Timestamp>,
}

impl EffectSource {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        effects: Vec<EffectDescriptor>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            effects,
            expires_at: None,
        }
    }

    #[must_use]
    pub fn expiring_at(mut self, at: Timestamp) -> Self {
        self.expires_at = Some(at);
        self
    }
}

static EMPTY_SNAPSHOT: AttributeSnapshot = AttributeSnapshot {
    attributes: std::collections::BTreeMap::new(),
    level: 0,
    cultivation_stage: CultivationStage::Mortal,
};
static NO_SETS: SetCatalog = SetCatalog::new();
static NO_CULTIVATION: CultivationTable = CultivationTable::empty();
static DEFAULT_CONFIG: EngineConfig = EngineConfig::new();

/// Everything besides worn items that feeds an evaluation.
///
/// All data is borrowed from the host; the engine keeps nothing.
#[derive(Clone, Copy, Debug)]
pub struct BonusContext<'a> {
    pub snapshot: &'a AttributeSnapshot,
    pub base: &'a BaseAttributes,
    pub techniques: &'a [EffectSource],
    pub status_effects: &'a [EffectSource],
    pub companions: &'a [EffectSource],
    pub sets: &'a SetCatalog,
    pub cultivation: &'a CultivationTable,
    pub config: &'a EngineConfig,
    pub now: Option<Timestamp>,
}

impl<'a> BonusContext<'a> {
    /// A context with no extra sources, no sets, no cultivation table and
    /// the default configuration.
    pub fn new(snapshot: &'a AttributeSnapshot, base: &'a BaseAttributes) -> Self {
        Self {
            snapshot,
            base,
            techniques: &[],
            status_effects: &[],
            companions: &[],
            sets: &NO_SETS,
            cultivation: &NO_CULTIVATION,
            config: &DEFAULT_CONFIG,
            now: None,
        }
    }

    /// A context for evaluations that never check requirements.
    pub fn with_base(base: &'a BaseAttributes) -> Self {
        Self::new(&EMPTY_SNAPSHOT, base)
    }

    #[must_use]
    pub fn with_techniques(mut self, techniques: &'a [EffectSource]) -> Self {
        self.techniques = techniques;
        self
    }

    #[must_use]
    pub fn with_status_effects(mut self, status_effects: &'a [EffectSource]) -> Self {
        self.status_effects = status_effects;
        self
    }

    #[must_use]
    pub fn with_companions(mut self, companions: &'a [EffectSource]) -> Self {
        self.companions = companions;
        self
    }

    #[must_use]
    pub fn with_sets(mut self, sets: &'a SetCatalog) -> Self {
        self.sets = sets;
        self
    }

    #[must_use]
    pub fn with_cultivation(mut self, cultivation: &'a CultivationTable) -> Self {
        self.cultivation = cultivation;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: &'a EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn at(mut self, now: Timestamp) -> Self {
        self.now = Some(now);
        self
    }

    /// Cultivation progress taken from the snapshot.
    pub fn progress(&self) -> CultivationProgress {
        CultivationProgress::new(self.snapshot.cultivation_stage, self.snapshot.level)
    }
}

/// Result of evaluating a loadout.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadoutEvaluation {
    /// Every extracted record, in pipeline order.
    pub records: Vec<BonusRecord>,
    pub bonuses: AggregatedBonuses,
    pub stats: FinalStats,
    pub stats_source: StatsSourceKind,
    pub fingerprint: LoadoutFingerprint,
}

impl LoadoutEvaluation {
    pub fn specials(&self) -> &[BonusRecord] {
        self.bonuses.specials()
    }
}

/// Evaluates worn items with locally computed stats.
pub fn evaluate_loadout<'i>(
    worn: impl IntoIterator<Item = &'i Item>,
    context: &BonusContext<'_>,
) -> LoadoutEvaluation {
    evaluate_with(worn, context, &LocalStats)
}

/// Evaluates worn items, taking final stats from `provider` when it answers.
pub fn evaluate_with<'i>(
    worn: impl IntoIterator<Item = &'i Item>,
    context: &BonusContext<'_>,
    provider: &dyn StatsProvider,
) -> LoadoutEvaluation {
    let worn: Vec<&Item> = worn.into_iter().collect();
    let progress = context.progress();

    let records = collect_records(&worn, context, &progress);
    let bonuses = aggregate_with(&records, &context.config.aggregation, context.now);

    let fingerprint =
        LoadoutFingerprint::compute(worn.iter().map(|item| item.id.as_str()), &progress);
    let request = StatsRequest {
        fingerprint: &fingerprint,
        base: context.base,
        bonuses: &bonuses,
        formulas: &context.config.formulas,
    };
    let (stats, stats_source) = resolve_stats(provider, &LocalStats, &request);

    tracing::debug!(
        worn = worn.len(),
        records = records.len(),
        %fingerprint,
        source = %stats_source,
        "evaluated loadout"
    );

    LoadoutEvaluation {
        records,
        bonuses,
        stats,
        stats_source,
        fingerprint,
    }
}

fn collect_records(
    worn: &[&Item],
    context: &BonusContext<'_>,
    progress: &CultivationProgress,
) -> Vec<BonusRecord> {
    let mut records = Vec::new();

    for item in worn {
        records.extend(extract(&item.effects, BonusSource::Equipment, &item.id, &item.name));
    }
    for technique in context.techniques {
        records.extend(extract(
            &technique.effects,
            BonusSource::Technique,
            &technique.id,
            &technique.label,
        ));
    }
    for effect in context.status_effects {
        records.extend(extract_expiring(
            &effect.effects,
            BonusSource::StatusEffect,
            &effect.id,
            &effect.label,
            effect.expires_at,
        ));
    }
    for companion in context.companions {
        records.extend(extract(
            &companion.effects,
            BonusSource::SpiritCompanion,
            &companion.id,
            &companion.label,
        ));
    }
    records.extend(context.cultivation.bonuses(progress));
    records.extend(resolve_set_bonuses(worn.iter().copied(), context.sets));

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::{Attribute, CombatStat, Element};
    use crate::item::ItemType;
    use crate::sets::SetDefinition;

    #[test]
    fn every_source_contributes_in_order() {
        let sword = Item::new("sword", "Azure Sword", ItemType::Weapon)
            .with_effect(EffectDescriptor::stat("strength", 5))
            .with_set("azure");
        let ring = Item::new("ring", "Azure Ring", ItemType::Accessory)
            .with_effect(EffectDescriptor::elemental("fire", 10))
            .with_set("azure");

        let techniques = [EffectSource::new(
            "iron-body",
            "Iron Body Art",
            vec![EffectDescriptor::stat("vitality", 3)],
        )];
        let status = [EffectSource::new(
            "rage",
            "Rage",
            vec![EffectDescriptor::combat("attack", 7)],
        )];
        let companions = [EffectSource::new(
            "fox",
            "Spirit Fox",
            vec![EffectDescriptor::elemental("fire", 20)],
        )];
        let sets: SetCatalog = [SetDefinition::new("azure", "Azure Dragon")
            .with_tier(2, vec![EffectDescriptor::combat("crit", 5)])]
        .into_iter()
        .collect();
        let snapshot = AttributeSnapshot::new().with_level(2);
        let table = CultivationTable::standard();
        let base = BaseAttributes::default();

        let context = BonusContext::new(&snapshot, &base)
            .with_techniques(&techniques)
            .with_status_effects(&status)
            .with_companions(&companions)
            .with_sets(&sets)
            .with_cultivation(&table);

        let evaluation = evaluate_loadout([&sword, &ring], &context);
        let sources: Vec<_> = evaluation.records.iter().map(|r| r.source).collect();
        assert_eq!(
            sources,
            vec![
                BonusSource::Equipment,
                BonusSource::Equipment,
                BonusSource::Technique,
                BonusSource::StatusEffect,
                BonusSource::SpiritCompanion,
                BonusSource::CultivationLevel,
                BonusSource::CultivationLevel,
                BonusSource::SetBonus,
            ]
        );

        let fire = evaluation.bonuses.total(Element::Fire);
        assert!((fire - 32.0).abs() < 1e-9);
        assert_eq!(evaluation.bonuses.total(CombatStat::CritChance), 5.0);
        assert_eq!(evaluation.stats.attack, 5.0 * 2.0 + 7.0);
        assert_eq!(evaluation.stats.attributes.vitality, 3.0 + 2.0);
        assert_eq!(evaluation.stats_source, StatsSourceKind::Local);
    }

    #[test]
    fn expired_status_effects_are_ignored_with_clock() {
        let status = [EffectSource::new(
            "blessing",
            "Blessing",
            vec![EffectDescriptor::stat("luck", 4)],
        )
        .expiring_at(Timestamp(50))];
        let base = BaseAttributes::default();

        let live = BonusContext::with_base(&base)
            .with_status_effects(&status)
            .at(Timestamp(49));
        let expired = live.at(Timestamp(50));

        let no_items: [&Item; 0] = [];
        assert_eq!(
            evaluate_loadout(no_items, &live).bonuses.total(Attribute::Luck),
            4.0
        );
        assert_eq!(
            evaluate_loadout(no_items, &expired).bonuses.total(Attribute::Luck),
            0.0
        );
    }

    #[test]
    fn fingerprint_tracks_worn_items() {
        let base = BaseAttributes::default();
        let context = BonusContext::with_base(&base);
        let sword = Item::new("sword", "Sword", ItemType::Weapon);

        let with_sword = evaluate_loadout([&sword], &context);
        let empty = evaluate_loadout(std::iter::empty(), &context);
        assert_ne!(with_sword.fingerprint, empty.fingerprint);
        assert_eq!(
            with_sword.fingerprint,
            LoadoutFingerprint::compute(["sword"], &context.progress())
        );
    }
}

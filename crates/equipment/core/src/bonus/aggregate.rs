//! Bonus aggregation.
//!
//! Folds bonus records from every source into one total per [`StatKind`].
//! Each kind combines with an [`AggregationStrategy`]; the default table can
//! be overridden per kind through [`AggregationRules`].
//!
//! Values are sorted with [`f64::total_cmp`] before folding, so the totals are
//! bit-identical for any permutation of the same records.

use std::collections::BTreeMap;

use super::kind::{BonusSource, CultivationStat, StatKind, UtilityStat};
use super::record::{BonusRecord, Timestamp};

/// How the values of one stat kind combine.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum AggregationStrategy {
    /// Plain sum.
    Additive,
    /// Percentages compound: `(Π(1 + v/100) - 1) * 100`.
    Multiplicative,
    /// Only the largest value counts.
    HighestOnly,
}

impl AggregationStrategy {
    /// Combines a set of values. Returns 0 for an empty set.
    pub fn combine(self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        match self {
            AggregationStrategy::Additive => sorted.iter().sum(),
            AggregationStrategy::Multiplicative => {
                let product: f64 = sorted.iter().map(|v| 1.0 + v / 100.0).product();
                (product - 1.0) * 100.0
            }
            AggregationStrategy::HighestOnly => sorted.last().copied().unwrap_or(0.0),
        }
    }

    /// Built-in strategy for a kind when no override is configured.
    pub const fn default_for(kind: StatKind) -> Self {
        match kind {
            StatKind::Elemental(_) => AggregationStrategy::Multiplicative,
            StatKind::Cultivation(CultivationStat::ComprehensionRate) => {
                AggregationStrategy::Multiplicative
            }
            StatKind::Utility(UtilityStat::MerchantDiscount) => AggregationStrategy::HighestOnly,
            _ => AggregationStrategy::Additive,
        }
    }
}

/// Per-kind strategy overrides layered over the built-in table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AggregationRules {
    pub overrides: BTreeMap<StatKind, AggregationStrategy>,
}

impl AggregationRules {
    /// Rules with no overrides.
    pub const fn new() -> Self {
        Self {
            overrides: BTreeMap::new(),
        }
    }

    /// Overrides the strategy for one kind (builder pattern).
    #[must_use]
    pub fn with_override(mut self, kind: impl Into<StatKind>, strategy: AggregationStrategy) -> Self {
        self.overrides.insert(kind.into(), strategy);
        self
    }

    pub fn strategy_for(&self, kind: StatKind) -> AggregationStrategy {
        self.overrides
            .get(&kind)
            .copied()
            .unwrap_or_else(|| AggregationStrategy::default_for(kind))
    }
}

/// The combined total of one stat kind.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregatedBonus {
    pub value: f64,
    pub strategy: AggregationStrategy,
    /// Contributing records in input order.
    pub sources: Vec<BonusRecord>,
}

/// Result of aggregation: one total per kind plus every special perk.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregatedBonuses {
    pub totals: BTreeMap<StatKind, AggregatedBonus>,
    pub specials: Vec<BonusRecord>,
}

impl AggregatedBonuses {
    /// Total for `kind`, or 0 if nothing contributed.
    pub fn total(&self, kind: impl Into<StatKind>) -> f64 {
        self.totals
            .get(&kind.into())
            .map_or(0.0, |bonus| bonus.value)
    }

    pub fn get(&self, kind: impl Into<StatKind>) -> Option<&AggregatedBonus> {
        self.totals.get(&kind.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKind, &AggregatedBonus)> {
        self.totals.iter().map(|(kind, bonus)| (*kind, bonus))
    }

    pub fn specials(&self) -> &[BonusRecord] {
        &self.specials
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty() && self.specials.is_empty()
    }
}

/// Aggregates with the built-in strategies and no clock.
pub fn aggregate(records: &[BonusRecord]) -> AggregatedBonuses {
    aggregate_with(records, &AggregationRules::new(), None)
}

/// Aggregates with explicit rules.
///
/// When `now` is given, records whose expiry has been reached are dropped.
/// Status effects sharing an `origin_id` do not stack on the same kind: only
/// the record with the largest absolute value survives.
pub fn aggregate_with(
    records: &[BonusRecord],
    rules: &AggregationRules,
    now: Option<Timestamp>,
) -> AggregatedBonuses {
    let live = |record: &&BonusRecord| now.is_none_or(|now| !record.is_expired(now));

    let mut specials = Vec::new();
    let mut numeric: Vec<(usize, StatKind, f64)> = Vec::new();

    for (index, record) in records.iter().enumerate().filter(|(_, r)| live(r)) {
        match (record.kind(), record.value()) {
            (Some(kind), Some(value)) if value.is_finite() => numeric.push((index, kind, value)),
            (Some(kind), Some(value)) => {
                tracing::warn!(
                    origin = %record.origin_id,
                    %kind,
                    value,
                    "dropping non-finite bonus"
                );
            }
            _ => specials.push(record.clone()),
        }
    }

    let winners = status_effect_winners(records, &numeric);

    let mut grouped: BTreeMap<StatKind, Vec<usize>> = BTreeMap::new();
    for &(index, kind, _) in &numeric {
        let record = &records[index];
        if record.source == BonusSource::StatusEffect
            && winners.get(&(record.origin_id.as_str(), kind)) != Some(&index)
        {
            continue;
        }
        grouped.entry(kind).or_default().push(index);
    }

    let totals = grouped
        .into_iter()
        .map(|(kind, indices)| {
            let strategy = rules.strategy_for(kind);
            let values: Vec<f64> = indices
                .iter()
                .filter_map(|&i| records[i].value())
                .collect();
            let bonus = AggregatedBonus {
                value: strategy.combine(&values),
                strategy,
                sources: indices.iter().map(|&i| records[i].clone()).collect(),
            };
            (kind, bonus)
        })
        .collect::<BTreeMap<_, _>>();

    tracing::trace!(
        records = records.len(),
        kinds = totals.len(),
        specials = specials.len(),
        "aggregated bonuses"
    );

    AggregatedBonuses { totals, specials }
}

/// Picks the surviving record index for every `(origin_id, kind)` pair of
/// status effects. Ties on magnitude go to the larger signed value, then to
/// the earlier record, so the surviving value never depends on input order.
fn status_effect_winners<'r>(
    records: &'r [BonusRecord],
    numeric: &[(usize, StatKind, f64)],
) -> BTreeMap<(&'r str, StatKind), usize> {
    let mut winners: BTreeMap<(&str, StatKind), (usize, f64)> = BTreeMap::new();

    for &(index, kind, value) in numeric {
        let record = &records[index];
        if record.source != BonusSource::StatusEffect {
            continue;
        }

        winners
            .entry((record.origin_id.as_str(), kind))
            .and_modify(|(best_index, best)| {
                let stronger = value
                    .abs()
                    .total_cmp(&best.abs())
                    .then(value.total_cmp(best))
                    .is_gt();
                if stronger {
                    *best_index = index;
                    *best = value;
                }
            })
            .or_insert((index, value));
    }

    winners
        .into_iter()
        .map(|(key, (index, _))| (key, index))
        .collect()
}

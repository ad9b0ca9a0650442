//! Bonus vocabulary, extraction and aggregation.
//!
//! - [`kind`]: closed enums for stat kinds and bonus sources
//! - [`record`]: single typed bonus records
//! - [`effect`]: raw effect descriptors from content data
//! - [`extract`]: descriptor → record conversion
//! - [`aggregate`]: per-kind combination of records
pub mod aggregate;
pub mod effect;
pub mod extract;
pub mod kind;
pub mod record;

pub use aggregate::{
    AggregatedBonus, AggregatedBonuses, AggregationRules, AggregationStrategy, aggregate,
    aggregate_with,
};
pub use effect::{EffectClass, EffectDescriptor, EffectError, EffectValue};
pub use extract::{
    EffectDiagnostic, extract, extract_expiring, extract_from, extract_with_diagnostics,
};
pub use kind::{
    Attribute, BonusSource, CombatStat, CultivationStat, Element, ParseStatKindError, StatKind,
    UtilityStat,
};
pub use record::{BonusEffect, BonusOrigin, BonusRecord, SpecialPerk, Timestamp};

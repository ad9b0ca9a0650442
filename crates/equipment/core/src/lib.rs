//! Equipment bonus aggregation and validation for a cultivation RPG.
//!
//! `equipment-core` turns worn items, learned techniques, status effects,
//! spirit companions and cultivation progress into final character
//! statistics, and decides whether an item may be equipped. It is pure
//! computation: no I/O, no global state. All persistent data (the
//! [`engine::Loadout`]) is owned by the host and borrowed by
//! [`engine::LoadoutEngine`] for one transition at a time.
pub mod attributes;
pub mod bonus;
pub mod config;
pub mod cultivation;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod item;
pub mod requirements;
pub mod sets;
pub mod slots;
pub mod stats;

pub use attributes::{ALIAS_TABLE, CanonicalAttribute, canonicalize};
pub use bonus::{
    AggregatedBonus, AggregatedBonuses, AggregationRules, AggregationStrategy, Attribute,
    BonusEffect, BonusOrigin, BonusRecord, BonusSource, CombatStat, CultivationStat,
    EffectClass, EffectDescriptor, EffectDiagnostic, EffectError, EffectValue, Element,
    SpecialPerk, StatKind, Timestamp, UtilityStat, aggregate, aggregate_with, extract,
    extract_expiring, extract_with_diagnostics,
};
pub use config::EngineConfig;
pub use cultivation::{CultivationProgress, CultivationStage, CultivationTable};
pub use engine::{
    EquipOutcome, EquipRejection, Loadout, LoadoutEngine, MalformedItemReason, UnequipOutcome,
};
pub use error::{Diagnostic, EngineError, ErrorSeverity};
pub use evaluate::{
    BonusContext, EffectSource, LoadoutEvaluation, evaluate_loadout, evaluate_with,
};
pub use item::{ArmorSubtype, Item, ItemCategory, ItemType};
pub use requirements::{
    AttributeSnapshot, FailedRequirement, RequirementCheck, RequirementDescriptor,
    RequirementError, Requirements, check_requirements,
};
pub use sets::{SetCatalog, SetDefinition, SetProgress, SetTier, resolve_set_bonuses};
pub use slots::{Slot, SlotAssignment, SlotTable};
pub use stats::{
    BaseAttributes, ConfirmedStats, FinalStats, LoadoutFingerprint, LocalStats, StatFormulas,
    StatsProvider, StatsRequest, StatsSourceKind, compute_final_stats, resolve_stats,
};

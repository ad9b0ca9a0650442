//! Final character statistics.
//!
//! # Architecture
//!
//! ```text
//! [ Base Attributes ] + [ Aggregated Bonuses ]
//!          ↓
//! [ Attributes after bonuses ]
//!          ↓
//! [ Derived formulas (StatFormulas) ]
//!          ↓
//! [ FinalStats ]  ← or server-confirmed, via StatsProvider
//! ```
//!
//! Stats are never stored by the engine; they are recomputed on every
//! loadout change.

pub mod derived;
pub mod provider;

pub use derived::{
    AttributeValues, BaseAttributes, ElementalValues, FinalStats, StatFormulas,
    compute_final_stats,
};
pub use provider::{
    ConfirmedStats, LoadoutFingerprint, LocalStats, StatsProvider, StatsRequest, StatsSourceKind,
    resolve_stats,
};

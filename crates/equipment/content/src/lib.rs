//! Data-driven content for the equipment engine.
//!
//! This crate provides loaders for the host-side data files that feed
//! `equipment-core`:
//! - Set catalogs (RON)
//! - Cultivation stage tables (RON)
//! - Engine configuration: stat formulas and aggregation overrides (TOML)
//! - Item lists as delivered by the game backend (JSON)
//!
//! All loaders deserialize straight into `equipment-core` types through its
//! `serde` feature. Content never becomes engine state; hosts pass it into a
//! `BonusContext` per evaluation.

use std::path::PathBuf;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentBundle, ContentFactory, CultivationTableLoader, ItemLoader, LoadResult,
    SetCatalogLoader,
};

/// Directory holding the data files that ship with this crate.
pub fn bundled_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

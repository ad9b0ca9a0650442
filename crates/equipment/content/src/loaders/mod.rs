//! Content loaders for reading engine data from files.
//!
//! Each loader converts one RON/TOML/JSON file into `equipment-core` types.
//! [`ContentFactory`] ties them to a data directory.

pub mod config;
pub mod cultivation;
pub mod factory;
pub mod item;
pub mod sets;

pub use config::ConfigLoader;
pub use cultivation::CultivationTableLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use item::ItemLoader;
pub use sets::SetCatalogLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

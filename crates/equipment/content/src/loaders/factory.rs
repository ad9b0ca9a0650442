//! Content factory for loading engine data from a directory.

use std::path::{Path, PathBuf};

use equipment_core::{CultivationTable, EngineConfig, Item, SetCatalog};

use crate::loaders::{
    ConfigLoader, CultivationTableLoader, ItemLoader, LoadResult, SetCatalogLoader,
};

/// Content factory that loads all engine content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── sets.ron
/// ├── cultivation.ron
/// └── items.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

/// Everything a host needs to build a `BonusContext`.
#[derive(Clone, Debug, Default)]
pub struct ContentBundle {
    pub config: EngineConfig,
    pub sets: SetCatalog,
    pub cultivation: CultivationTable,
    pub items: Vec<Item>,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const SETS_FILE: &'static str = "sets.ron";
    pub const CULTIVATION_FILE: &'static str = "cultivation.ron";
    pub const ITEMS_FILE: &'static str = "items.json";

    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        ConfigLoader::load(&self.data_dir.join(Self::CONFIG_FILE))
    }

    /// Load the set catalog from `sets.ron`.
    pub fn load_sets(&self) -> LoadResult<SetCatalog> {
        SetCatalogLoader::load(&self.data_dir.join(Self::SETS_FILE))
    }

    /// Load the cultivation table from `cultivation.ron`.
    pub fn load_cultivation(&self) -> LoadResult<CultivationTable> {
        CultivationTableLoader::load(&self.data_dir.join(Self::CULTIVATION_FILE))
    }

    /// Load items from `items.json`.
    pub fn load_items(&self) -> LoadResult<Vec<Item>> {
        ItemLoader::load(&self.data_dir.join(Self::ITEMS_FILE))
    }

    /// Load every file that exists.
    ///
    /// Missing files fall back to defaults: default config, an empty set
    /// catalog, [`CultivationTable::standard`] and no items. Files that exist
    /// but fail to parse are errors.
    pub fn load_all(&self) -> LoadResult<ContentBundle> {
        Ok(ContentBundle {
            config: self.load_or(Self::CONFIG_FILE, Self::load_config, EngineConfig::default)?,
            sets: self.load_or(Self::SETS_FILE, Self::load_sets, SetCatalog::new)?,
            cultivation: self.load_or(
                Self::CULTIVATION_FILE,
                Self::load_cultivation,
                CultivationTable::standard,
            )?,
            items: self.load_or(Self::ITEMS_FILE, Self::load_items, Vec::new)?,
        })
    }

    fn load_or<T>(
        &self,
        file: &str,
        load: impl FnOnce(&Self) -> LoadResult<T>,
        default: impl FnOnce() -> T,
    ) -> LoadResult<T> {
        if self.data_dir.join(file).is_file() {
            load(self)
        } else {
            tracing::debug!(file, dir = %self.data_dir.display(), "content file missing, using defaults");
            Ok(default())
        }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}

//! Cultivation table loader.

use std::path::Path;

use equipment_core::CultivationTable;

use crate::loaders::{LoadResult, read_file};

/// Loader for cultivation stage tables from RON files.
pub struct CultivationTableLoader;

impl CultivationTableLoader {
    /// Load a cultivation table from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing CultivationTable
    pub fn load(path: &Path) -> LoadResult<CultivationTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a cultivation table from RON text.
    pub fn parse(content: &str) -> LoadResult<CultivationTable> {
        let table: CultivationTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse cultivation table RON: {}", e))?;

        tracing::debug!(
            stages = table.stages.len(),
            per_level = table.per_level.len(),
            "loaded cultivation table"
        );
        Ok(table)
    }
}

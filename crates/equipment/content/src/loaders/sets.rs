//! Set catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use equipment_core::{SetCatalog, SetDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Set catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetCatalogFile {
    pub sets: Vec<SetDefinition>,
}

/// Loader for set definitions from RON files.
pub struct SetCatalogLoader;

impl SetCatalogLoader {
    /// Load a set catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing SetCatalogFile
    pub fn load(path: &Path) -> LoadResult<SetCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a set catalog from RON text.
    ///
    /// Sets without an id are rejected. A repeated id replaces the earlier
    /// definition and is logged.
    pub fn parse(content: &str) -> LoadResult<SetCatalog> {
        let file: SetCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse set catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for (index, set) in file.sets.iter().enumerate() {
            anyhow::ensure!(
                !set.set_id.trim().is_empty(),
                "Set #{} in catalog has no setId",
                index
            );
            if !seen.insert(set.set_id.as_str()) {
                tracing::warn!(set_id = %set.set_id, "duplicate set definition, keeping the last");
            }
            if set.tiers.is_empty() {
                tracing::warn!(set_id = %set.set_id, "set has no tiers");
            }
        }

        let catalog: SetCatalog = file.sets.into_iter().collect();
        tracing::debug!(sets = catalog.len(), "loaded set catalog");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tiers_and_effects() {
        let catalog = SetCatalogLoader::parse(
            r#"#![enable(implicit_some)]
            (
                sets: [
                    (
                        setId: "cloud",
                        name: "Cloud Walker",
                        tiers: [
                            (requiredCount: 2, effects: [(effectClass: combatBoost, target: "speed", value: 3.0)]),
                        ],
                    ),
                ],
            )
            "#,
        )
        .unwrap();

        let cloud = catalog.get("cloud").unwrap();
        assert_eq!(cloud.display_name(), "Cloud Walker");
        assert_eq!(cloud.tiers[0].required_count, 2);
        assert_eq!(cloud.tiers[0].effects.len(), 1);
    }

    #[test]
    fn missing_set_id_is_rejected() {
        let err = SetCatalogLoader::parse(r#"(sets: [(tiers: [])])"#).unwrap_err();
        assert!(err.to_string().contains("no setId"));
    }
}

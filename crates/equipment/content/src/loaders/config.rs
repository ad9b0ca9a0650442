//! Engine configuration loader.

use std::path::Path;

use equipment_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
///
/// Missing tables and keys keep their defaults, so an empty file yields
/// [`EngineConfig::default`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing EngineConfig
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        tracing::debug!(
            overrides = config.aggregation.overrides.len(),
            "loaded engine config"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equipment_core::{AggregationStrategy, CombatStat, StatKind};

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_formulas_keep_other_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [formulas]
            attackPerStrength = 3.0

            [aggregation.overrides]
            "combat.critChance" = "highestOnly"
            "#,
        )
        .unwrap();

        assert_eq!(config.formulas.attack_per_strength, 3.0);
        assert_eq!(config.formulas.health_per_vitality, 10.0);
        assert_eq!(
            config
                .aggregation
                .strategy_for(StatKind::Combat(CombatStat::CritChance)),
            AggregationStrategy::HighestOnly
        );
    }

    #[test]
    fn unknown_stat_kind_is_an_error() {
        let err = ConfigLoader::parse(
            r#"
            [aggregation.overrides]
            "combat.teleport" = "additive"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to parse config TOML"));
    }
}

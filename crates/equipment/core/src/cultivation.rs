//! Cultivation progress and the bonuses it grants.

use std::collections::BTreeMap;

use crate::bonus::kind::lookup;
use crate::bonus::{BonusOrigin, BonusRecord, BonusSource, EffectDescriptor, extract_from};

/// Cultivation stages in ascending order.
///
/// The ordinal (`Mortal = 0`) is what stage requirements compare against.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum CultivationStage {
    #[default]
    Mortal,
    QiCondensation,
    FoundationEstablishment,
    CoreFormation,
    NascentSoul,
    SpiritSevering,
    DaoSeeking,
    Immortal,
}

impl CultivationStage {
    pub const fn ordinal(self) -> u32 {
        self as u32
    }

    /// Parses `qi_condensation`, `QiCondensation`, `Qi Condensation`, ...
    pub fn from_name(name: &str) -> Option<Self> {
        lookup::<Self>(name, &[])
    }

    /// Display title, e.g. `"Foundation Establishment"`.
    pub const fn title(self) -> &'static str {
        match self {
            CultivationStage::Mortal => "Mortal",
            CultivationStage::QiCondensation => "Qi Condensation",
            CultivationStage::FoundationEstablishment => "Foundation Establishment",
            CultivationStage::CoreFormation => "Core Formation",
            CultivationStage::NascentSoul => "Nascent Soul",
            CultivationStage::SpiritSevering => "Spirit Severing",
            CultivationStage::DaoSeeking => "Dao Seeking",
            CultivationStage::Immortal => "Immortal",
        }
    }
}

/// Where a character stands on the cultivation path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CultivationProgress {
    pub stage: CultivationStage,
    pub level: u32,
}

impl CultivationProgress {
    pub const fn new(stage: CultivationStage, level: u32) -> Self {
        Self { stage, level }
    }
}

/// Effects granted by cultivation.
///
/// Only the current stage's effects apply; tables are expected to list
/// cumulative values per stage. Per-level effects are multiplied by the
/// character level.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct CultivationTable {
    pub stages: BTreeMap<CultivationStage, Vec<EffectDescriptor>>,
    pub per_level: Vec<EffectDescriptor>,
}

impl CultivationTable {
    /// A table that grants nothing.
    pub const fn empty() -> Self {
        Self {
            stages: BTreeMap::new(),
            per_level: Vec::new(),
        }
    }

    /// The stock progression used when content data provides none.
    pub fn standard() -> Self {
        use CultivationStage::*;

        let stages = [
            (QiCondensation, vec![EffectDescriptor::cultivation("energyMax", 20)]),
            (
                FoundationEstablishment,
                vec![
                    EffectDescriptor::cultivation("energyMax", 50),
                    EffectDescriptor::stat("vitality", 5),
                ],
            ),
            (
                CoreFormation,
                vec![
                    EffectDescriptor::cultivation("energyMax", 100),
                    EffectDescriptor::stat("vitality", 10),
                    EffectDescriptor::cultivation("comprehensionRate", 5),
                ],
            ),
            (
                NascentSoul,
                vec![
                    EffectDescriptor::cultivation("energyMax", 200),
                    EffectDescriptor::stat("vitality", 20),
                    EffectDescriptor::cultivation("comprehensionRate", 10),
                ],
            ),
            (
                SpiritSevering,
                vec![
                    EffectDescriptor::cultivation("energyMax", 350),
                    EffectDescriptor::stat("vitality", 30),
                    EffectDescriptor::cultivation("comprehensionRate", 15),
                ],
            ),
            (
                DaoSeeking,
                vec![
                    EffectDescriptor::cultivation("energyMax", 600),
                    EffectDescriptor::stat("vitality", 45),
                    EffectDescriptor::cultivation("comprehensionRate", 20),
                ],
            ),
            (
                Immortal,
                vec![
                    EffectDescriptor::cultivation("energyMax", 1000),
                    EffectDescriptor::stat("vitality", 60),
                    EffectDescriptor::cultivation("comprehensionRate", 30),
                ],
            ),
        ];

        Self {
            stages: stages.into_iter().collect(),
            per_level: vec![
                EffectDescriptor::stat("vitality", 1),
                EffectDescriptor::cultivation("energyMax", 2),
            ],
        }
    }

    /// Bonus records for the given progress.
    pub fn bonuses(&self, progress: &CultivationProgress) -> Vec<BonusRecord> {
        let mut records = Vec::new();

        if let Some(effects) = self.stages.get(&progress.stage) {
            let origin = BonusOrigin::new(
                BonusSource::CultivationStage,
                format!("stage:{}", progress.stage),
                progress.stage.title(),
            );
            records.extend(extract_from(effects, &origin));
        }

        if progress.level > 0 && !self.per_level.is_empty() {
            let factor = f64::from(progress.level);
            let scaled: Vec<_> = self
                .per_level
                .iter()
                .map(|effect| effect.scaled(factor))
                .collect();
            let origin = BonusOrigin::new(
                BonusSource::CultivationLevel,
                format!("level:{}", progress.level),
                format!("Level {}", progress.level),
            );
            records.extend(extract_from(&scaled, &origin));
        }

        records
    }
}

//! Where final stats come from.
//!
//! A host may hold stats confirmed by the game server for a given loadout,
//! or compute them locally. Both are [`StatsProvider`]s; [`resolve_stats`]
//! prefers one and falls back to the other.

use core::fmt;
use core::str::FromStr;

use sha2::{Digest, Sha256};

use super::derived::{BaseAttributes, FinalStats, StatFormulas, compute_final_stats};
use crate::bonus::AggregatedBonuses;
use crate::cultivation::CultivationProgress;

/// Which provider produced a set of final stats.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum StatsSourceKind {
    /// Stats confirmed by the game server.
    Confirmed,
    /// Stats computed locally from the aggregated bonuses.
    Local,
}

/// Commitment to a loadout: worn item ids plus cultivation progress.
///
/// SHA-256 over the sorted, de-duplicated item ids (each terminated by a NUL
/// byte), the stage ordinal and the level (both little-endian `u32`). Worn
/// order does not affect the fingerprint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LoadoutFingerprint([u8; 32]);

impl LoadoutFingerprint {
    pub fn compute<'i>(
        item_ids: impl IntoIterator<Item = &'i str>,
        progress: &CultivationProgress,
    ) -> Self {
        let mut ids: Vec<&str> = item_ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();

        let mut hasher = Sha256::new();
        for id in ids {
            hasher.update(id.as_bytes());
            hasher.update([0u8]);
        }
        hasher.update(progress.stage.ordinal().to_le_bytes());
        hasher.update(progress.level.to_le_bytes());

        Self(hasher.finalize().into())
    }

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for LoadoutFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for LoadoutFingerprint {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s.trim(), &mut bytes)?;
        Ok(Self(bytes))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LoadoutFingerprint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LoadoutFingerprint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Everything a provider may need to answer.
#[derive(Clone, Copy, Debug)]
pub struct StatsRequest<'a> {
    pub fingerprint: &'a LoadoutFingerprint,
    pub base: &'a BaseAttributes,
    pub bonuses: &'a AggregatedBonuses,
    pub formulas: &'a StatFormulas,
}

/// Source of final stats for a loadout.
pub trait StatsProvider: Send + Sync {
    /// Final stats for the request, or `None` if this provider cannot answer.
    fn final_stats(&self, request: &StatsRequest<'_>) -> Option<FinalStats>;

    fn kind(&self) -> StatsSourceKind;
}

/// Computes stats from the aggregated bonuses. Always answers.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStats;

impl StatsProvider for LocalStats {
    fn final_stats(&self, request: &StatsRequest<'_>) -> Option<FinalStats> {
        Some(compute_final_stats(
            request.base,
            request.bonuses,
            request.formulas,
        ))
    }

    fn kind(&self) -> StatsSourceKind {
        StatsSourceKind::Local
    }
}

/// Server-confirmed stats for one specific loadout.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfirmedStats {
    pub fingerprint: LoadoutFingerprint,
    pub stats: FinalStats,
}

impl ConfirmedStats {
    pub fn new(fingerprint: LoadoutFingerprint, stats: FinalStats) -> Self {
        Self { fingerprint, stats }
    }
}

impl StatsProvider for ConfirmedStats {
    fn final_stats(&self, request: &StatsRequest<'_>) -> Option<FinalStats> {
        (self.fingerprint == *request.fingerprint).then_some(self.stats)
    }

    fn kind(&self) -> StatsSourceKind {
        StatsSourceKind::Confirmed
    }
}

/// Asks `primary` first, then `fallback`.
///
/// If neither answers the stats are computed locally.
pub fn resolve_stats(
    primary: &dyn StatsProvider,
    fallback: &dyn StatsProvider,
    request: &StatsRequest<'_>,
) -> (FinalStats, StatsSourceKind) {
    if let Some(stats) = primary.final_stats(request) {
        tracing::debug!(source = %primary.kind(), fingerprint = %request.fingerprint, "using primary stats");
        return (stats, primary.kind());
    }

    if let Some(stats) = fallback.final_stats(request) {
        tracing::debug!(
            primary = %primary.kind(),
            source = %fallback.kind(),
            fingerprint = %request.fingerprint,
            "primary stats unavailable, using fallback"
        );
        return (stats, fallback.kind());
    }

    tracing::warn!(
        fingerprint = %request.fingerprint,
        "no stats provider answered, computing locally"
    );
    let stats = compute_final_stats(request.base, request.bonuses, request.formulas);
    (stats, StatsSourceKind::Local)
}

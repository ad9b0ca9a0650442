//! Bonus records: single typed modifiers attributed to one source.

use super::kind::{BonusSource, StatKind};

/// A point in host time (seconds since the epoch, or any monotonic unit the
/// host uses consistently for effect expiry).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timestamp(pub u64);

/// A descriptive, non-numeric perk. Never merged with other records.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialPerk {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl SpecialPerk {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Payload of a bonus record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum BonusEffect {
    /// A numeric modifier. `value` is always finite.
    Numeric { kind: StatKind, value: f64 },

    /// A descriptive perk without a value.
    Special(SpecialPerk),
}

/// A single bonus attributed to one origin (item, technique, set tier, ...).
///
/// Records are transient: they are rebuilt from scratch whenever the worn
/// items or active effects change and are never patched in place.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusRecord {
    pub effect: BonusEffect,
    pub source: BonusSource,
    pub origin_id: String,
    pub origin_label: String,
    pub expires_at: Option<Timestamp>,
}

impl BonusRecord {
    /// Creates a numeric record.
    pub fn numeric(
        kind: impl Into<StatKind>,
        value: f64,
        source: BonusSource,
        origin_id: impl Into<String>,
        origin_label: impl Into<String>,
    ) -> Self {
        Self {
            effect: BonusEffect::Numeric {
                kind: kind.into(),
                value,
            },
            source,
            origin_id: origin_id.into(),
            origin_label: origin_label.into(),
            expires_at: None,
        }
    }

    /// Creates a special (non-numeric) record.
    pub fn special(
        perk: SpecialPerk,
        source: BonusSource,
        origin_id: impl Into<String>,
        origin_label: impl Into<String>,
    ) -> Self {
        Self {
            effect: BonusEffect::Special(perk),
            source,
            origin_id: origin_id.into(),
            origin_label: origin_label.into(),
            expires_at: None,
        }
    }

    /// Sets the expiry time (builder pattern).
    #[must_use]
    pub fn expiring_at(mut self, at: Timestamp) -> Self {
        self.expires_at = Some(at);
        self
    }

    /// The numeric kind, or `None` for special records.
    pub fn kind(&self) -> Option<StatKind> {
        match &self.effect {
            BonusEffect::Numeric { kind, .. } => Some(*kind),
            BonusEffect::Special(_) => None,
        }
    }

    /// The numeric value, or `None` for special records.
    pub fn value(&self) -> Option<f64> {
        match &self.effect {
            BonusEffect::Numeric { value, .. } => Some(*value),
            BonusEffect::Special(_) => None,
        }
    }

    pub fn perk(&self) -> Option<&SpecialPerk> {
        match &self.effect {
            BonusEffect::Special(perk) => Some(perk),
            BonusEffect::Numeric { .. } => None,
        }
    }

    pub fn is_special(&self) -> bool {
        matches!(self.effect, BonusEffect::Special(_))
    }

    /// Returns true once `now` has reached the expiry time.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Identity shared by every record extracted from one effect list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BonusOrigin {
    pub source: BonusSource,
    pub id: String,
    pub label: String,
    pub expires_at: Option<Timestamp>,
}

impl BonusOrigin {
    pub fn new(source: BonusSource, id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            source,
            id: id.into(),
            label: label.into(),
            expires_at: None,
        }
    }

    #[must_use]
    pub fn expiring_at(mut self, at: Option<Timestamp>) -> Self {
        self.expires_at = at;
        self
    }

    pub(crate) fn record(&self, effect: BonusEffect) -> BonusRecord {
        BonusRecord {
            effect,
            source: self.source,
            origin_id: self.id.clone(),
            origin_label: self.label.clone(),
            expires_at: self.expires_at,
        }
    }
}

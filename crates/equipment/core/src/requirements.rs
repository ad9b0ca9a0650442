//! Equip requirement validation.
//!
//! Requirements arrive either as a list of `{attribute, minValue}` entries or
//! as a keyed map. Both are normalized into a list and checked against an
//! [`AttributeSnapshot`]. Attribute names on both sides go through the alias
//! table in [`crate::attributes`]. Minimums use the same lenient numeric form
//! as effect values, so `"10"` is accepted and `true` is reported per entry.

use std::collections::BTreeMap;

use crate::attributes::{CanonicalAttribute, canonicalize};
use crate::bonus::EffectValue;
use crate::cultivation::CultivationStage;
use crate::error::{Diagnostic, EngineError, ErrorSeverity};
use crate::item::Item;

/// A single minimum-value requirement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RequirementDescriptor {
    pub attribute: String,
    pub min_value: EffectValue,
}

impl RequirementDescriptor {
    pub fn new(attribute: impl Into<String>, min_value: impl Into<EffectValue>) -> Self {
        Self {
            attribute: attribute.into(),
            min_value: min_value.into(),
        }
    }
}

/// Requirements in either of the two shapes content data uses.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Requirements {
    List(Vec<RequirementDescriptor>),
    Map(BTreeMap<String, EffectValue>),
}

impl Default for Requirements {
    fn default() -> Self {
        Requirements::List(Vec::new())
    }
}

impl Requirements {
    /// Flattens into a list. Map entries come out in sorted key order.
    pub fn normalized(&self) -> Vec<RequirementDescriptor> {
        match self {
            Requirements::List(list) => list.clone(),
            Requirements::Map(map) => map
                .iter()
                .map(|(attribute, min)| RequirementDescriptor::new(attribute.clone(), min.clone()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Requirements::List(list) => list.is_empty(),
            Requirements::Map(map) => map.is_empty(),
        }
    }
}

/// Read-only view of a character's attributes at validation time.
///
/// Keys may use any alias. When several keys resolve to the same attribute
/// the largest value is used; a missing attribute counts as 0.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct AttributeSnapshot {
    pub attributes: BTreeMap<String, f64>,
    pub level: u32,
    pub cultivation_stage: CultivationStage,
}

impl AttributeSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: f64) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_stage(mut self, stage: CultivationStage) -> Self {
        self.cultivation_stage = stage;
        self
    }

    /// Current value of a canonical attribute.
    pub fn value_of(&self, attribute: CanonicalAttribute) -> f64 {
        match attribute {
            CanonicalAttribute::Level => f64::from(self.level),
            CanonicalAttribute::Stage => f64::from(self.cultivation_stage.ordinal()),
            CanonicalAttribute::Attribute(_) => self
                .attributes
                .iter()
                .filter(|(name, value)| {
                    value.is_finite() && canonicalize(name) == Some(attribute)
                })
                .map(|(_, value)| *value)
                .max_by(f64::total_cmp)
                .unwrap_or(0.0),
        }
    }
}

/// One unmet requirement, reported under the canonical attribute name.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FailedRequirement {
    pub attribute: String,
    pub required: f64,
    pub current: f64,
}

impl FailedRequirement {
    /// Player-facing summary, e.g. `"requires 10 intellect (current 8)"`.
    pub fn message(&self) -> String {
        format!(
            "requires {} {} (current {})",
            self.required, self.attribute, self.current
        )
    }
}

/// A requirement entry that could not be evaluated.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequirementError {
    #[error("unknown requirement attribute `{name}`")]
    UnknownAttribute { name: String },

    #[error("requirement `{attribute}` has invalid minimum `{value}`")]
    InvalidMinimum { attribute: String, value: String },
}

impl EngineError for RequirementError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            RequirementError::UnknownAttribute { .. } => "REQUIREMENT_UNKNOWN_ATTRIBUTE",
            RequirementError::InvalidMinimum { .. } => "REQUIREMENT_INVALID_MINIMUM",
        }
    }
}

/// Outcome of checking one item's requirements.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequirementCheck {
    /// `true` exactly when `failed` is empty.
    pub can_equip: bool,
    pub failed: Vec<FailedRequirement>,
    /// Entries that were ignored because they could not be evaluated.
    pub skipped: Vec<Diagnostic<RequirementError>>,
}

/// Checks an item's requirements against a snapshot.
pub fn check_requirements(item: &Item, snapshot: &AttributeSnapshot) -> RequirementCheck {
    check(&item.requirements, &item.id, snapshot)
}

/// Checks a requirement set. `origin_id` only labels diagnostics.
pub fn check(
    requirements: &Requirements,
    origin_id: &str,
    snapshot: &AttributeSnapshot,
) -> RequirementCheck {
    let mut failed = Vec::new();
    let mut skipped = Vec::new();

    for (index, requirement) in requirements.normalized().into_iter().enumerate() {
        let Some(attribute) = canonicalize(&requirement.attribute) else {
            skip(
                &mut skipped,
                origin_id,
                index,
                RequirementError::UnknownAttribute {
                    name: requirement.attribute,
                },
            );
            continue;
        };

        let Ok(min_value) = requirement.min_value.coerce() else {
            skip(
                &mut skipped,
                origin_id,
                index,
                RequirementError::InvalidMinimum {
                    attribute: requirement.attribute,
                    value: requirement.min_value.to_string(),
                },
            );
            continue;
        };

        let current = snapshot.value_of(attribute);
        if current < min_value {
            failed.push(FailedRequirement {
                attribute: attribute.name().to_string(),
                required: min_value,
                current,
            });
        }
    }

    RequirementCheck {
        can_equip: failed.is_empty(),
        failed,
        skipped,
    }
}

fn skip(
    skipped: &mut Vec<Diagnostic<RequirementError>>,
    origin_id: &str,
    index: usize,
    error: RequirementError,
) {
    tracing::warn!(
        origin = origin_id,
        index,
        code = error.error_code(),
        "skipping requirement: {}",
        error
    );
    skipped.push(Diagnostic::new(origin_id, index, error));
}

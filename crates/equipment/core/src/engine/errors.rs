//! Error types for equip transitions.

use crate::error::{EngineError, ErrorSeverity};
use crate::item::ItemCategory;
use crate::requirements::FailedRequirement;
use crate::slots::Slot;

/// Why an item is considered malformed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MalformedItemReason {
    #[error("item has no id")]
    MissingId,

    #[error("cannot determine a slot category for `{name}`")]
    UnknownCategory { name: String },
}

/// Reasons an equip is refused. The loadout is left untouched.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipRejection {
    #[error("malformed item `{item_id}`: {reason}")]
    MalformedItem {
        item_id: String,
        reason: MalformedItemReason,
    },

    #[error("item `{item_id}` ({category}) does not fit slot {slot}")]
    IncompatibleSlot {
        item_id: String,
        slot: Slot,
        category: ItemCategory,
    },

    #[error("requirements not met for `{item_id}`: {}", summarize(.failed))]
    RequirementsNotMet {
        item_id: String,
        failed: Vec<FailedRequirement>,
    },
}

impl EquipRejection {
    pub fn malformed(item_id: impl Into<String>, reason: MalformedItemReason) -> Self {
        Self::MalformedItem {
            item_id: item_id.into(),
            reason,
        }
    }

    /// Unmet requirements, empty for other rejections.
    pub fn failed_requirements(&self) -> &[FailedRequirement] {
        match self {
            EquipRejection::RequirementsNotMet { failed, .. } => failed,
            _ => &[],
        }
    }
}

fn summarize(failed: &[FailedRequirement]) -> String {
    failed
        .iter()
        .map(FailedRequirement::message)
        .collect::<Vec<_>>()
        .join(", ")
}

impl EngineError for EquipRejection {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EquipRejection::RequirementsNotMet { .. } => ErrorSeverity::Recoverable,
            EquipRejection::MalformedItem { .. } | EquipRejection::IncompatibleSlot { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EquipRejection::MalformedItem {
                reason: MalformedItemReason::MissingId,
                ..
            } => "EQUIP_MISSING_ID",
            EquipRejection::MalformedItem {
                reason: MalformedItemReason::UnknownCategory { .. },
                ..
            } => "EQUIP_UNKNOWN_CATEGORY",
            EquipRejection::IncompatibleSlot { .. } => "EQUIP_INCOMPATIBLE_SLOT",
            EquipRejection::RequirementsNotMet { .. } => "EQUIP_REQUIREMENTS_NOT_MET",
        }
    }
}

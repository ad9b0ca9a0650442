//! Common error infrastructure for equipment-core.
//!
//! This module provides shared types and traits used across all error types in
//! equipment-core. Domain-specific errors (e.g., `EffectError`, `EquipRejection`)
//! are defined in their respective modules alongside the operations they guard.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each operation has its own error type with specific variants
//! - **Skip, don't abort**: Malformed entries are reported as [`Diagnostic`]s and
//!   skipped; the surrounding computation always completes
//! - **Severity Classification**: Errors are categorized for recovery strategies

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Conditions the player can fix (e.g. raise an attribute)
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors (never produced by this crate)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - may succeed later once the character changes.
    ///
    /// Examples: attribute below an item's requirement
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unparseable effect value, item without an id
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all equipment-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// A skipped input entry together with where it came from.
///
/// Produced whenever a single effect descriptor or requirement entry cannot be
/// interpreted. The entry is dropped and processing continues.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic<E> {
    /// Identifier of the item, effect source or set that carried the entry.
    pub origin_id: String,

    /// Position of the entry within its list.
    pub index: usize,

    /// Why the entry was skipped.
    pub error: E,
}

impl<E> Diagnostic<E> {
    pub fn new(origin_id: impl Into<String>, index: usize, error: E) -> Self {
        Self {
            origin_id: origin_id.into(),
            index,
            error,
        }
    }
}

impl<E: core::fmt::Display> core::fmt::Display for Diagnostic<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}[{}]: {}", self.origin_id, self.index, self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }

    #[test]
    fn diagnostic_display_includes_origin_and_index() {
        let diagnostic = Diagnostic::new("jade-ring", 2, "bad value");
        assert_eq!(diagnostic.to_string(), "jade-ring[2]: bad value");
    }
}

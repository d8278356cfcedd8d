//! Error handling module for variant selection
//!
//! Provides the domain error type using thiserror. Every variant here is
//! local to a single call: nothing is retried and nothing is fatal to the
//! process. An incomplete or dead-end selection is NOT an error; it is
//! reported as `None` or an empty option list.

use thiserror::Error;

/// Errors reported by the selection filter and the catalog checks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The catalog cannot back a filter (length mismatch or duplicate options).
    /// Fatal to initialization: no filter is constructed.
    #[error("Malformed catalog: {reason}")]
    MalformedCatalog { reason: String },

    /// Attempted to set an attribute whose predecessor is still unset
    #[error("Attribute {index} is not enabled yet (attribute {} must be chosen first)", index.saturating_sub(1))]
    AttributeNotYetEnabled { index: usize },

    /// The value is not among the available values for this position
    #[error("Value {value:?} is not available for attribute {index} in the current selection")]
    InvalidValueForContext { index: usize, value: String },

    /// Attribute position outside the attribute list
    #[error("Attribute index {index} is out of range (catalog has {len} attributes)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type alias for selection operations
pub type Result<T> = std::result::Result<T, SelectionError>;

impl SelectionError {
    /// Create a malformed catalog error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedCatalog {
            reason: reason.into(),
        }
    }

    /// Returns true if the caller can recover by re-prompting the user.
    ///
    /// Only `MalformedCatalog` leaves the filter unusable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::MalformedCatalog { .. })
    }
}

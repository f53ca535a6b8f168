//! Error types for destiny-matrix-core.
//!
//! This module defines the central error type [`MatrixError`] used throughout
//! the crate, along with the [`MatrixResult<T>`] type alias.
//!
//! Only structural contract violations surface as errors. Missing or sparse
//! divination signal is never an error: it degrades gracefully into
//! `has_data = false` domains, low confidence scores, or a low audit score
//! with blockers.
//!
//! # Examples
//!
//! ```rust
//! use destiny_matrix_core::error::MatrixError;
//!
//! let err = MatrixError::InvalidInputShape {
//!     field: "aspects[0].orb".into(),
//!     message: "orb must be finite and within [0, 15]".into(),
//! };
//! assert!(err.to_string().contains("orb"));
//! ```

use thiserror::Error;

/// Top-level error type for destiny-matrix-core operations.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// Input is structurally impossible to interpret.
    ///
    /// # When This Occurs
    ///
    /// - A numeric field holds NaN or infinity
    /// - An aspect orb or angle is outside its physical range
    /// - More than four pillar elements are supplied
    ///
    /// This is a programmer/contract error at the system boundary, not a
    /// runtime business condition. Callers should fail fast and loud.
    #[error("Invalid input shape: {field} - {message}")]
    InvalidInputShape {
        /// Path of the offending field (e.g. `aspects[2].orb`)
        field: String,
        /// Description of the violated constraint
        message: String,
    },

    /// An evidence anchor could not be synthesized.
    ///
    /// # When This Occurs
    ///
    /// - A generated evidence sentence falls below the minimum length
    /// - An anchor section produced an empty string
    ///
    /// Anchors must always carry substantive text; a failure to synthesize
    /// is surfaced here rather than emitting a silently-empty anchor.
    #[error("Evidence construction failed for anchor '{anchor}': {reason}")]
    EvidenceConstruction {
        /// Id of the anchor being constructed
        anchor: String,
        /// Why synthesis failed
        reason: String,
    },

    /// Error during serialization (canonical-form hashing).
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for MatrixError {
    fn from(err: serde_json::Error) -> Self {
        MatrixError::Serialization(err.to_string())
    }
}

/// Result type alias for core operations.
pub type MatrixResult<T> = Result<T, MatrixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_shape_display() {
        let err = MatrixError::InvalidInputShape {
            field: "planet_houses[mars]".into(),
            message: "house index 13 out of range 1..=12".into(),
        };
        assert!(err.to_string().contains("planet_houses[mars]"));
        assert!(err.to_string().contains("13"));
    }

    #[test]
    fn test_evidence_construction_display() {
        let err = MatrixError::EvidenceConstruction {
            anchor: "anchor-03".into(),
            reason: "saju evidence shorter than minimum".into(),
        };
        assert!(err.to_string().contains("anchor-03"));
        assert!(err.to_string().contains("minimum"));
    }
}

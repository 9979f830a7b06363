//! # Error Types
//!
//! Structured error types for calc_core. Errors serialize to JSON so that a
//! design front-end can show the offending field next to the input it came
//! from.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_width(width_mm: f64) -> CalcResult<()> {
//!     if width_mm <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "width_mm".to_string(),
//!             value: width_mm.to_string(),
//!             reason: "Width must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive dimension, NaN, zero quantity)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A catalog reference could not be resolved and strict mode is on
    #[error("Unresolved {kind} reference: {reference}")]
    UnresolvedReference { kind: String, reference: String },

    /// A batch conversion was requested with no design units
    #[error("Nothing to convert: project '{project}' has no design units")]
    EmptyBatch { project: String },

    /// Calculation produced a physically meaningless result
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnresolvedReference error
    pub fn unresolved_reference(kind: impl Into<String>, reference: impl Into<String>) -> Self {
        CalcError::UnresolvedReference {
            kind: kind.into(),
            reference: reference.into(),
        }
    }

    /// Create an EmptyBatch error
    pub fn empty_batch(project: impl Into<String>) -> Self {
        CalcError::EmptyBatch {
            project: project.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(
        calculation_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by what the user typed, as opposed to faults
    /// in the engine. Front-ends show these inline instead of as a crash.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::MissingField { .. }
                | CalcError::UnresolvedReference { .. }
                | CalcError::EmptyBatch { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::UnresolvedReference { .. } => "UNRESOLVED_REFERENCE",
            CalcError::EmptyBatch { .. } => "EMPTY_BATCH",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
        }
    }
}

/// Reject non-finite or non-positive dimensions.
pub(crate) fn ensure_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be a finite number",
        ));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("width_mm", "-5", "Value must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::empty_batch("P-1").error_code(), "EMPTY_BATCH");
        assert_eq!(
            CalcError::unresolved_reference("profile", "FRAME").error_code(),
            "UNRESOLVED_REFERENCE"
        );
    }

    #[test]
    fn test_validation_classification() {
        assert!(CalcError::empty_batch("P-1").is_validation());
        let overflow = CalcError::calculation_failed("cost scaling", "piece count overflow");
        assert!(!overflow.is_validation());
        assert_eq!(overflow.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("width_mm", 10.0).is_ok());
        assert!(ensure_positive("width_mm", 0.0).is_err());
        assert!(ensure_positive("width_mm", -1.0).is_err());
        assert!(ensure_positive("width_mm", f64::NAN).is_err());
        assert!(ensure_positive("width_mm", f64::INFINITY).is_err());
    }
}

//! Unified error types for the CRAC domain model
//!
//! This module provides a common error type [`CracError`] that can represent
//! errors from any part of the data model. Domain-specific error types (such
//! as the evaluation errors in crac-rao) can wrap `CracError` for uniform
//! error handling at API boundaries.
//!
//! # Example
//!
//! ```ignore
//! use crac_core::{CracError, CracResult};
//!
//! fn read_threshold(cnec: &FlowCnec, unit: Unit) -> CracResult<f64> {
//!     let extension = cnec.loop_flow_threshold.as_ref()
//!         .ok_or_else(|| CracError::Data("no loop-flow threshold".into()))?;
//!     extension.threshold_with_reliability_margin(unit)
//! }
//! ```

use thiserror::Error;

/// Unified error type for CRAC data-model operations.
///
/// Allows validation, data-access, and serialization errors to be handled
/// uniformly by consumers of the model.
#[derive(Error, Debug)]
pub enum CracError {
    /// Data validation errors (inconsistent states, unit mismatches, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or malformed data attached to a network element
    #[error("Data error: {0}")]
    Data(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using CracError.
pub type CracResult<T> = Result<T, CracError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for CracError {
    fn from(err: anyhow::Error) -> Self {
        CracError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for CracError {
    fn from(s: String) -> Self {
        CracError::Other(s)
    }
}

impl From<&str> for CracError {
    fn from(s: &str) -> Self {
        CracError::Other(s.to_string())
    }
}

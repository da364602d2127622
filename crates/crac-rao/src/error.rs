//! Evaluation-specific errors.

use crac_core::CracError;
use thiserror::Error;

/// Errors raised while configuring or running the objective function.
#[derive(Error, Debug)]
pub enum RaoError {
    /// The sensitivity computation behind the flow snapshot failed; costs
    /// must not be derived from its values.
    #[error("sensitivity computation failed, cost evaluation aborted")]
    SensitivityFailure,

    /// Invalid evaluator or objective-function configuration.
    #[error("objective configuration: {0}")]
    Config(String),

    /// Error bubbled up from the CRAC data model.
    #[error(transparent)]
    Crac(#[from] CracError),
}

/// Convenience type alias for Results using RaoError.
pub type RaoResult<T> = Result<T, RaoError>;

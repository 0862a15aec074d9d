//! Polynomial evaluation errors.

use td_core::TdError;
use thiserror::Error;

/// Result type for property evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Temperature outside the fitted range in strict mode.
    #[error("Temperature {t} K outside valid range {min}-{max} K")]
    OutOfRange { t: f64, min: f64, max: f64 },

    /// No interval covers the temperature: the species has no polynomial
    /// data, or the temperature falls in a gap between intervals.
    #[error("No temperature interval of {species} covers {t} K")]
    NoInterval { species: String, t: f64 },

    /// Non-positive or non-finite input, or a non-finite result.
    #[error("Non-physical value for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },
}

impl From<EvalError> for TdError {
    fn from(err: EvalError) -> Self {
        let what = err.to_string();
        match err {
            EvalError::OutOfRange { .. } => TdError::OutOfRange { what },
            EvalError::NoInterval { .. } => TdError::NotFound { what },
            EvalError::NonPhysical { .. } | EvalError::InvalidArg { .. } => {
                TdError::InvalidArg { what }
            }
        }
    }
}

use thiserror::Error;

pub type TdResult<T> = Result<T, TdError>;

/// Error kinds shared by every thermodata crate.
///
/// Crate-local errors (`td_inp::ParseError`, `td_poly::EvalError`, ...) carry
/// the detailed context and convert into this type at crate boundaries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TdError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Malformed source: {what}")]
    Source { what: String },

    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Out of range: {what}")]
    OutOfRange { what: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = TdError::NotFound {
            what: "species 'Xx'".to_string(),
        };
        assert_eq!(err.to_string(), "Not found: species 'Xx'");

        let err = TdError::NonFinite {
            what: "temperature",
            value: f64::INFINITY,
        };
        assert!(err.to_string().contains("temperature"));
    }
}

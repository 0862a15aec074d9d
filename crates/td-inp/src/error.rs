//! Database parsing and lookup errors.

use td_core::TdError;
use thiserror::Error;

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors that abort loading a database.
///
/// Every variant that comes from the text carries the 1-based line number of
/// the offending record. A load either succeeds completely or returns one of
/// these; there is no partially built database.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Empty or malformed input that never reaches species data.
    #[error("Source error{}: {what}", fmt_line(.line))]
    Source { line: Option<usize>, what: String },

    /// Record count of a species block disagrees with the input.
    #[error("Segmentation error at line {line}: {what}")]
    Segmentation { line: usize, what: String },

    /// A fixed-width field could not be decoded.
    #[error("Cannot decode {field} at line {line} ({what}): {raw:?}")]
    FieldDecode {
        field: &'static str,
        line: usize,
        raw: String,
        what: &'static str,
    },

    /// Section boundaries missing or out of order, or a duplicate name.
    #[error("Classification error{}: {what}", fmt_line(.line))]
    Classification { line: Option<usize>, what: String },

    /// Reading the database file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn fmt_line(line: &Option<usize>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

impl ParseError {
    /// Line number the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Source { line, .. } | ParseError::Classification { line, .. } => *line,
            ParseError::Segmentation { line, .. } | ParseError::FieldDecode { line, .. } => {
                Some(*line)
            }
            ParseError::Io(_) => None,
        }
    }
}

/// Errors local to a lookup call; the database stays valid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No category holds a species with this name.
    #[error("Species not found: {name}")]
    NotFound { name: String },
}

impl From<ParseError> for TdError {
    fn from(err: ParseError) -> Self {
        TdError::Source {
            what: err.to_string(),
        }
    }
}

impl From<LookupError> for TdError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound { name } => TdError::NotFound {
                what: format!("species '{name}'"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ParseError::FieldDecode {
            field: "molar mass",
            line: 12,
            raw: "   abc".into(),
            what: "not a number",
        };
        let msg = err.to_string();
        assert!(msg.contains("molar mass"));
        assert!(msg.contains("line 12"));
        assert!(msg.contains("abc"));

        let err = ParseError::Source {
            line: None,
            what: "empty input".into(),
        };
        assert_eq!(err.to_string(), "Source error: empty input");
    }

    #[test]
    fn line_accessor() {
        let err = ParseError::Segmentation {
            line: 7,
            what: "truncated".into(),
        };
        assert_eq!(err.line(), Some(7));
        let err = ParseError::Classification {
            line: None,
            what: "missing END REACTANTS".into(),
        };
        assert_eq!(err.line(), None);
    }

    #[test]
    fn error_to_td_error() {
        let err = LookupError::NotFound {
            name: "NoSuchSpecies".into(),
        };
        let td: TdError = err.into();
        assert!(matches!(td, TdError::NotFound { .. }));
        assert!(td.to_string().contains("NoSuchSpecies"));
    }
}

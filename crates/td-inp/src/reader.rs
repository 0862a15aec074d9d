//! Record Reader: fixed-width view over the database text.
//!
//! Every record handed downstream is exactly [`RECORD_WIDTH`] ASCII columns,
//! padded with blanks or truncated, so later stages can slice by column
//! without bounds checks. Nothing is trimmed or split.

use crate::error::{ParseError, ParseResult};
use std::iter::Enumerate;
use std::str::Lines;
use tracing::debug;

/// Width of every record in the database file.
pub const RECORD_WIDTH: usize = 80;

/// One fixed-width line of the source, tagged with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    number: usize,
    text: String,
}

impl Record {
    /// Build a record from raw text, padding or truncating to 80 columns.
    ///
    /// The caller guarantees `raw` is ASCII.
    pub(crate) fn new(number: usize, raw: &str) -> Self {
        let mut text: String = raw.chars().take(RECORD_WIDTH).collect();
        while text.len() < RECORD_WIDTH {
            text.push(' ');
        }
        Self { number, text }
    }

    /// 1-based line number in the source text.
    pub fn number(&self) -> usize {
        self.number
    }

    /// The full 80-column text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Columns `start..=end`, 1-based inclusive.
    pub fn columns(&self, start: usize, end: usize) -> &str {
        debug_assert!(start >= 1 && start <= end && end <= RECORD_WIDTH);
        &self.text[start - 1..end]
    }

    /// Character at a 1-based column.
    pub fn column(&self, col: usize) -> char {
        self.text.as_bytes()[col - 1] as char
    }

    /// Interior records of a multi-record species leave column 1 blank.
    pub fn is_continuation(&self) -> bool {
        self.column(1) == ' '
    }

    /// Record text without trailing blanks.
    pub fn trimmed(&self) -> &str {
        self.text.trim_end()
    }
}

/// File header: the `thermo` keyword line and the global temperature ranges.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Header {
    line: String,
    breakpoints: Vec<f64>,
    date_code: String,
}

impl Header {
    fn parse(line: &str) -> Self {
        let mut breakpoints = Vec::new();
        let mut rest = Vec::new();
        for token in line.split_whitespace() {
            match token.parse::<f64>() {
                Ok(v) if rest.is_empty() => breakpoints.push(v),
                _ => rest.push(token),
            }
        }
        Self {
            line: line.trim_end().to_string(),
            breakpoints,
            date_code: rest.join(" "),
        }
    }

    /// The range line as it appeared in the source (trailing blanks removed).
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Default temperature breakpoints in kelvin, e.g. `[200, 1000, 6000, 20000]`.
    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    /// Date the database was assembled, as written (`9/09/04`).
    pub fn date_code(&self) -> &str {
        &self.date_code
    }
}

/// Leading `!` marks a comment record anywhere in the file.
fn is_ignorable(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('!')
}

fn is_thermo_keyword(line: &str) -> bool {
    line.trim_end().eq_ignore_ascii_case("thermo")
}

/// Lazy iterator of fixed-width body records.
///
/// Construction consumes the optional header and fails if no body follows;
/// iteration yields one [`Record`] per significant line. The iterator stops
/// after the first error.
pub struct RecordReader<'a> {
    lines: Enumerate<Lines<'a>>,
    header: Option<Header>,
    failed: bool,
}

impl<'a> RecordReader<'a> {
    pub fn new(text: &'a str) -> ParseResult<Self> {
        if text.trim().is_empty() {
            return Err(ParseError::Source {
                line: None,
                what: "input is empty".to_string(),
            });
        }

        let mut lines = text.lines().enumerate();
        let mut header = None;

        // Skip leading comments; a `thermo` keyword introduces the range line.
        let mut ahead = lines.clone();
        while let Some((idx, line)) = ahead.next() {
            if is_ignorable(line) {
                lines = ahead.clone();
                continue;
            }
            if is_thermo_keyword(line) {
                let range_line = ahead.by_ref().find(|(_, l)| !is_ignorable(l));
                match range_line {
                    Some((_, range)) => header = Some(Header::parse(range)),
                    None => {
                        return Err(ParseError::Source {
                            line: Some(idx + 1),
                            what: "'thermo' keyword is not followed by a temperature range line"
                                .to_string(),
                        });
                    }
                }
                lines = ahead;
            }
            break;
        }

        if !lines.clone().any(|(_, l)| !is_ignorable(l)) {
            return Err(ParseError::Source {
                line: None,
                what: "no species body section".to_string(),
            });
        }

        if let Some(h) = &header {
            debug!(breakpoints = ?h.breakpoints(), date = h.date_code(), "read database header");
        }

        Ok(Self {
            lines,
            header,
            failed: false,
        })
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }
}

impl Iterator for RecordReader<'_> {
    type Item = ParseResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for (idx, line) in self.lines.by_ref() {
            let number = idx + 1;
            if is_ignorable(line) {
                continue;
            }
            if !line.is_ascii() {
                self.failed = true;
                return Some(Err(ParseError::Source {
                    line: Some(number),
                    what: "record contains non-ASCII characters".to_string(),
                }));
            }
            if line.contains('\t') {
                self.failed = true;
                return Some(Err(ParseError::Source {
                    line: Some(number),
                    what: "tab character breaks fixed column positions".to_string(),
                }));
            }
            return Some(Ok(Record::new(number, line)));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_lines_and_truncates_long_ones() {
        let short = Record::new(1, "H2");
        assert_eq!(short.text().len(), RECORD_WIDTH);
        assert_eq!(short.columns(1, 2), "H2");
        assert_eq!(short.column(80), ' ');

        let long = "x".repeat(95);
        let rec = Record::new(2, &long);
        assert_eq!(rec.text().len(), RECORD_WIDTH);
    }

    #[test]
    fn preserves_column_positions() {
        let rec = Record::new(5, " 3 tpis78 H   2.00");
        assert!(rec.is_continuation());
        assert_eq!(rec.column(2), '3');
        assert_eq!(rec.columns(4, 9), "tpis78");
        assert_eq!(rec.trimmed(), " 3 tpis78 H   2.00");
    }

    #[test]
    fn reads_header_and_body() {
        let text = "! comment\nthermo\n    200.000  1000.000  6000.000 20000.000   9/09/04\nH2   x\n 0 abc\n";
        let reader = RecordReader::new(text).unwrap();
        let header = reader.header().cloned().unwrap();
        assert_eq!(header.breakpoints(), &[200.0, 1000.0, 6000.0, 20000.0]);
        assert_eq!(header.date_code(), "9/09/04");

        let records: Vec<_> = reader.map(Result::unwrap).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].number(), 4);
        assert_eq!(records[1].number(), 5);
        assert_eq!(records[0].columns(1, 2), "H2");
    }

    #[test]
    fn header_is_optional() {
        let reader = RecordReader::new("Ar  x\n 0 g\n").unwrap();
        assert!(reader.header().is_none());
        assert_eq!(reader.count(), 2);
    }

    #[test]
    fn empty_input_is_source_error() {
        assert!(matches!(
            RecordReader::new(""),
            Err(ParseError::Source { .. })
        ));
        assert!(matches!(
            RecordReader::new("   \n\n"),
            Err(ParseError::Source { .. })
        ));
    }

    #[test]
    fn header_without_body_is_source_error() {
        let text = "thermo\n    200.000  1000.000   9/09/04\n! nothing else\n";
        let err = RecordReader::new(text).err().unwrap();
        assert!(err.to_string().contains("no species body"));
    }

    #[test]
    fn non_ascii_record_is_rejected_with_line() {
        let text = "H2   ok\n 0 caf\u{e9}\n";
        let mut reader = RecordReader::new(text).unwrap();
        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert!(reader.next().is_none());
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let reader = RecordReader::new("H2   x\r\n 0 abc\r\n").unwrap();
        let records: Vec<_> = reader.map(Result::unwrap).collect();
        assert_eq!(records[1].columns(1, 6), " 0 abc");
    }
}

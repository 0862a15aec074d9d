//! Declarative column layout of a species block.
//!
//! Every fixed-width field is described once here as a [`FieldSpec`]. The
//! decoder slices and parses records with [`FieldSpec::decode`]; the encoder
//! formats values back with [`FieldSpec::encode`]. Column numbers are 1-based
//! and inclusive, as in the Fortran format statements that define the file.

use crate::error::{ParseError, ParseResult};
use crate::reader::Record;

/// How the characters of a field are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, right-trimmed.
    Text,
    /// Signed integer (`I` edit descriptor).
    Integer,
    /// Fixed-point real (`F` edit descriptor). `implied` decimals apply when
    /// the field carries no `.`; `written` is the precision used on output.
    Fixed { implied: u8, written: u8 },
    /// Real with a `D` or `E` exponent (`D` edit descriptor).
    Exponent { implied: u8 },
}

/// Treatment of an all-blank field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blank {
    Reject,
    Zero,
}

/// A decoded field value.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Real(f64),
}

/// One fixed-width field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Position of the record within its layout: 1 and 2 for the species
    /// header records, 3 to 5 for the records of each interval.
    pub record: u8,
    pub start: usize,
    pub end: usize,
    pub kind: FieldKind,
    pub blank: Blank,
}

const fn field(
    name: &'static str,
    record: u8,
    start: usize,
    end: usize,
    kind: FieldKind,
    blank: Blank,
) -> FieldSpec {
    FieldSpec {
        name,
        record,
        start,
        end,
        kind,
        blank,
    }
}

const TEXT: FieldKind = FieldKind::Text;
const INT: FieldKind = FieldKind::Integer;
const D16_8: FieldKind = FieldKind::Exponent { implied: 8 };
const F11_3: FieldKind = FieldKind::Fixed {
    implied: 3,
    written: 3,
};
const F15_3: FieldKind = FieldKind::Fixed {
    implied: 3,
    written: 3,
};
const F6_2: FieldKind = FieldKind::Fixed {
    implied: 2,
    written: 2,
};
const F5_1: FieldKind = FieldKind::Fixed {
    implied: 1,
    written: 1,
};

// Record 1
pub const NAME: FieldSpec = field("name", 1, 1, 15, TEXT, Blank::Reject);
pub const COMMENT: FieldSpec = field("comment", 1, 16, 80, TEXT, Blank::Zero);

// Record 2
pub const INTERVAL_COUNT: FieldSpec = field("interval count", 2, 2, 2, INT, Blank::Reject);
pub const REFERENCE_CODE: FieldSpec = field("reference code", 2, 4, 9, TEXT, Blank::Zero);

pub const FORMULA_ELEMENTS: [FieldSpec; 5] = [
    field("formula element 1", 2, 11, 12, TEXT, Blank::Zero),
    field("formula element 2", 2, 19, 20, TEXT, Blank::Zero),
    field("formula element 3", 2, 27, 28, TEXT, Blank::Zero),
    field("formula element 4", 2, 35, 36, TEXT, Blank::Zero),
    field("formula element 5", 2, 43, 44, TEXT, Blank::Zero),
];

pub const FORMULA_COUNTS: [FieldSpec; 5] = [
    field("formula count 1", 2, 13, 18, F6_2, Blank::Zero),
    field("formula count 2", 2, 21, 26, F6_2, Blank::Zero),
    field("formula count 3", 2, 29, 34, F6_2, Blank::Zero),
    field("formula count 4", 2, 37, 42, F6_2, Blank::Zero),
    field("formula count 5", 2, 45, 50, F6_2, Blank::Zero),
];

pub const PHASE: FieldSpec = field("phase flag", 2, 52, 52, INT, Blank::Reject);
pub const MOLAR_MASS: FieldSpec = field(
    "molar mass",
    2,
    53,
    65,
    FieldKind::Fixed {
        implied: 5,
        written: 7,
    },
    Blank::Reject,
);
pub const HEAT_OF_FORMATION: FieldSpec =
    field("heat of formation", 2, 66, 80, F15_3, Blank::Reject);

// Record 3 of each interval
pub const T_MIN: FieldSpec = field("interval lower bound", 3, 1, 11, F11_3, Blank::Reject);
pub const T_MAX: FieldSpec = field("interval upper bound", 3, 12, 22, F11_3, Blank::Reject);
pub const COEFFICIENT_COUNT: FieldSpec =
    field("coefficient count", 3, 23, 23, INT, Blank::Reject);

pub const EXPONENTS: [FieldSpec; 8] = [
    field("exponent 1", 3, 24, 28, F5_1, Blank::Reject),
    field("exponent 2", 3, 29, 33, F5_1, Blank::Reject),
    field("exponent 3", 3, 34, 38, F5_1, Blank::Reject),
    field("exponent 4", 3, 39, 43, F5_1, Blank::Reject),
    field("exponent 5", 3, 44, 48, F5_1, Blank::Reject),
    field("exponent 6", 3, 49, 53, F5_1, Blank::Reject),
    field("exponent 7", 3, 54, 58, F5_1, Blank::Reject),
    field("exponent 8", 3, 59, 63, F5_1, Blank::Zero),
];

pub const H298_MINUS_H0: FieldSpec = field("H(298.15)-H(0)", 3, 66, 80, F15_3, Blank::Zero);

// Records 4 and 5 of each interval
pub const COEFFICIENTS: [FieldSpec; 8] = [
    field("coefficient 1", 4, 1, 16, D16_8, Blank::Reject),
    field("coefficient 2", 4, 17, 32, D16_8, Blank::Reject),
    field("coefficient 3", 4, 33, 48, D16_8, Blank::Reject),
    field("coefficient 4", 4, 49, 64, D16_8, Blank::Reject),
    field("coefficient 5", 4, 65, 80, D16_8, Blank::Reject),
    field("coefficient 6", 5, 1, 16, D16_8, Blank::Reject),
    field("coefficient 7", 5, 17, 32, D16_8, Blank::Reject),
    field("coefficient 8", 5, 33, 48, D16_8, Blank::Zero),
];

pub const INTEGRATION_CONSTANTS: [FieldSpec; 2] = [
    field("integration constant b1", 5, 49, 64, D16_8, Blank::Reject),
    field("integration constant b2", 5, 65, 80, D16_8, Blank::Reject),
];

/// Third record of a species with no intervals.
pub const REFERENCE_TEMPERATURE: FieldSpec =
    field("reference temperature", 3, 1, 11, F11_3, Blank::Reject);

/// Every field of a regular species block, in column order per record.
pub const TABLE: &[FieldSpec] = &[
    NAME,
    COMMENT,
    INTERVAL_COUNT,
    REFERENCE_CODE,
    FORMULA_ELEMENTS[0],
    FORMULA_COUNTS[0],
    FORMULA_ELEMENTS[1],
    FORMULA_COUNTS[1],
    FORMULA_ELEMENTS[2],
    FORMULA_COUNTS[2],
    FORMULA_ELEMENTS[3],
    FORMULA_COUNTS[3],
    FORMULA_ELEMENTS[4],
    FORMULA_COUNTS[4],
    PHASE,
    MOLAR_MASS,
    HEAT_OF_FORMATION,
    T_MIN,
    T_MAX,
    COEFFICIENT_COUNT,
    EXPONENTS[0],
    EXPONENTS[1],
    EXPONENTS[2],
    EXPONENTS[3],
    EXPONENTS[4],
    EXPONENTS[5],
    EXPONENTS[6],
    EXPONENTS[7],
    H298_MINUS_H0,
    COEFFICIENTS[0],
    COEFFICIENTS[1],
    COEFFICIENTS[2],
    COEFFICIENTS[3],
    COEFFICIENTS[4],
    COEFFICIENTS[5],
    COEFFICIENTS[6],
    COEFFICIENTS[7],
    INTEGRATION_CONSTANTS[0],
    INTEGRATION_CONSTANTS[1],
];

impl FieldSpec {
    pub const fn width(&self) -> usize {
        self.end - self.start + 1
    }

    fn error(&self, record: &Record, what: &'static str) -> ParseError {
        ParseError::FieldDecode {
            field: self.name,
            line: record.number(),
            raw: record.columns(self.start, self.end).to_string(),
            what,
        }
    }

    /// Slice this field out of `record` and parse it according to its kind.
    pub fn decode(&self, record: &Record) -> ParseResult<FieldValue> {
        let raw = record.columns(self.start, self.end);
        let trimmed = raw.trim();

        if trimmed.is_empty() && self.kind != FieldKind::Text {
            return match self.blank {
                Blank::Zero => Ok(match self.kind {
                    FieldKind::Integer => FieldValue::Integer(0),
                    _ => FieldValue::Real(0.0),
                }),
                Blank::Reject => Err(self.error(record, "blank required field")),
            };
        }

        match self.kind {
            FieldKind::Text => {
                if trimmed.is_empty() && self.blank == Blank::Reject {
                    return Err(self.error(record, "blank required field"));
                }
                Ok(FieldValue::Text(raw.trim_end().to_string()))
            }
            FieldKind::Integer => trimmed
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| self.error(record, "not an integer")),
            FieldKind::Fixed { implied, .. } | FieldKind::Exponent { implied } => {
                parse_fortran_real(trimmed, implied)
                    .map(FieldValue::Real)
                    .map_err(|what| self.error(record, what))
            }
        }
    }

    pub fn text(&self, record: &Record) -> ParseResult<String> {
        match self.decode(record)? {
            FieldValue::Text(s) => Ok(s),
            _ => Err(self.error(record, "field is not text")),
        }
    }

    pub fn integer(&self, record: &Record) -> ParseResult<i64> {
        match self.decode(record)? {
            FieldValue::Integer(i) => Ok(i),
            _ => Err(self.error(record, "field is not an integer")),
        }
    }

    pub fn real(&self, record: &Record) -> ParseResult<f64> {
        match self.decode(record)? {
            FieldValue::Real(v) => Ok(v),
            _ => Err(self.error(record, "field is not a real number")),
        }
    }

    /// Format `value` into exactly [`width`](Self::width) columns.
    ///
    /// Reals are written with the field's nominal precision, widened when
    /// that would lose digits of the stored value. A value that cannot fit
    /// is written as asterisks, like a Fortran `WRITE`.
    pub fn encode(&self, value: &FieldValue) -> String {
        let width = self.width();
        match value {
            FieldValue::Text(s) => {
                let s: String = s.chars().take(width).collect();
                format!("{s:<width$}")
            }
            FieldValue::Integer(i) => fit(i.to_string(), width),
            FieldValue::Real(v) => match self.kind {
                FieldKind::Exponent { .. } => fit(exponent_field(*v), width),
                FieldKind::Fixed { written, .. } => fixed_field(*v, width, written as usize),
                FieldKind::Text | FieldKind::Integer => fit(v.to_string(), width),
            },
        }
    }

    /// All blanks, the way an absent optional slot is written.
    pub fn blank(&self) -> String {
        " ".repeat(self.width())
    }
}

fn fit(s: String, width: usize) -> String {
    if s.len() > width {
        "*".repeat(width)
    } else {
        format!("{s:>width$}")
    }
}

/// `0.41959` → `.41959` when the leading zero does not fit.
fn drop_leading_zero(s: &str) -> String {
    if let Some(rest) = s.strip_prefix("-0.") {
        format!("-.{rest}")
    } else if let Some(rest) = s.strip_prefix("0.") {
        format!(".{rest}")
    } else {
        s.to_string()
    }
}

fn fixed_field(v: f64, width: usize, written: usize) -> String {
    let mut fallback = None;
    for decimals in written..=15 {
        let mut s = format!("{v:.decimals$}");
        if s.len() > width {
            s = drop_leading_zero(&s);
        }
        if s.len() > width {
            break;
        }
        if s.parse::<f64>() == Ok(v) {
            return format!("{s:>width$}");
        }
        fallback.get_or_insert(s);
    }
    match fallback {
        Some(s) => format!("{s:>width$}"),
        None => "*".repeat(width),
    }
}

/// Fortran `D16.8`-style output: ` 4.078323210D+04`.
fn exponent_field(v: f64) -> String {
    let formatted = format!("{v:.9e}");
    let (mantissa, exp) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    let lead = if mantissa.starts_with('-') { "" } else { " " };
    if exp.abs() >= 100 {
        format!("{lead}{mantissa}{sign}{:03}", exp.abs())
    } else {
        format!("{lead}{mantissa}D{sign}{:02}", exp.abs())
    }
}

/// `-20` with one implied decimal becomes `-2.0`.
fn insert_implied_point(mantissa: &str, implied: usize) -> String {
    let (sign, digits) = match mantissa.strip_prefix(['+', '-']) {
        Some(rest) => (&mantissa[..1], rest),
        None => ("", mantissa),
    };
    let padded = format!("{digits:0>width$}", width = implied + 1);
    let split = padded.len() - implied;
    format!("{sign}{}.{}", &padded[..split], &padded[split..])
}

/// Parse a trimmed, non-blank Fortran real.
///
/// Accepts `D`/`d` as the exponent letter and the letterless form
/// `1.234-05`. Without a decimal point, the last `implied` mantissa digits are
/// fractional.
pub fn parse_fortran_real(s: &str, implied: u8) -> Result<f64, &'static str> {
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E' | 'd' | 'D'))
    {
        return Err("not a number");
    }

    let normalized = s.replace(['d', 'D', 'e'], "E");
    let (mantissa, exponent) = match normalized.find('E') {
        Some(pos) => (&normalized[..pos], Some(&normalized[pos + 1..])),
        // `1.234-05`: a sign after the first character starts the exponent.
        None => match normalized[1..].find(['+', '-']) {
            Some(pos) => (&normalized[..pos + 1], Some(&normalized[pos + 1..])),
            None => (normalized.as_str(), None),
        },
    };

    if !mantissa.chars().any(|c| c.is_ascii_digit()) {
        return Err("no digits in mantissa");
    }

    let mantissa = if mantissa.contains('.') || implied == 0 {
        mantissa.to_string()
    } else {
        insert_implied_point(mantissa, usize::from(implied))
    };
    let literal = match exponent {
        Some(exp) => {
            let exp: i32 = exp.parse().map_err(|_| "malformed exponent")?;
            format!("{mantissa}E{exp}")
        }
        None => mantissa,
    };
    let value: f64 = literal.parse().map_err(|_| "not a number")?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err("value out of range")
    }
}

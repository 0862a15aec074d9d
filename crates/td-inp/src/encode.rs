//! Fixed-column writer: the inverse of the Field Decoder.
//!
//! Records are laid out with the same [`columns`] table the decoder reads, so
//! a written file decodes back to the same values.

use crate::columns::{self, FieldSpec, FieldValue};
use crate::config::SectionMarkers;
use crate::database::{Category, Database};
use crate::reader::RECORD_WIDTH;
use crate::species::{SpeciesRecord, TERMS, TemperatureInterval};

/// Range line written when the database carries no header of its own.
pub const DEFAULT_RANGE_LINE: &str = "    200.000  1000.000  6000.000 20000.000   9/09/04";

/// One record under construction, blank-filled to 80 columns.
struct Line(Vec<u8>);

impl Line {
    fn new() -> Self {
        Line(vec![b' '; RECORD_WIDTH])
    }

    fn put(&mut self, spec: &FieldSpec, value: FieldValue) -> &mut Self {
        self.put_raw(spec, &spec.encode(&value))
    }

    fn put_raw(&mut self, spec: &FieldSpec, text: &str) -> &mut Self {
        debug_assert_eq!(text.len(), spec.width(), "{}", spec.name);
        self.0[spec.start - 1..spec.end].copy_from_slice(text.as_bytes());
        self
    }

    fn finish(&self) -> String {
        String::from_utf8_lossy(&self.0).trim_end().to_string()
    }
}

fn text(s: &str) -> FieldValue {
    FieldValue::Text(s.to_string())
}

fn interval_records(interval: &TemperatureInterval) -> [String; 3] {
    let bounds = interval.bounds();

    let mut head = Line::new();
    head.put(&columns::T_MIN, FieldValue::Real(bounds.min))
        .put(&columns::T_MAX, FieldValue::Real(bounds.max))
        .put(&columns::COEFFICIENT_COUNT, FieldValue::Integer(TERMS as i64));
    for (spec, e) in columns::EXPONENTS.iter().zip(interval.exponents()) {
        head.put(spec, FieldValue::Real(*e));
    }
    head.put(&columns::EXPONENTS[TERMS], FieldValue::Real(0.0))
        .put(
            &columns::H298_MINUS_H0,
            FieldValue::Real(interval.h298_minus_h0()),
        );

    let mut first = Line::new();
    let mut second = Line::new();
    for (spec, a) in columns::COEFFICIENTS.iter().zip(interval.coefficients()) {
        let line = if spec.record == 4 {
            &mut first
        } else {
            &mut second
        };
        line.put(spec, FieldValue::Real(*a));
    }
    let eighth = &columns::COEFFICIENTS[TERMS];
    second.put_raw(eighth, &eighth.blank());
    for (spec, b) in columns::INTEGRATION_CONSTANTS
        .iter()
        .zip(interval.integration_constants())
    {
        second.put(spec, FieldValue::Real(*b));
    }

    [head.finish(), first.finish(), second.finish()]
}

/// Records of one species, without line terminators or trailing blanks.
pub fn encode_species(record: &SpeciesRecord) -> Vec<String> {
    let mut name = Line::new();
    name.put(&columns::NAME, text(record.name()))
        .put(&columns::COMMENT, text(record.raw_comment()));

    let mut body = Line::new();
    body.put(
        &columns::INTERVAL_COUNT,
        FieldValue::Integer(record.intervals().len() as i64),
    )
    .put(&columns::REFERENCE_CODE, text(record.reference_code()));
    for (i, (element_spec, count_spec)) in columns::FORMULA_ELEMENTS
        .iter()
        .zip(columns::FORMULA_COUNTS.iter())
        .enumerate()
    {
        let (element, count) = record
            .formula()
            .get(i)
            .map_or(("", 0.0), |t| (t.element.as_str(), t.count));
        body.put(element_spec, text(element))
            .put(count_spec, FieldValue::Real(count));
    }
    body.put(&columns::PHASE, FieldValue::Integer(record.phase_flag()))
        .put(&columns::MOLAR_MASS, FieldValue::Real(record.molar_mass()))
        .put(
            &columns::HEAT_OF_FORMATION,
            FieldValue::Real(record.heat_of_formation()),
        );

    let mut lines = vec![name.finish(), body.finish()];
    for interval in record.intervals() {
        lines.extend(interval_records(interval));
    }
    if let Some(t) = record.reference_temperature() {
        let mut reference = Line::new();
        reference.put(&columns::REFERENCE_TEMPERATURE, FieldValue::Real(t));
        lines.push(reference.finish());
    }
    lines
}

/// Write a complete, re-parseable database file.
///
/// Sections are written in file order with their sentinels. Parse the result
/// with [`SectionMarkers::positional`] when the condensed section does not
/// start with the default marker species.
pub fn write_database(db: &Database) -> String {
    write_database_with(db, &SectionMarkers::default())
}

pub fn write_database_with(db: &Database, markers: &SectionMarkers) -> String {
    let mut out = String::new();
    let mut push = |line: &str| {
        out.push_str(line);
        out.push('\n');
    };

    push("thermo");
    push(db.header().map_or(DEFAULT_RANGE_LINE, |h| h.line()));

    for category in Category::ALL {
        for sp in db.category(category) {
            for line in encode_species(sp) {
                push(&line);
            }
        }
        match category {
            Category::GasProducts => {}
            Category::CondensedProducts => push(&markers.end_products),
            Category::Reactants => push(&markers.end_reactants),
        }
    }
    out
}

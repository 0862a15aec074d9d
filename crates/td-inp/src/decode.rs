//! Field Decoder: turns a species block into a [`SpeciesRecord`].

use crate::columns::{self, FieldSpec};
use crate::error::{ParseError, ParseResult};
use crate::reader::Record;
use crate::segment::{MAX_INTERVALS, RECORDS_PER_INTERVAL, SpeciesBlock};
use crate::species::{
    FormulaTerm, Phase, SpeciesRecord, TERMS, TemperatureBounds, TemperatureInterval,
};
use tracing::{trace, warn};

fn invalid(spec: &FieldSpec, record: &Record, what: &'static str) -> ParseError {
    ParseError::FieldDecode {
        field: spec.name,
        line: record.number(),
        raw: record.columns(spec.start, spec.end).to_string(),
        what,
    }
}

/// Leading text of comments that may start right at column 16.
const COMMENT_MARKERS: [&str; 8] = [
    "Ref-", "Hf:", "HF:", "Mole%", "TPIS", "JANAF", "Gurvich", "Burcat",
];

fn decode_name(record: &Record) -> ParseResult<String> {
    let name = columns::NAME.text(record)?;
    // A name filling all 15 columns that runs straight into the comment
    // field has overflowed, unless a known comment marker starts there.
    let tail = record.columns(columns::COMMENT.start, columns::COMMENT.end);
    let glued = record.column(columns::NAME.end) != ' ' && !tail.starts_with(' ');
    if glued && !COMMENT_MARKERS.iter().any(|m| tail.starts_with(m)) {
        return Err(ParseError::FieldDecode {
            field: columns::NAME.name,
            line: record.number(),
            raw: record.columns(1, 18).trim_end().to_string(),
            what: "name overflows its 15 columns",
        });
    }
    Ok(name)
}

fn decode_formula(record: &Record) -> ParseResult<Vec<FormulaTerm>> {
    let mut formula = Vec::new();
    for (element_spec, count_spec) in columns::FORMULA_ELEMENTS
        .iter()
        .zip(columns::FORMULA_COUNTS.iter())
    {
        let element = element_spec.text(record)?;
        let count = count_spec.real(record)?;
        let element = element.trim();
        if element.is_empty() {
            if count != 0.0 {
                return Err(invalid(count_spec, record, "atom count without an element"));
            }
            continue;
        }
        formula.push(FormulaTerm {
            element: element.to_string(),
            count,
        });
    }
    Ok(formula)
}

fn decode_interval(records: &[Record]) -> ParseResult<TemperatureInterval> {
    let [head, first, second] = records else {
        return Err(ParseError::Segmentation {
            line: records.first().map_or(0, Record::number),
            what: "incomplete temperature interval".to_string(),
        });
    };

    let min = columns::T_MIN.real(head)?;
    let max = columns::T_MAX.real(head)?;
    if min >= max {
        return Err(invalid(
            &columns::T_MAX,
            head,
            "interval upper bound does not exceed lower bound",
        ));
    }

    if columns::COEFFICIENT_COUNT.integer(head)? != TERMS as i64 {
        return Err(invalid(
            &columns::COEFFICIENT_COUNT,
            head,
            "coefficient count must be 7",
        ));
    }

    let mut exponents = [0.0; TERMS];
    for (slot, spec) in exponents.iter_mut().zip(&columns::EXPONENTS) {
        *slot = spec.real(head)?;
    }
    let h298_minus_h0 = columns::H298_MINUS_H0.real(head)?;

    let mut coefficients = [0.0; TERMS];
    for (slot, spec) in coefficients.iter_mut().zip(&columns::COEFFICIENTS) {
        let record = if spec.record == 4 { first } else { second };
        *slot = spec.real(record)?;
    }
    // The eighth slot is never used by the published data; still read it so a
    // malformed value is reported instead of silently ignored.
    let eighth = columns::COEFFICIENTS[TERMS].real(second)?;
    if eighth != 0.0 {
        warn!(
            line = second.number(),
            value = eighth,
            "eighth coefficient slot is not empty and will be dropped"
        );
    }

    let integration_constants = [
        columns::INTEGRATION_CONSTANTS[0].real(second)?,
        columns::INTEGRATION_CONSTANTS[1].real(second)?,
    ];

    TemperatureInterval::new(
        TemperatureBounds { min, max },
        exponents,
        coefficients,
        integration_constants,
        h298_minus_h0,
    )
    .map_err(|_| invalid(&columns::T_MIN, head, "non-finite interval data"))
}

/// Decode every field of one species block.
pub fn decode_species(block: &SpeciesBlock) -> ParseResult<SpeciesRecord> {
    let records = block.records();
    let (head, body) = (&records[0], &records[1]);

    let name = decode_name(head)?;
    let comment = columns::COMMENT.text(head)?;
    let reference_code = columns::REFERENCE_CODE.text(body)?.trim().to_string();
    let formula = decode_formula(body)?;

    let phase_flag = columns::PHASE.integer(body)?;
    let molar_mass = columns::MOLAR_MASS.real(body)?;
    if molar_mass <= 0.0 {
        return Err(invalid(&columns::MOLAR_MASS, body, "molar mass must be positive"));
    }
    let heat_of_formation = columns::HEAT_OF_FORMATION.real(body)?;

    let count = block.interval_count();
    if Phase::from_flag(phase_flag) == Phase::Gas && count > MAX_INTERVALS {
        return Err(invalid(
            &columns::INTERVAL_COUNT,
            body,
            "gas species has more than 3 intervals",
        ));
    }

    let mut intervals = Vec::with_capacity(count);
    for chunk in records[2..].chunks_exact(RECORDS_PER_INTERVAL) {
        intervals.push(decode_interval(chunk)?);
    }

    let reference_temperature = match block.reference_record() {
        Some(record) => Some(columns::REFERENCE_TEMPERATURE.real(record)?),
        None => None,
    };

    trace!(name = %name, intervals = intervals.len(), line = block.first_line(), "decoded species");

    Ok(SpeciesRecord {
        name,
        comment,
        reference_code,
        formula,
        phase_flag,
        molar_mass,
        heat_of_formation,
        reference_temperature,
        intervals,
    })
}

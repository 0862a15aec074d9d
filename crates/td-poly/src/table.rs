//! Tabulated properties of one species over a list of temperatures.

use crate::error::EvalResult;
use crate::nasa7::EvalMode;
use crate::species::evaluate_species;
use crate::sweeps::TemperatureSweep;
use std::fmt;
use td_core::units::k;
use td_inp::SpeciesRecord;

const HEADER: [&str; 5] = ["T", "Cp", "H-H298", "S", "H"];
const UNITS: [&str; 5] = ["K", "J/mol-K", "kJ/mol", "J/mol-K", "kJ/mol"];

/// One row of a [`PropertyTable`], molar units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PropertyRow {
    /// [K]
    pub t_k: f64,
    /// [J/(mol·K)]
    pub cp: f64,
    /// H(T) − H(298.15) [kJ/mol]
    pub h_minus_h298: f64,
    /// [J/(mol·K)]
    pub s: f64,
    /// [kJ/mol]
    pub h: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PropertyTable {
    pub species: String,
    pub rows: Vec<PropertyRow>,
}

impl PropertyTable {
    /// Evaluate `record` at each temperature [K], in the given order.
    ///
    /// Any failing temperature fails the whole table.
    pub fn new(
        record: &SpeciesRecord,
        temperatures: &[f64],
        mode: EvalMode,
    ) -> EvalResult<Self> {
        let rows = temperatures
            .iter()
            .map(|&t_k| {
                let props = evaluate_species(record, k(t_k), mode)?;
                Ok(PropertyRow {
                    t_k,
                    cp: props.cp(),
                    h_minus_h298: props.h_minus_h298() / 1000.0,
                    s: props.s(),
                    h: props.h() / 1000.0,
                })
            })
            .collect::<EvalResult<Vec<_>>>()?;
        Ok(Self {
            species: record.name().to_string(),
            rows,
        })
    }

    pub fn from_sweep(
        record: &SpeciesRecord,
        sweep: &TemperatureSweep,
        mode: EvalMode,
    ) -> EvalResult<Self> {
        Self::new(record, &sweep.points(), mode)
    }

    /// Fixed-width text layout: header, units, a rule, then one line per row.
    pub fn formatted(&self) -> String {
        let header: String = HEADER.iter().map(|h| format!("{h:>10}")).collect();
        let units: String = UNITS.iter().map(|u| format!("{u:>10}")).collect();
        let rule = "-".repeat(header.len());

        let mut lines = vec![header, units, rule];
        for row in &self.rows {
            let mut line = format!("  {:<8}", row.t_k);
            for v in [row.cp, row.h_minus_h298, row.s, row.h] {
                line.push_str(&cell(v));
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

fn cell(v: f64) -> String {
    // A value that rounds to zero prints unsigned.
    format!("{v:>10.3}").replace("-0.000", " 0.000")
}

impl fmt::Display for PropertyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => write!(
                f,
                "Property table: T = {}-{} K, {} points (moles)",
                first.t_k,
                last.t_k,
                self.rows.len()
            ),
            _ => write!(f, "Property table: empty (moles)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_is_unsigned() {
        assert_eq!(cell(-0.0001), "     0.000");
        assert_eq!(cell(-0.0007), "    -0.001");
        assert_eq!(cell(12.5), "    12.500");
    }

    #[test]
    fn empty_table() {
        let table = PropertyTable {
            species: "Ar".to_string(),
            rows: Vec::new(),
        };
        assert_eq!(table.to_string(), "Property table: empty (moles)");
        assert_eq!(table.formatted().lines().count(), 3);
    }
}

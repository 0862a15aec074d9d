//! Species and temperature-interval data model.
//!
//! Values are immutable once built: fields are private and exposed through
//! accessors. A [`SpeciesRecord`] is only produced by decoding a species
//! block; a [`TemperatureInterval`] may also be built directly for evaluation.

use crate::refcode::RefCode;
use td_core::numeric::ensure_finite;
use td_core::{TdError, TdResult};

/// Number of polynomial terms kept per interval.
pub const TERMS: usize = 7;

/// Exponents of the NASA 7-term heat-capacity polynomial.
pub const CANONICAL_EXPONENTS: [f64; TERMS] = [-2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Phase {
    Gas,
    Condensed,
}

impl Phase {
    /// Phase from the record's phase flag; any non-zero flag is condensed.
    pub fn from_flag(flag: i64) -> Self {
        if flag == 0 { Phase::Gas } else { Phase::Condensed }
    }
}

/// One element of a species formula, e.g. `N 1.5617`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FormulaTerm {
    pub element: String,
    pub count: f64,
}

/// Closed temperature range [K].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TemperatureBounds {
    pub min: f64,
    pub max: f64,
}

impl TemperatureBounds {
    pub fn contains(&self, t: f64) -> bool {
        t >= self.min && t <= self.max
    }
}

/// Polynomial fit valid over one temperature range.
///
/// `Cp/R = Σ aᵢ·T^eᵢ`, with `b1` and `b2` the enthalpy and entropy
/// integration constants. Only the seven used terms are kept; the eighth
/// slot of the file format is always empty.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TemperatureInterval {
    bounds: TemperatureBounds,
    exponents: [f64; TERMS],
    coefficients: [f64; TERMS],
    integration_constants: [f64; 2],
    h298_minus_h0: f64,
}

impl TemperatureInterval {
    pub fn new(
        bounds: TemperatureBounds,
        exponents: [f64; TERMS],
        coefficients: [f64; TERMS],
        integration_constants: [f64; 2],
        h298_minus_h0: f64,
    ) -> TdResult<Self> {
        ensure_finite(bounds.min, "interval lower bound")?;
        ensure_finite(bounds.max, "interval upper bound")?;
        if bounds.min >= bounds.max {
            return Err(TdError::InvalidArg {
                what: format!(
                    "interval bounds must satisfy min < max, got {} .. {}",
                    bounds.min, bounds.max
                ),
            });
        }
        for v in exponents.iter().chain(&coefficients).chain(&integration_constants) {
            ensure_finite(*v, "polynomial term")?;
        }
        ensure_finite(h298_minus_h0, "H(298.15)-H(0)")?;

        Ok(Self {
            bounds,
            exponents,
            coefficients,
            integration_constants,
            h298_minus_h0,
        })
    }

    pub fn bounds(&self) -> TemperatureBounds {
        self.bounds
    }

    pub fn exponents(&self) -> &[f64; TERMS] {
        &self.exponents
    }

    pub fn coefficients(&self) -> &[f64; TERMS] {
        &self.coefficients
    }

    /// `[b1, b2]`: enthalpy and entropy integration constants.
    pub fn integration_constants(&self) -> &[f64; 2] {
        &self.integration_constants
    }

    /// H(298.15) − H(0) [J/mol].
    pub fn h298_minus_h0(&self) -> f64 {
        self.h298_minus_h0
    }

    pub fn has_canonical_exponents(&self) -> bool {
        self.exponents == CANONICAL_EXPONENTS
    }
}

/// One species of the database.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpeciesRecord {
    pub(crate) name: String,
    pub(crate) comment: String,
    pub(crate) reference_code: String,
    pub(crate) formula: Vec<FormulaTerm>,
    pub(crate) phase_flag: i64,
    /// [g/mol]
    pub(crate) molar_mass: f64,
    /// [J/mol]
    pub(crate) heat_of_formation: f64,
    pub(crate) reference_temperature: Option<f64>,
    pub(crate) intervals: Vec<TemperatureInterval>,
}

impl SpeciesRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Comment text with leading blanks removed.
    pub fn comment(&self) -> &str {
        self.comment.trim_start()
    }

    /// Comment exactly as written in columns 16–80, right-trimmed.
    pub fn raw_comment(&self) -> &str {
        &self.comment
    }

    pub fn reference_code(&self) -> &str {
        &self.reference_code
    }

    /// Interpreted reference-date code.
    pub fn reference(&self) -> RefCode {
        RefCode::parse(&self.reference_code)
    }

    pub fn formula(&self) -> &[FormulaTerm] {
        &self.formula
    }

    /// Formula in compact form, e.g. `C:10.00 H:16.00`.
    pub fn formula_string(&self) -> String {
        self.formula
            .iter()
            .map(|t| format!("{}:{:.2}", t.element, t.count))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn phase(&self) -> Phase {
        Phase::from_flag(self.phase_flag)
    }

    pub fn phase_flag(&self) -> i64 {
        self.phase_flag
    }

    /// Molar mass [g/mol], equal to kg/kmol.
    pub fn molar_mass(&self) -> f64 {
        self.molar_mass
    }

    /// Heat of formation at 298.15 K [J/mol].
    ///
    /// For species without intervals this field holds the assigned enthalpy
    /// instead; see [`assigned_enthalpy`](Self::assigned_enthalpy).
    pub fn heat_of_formation(&self) -> f64 {
        self.heat_of_formation
    }

    /// Assigned enthalpy [J/mol] of a species without polynomial data.
    pub fn assigned_enthalpy(&self) -> Option<f64> {
        self.intervals.is_empty().then_some(self.heat_of_formation)
    }

    /// Temperature [K] the assigned enthalpy refers to.
    pub fn reference_temperature(&self) -> Option<f64> {
        self.reference_temperature
    }

    pub fn intervals(&self) -> &[TemperatureInterval] {
        &self.intervals
    }

    /// Range covered from the first interval's lower bound to the last's upper.
    pub fn temperature_span(&self) -> Option<TemperatureBounds> {
        let first = self.intervals.first()?;
        let last = self.intervals.last()?;
        Some(TemperatureBounds {
            min: first.bounds.min,
            max: last.bounds.max,
        })
    }

    pub fn is_reference_element(&self) -> bool {
        self.comment.contains("Ref-Elm")
    }

    pub fn is_reference_species(&self) -> bool {
        self.comment.contains("Ref-Species")
    }

    /// Source cited for the heat of formation by an `Hf:<source>` marker.
    pub fn heat_of_formation_source(&self) -> Option<&str> {
        let start = self.comment.find("Hf:")? + 3;
        let rest = &self.comment[start..];
        let end = rest.find('.').unwrap_or(rest.len());
        let source = rest[..end].trim();
        (!source.is_empty()).then_some(source)
    }
}

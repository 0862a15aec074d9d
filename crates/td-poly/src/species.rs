//! Multi-interval evaluation of a database species.

use crate::error::{EvalError, EvalResult};
use crate::nasa7::{EvalMode, ThermoProps, check_temperature, evaluate};
use td_core::units::{
    MolarEnthalpy, MolarHeatCapacity, SpecEnthalpy, SpecHeatCapacity, Temperature,
    constants::R_MOLAR, g_per_mol, k, kelvin, kg_per_mol,
};
use td_inp::{SpeciesRecord, TemperatureInterval};
use tracing::debug;

/// Pick the interval used at `t_k`.
///
/// Intervals are scanned in ascending order and the first that contains the
/// temperature wins, so a shared boundary belongs to the lower interval.
pub fn select_interval(
    record: &SpeciesRecord,
    t_k: f64,
    mode: EvalMode,
) -> EvalResult<&TemperatureInterval> {
    let no_interval = || EvalError::NoInterval {
        species: record.name().to_string(),
        t: t_k,
    };
    let span = record.temperature_span().ok_or_else(no_interval)?;

    if !span.contains(t_k) {
        if mode == EvalMode::Strict {
            return Err(EvalError::OutOfRange {
                t: t_k,
                min: span.min,
                max: span.max,
            });
        }
        let nearest = if t_k < span.min {
            record.intervals().first()
        } else {
            record.intervals().last()
        };
        return nearest.ok_or_else(no_interval);
    }

    record
        .intervals()
        .iter()
        .find(|iv| iv.bounds().contains(t_k))
        .ok_or_else(no_interval)
}

/// Properties of one species at one temperature.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpeciesProps {
    pub name: String,
    pub molar: ThermoProps,
    /// [g/mol]
    pub molar_mass: f64,
    /// Heat of formation at 298.15 K [J/mol]
    pub heat_of_formation: f64,
}

impl SpeciesProps {
    pub fn temperature(&self) -> Temperature {
        k(self.molar.t_k)
    }

    pub fn extrapolated(&self) -> bool {
        self.molar.extrapolated
    }

    pub fn cp(&self) -> MolarHeatCapacity {
        self.molar.cp()
    }

    pub fn h(&self) -> MolarEnthalpy {
        self.molar.h()
    }

    pub fn s(&self) -> MolarHeatCapacity {
        self.molar.s()
    }

    pub fn g(&self) -> MolarEnthalpy {
        self.molar.g()
    }

    /// Sensible enthalpy H(T) − H(298.15) [J/mol].
    ///
    /// The assigned enthalpy at 298.15 K is the heat of formation.
    pub fn h_minus_h298(&self) -> MolarEnthalpy {
        self.h() - self.heat_of_formation
    }

    fn per_kg(&self, molar: f64) -> f64 {
        molar / kg_per_mol(g_per_mol(self.molar_mass))
    }

    pub fn cp_mass(&self) -> SpecHeatCapacity {
        self.per_kg(self.cp())
    }

    pub fn h_mass(&self) -> SpecEnthalpy {
        self.per_kg(self.h())
    }

    pub fn s_mass(&self) -> SpecHeatCapacity {
        self.per_kg(self.s())
    }

    /// Specific gas constant R/M [J/(kg·K)].
    pub fn gas_constant(&self) -> SpecHeatCapacity {
        self.per_kg(R_MOLAR)
    }
}

/// Evaluate a species at `t`, selecting the interval that covers it.
pub fn evaluate_species(
    record: &SpeciesRecord,
    t: Temperature,
    mode: EvalMode,
) -> EvalResult<SpeciesProps> {
    let t_k = check_temperature(kelvin(t))?;
    let interval = select_interval(record, t_k, mode)?;
    let molar = evaluate(interval, t, mode)?;
    if molar.extrapolated {
        let b = interval.bounds();
        debug!(
            species = record.name(),
            t_k,
            min = b.min,
            max = b.max,
            "extrapolating outside fitted range"
        );
    }

    Ok(SpeciesProps {
        name: record.name().to_string(),
        molar,
        molar_mass: record.molar_mass(),
        heat_of_formation: record.heat_of_formation(),
    })
}

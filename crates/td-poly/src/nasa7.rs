//! Single-interval polynomial evaluation.
//!
//! For an interval with coefficients `aᵢ`, exponents `eᵢ` and integration
//! constants `b1`, `b2`:
//!
//! ```text
//! Cp/R = Σ aᵢ·T^eᵢ
//! H/RT = (Σ aᵢ·∫T^eᵢ dT + b1) / T
//! S/R  = Σ aᵢ·∫T^(eᵢ−1) dT + b2
//! ```
//!
//! With the standard exponents `[-2, -1, 0, 1, 2, 3, 4]` these reduce to the
//! usual NASA 7-term forms.

use crate::error::{EvalError, EvalResult};
use td_core::numeric::pow_exponent;
use td_core::units::{
    MolarEnthalpy, MolarHeatCapacity, Temperature, constants::R_MOLAR, kelvin,
};
use td_inp::TemperatureInterval;

/// Handling of temperatures outside an interval's bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EvalMode {
    /// Reject with [`EvalError::OutOfRange`].
    #[default]
    Strict,
    /// Evaluate anyway and flag the result.
    Extrapolate,
}

/// Dimensionless standard-state properties at one temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ThermoProps {
    /// Temperature [K]
    pub t_k: f64,
    /// Cp/R
    pub cp_r: f64,
    /// H/(R·T)
    pub h_rt: f64,
    /// S/R
    pub s_r: f64,
    /// Evaluated outside the interval's bounds.
    pub extrapolated: bool,
}

impl ThermoProps {
    /// Molar heat capacity [J/(mol·K)].
    pub fn cp(&self) -> MolarHeatCapacity {
        self.cp_r * R_MOLAR
    }

    /// Molar enthalpy [J/mol].
    pub fn h(&self) -> MolarEnthalpy {
        self.h_rt * R_MOLAR * self.t_k
    }

    /// Molar entropy [J/(mol·K)].
    pub fn s(&self) -> MolarHeatCapacity {
        self.s_r * R_MOLAR
    }

    /// Molar Gibbs energy [J/mol].
    pub fn g(&self) -> MolarEnthalpy {
        self.h() - self.t_k * self.s()
    }
}

/// `∫T^e dT` without the constant.
#[inline]
fn enthalpy_term(t: f64, ln_t: f64, e: f64) -> f64 {
    if e == -1.0 {
        ln_t
    } else {
        pow_exponent(t, e + 1.0) / (e + 1.0)
    }
}

/// `∫T^(e-1) dT` without the constant.
#[inline]
fn entropy_term(t: f64, ln_t: f64, e: f64) -> f64 {
    if e == 0.0 {
        ln_t
    } else {
        pow_exponent(t, e) / e
    }
}

/// Reject temperatures no polynomial can be evaluated at.
pub(crate) fn check_temperature(t_k: f64) -> EvalResult<f64> {
    if !t_k.is_finite() || t_k <= 0.0 {
        return Err(EvalError::NonPhysical {
            what: "temperature",
            value: t_k,
        });
    }
    Ok(t_k)
}

fn check_result(value: f64, what: &'static str) -> EvalResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonPhysical { what, value })
    }
}

/// Evaluate one interval's polynomial at `t`.
pub fn evaluate(
    interval: &TemperatureInterval,
    t: Temperature,
    mode: EvalMode,
) -> EvalResult<ThermoProps> {
    let t_k = check_temperature(kelvin(t))?;
    let bounds = interval.bounds();
    let extrapolated = !bounds.contains(t_k);
    if extrapolated && mode == EvalMode::Strict {
        return Err(EvalError::OutOfRange {
            t: t_k,
            min: bounds.min,
            max: bounds.max,
        });
    }

    let ln_t = t_k.ln();
    let [b1, b2] = *interval.integration_constants();

    let mut cp_r = 0.0;
    let mut h = b1;
    let mut s = b2;
    for (a, e) in interval.coefficients().iter().zip(interval.exponents()) {
        cp_r += a * pow_exponent(t_k, *e);
        h += a * enthalpy_term(t_k, ln_t, *e);
        s += a * entropy_term(t_k, ln_t, *e);
    }

    Ok(ThermoProps {
        t_k,
        cp_r: check_result(cp_r, "Cp/R")?,
        h_rt: check_result(h / t_k, "H/RT")?,
        s_r: check_result(s, "S/R")?,
        extrapolated,
    })
}

//! Temperature sweep generation and execution.
//!
//! A sweep evaluates one species over a range of temperatures. Points that
//! fail to evaluate are kept as `None` so results stay aligned with the
//! requested temperatures.

use crate::error::{EvalError, EvalResult};
use crate::nasa7::EvalMode;
use crate::species::{SpeciesProps, evaluate_species};
use std::fmt;
use td_core::units::k;
use td_inp::SpeciesRecord;
use tracing::debug;

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SweepType {
    /// Uniformly spaced points
    #[default]
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

/// Temperature range sampled at a fixed number of points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemperatureSweep {
    /// Start temperature [K]
    pub start_k: f64,
    /// End temperature [K]
    pub end_k: f64,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl TemperatureSweep {
    pub fn new(
        start_k: f64,
        end_k: f64,
        num_points: usize,
        sweep_type: SweepType,
    ) -> EvalResult<Self> {
        for t in [start_k, end_k] {
            if !t.is_finite() || t <= 0.0 {
                return Err(EvalError::NonPhysical {
                    what: "sweep temperature",
                    value: t,
                });
            }
        }
        if num_points < 2 {
            return Err(EvalError::InvalidArg {
                what: "sweep must have at least 2 points".to_string(),
            });
        }
        if (start_k - end_k).abs() < 1e-12 {
            return Err(EvalError::InvalidArg {
                what: "sweep start and end temperatures must be different".to_string(),
            });
        }
        Ok(Self {
            start_k,
            end_k,
            num_points,
            sweep_type,
        })
    }

    /// Temperatures of the sweep [K], endpoints included exactly.
    pub fn points(&self) -> Vec<f64> {
        match self.sweep_type {
            SweepType::Linear => spaced(self.start_k, self.end_k, self.num_points, |v| v, |v| v),
            SweepType::Logarithmic => {
                spaced(self.start_k, self.end_k, self.num_points, f64::ln, f64::exp)
            }
        }
    }
}

fn spaced(
    start: f64,
    end: f64,
    n: usize,
    forward: impl Fn(f64) -> f64,
    inverse: impl Fn(f64) -> f64,
) -> Vec<f64> {
    if n <= 1 {
        return vec![start];
    }
    let (a, b) = (forward(start), forward(end));
    let delta = (b - a) / (n - 1) as f64;
    let mut points: Vec<f64> = (0..n).map(|i| inverse(a + i as f64 * delta)).collect();
    points[0] = start;
    points[n - 1] = end;
    points
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

impl fmt::Display for TemperatureSweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sweep T from {} to {} K ({} points, {})",
            self.start_k, self.end_k, self.num_points, self.sweep_type
        )
    }
}

/// Result of sweeping one species.
#[derive(Debug, Clone)]
pub struct SweepResult {
    pub species: String,
    /// Requested temperatures [K]
    pub temperatures: Vec<f64>,
    /// Evaluated points (`None` where evaluation failed)
    pub states: Vec<Option<SpeciesProps>>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl SweepResult {
    fn column(&self, f: impl Fn(&SpeciesProps) -> f64) -> Vec<f64> {
        self.states.iter().flatten().map(f).collect()
    }

    /// Cp of successful points [J/(mol·K)]
    pub fn cp(&self) -> Vec<f64> {
        self.column(SpeciesProps::cp)
    }

    /// H of successful points [J/mol]
    pub fn h(&self) -> Vec<f64> {
        self.column(SpeciesProps::h)
    }

    /// S of successful points [J/(mol·K)]
    pub fn s(&self) -> Vec<f64> {
        self.column(SpeciesProps::s)
    }

    /// Temperatures corresponding to successful points
    pub fn successful_temperatures(&self) -> Vec<f64> {
        self.temperatures
            .iter()
            .zip(&self.states)
            .filter_map(|(t, state)| state.as_ref().map(|_| *t))
            .collect()
    }
}

/// Evaluate `record` at every point of `sweep`.
pub fn execute_sweep(
    record: &SpeciesRecord,
    sweep: &TemperatureSweep,
    mode: EvalMode,
) -> SweepResult {
    let temperatures = sweep.points();
    let mut states = Vec::with_capacity(temperatures.len());
    let mut num_failed = 0;

    for (i, &t) in temperatures.iter().enumerate() {
        match evaluate_species(record, k(t), mode) {
            Ok(props) => states.push(Some(props)),
            Err(err) => {
                debug!(species = record.name(), point = i, %err, "sweep point failed");
                num_failed += 1;
                states.push(None);
            }
        }
    }

    SweepResult {
        species: record.name().to_string(),
        num_successful: temperatures.len() - num_failed,
        num_failed,
        temperatures,
        states,
    }
}

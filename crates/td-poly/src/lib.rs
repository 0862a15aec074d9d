//! td-poly: standard-state properties from NASA Glenn polynomial fits.
//!
//! Provides:
//! - Single-interval evaluation of `Cp/R`, `H/RT`, `S/R` ([`nasa7`])
//! - Interval selection and mass-specific values for a species ([`species`])
//! - Linear and logarithmic temperature sweeps ([`sweeps`])
//! - Formatted property tables ([`table`])
//!
//! # Example
//!
//! ```no_run
//! use td_core::units::k;
//! use td_poly::{EvalMode, evaluate_species};
//!
//! let db = td_inp::load_file("thermo.inp")?;
//! let air = db.lookup("Air")?;
//! let props = evaluate_species(air, k(300.0), EvalMode::Strict)?;
//! println!("Cp = {:.3} J/(mol·K)", props.cp());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod nasa7;
pub mod species;
pub mod sweeps;
pub mod table;

pub use error::{EvalError, EvalResult};
pub use nasa7::{EvalMode, ThermoProps, evaluate};
pub use species::{SpeciesProps, evaluate_species, select_interval};
pub use sweeps::{SweepResult, SweepType, TemperatureSweep, execute_sweep};
pub use table::{PropertyRow, PropertyTable};

//! td-core: stable foundation for thermodata.
//!
//! Contains:
//! - units (uom SI types + constructors, gas constant)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error type the other crates convert into)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TdError, TdResult};
pub use numeric::*;
pub use units::*;

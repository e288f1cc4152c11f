//! Power engineering course calculators with a tabulated-coefficient
//! lookup engine.

#[cfg(feature = "api")]
pub mod api;
/// Calculators for the six practicals.
pub mod calc;
pub mod config;
pub mod error;
pub mod input;
pub mod io;
pub mod numeric;
pub mod results;
/// Reference tables and coefficient resolution.
pub mod tables;
pub mod telemetry;

pub use error::{CalcError, CalcResult};

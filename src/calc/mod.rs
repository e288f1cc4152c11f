//! Calculators behind the course practicals.
//!
//! Each calculator parses its inputs from a [`FormInput`](crate::input::FormInput),
//! computes a typed report and flattens it into a [`ResultMap`](crate::results::ResultMap)
//! keyed by the labels the result pages show.

/// Practical 4: cable selection and short-circuit currents.
pub mod cable;
/// Practical 2: particulate emissions.
pub mod emissions;
/// Practical 3: solar forecast profit.
pub mod forecast;
/// Practical 1: fuel composition and heating value.
pub mod fuel;
/// Practical 6: electrical loads.
pub mod loads;
/// Practical 5: supply reliability.
pub mod reliability;

pub use cable::{CableInputs, CableReport};
pub use emissions::{EmissionInputs, EmissionReport};
pub use forecast::{ForecastInputs, ForecastReport};
pub use fuel::{FuelOil, SolidFuel};
pub use loads::{LoadDefaults, LoadInputs, LoadReport};
pub use reliability::{ReliabilityInputs, ReliabilityReport};

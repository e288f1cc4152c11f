//! API response types.
//!
//! Result labels and default field names match the form field names the
//! calculator pages use.

use serde::Serialize;

use crate::calc::LoadDefaults;
use crate::results::ResultMap;

/// Body of every calculator response.
#[derive(Debug, Default, Serialize)]
pub struct CalculationResponse {
    /// Labelled results; empty before the form is submitted.
    pub results: ResultMap,
    /// Values to pre-fill the form with, for calculators that have them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Defaults>,
    /// Message for a lookup that failed without aborting the calculation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalculationResponse {
    pub fn results(results: ResultMap) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn with_defaults(mut self, defaults: impl Into<Defaults>) -> Self {
        self.defaults = Some(defaults.into());
        self
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }
}

/// Form defaults: flat fields or the consumer tables of the load form.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Defaults {
    Fields(ResultMap),
    Loads(Box<LoadDefaults>),
}

impl From<ResultMap> for Defaults {
    fn from(fields: ResultMap) -> Self {
        Self::Fields(fields)
    }
}

impl From<LoadDefaults> for Defaults {
    fn from(loads: LoadDefaults) -> Self {
        Self::Loads(Box::new(loads))
    }
}

/// One entry of the calculator index.
#[derive(Debug, Serialize)]
pub struct CalculatorInfo {
    pub path: &'static str,
    pub title: &'static str,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

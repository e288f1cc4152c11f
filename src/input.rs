//! Access to submitted form fields.
//!
//! Forms arrive as ordered `(name, value)` pairs. Repeated names (the
//! `name[]` convention) form parallel arrays in submission order. Decimal
//! values may use either `,` or `.`.

use crate::error::{CalcError, CalcResult};
use crate::numeric::parse_decimal;

/// Ordered form fields of one submission.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pairs: Vec<(String, String)>,
}

impl FormInput {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Convenience constructor from borrowed pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// First value submitted under `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value submitted under `key`, in order.
    pub fn texts(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Required decimal field.
    ///
    /// # Errors
    ///
    /// `CalcError::InvalidInput` if the field is missing, empty or not a
    /// number.
    pub fn scalar(&self, key: &str) -> CalcResult<f64> {
        self.text(key)
            .and_then(parse_decimal)
            .ok_or_else(|| CalcError::invalid(key))
    }

    /// Optional decimal field; missing or unparsable reads as zero.
    pub fn scalar_or_zero(&self, key: &str) -> f64 {
        self.scalar(key).unwrap_or(0.0)
    }

    /// Required integer field.
    ///
    /// # Errors
    ///
    /// `CalcError::InvalidInput` if the field is missing or not an integer.
    pub fn integer(&self, key: &str) -> CalcResult<i64> {
        self.text(key)
            .and_then(|raw| raw.trim().parse().ok())
            .ok_or_else(|| CalcError::invalid(key))
    }

    /// Decimal array field; unparsable entries read as zero so positions
    /// stay aligned with the sibling arrays.
    pub fn list(&self, key: &str) -> Vec<f64> {
        self.texts(key)
            .into_iter()
            .map(|raw| parse_decimal(raw).unwrap_or(0.0))
            .collect()
    }
}

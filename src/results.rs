//! Labelled calculation results handed to the presentation layer.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// One displayable result value.
///
/// Serialized untagged so JSON consumers see plain numbers, strings and
/// arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultValue {
    Number(f64),
    Integer(i64),
    Text(String),
    Sequence(Vec<f64>),
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value:.2}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::Sequence(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value:.2}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<f64> for ResultValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for ResultValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for ResultValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<String> for ResultValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ResultValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<f64>> for ResultValue {
    fn from(values: Vec<f64>) -> Self {
        Self::Sequence(values)
    }
}

/// Result label to value, ordered by label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultMap(BTreeMap<String, ResultValue>);

impl ResultMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `label`, returning `self` for chaining.
    pub fn with(mut self, label: &str, value: impl Into<ResultValue>) -> Self {
        self.0.insert(label.to_string(), value.into());
        self
    }

    pub fn get(&self, label: &str) -> Option<&ResultValue> {
        self.0.get(label)
    }

    /// Numeric value of `label`, for `Number` and `Integer` entries.
    pub fn number(&self, label: &str) -> Option<f64> {
        match self.0.get(label)? {
            ResultValue::Number(value) => Some(*value),
            ResultValue::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResultValue)> {
        self.0.iter().map(|(label, value)| (label.as_str(), value))
    }
}

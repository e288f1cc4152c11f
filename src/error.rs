//! Error taxonomy shared by the tables, calculators and HTTP layer.

use thiserror::Error;

/// Failure raised while parsing input, loading reference data or resolving
/// a tabulated coefficient.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalcError {
    /// A required numeric field is missing or unparsable.
    #[error("bad value for `{field}`: check inputs")]
    InvalidInput { field: String },

    /// The reference table source could not be opened or read.
    #[error("reference table `{table}` is unavailable: {reason}")]
    DataUnavailable { table: String, reason: String },

    /// The reference table was read but does not have the expected shape.
    #[error("reference table `{table}` is corrupt: {reason}")]
    DataCorrupt { table: String, reason: String },

    /// The lookup key lies outside what the table covers.
    #[error("lookup failed: {0}")]
    LookupFailed(String),

    /// No `min;max` row contains the effective consumer count.
    #[error("range not found for ne={count}")]
    RangeNotFound { count: u32 },

    /// Inputs parse but violate a relation between parameters.
    #[error("{0}")]
    Domain(String),
}

impl CalcError {
    pub(crate) fn invalid(field: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
        }
    }

    pub(crate) fn corrupt(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataCorrupt {
            table: table.into(),
            reason: reason.into(),
        }
    }
}

pub type CalcResult<T> = Result<T, CalcError>;

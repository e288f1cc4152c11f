//! Demand-coefficient resolution from tabulated data.
//!
//! A query carries the effective consumer count and the group use
//! coefficient. The row is picked by count (exact key, or interpolated
//! between neighbouring keys for single-key tables; containing range for
//! range-key tables) and the column by rounding the use coefficient down to
//! the nearest tabulated key, flooring at the smallest key.

use super::bounds::find_bounds;
use super::reference::{CoefficientRow, CoefficientTable, ReferenceTable, RowKey};
use super::source::{TableId, TableSource};
use crate::error::{CalcError, CalcResult};

/// Inputs to a coefficient lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientQuery {
    /// Effective number of consumers (row selector).
    pub effective_count: u32,
    /// Group use coefficient (column selector).
    pub group_use_coefficient: f64,
}

impl CoefficientQuery {
    pub fn new(effective_count: u32, group_use_coefficient: f64) -> Self {
        Self {
            effective_count,
            group_use_coefficient,
        }
    }
}

/// Resolves a tabulated coefficient for a query.
pub trait CoefficientResolver {
    /// # Errors
    ///
    /// `LookupFailed` or `RangeNotFound` when the count is not covered,
    /// `DataCorrupt` when a row lacks the selected column.
    fn resolve(&self, query: &CoefficientQuery) -> CalcResult<f64>;
}

/// Table whose rows are keyed by an exact consumer count.
///
/// Counts between two keys are linearly interpolated; counts outside the
/// key range fail.
#[derive(Debug, Clone)]
pub struct SingleKeyTable {
    table: CoefficientTable,
}

impl SingleKeyTable {
    /// # Errors
    ///
    /// `DataCorrupt` if the table is empty or contains range keys.
    pub fn new(table: CoefficientTable) -> CalcResult<Self> {
        let id = table.id();
        if table.is_empty() {
            return Err(CalcError::corrupt(id.name(), "table has no rows"));
        }
        if table
            .rows()
            .iter()
            .any(|(key, _)| !matches!(key, RowKey::Exact(_)))
        {
            return Err(CalcError::corrupt(id.name(), "expected integer row keys"));
        }
        Ok(Self { table })
    }

    pub fn load(source: &dyn TableSource, id: TableId) -> CalcResult<Self> {
        Self::new(ReferenceTable::load_coefficients(source, id)?)
    }

    fn row(&self, count: u32) -> Option<&CoefficientRow> {
        self.table
            .rows()
            .iter()
            .find(|(key, _)| *key == RowKey::Exact(count))
            .map(|(_, row)| row)
    }

    fn keys(&self) -> Vec<u32> {
        self.table
            .rows()
            .iter()
            .filter_map(|(key, _)| match *key {
                RowKey::Exact(k) => Some(k),
                RowKey::Range { .. } => None,
            })
            .collect()
    }

    fn value(&self, count: u32, row: &CoefficientRow, column: f64) -> CalcResult<f64> {
        row.value_at(column).ok_or_else(|| {
            CalcError::corrupt(
                self.table.id().name(),
                format!("row {count} has no column {column}"),
            )
        })
    }
}

impl CoefficientResolver for SingleKeyTable {
    fn resolve(&self, query: &CoefficientQuery) -> CalcResult<f64> {
        // Rows are sorted; the smallest-count row defines the columns.
        let reference = &self.table.rows()[0].1;
        let column = reference
            .select_column(query.group_use_coefficient)
            .ok_or_else(|| CalcError::corrupt(self.table.id().name(), "row has no columns"))?;

        let target = query.effective_count;
        if let Some(row) = self.row(target) {
            return self.value(target, row, column);
        }

        let (lower, upper) = find_bounds(&self.keys(), target)
            .pair()
            .ok_or_else(|| CalcError::LookupFailed(format!("Kp lookup failed for ne={target}")))?;

        let lower_value = self.row(lower).map(|row| self.value(lower, row, column));
        let upper_value = self.row(upper).map(|row| self.value(upper, row, column));
        match (lower_value, upper_value) {
            (Some(lower_value), Some(upper_value)) => Ok(interpolate(
                (lower, lower_value?),
                (upper, upper_value?),
                target,
            )),
            _ => Err(CalcError::LookupFailed(format!(
                "Kp lookup failed for ne={target}"
            ))),
        }
    }
}

/// Table whose rows are keyed by inclusive `min;max` count ranges.
#[derive(Debug, Clone)]
pub struct RangeKeyTable {
    table: CoefficientTable,
}

impl RangeKeyTable {
    /// # Errors
    ///
    /// `DataCorrupt` if the table contains plain integer keys.
    pub fn new(table: CoefficientTable) -> CalcResult<Self> {
        if table
            .rows()
            .iter()
            .any(|(key, _)| !matches!(key, RowKey::Range { .. }))
        {
            return Err(CalcError::corrupt(
                table.id().name(),
                "expected \"min;max\" row keys",
            ));
        }
        Ok(Self { table })
    }

    pub fn load(source: &dyn TableSource, id: TableId) -> CalcResult<Self> {
        Self::new(ReferenceTable::load_coefficients(source, id)?)
    }
}

impl CoefficientResolver for RangeKeyTable {
    fn resolve(&self, query: &CoefficientQuery) -> CalcResult<f64> {
        let count = query.effective_count;
        let row = self
            .table
            .rows()
            .iter()
            .find(|(key, _)| key.contains(count))
            .map(|(_, row)| row)
            .ok_or(CalcError::RangeNotFound { count })?;

        row.select_column(query.group_use_coefficient)
            .and_then(|column| row.value_at(column))
            .ok_or_else(|| {
                CalcError::corrupt(
                    self.table.id().name(),
                    format!("no coefficient column for ne={count}"),
                )
            })
    }
}

/// Straight-line interpolation between `(x0, y0)` and `(x1, y1)` at `x`.
fn interpolate((x0, y0): (u32, f64), (x1, y1): (u32, f64), x: u32) -> f64 {
    let slope = (y1 - y0) / (f64::from(x1) - f64::from(x0));
    y0 + slope * (f64::from(x) - f64::from(x0))
}

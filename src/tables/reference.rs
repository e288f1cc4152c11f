//! Typed shapes of the reference tables and their JSON loading.
//!
//! Two on-disk shapes exist:
//!
//! - `{ "row": [f64, ...] }`: positional constants per row ([`ListTable`])
//! - `{ "row": { "coefficient": f64 } }`: coefficient columns per row
//!   ([`CoefficientTable`]), where the row key is either an integer or a
//!   `"min;max"` range.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::source::{TableId, TableSource};
use crate::error::{CalcError, CalcResult};
use crate::numeric::parse_decimal;

/// Row key to positional list of constants.
pub type ListTable = BTreeMap<String, Vec<f64>>;

/// Coefficient keys closer than this are the same column.
const KEY_EPSILON: f64 = 1e-9;

/// Reads table `id` from `source` and deserializes it as `T`.
///
/// # Errors
///
/// Propagates `DataUnavailable` from the source and returns `DataCorrupt`
/// if the JSON does not match `T`.
pub fn load_json<T: DeserializeOwned>(source: &dyn TableSource, id: TableId) -> CalcResult<T> {
    let raw = source.read(id)?;
    serde_json::from_str(&raw).map_err(|e| CalcError::corrupt(id.name(), e.to_string()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTable {
    Lists(ListTable),
    Coefficients(BTreeMap<String, BTreeMap<String, f64>>),
}

/// A loaded reference table in one of its two shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceTable {
    Lists(ListTable),
    Coefficients(CoefficientTable),
}

impl ReferenceTable {
    /// Loads and validates table `id`.
    ///
    /// # Errors
    ///
    /// `DataUnavailable` if the source cannot be read, `DataCorrupt` if the
    /// contents match neither shape or contain malformed keys.
    pub fn load(source: &dyn TableSource, id: TableId) -> CalcResult<Self> {
        match load_json::<RawTable>(source, id)? {
            RawTable::Lists(rows) => Ok(Self::Lists(rows)),
            RawTable::Coefficients(rows) => {
                CoefficientTable::from_raw(id, rows).map(Self::Coefficients)
            }
        }
    }

    /// Loads table `id`, requiring the list shape.
    pub fn load_lists(source: &dyn TableSource, id: TableId) -> CalcResult<ListTable> {
        match Self::load(source, id)? {
            Self::Lists(rows) => Ok(rows),
            Self::Coefficients(_) => Err(CalcError::corrupt(
                id.name(),
                "expected lists of constants per row",
            )),
        }
    }

    /// Loads table `id`, requiring the coefficient shape.
    pub fn load_coefficients(
        source: &dyn TableSource,
        id: TableId,
    ) -> CalcResult<CoefficientTable> {
        match Self::load(source, id)? {
            Self::Coefficients(table) => Ok(table),
            // `{}` deserializes as the list shape first
            Self::Lists(rows) if rows.is_empty() => Ok(CoefficientTable {
                table: id,
                rows: Vec::new(),
            }),
            Self::Lists(_) => Err(CalcError::corrupt(
                id.name(),
                "expected coefficient maps per row",
            )),
        }
    }
}

/// How a coefficient-table row is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKey {
    /// Exact effective consumer count.
    Exact(u32),
    /// Inclusive `min;max` range of effective consumer counts.
    Range { min: u32, max: u32 },
}

impl RowKey {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some((min, max)) = raw.split_once(';') {
            let min = min.trim().parse().ok()?;
            let max = max.trim().parse().ok()?;
            return Some(Self::Range { min, max });
        }
        raw.parse().ok().map(Self::Exact)
    }

    /// Whether `count` selects this row.
    pub fn contains(&self, count: u32) -> bool {
        match *self {
            Self::Exact(key) => key == count,
            Self::Range { min, max } => min <= count && count <= max,
        }
    }

    fn sort_key(&self) -> u32 {
        match *self {
            Self::Exact(key) => key,
            Self::Range { min, .. } => min,
        }
    }
}

/// Coefficient columns of one row, sorted by coefficient key.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientRow {
    columns: Vec<(f64, f64)>,
}

impl CoefficientRow {
    /// Builds a row from `(coefficient key, value)` pairs in any order.
    pub fn from_pairs(mut columns: Vec<(f64, f64)>) -> Self {
        columns.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { columns }
    }

    /// Coefficient keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = f64> + '_ {
        self.columns.iter().map(|&(key, _)| key)
    }

    /// Picks the largest key `<= target`, or the smallest key when every
    /// key exceeds `target`. `None` only for a row without columns.
    pub fn select_column(&self, target: f64) -> Option<f64> {
        let mut keys = self.keys();
        let mut chosen = keys.next()?;
        for key in keys {
            if key <= target {
                chosen = key;
            } else {
                break;
            }
        }
        Some(chosen)
    }

    /// Value stored under coefficient key `key`.
    pub fn value_at(&self, key: f64) -> Option<f64> {
        self.columns
            .iter()
            .find(|&&(k, _)| (k - key).abs() < KEY_EPSILON)
            .map(|&(_, value)| value)
    }
}

/// Rows of coefficient columns keyed by count or count range.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    table: TableId,
    rows: Vec<(RowKey, CoefficientRow)>,
}

impl CoefficientTable {
    /// Builds a table from already parsed rows. Rows are kept sorted by
    /// their (lower) count.
    pub fn new(table: TableId, mut rows: Vec<(RowKey, CoefficientRow)>) -> Self {
        rows.sort_by_key(|(key, _)| key.sort_key());
        Self { table, rows }
    }

    fn from_raw(table: TableId, raw: BTreeMap<String, BTreeMap<String, f64>>) -> CalcResult<Self> {
        let mut rows = Vec::with_capacity(raw.len());
        for (row_key, columns) in raw {
            let key = RowKey::parse(&row_key).ok_or_else(|| {
                CalcError::corrupt(table.name(), format!("malformed row key \"{row_key}\""))
            })?;
            if columns.is_empty() {
                return Err(CalcError::corrupt(
                    table.name(),
                    format!("row \"{row_key}\" has no coefficient columns"),
                ));
            }
            let mut pairs = Vec::with_capacity(columns.len());
            for (coeff_key, value) in columns {
                let coeff = parse_decimal(&coeff_key).ok_or_else(|| {
                    CalcError::corrupt(
                        table.name(),
                        format!("malformed coefficient key \"{coeff_key}\" in row \"{row_key}\""),
                    )
                })?;
                pairs.push((coeff, value));
            }
            rows.push((key, CoefficientRow::from_pairs(pairs)));
        }
        Ok(Self::new(table, rows))
    }

    /// Table this data was loaded from.
    pub fn id(&self) -> TableId {
        self.table
    }

    pub fn rows(&self) -> &[(RowKey, CoefficientRow)] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

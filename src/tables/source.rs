//! Where reference tables come from.
//!
//! Calculators never touch the filesystem directly; they ask a
//! [`TableSource`] for the raw contents of a table by id. The file-backed
//! source re-reads on every call, so edits to the data directory are picked
//! up without a restart.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CalcError, CalcResult};

/// Identifies one of the static reference tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableId {
    /// Economic current density by conductor type and utilisation band.
    CableCurrentDensity,
    /// Failure rate, repair time and planned downtime per network element.
    ReliabilityElements,
    /// Demand coefficients for supply networks up to 1 kV (T0 = 10 min).
    DemandCoefficientsCabinet,
    /// Demand coefficients for shop transformer buses (T0 = 2.5 h).
    DemandCoefficientsShop,
    /// Control-example consumer table used as form defaults.
    LoadDefaults,
}

impl TableId {
    pub const ALL: [TableId; 5] = [
        TableId::CableCurrentDensity,
        TableId::ReliabilityElements,
        TableId::DemandCoefficientsCabinet,
        TableId::DemandCoefficientsShop,
        TableId::LoadDefaults,
    ];

    /// Short stable name, also used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            TableId::CableCurrentDensity => "cable_current_density",
            TableId::ReliabilityElements => "reliability_elements",
            TableId::DemandCoefficientsCabinet => "demand_coefficients_cabinet",
            TableId::DemandCoefficientsShop => "demand_coefficients_shop",
            TableId::LoadDefaults => "load_defaults",
        }
    }

    /// File name inside the data directory.
    pub fn file_name(self) -> String {
        format!("{}.json", self.name())
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only repository of reference tables.
pub trait TableSource {
    /// Returns the raw JSON text of the table.
    ///
    /// # Errors
    ///
    /// Returns `CalcError::DataUnavailable` if the table cannot be read.
    fn read(&self, id: TableId) -> CalcResult<String>;
}

/// Reads tables from JSON files in a directory.
#[derive(Debug, Clone)]
pub struct FileTableSource {
    dir: PathBuf,
}

impl FileTableSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TableSource for FileTableSource {
    fn read(&self, id: TableId) -> CalcResult<String> {
        let path = self.dir.join(id.file_name());
        tracing::debug!(table = %id, path = %path.display(), "reading reference table");
        fs::read_to_string(&path).map_err(|e| CalcError::DataUnavailable {
            table: id.name().to_string(),
            reason: format!("cannot read \"{}\": {e}", path.display()),
        })
    }
}

/// Serves tables from memory; used by tests and embedded fixtures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTableSource {
    tables: HashMap<TableId, String>,
}

impl InMemoryTableSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a table, returning `self` for chaining.
    pub fn with_table(mut self, id: TableId, json: impl Into<String>) -> Self {
        self.tables.insert(id, json.into());
        self
    }
}

impl TableSource for InMemoryTableSource {
    fn read(&self, id: TableId) -> CalcResult<String> {
        self.tables
            .get(&id)
            .cloned()
            .ok_or_else(|| CalcError::DataUnavailable {
                table: id.name().to_string(),
                reason: "not registered".to_string(),
            })
    }
}

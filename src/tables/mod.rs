//! Static reference tables: sources, shapes, bound search and coefficient
//! resolution.

/// Nearest-bound search over integer row keys.
pub mod bounds;
pub mod reference;
pub mod resolver;
/// Table ids and the read-only repository abstraction.
pub mod source;

pub use bounds::{InterpolationBound, find_bounds};
pub use reference::{CoefficientRow, CoefficientTable, ListTable, ReferenceTable, RowKey};
pub use resolver::{CoefficientQuery, CoefficientResolver, RangeKeyTable, SingleKeyTable};
pub use source::{FileTableSource, InMemoryTableSource, TableId, TableSource};

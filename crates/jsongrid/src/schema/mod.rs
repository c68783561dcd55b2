//! Schema types for representing an inferred table.

mod column;
mod table;
mod types;

pub use column::{Column, derive_label};
pub use table::{CellEdit, DataSet, DataSetMetadata, Row, RowId};
pub use types::{CellValue, ColumnType, RuleKind, RuleOperand, ValidationRule};

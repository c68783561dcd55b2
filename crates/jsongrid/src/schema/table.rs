//! Rows and the typed table they belong to.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::column::Column;
use super::types::CellValue;
use crate::validation::ValidationError;

/// Opaque row identifier, unique for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Allocate a fresh identifier.
    pub fn generate() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        RowId(format!("row_{}", COUNTER.fetch_add(1, Ordering::Relaxed)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for RowId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RowId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One record: its cells keyed by column, plus the validation errors for those cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    /// Exactly one entry per column, in column order.
    pub cells: IndexMap<String, CellValue>,
    /// Only columns with at least one error appear here.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub errors: IndexMap<String, Vec<ValidationError>>,
}

impl Row {
    /// Create an unvalidated row with a fresh id.
    pub fn new(cells: IndexMap<String, CellValue>) -> Self {
        Self {
            id: RowId::generate(),
            cells,
            errors: IndexMap::new(),
        }
    }

    pub fn cell(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of columns carrying at least one error.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// Information about where a data set came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSetMetadata {
    /// Name of the source (file name or caller-supplied label).
    pub source_name: String,
    pub row_count: usize,
    pub column_count: usize,
    /// When the data was imported.
    pub imported_at: DateTime<Utc>,
}

impl DataSetMetadata {
    pub fn new(source_name: impl Into<String>, row_count: usize, column_count: usize) -> Self {
        Self {
            source_name: source_name.into(),
            row_count,
            column_count,
            imported_at: Utc::now(),
        }
    }
}

/// A typed table: columns, rows and metadata.
///
/// Every part is behind an `Arc` so that an edit can build a new data set which
/// shares every untouched row, the column list and the metadata with the old one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSet {
    pub columns: Arc<[Column]>,
    pub rows: Arc<[Arc<Row>]>,
    pub metadata: Arc<DataSetMetadata>,
}

impl DataSet {
    pub fn new(columns: Vec<Column>, rows: Vec<Arc<Row>>, metadata: DataSetMetadata) -> Self {
        Self {
            columns: columns.into(),
            rows: rows.into(),
            metadata: Arc::new(metadata),
        }
    }

    /// Get a column by key.
    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Get all column keys in order.
    pub fn column_keys(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.key.as_str()).collect()
    }

    /// Get the position of a row by id.
    pub fn row_index(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    /// Get a row by id.
    pub fn row(&self, id: &str) -> Option<&Arc<Row>> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// One cell edit inside a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellEdit {
    pub row_id: String,
    pub column_key: String,
    pub value: CellValue,
}

impl CellEdit {
    pub fn new(
        row_id: impl Into<String>,
        column_key: impl Into<String>,
        value: impl Into<CellValue>,
    ) -> Self {
        Self {
            row_id: row_id.into(),
            column_key: column_key.into(),
            value: value.into(),
        }
    }
}

//! JSON record parser with structural checks and schema inference.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{GridError, Result};
use crate::inference::infer_column_type;
use crate::schema::{CellValue, Column, DataSet, DataSetMetadata, Row};

/// Default maximum input size (5 MiB).
pub const DEFAULT_MAX_BYTE_SIZE: u64 = 5 * 1024 * 1024;

/// Default maximum depth of nested objects inside a record.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 1;

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Inputs larger than this many UTF-8 bytes are rejected.
    pub max_byte_size: u64,
    /// Deepest nested object allowed; a record's own fields are depth 0.
    pub max_nesting_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_byte_size: DEFAULT_MAX_BYTE_SIZE,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// Parses JSON text into an unvalidated [`DataSet`].
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a JSON array of flat records.
    ///
    /// Checks run in a fixed order and stop at the first failure: size, blank
    /// input, JSON syntax, top-level shape, empty array, record shape, nested
    /// arrays, nesting depth and finally an empty first record. Columns come
    /// from the first record's keys in order; rows carry no errors yet.
    pub fn parse(&self, text: &str, source_name: &str) -> Result<DataSet> {
        let size = text.len() as u64;
        if size > self.config.max_byte_size {
            return Err(GridError::SizeLimitExceeded {
                size,
                max: self.config.max_byte_size,
            });
        }

        if text.trim().is_empty() {
            return Err(GridError::EmptyInput);
        }

        let value: Value = serde_json::from_str(text).map_err(GridError::MalformedJson)?;

        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(GridError::WrongTopLevelShape {
                    found: json_type_name(&other),
                });
            }
        };

        if items.is_empty() {
            return Err(GridError::EmptyDataset);
        }

        let records = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_object().ok_or_else(|| GridError::InvalidRecordShape {
                    index,
                    found: json_type_name(item),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        for (index, record) in records.iter().enumerate() {
            reject_arrays(record, index)?;
        }
        for (index, record) in records.iter().enumerate() {
            check_depth(record, index, 0, self.config.max_nesting_depth)?;
        }

        let first = records[0];
        if first.is_empty() {
            return Err(GridError::NoColumnsFound);
        }

        tracing::debug!(
            source = source_name,
            records = records.len(),
            columns = first.len(),
            "Inferring column types"
        );

        let columns: Vec<Column> = first
            .keys()
            .map(|key| Column::new(key.as_str(), infer_column_type(&records, key)))
            .collect();

        let rows: Vec<Arc<Row>> = records
            .iter()
            .map(|record| Arc::new(build_row(record, &columns)))
            .collect();

        let metadata = DataSetMetadata::new(source_name, rows.len(), columns.len());
        Ok(DataSet::new(columns, rows, metadata))
    }
}

/// Convenience wrapper around [`Parser::parse`].
pub fn parse(text: &str, config: &ParserConfig, source_name: &str) -> Result<DataSet> {
    Parser::with_config(config.clone()).parse(text, source_name)
}

/// Arrays are never allowed as values, at any depth.
fn reject_arrays(object: &Map<String, Value>, index: usize) -> Result<()> {
    for (key, value) in object {
        match value {
            Value::Array(_) => {
                return Err(GridError::UnsupportedNestedArray {
                    index,
                    key: key.clone(),
                });
            }
            Value::Object(inner) => reject_arrays(inner, index)?,
            _ => {}
        }
    }
    Ok(())
}

/// Fail when a nested object sits deeper than `max_depth`.
fn check_depth(
    object: &Map<String, Value>,
    index: usize,
    depth: usize,
    max_depth: usize,
) -> Result<()> {
    for (key, value) in object {
        if let Value::Object(inner) = value {
            if depth + 1 > max_depth {
                return Err(GridError::NestingDepthExceeded {
                    index,
                    key: key.clone(),
                    max_depth,
                });
            }
            check_depth(inner, index, depth + 1, max_depth)?;
        }
    }
    Ok(())
}

/// Build one row with exactly the given columns. Extra fields are dropped.
fn build_row(record: &Map<String, Value>, columns: &[Column]) -> Row {
    let cells: IndexMap<String, CellValue> = columns
        .iter()
        .map(|column| {
            let cell = record.get(&column.key).map(to_cell).unwrap_or_default();
            (column.key.clone(), cell)
        })
        .collect();
    Row::new(cells)
}

fn to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Bool(b) => CellValue::Boolean(*b),
        Value::Number(n) => n
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::String(n.to_string())),
        Value::String(s) => CellValue::String(s.clone()),
        other => CellValue::String(other.to_string()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! The observable table store.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::config::StoreConfig;
use super::state::{DataStoreState, StoreError};
use crate::error::{GridError, Result};
use crate::input::{FileSource, Parser};
use crate::schema::{CellEdit, CellValue, Column, DataSet, Row, ValidationRule};
use crate::validation::{check_rule_patterns, validate_all_rows, validate_cell};

type Listener = Box<dyn Fn()>;

/// Handle returned by [`DataStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns the current data set and keeps it validated across loads and edits.
///
/// Every state change replaces the whole state and then notifies subscribers once.
/// Edits rebuild only the touched rows; every other row, the column list and the
/// metadata are shared with the previous data set.
pub struct DataStore {
    config: StoreConfig,
    parser: Parser,
    rules: IndexMap<String, Vec<ValidationRule>>,
    state: Arc<DataStoreState>,
    listeners: IndexMap<SubscriptionId, Listener>,
    next_listener: u64,
}

impl DataStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser_config()),
            rules: config.validation_rules.clone(),
            config,
            state: Arc::new(DataStoreState::Idle),
            listeners: IndexMap::new(),
            next_listener: 0,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Parse, validate and store `text`. Failures end up in the `Error` state.
    pub fn load(&mut self, text: &str, source_name: &str) {
        self.state = Arc::new(DataStoreState::Loading);

        let next = match self.build_data_set(text, source_name) {
            Ok(data) => {
                tracing::info!(
                    source = source_name,
                    rows = data.row_count(),
                    columns = data.column_count(),
                    "Loaded data set"
                );
                DataStoreState::Loaded(Arc::new(data))
            }
            Err(err) => {
                tracing::warn!(source = source_name, kind = %err.kind(), error = %err, "Load failed");
                DataStoreState::Error(StoreError::from(err))
            }
        };
        self.commit(next);
    }

    /// Load from a file-like source.
    ///
    /// Oversized sources are rejected before any content is read.
    pub async fn load_from_file<F: FileSource>(&mut self, file: &F) {
        let size = file.byte_len();
        if size > self.config.max_file_size {
            let err = GridError::SizeLimitExceeded {
                size,
                max: self.config.max_file_size,
            };
            tracing::warn!(source = file.name(), size, "Rejected oversized file before reading");
            self.commit(DataStoreState::Error(StoreError::from(err)));
            return;
        }

        self.state = Arc::new(DataStoreState::Loading);
        match file.read_to_text().await {
            Ok(text) => self.load(&text, file.name()),
            Err(source) => {
                let err = GridError::FileRead {
                    name: file.name().to_string(),
                    source,
                };
                tracing::warn!(error = %err, "File read failed");
                self.commit(DataStoreState::Error(StoreError::from(err)));
            }
        }
    }

    /// Set one cell and re-validate only that cell.
    ///
    /// Does nothing unless a data set is loaded and both the row and the column exist.
    pub fn update_cell(&mut self, row_id: &str, column_key: &str, value: impl Into<CellValue>) {
        let Some(data) = self.loaded() else {
            return;
        };
        let (Some(column), Some(index)) = (data.column(column_key), data.row_index(row_id)) else {
            tracing::debug!(row_id, column_key, "Ignoring edit to unknown cell");
            return;
        };

        let mut rows = data.rows.to_vec();
        rows[index] = Arc::new(edit_row(&rows[index], column, value.into()));
        tracing::debug!(row_id, column_key, "Updated cell");

        self.commit_rows(&data, rows);
    }

    /// Apply edits in order against one working copy and commit once.
    ///
    /// Edits naming an unknown row or column are skipped. If nothing applies,
    /// the state is left alone.
    pub fn batch_update_cells(&mut self, edits: impl IntoIterator<Item = CellEdit>) {
        let Some(data) = self.loaded() else {
            return;
        };

        let index_of: HashMap<&str, usize> = data
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| (row.id.as_str(), index))
            .collect();

        let mut rows = data.rows.to_vec();
        let mut applied = 0usize;
        for edit in edits {
            let Some(column) = data.column(&edit.column_key) else {
                continue;
            };
            let Some(&index) = index_of.get(edit.row_id.as_str()) else {
                continue;
            };
            rows[index] = Arc::new(edit_row(&rows[index], column, edit.value));
            applied += 1;
        }

        if applied == 0 {
            return;
        }
        tracing::debug!(applied, "Applied batch edit");
        self.commit_rows(&data, rows);
    }

    /// Append rules for a column and, if loaded, re-validate the whole table.
    ///
    /// A `pattern` rule that does not compile rejects the whole call; nothing is
    /// stored and the state is left alone.
    pub fn add_validation_rules(
        &mut self,
        column_key: &str,
        rules: impl IntoIterator<Item = ValidationRule>,
    ) -> Result<()> {
        let rules: Vec<ValidationRule> = rules.into_iter().collect();
        check_rule_patterns(column_key, &rules)?;

        self.rules
            .entry(column_key.to_string())
            .or_default()
            .extend(rules);

        let Some(data) = self.loaded() else {
            return Ok(());
        };

        let columns: Vec<Column> = data
            .columns
            .iter()
            .map(|column| Column {
                validation: self.rules.get(&column.key).cloned().unwrap_or_default(),
                ..column.clone()
            })
            .collect();
        let rows = validate_all_rows(&data.rows, &columns);
        tracing::debug!(column_key, rows = rows.len(), "Re-validated all rows");

        let next = DataSet {
            columns: columns.into(),
            rows: rows.into(),
            metadata: Arc::clone(&data.metadata),
        };
        self.commit(DataStoreState::Loaded(Arc::new(next)));
        Ok(())
    }

    /// Drop any data and return to `Idle`.
    pub fn reset(&mut self) {
        self.commit(DataStoreState::Idle);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The current state. Compare with [`Arc::ptr_eq`] to detect changes.
    pub fn snapshot(&self) -> Arc<DataStoreState> {
        Arc::clone(&self.state)
    }

    pub fn state(&self) -> &DataStoreState {
        &self.state
    }

    pub fn data_set(&self) -> Option<&Arc<DataSet>> {
        self.state.data_set()
    }

    /// Rows of the loaded data set; empty when nothing is loaded.
    pub fn rows(&self) -> &[Arc<Row>] {
        self.data_set().map(|d| &d.rows[..]).unwrap_or(&[])
    }

    /// Columns of the loaded data set; empty when nothing is loaded.
    pub fn columns(&self) -> &[Column] {
        self.data_set().map(|d| &d.columns[..]).unwrap_or(&[])
    }

    pub fn row(&self, row_id: &str) -> Option<&Arc<Row>> {
        self.data_set()?.row(row_id)
    }

    pub fn cell(&self, row_id: &str, column_key: &str) -> Option<&CellValue> {
        self.row(row_id)?.cell(column_key)
    }

    /// Number of (row, column) pairs with at least one error.
    pub fn error_count(&self) -> usize {
        self.rows().iter().map(|r| r.error_count()).sum()
    }

    pub fn rows_with_errors(&self) -> Vec<Arc<Row>> {
        self.rows()
            .iter()
            .filter(|r| r.has_errors())
            .cloned()
            .collect()
    }

    /// Plain cell maps, one per row, without ids or errors.
    pub fn export_data(&self) -> Vec<IndexMap<String, CellValue>> {
        self.rows().iter().map(|r| r.cells.clone()).collect()
    }

    /// Store-level rules per column key.
    pub fn rules(&self) -> &IndexMap<String, Vec<ValidationRule>> {
        &self.rules
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Register a listener called after every state replacement.
    pub fn subscribe(&mut self, listener: impl Fn() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.shift_remove(&id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn loaded(&self) -> Option<Arc<DataSet>> {
        self.state.data_set().cloned()
    }

    fn build_data_set(&self, text: &str, source_name: &str) -> Result<DataSet> {
        let parsed = self.parser.parse(text, source_name)?;

        // Rules for keys the data does not have never run.
        for column in parsed.columns.iter() {
            if let Some(rules) = self.rules.get(&column.key) {
                check_rule_patterns(&column.key, rules)?;
            }
        }

        let columns: Vec<Column> = parsed
            .columns
            .iter()
            .map(|column| {
                let mut column = column.clone();
                if let Some(rules) = self.rules.get(&column.key) {
                    column.validation.extend(rules.iter().cloned());
                }
                column
            })
            .collect();
        let rows = validate_all_rows(&parsed.rows, &columns);

        Ok(DataSet {
            columns: columns.into(),
            rows: rows.into(),
            metadata: parsed.metadata,
        })
    }

    fn commit_rows(&mut self, data: &DataSet, rows: Vec<Arc<Row>>) {
        let next = DataSet {
            columns: Arc::clone(&data.columns),
            rows: rows.into(),
            metadata: Arc::clone(&data.metadata),
        };
        self.commit(DataStoreState::Loaded(Arc::new(next)));
    }

    fn commit(&mut self, next: DataStoreState) {
        self.state = Arc::new(next);
        for listener in self.listeners.values() {
            listener();
        }
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl fmt::Debug for DataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataStore")
            .field("config", &self.config)
            .field("state", &self.state.name())
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

/// New row with one cell replaced and that cell's errors recomputed.
fn edit_row(row: &Row, column: &Column, value: CellValue) -> Row {
    let errors_for_cell = validate_cell(&value, column);

    let mut cells = row.cells.clone();
    cells.insert(column.key.clone(), value);

    let mut errors = row.errors.clone();
    if errors_for_cell.is_empty() {
        errors.shift_remove(&column.key);
    } else {
        errors.insert(column.key.clone(), errors_for_cell);
    }

    Row {
        id: row.id.clone(),
        cells,
        errors,
    }
}

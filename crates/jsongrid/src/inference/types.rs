//! Per-column type inference by majority vote.

use serde_json::{Map, Value};

use super::dates::looks_like_date;
use crate::schema::ColumnType;

/// Classify a single JSON value. `None` for null.
pub fn classify_value(value: &Value) -> Option<ColumnType> {
    match value {
        Value::Null => None,
        Value::Bool(_) => Some(ColumnType::Boolean),
        Value::Number(_) => Some(ColumnType::Number),
        Value::String(s) if looks_like_date(s) => Some(ColumnType::Date),
        _ => Some(ColumnType::String),
    }
}

/// Running vote over classified values.
///
/// The leader only changes when a classification strictly overtakes it, so on a
/// tie the classification that reached the leading count first wins.
#[derive(Debug, Clone, Default)]
pub struct TypeTally {
    counts: [usize; 4],
    leader: Option<(ColumnType, usize)>,
}

impl TypeTally {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(column_type: ColumnType) -> usize {
        match column_type {
            ColumnType::String => 0,
            ColumnType::Number => 1,
            ColumnType::Boolean => 2,
            ColumnType::Date => 3,
        }
    }

    /// Record one observation.
    pub fn add(&mut self, column_type: ColumnType) {
        let slot = Self::slot(column_type);
        self.counts[slot] += 1;
        let count = self.counts[slot];
        match self.leader {
            Some((_, best)) if count <= best => {}
            _ => self.leader = Some((column_type, count)),
        }
    }

    /// Number of observations of one classification.
    pub fn count(&self, column_type: ColumnType) -> usize {
        self.counts[Self::slot(column_type)]
    }

    /// Winning classification; `String` when nothing was observed.
    pub fn winner(&self) -> ColumnType {
        self.leader.map(|(t, _)| t).unwrap_or_default()
    }
}

/// Infer the type of `key` across all records, in record order.
pub fn infer_column_type(records: &[&Map<String, Value>], key: &str) -> ColumnType {
    let mut tally = TypeTally::new();
    for record in records {
        if let Some(class) = record.get(key).and_then(classify_value) {
            tally.add(class);
        }
    }
    tally.winner()
}

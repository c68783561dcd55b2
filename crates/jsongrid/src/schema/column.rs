//! Column definition and label derivation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::types::{ColumnType, ValidationRule};

static CAMEL_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());

/// Schema for a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Unique key, as found in the first record.
    pub key: String,
    /// Human-readable name derived from the key.
    pub label: String,
    /// Inferred data type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Rules evaluated in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<ValidationRule>,
}

impl Column {
    /// Create a column with a derived label and no rules.
    pub fn new(key: impl Into<String>, column_type: ColumnType) -> Self {
        let key = key.into();
        Self {
            label: derive_label(&key),
            key,
            column_type,
            validation: Vec::new(),
        }
    }

    /// Replace the rule list.
    pub fn with_rules(mut self, rules: Vec<ValidationRule>) -> Self {
        self.validation = rules;
        self
    }
}

/// Turn a record key into a display label.
///
/// `firstName` becomes `First Name`, `order_id` becomes `Order Id`.
pub fn derive_label(key: &str) -> String {
    let spaced = CAMEL_BOUNDARY.replace_all(key, "$1 $2");
    let spaced = spaced.replace(['_', '-'], " ");

    let mut label = String::with_capacity(spaced.len());
    let mut prev_is_word = false;
    for ch in spaced.chars() {
        let is_word = ch.is_alphanumeric() || ch == '_';
        if is_word && !prev_is_word {
            label.extend(ch.to_uppercase());
        } else {
            label.push(ch);
        }
        prev_is_word = is_word;
    }
    label
}

//! Store configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::input::{DEFAULT_MAX_BYTE_SIZE, DEFAULT_MAX_NESTING_DEPTH, ParserConfig};
use crate::schema::ValidationRule;

/// Configuration for a [`DataStore`](super::DataStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Largest accepted input, in bytes.
    #[serde(alias = "maxFileSize")]
    pub max_file_size: u64,
    /// Deepest nested object allowed inside a record.
    #[serde(alias = "maxNestingDepth")]
    pub max_nesting_depth: usize,
    /// Rules applied on load, keyed by column.
    #[serde(alias = "validationRules")]
    pub validation_rules: IndexMap<String, Vec<ValidationRule>>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_BYTE_SIZE,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            validation_rules: IndexMap::new(),
        }
    }
}

impl StoreConfig {
    /// Read a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GridError::Config(e.to_string()))
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Add rules for a column, after any already configured.
    pub fn with_rules(
        mut self,
        column: impl Into<String>,
        rules: impl IntoIterator<Item = ValidationRule>,
    ) -> Self {
        self.validation_rules
            .entry(column.into())
            .or_default()
            .extend(rules);
        self
    }

    /// Parser settings derived from this configuration.
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            max_byte_size: self.max_file_size,
            max_nesting_depth: self.max_nesting_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RuleKind;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.max_file_size, 5_242_880);
        assert_eq!(config.max_nesting_depth, 1);
        assert!(config.validation_rules.is_empty());
    }

    #[test]
    fn test_from_json_camel_case() {
        let config = StoreConfig::from_json_str(
            r#"{
                "maxFileSize": 1024,
                "validationRules": {
                    "age": [{"type": "min", "value": 0}, {"type": "required"}]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.max_file_size, 1024);
        assert_eq!(config.max_nesting_depth, 1);
        let kinds: Vec<_> = config.validation_rules["age"].iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RuleKind::Min, RuleKind::Required]);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = StoreConfig::from_json_str("{\"maxFileSize\": \"big\"}").unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_with_rules_appends() {
        let config = StoreConfig::default()
            .with_rules("name", [ValidationRule::required()])
            .with_rules("name", [ValidationRule::max_length(10)]);
        assert_eq!(config.validation_rules["name"].len(), 2);
        assert_eq!(config.parser_config().max_byte_size, 5_242_880);
    }
}

//! Core type definitions for schema representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inferred data type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Text values.
    #[default]
    String,
    /// Numeric values.
    Number,
    /// Boolean values.
    Boolean,
    /// Calendar dates (or date-times) stored as strings.
    Date,
}

impl ColumnType {
    /// Get a lowercase name for the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single cell value.
///
/// `Null` means "absent / not provided". It is exempt from type checks but not
/// from the `required` rule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => f.write_str("null"),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::String(s) => f.write_str(s),
        }
    }
}

/// Kind of a declarative column rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Required,
    Min,
    Max,
    Pattern,
    #[serde(alias = "minLength")]
    MinLength,
    #[serde(alias = "maxLength")]
    MaxLength,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Min => "min",
            RuleKind::Max => "max",
            RuleKind::Pattern => "pattern",
            RuleKind::MinLength => "min_length",
            RuleKind::MaxLength => "max_length",
        }
    }
}

/// Operand attached to a rule: a bound for `min`/`max`/lengths, a regex for `pattern`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleOperand {
    Number(f64),
    Text(String),
}

impl RuleOperand {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RuleOperand::Number(n) => Some(*n),
            RuleOperand::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RuleOperand::Text(s) => Some(s),
            RuleOperand::Number(_) => None,
        }
    }
}

impl fmt::Display for RuleOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleOperand::Number(n) => write!(f, "{}", n),
            RuleOperand::Text(s) => f.write_str(s),
        }
    }
}

/// A per-column constraint evaluated against every cell of that column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Rule kind.
    #[serde(rename = "type", alias = "kind")]
    pub kind: RuleKind,
    /// Bound or pattern, depending on kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RuleOperand>,
    /// Caller-supplied message replacing the default one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationRule {
    fn with_operand(kind: RuleKind, value: Option<RuleOperand>) -> Self {
        Self {
            kind,
            value,
            message: None,
        }
    }

    /// Value must not be null or empty.
    pub fn required() -> Self {
        Self::with_operand(RuleKind::Required, None)
    }

    /// Numeric values must be `>= min`.
    pub fn min(min: f64) -> Self {
        Self::with_operand(RuleKind::Min, Some(RuleOperand::Number(min)))
    }

    /// Numeric values must be `<= max`.
    pub fn max(max: f64) -> Self {
        Self::with_operand(RuleKind::Max, Some(RuleOperand::Number(max)))
    }

    /// String values must match the regular expression.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::with_operand(RuleKind::Pattern, Some(RuleOperand::Text(pattern.into())))
    }

    pub fn min_length(len: usize) -> Self {
        Self::with_operand(RuleKind::MinLength, Some(RuleOperand::Number(len as f64)))
    }

    pub fn max_length(len: usize) -> Self {
        Self::with_operand(RuleKind::MaxLength, Some(RuleOperand::Number(len as f64)))
    }

    /// Override the default message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_untagged_serde() {
        let values: Vec<CellValue> = serde_json::from_str(r#"[null, true, 1.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                CellValue::Null,
                CellValue::Boolean(true),
                CellValue::Number(1.5),
                CellValue::String("x".to_string()),
            ]
        );
        assert_eq!(serde_json::to_string(&CellValue::Null).unwrap(), "null");
    }

    #[test]
    fn test_rule_deserialize() {
        let rule: ValidationRule =
            serde_json::from_str(r#"{"type": "minLength", "value": 3, "message": "short"}"#)
                .unwrap();
        assert_eq!(rule.kind, RuleKind::MinLength);
        assert_eq!(rule.value, Some(RuleOperand::Number(3.0)));
        assert_eq!(rule.message.as_deref(), Some("short"));

        let rule: ValidationRule = serde_json::from_str(r#"{"type": "pattern", "value": "^a"}"#).unwrap();
        assert_eq!(rule, ValidationRule::pattern("^a"));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ColumnType::default(), ColumnType::String);
        assert_eq!(CellValue::default(), CellValue::Null);
    }

    #[test]
    fn test_option_into_cell() {
        let none: Option<&str> = None;
        assert_eq!(CellValue::from(none), CellValue::Null);
        assert_eq!(CellValue::from(Some(3)), CellValue::Number(3.0));
    }
}

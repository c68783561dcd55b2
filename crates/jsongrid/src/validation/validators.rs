//! Pure functions checking cells against column types and rules.

use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;

use super::violation::{ValidationError, ViolationKind};
use crate::error::{GridError, Result};
use crate::inference::parse_date;
use crate::schema::{CellValue, Column, ColumnType, Row, RuleKind, ValidationRule};

const BOOLEAN_WORDS: &[&str] = &["true", "false", "yes", "no", "1", "0"];

fn pattern_operand(rule: &ValidationRule) -> Option<&str> {
    if rule.kind != RuleKind::Pattern {
        return None;
    }
    rule.value.as_ref()?.as_str()
}

/// Check that every `pattern` rule in the list compiles.
pub fn check_rule_patterns(column: &str, rules: &[ValidationRule]) -> Result<()> {
    for pattern in rules.iter().filter_map(pattern_operand) {
        Regex::new(pattern).map_err(|source| GridError::InvalidPattern {
            column: column.to_string(),
            source,
        })?;
    }
    Ok(())
}

/// A column with its `pattern` operands compiled, one slot per rule.
struct ColumnCheck<'a> {
    column: &'a Column,
    patterns: Vec<Option<Regex>>,
}

impl<'a> ColumnCheck<'a> {
    fn new(column: &'a Column) -> Self {
        let patterns = column
            .validation
            .iter()
            .map(|rule| {
                let pattern = pattern_operand(rule)?;
                match Regex::new(pattern) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        tracing::warn!(
                            column = %column.key,
                            pattern,
                            error = %e,
                            "Skipping pattern rule that does not compile"
                        );
                        None
                    }
                }
            })
            .collect();
        Self { column, patterns }
    }

    fn check(&self, value: &CellValue) -> Vec<ValidationError> {
        let column = self.column;
        let mut errors = Vec::new();

        if !conforms_to_type(value, column.column_type) {
            errors.push(ValidationError::new(
                ViolationKind::Type,
                type_message(column.column_type),
                &column.key,
            ));
        }

        errors.extend(
            column
                .validation
                .iter()
                .zip(&self.patterns)
                .filter_map(|(rule, re)| evaluate_rule(value, rule, re.as_ref(), &column.key)),
        );
        errors
    }
}

/// Does a non-null value conform to the column type?
pub fn conforms_to_type(value: &CellValue, column_type: ColumnType) -> bool {
    match (column_type, value) {
        (_, CellValue::Null) | (ColumnType::String, _) => true,
        (ColumnType::Number, CellValue::Number(_)) => true,
        (ColumnType::Number, CellValue::String(s)) => {
            let trimmed = s.trim();
            !trimmed.is_empty() && trimmed.parse::<f64>().is_ok_and(f64::is_finite)
        }
        (ColumnType::Boolean, CellValue::Boolean(_)) => true,
        (ColumnType::Boolean, CellValue::String(s)) => {
            BOOLEAN_WORDS.iter().any(|w| s.eq_ignore_ascii_case(w))
        }
        (ColumnType::Date, CellValue::String(s)) => parse_date(s).is_some(),
        _ => false,
    }
}

fn type_message(column_type: ColumnType) -> &'static str {
    match column_type {
        ColumnType::Number => "Must be a valid number",
        ColumnType::Boolean => "Must be true or false",
        ColumnType::Date => "Must be a valid date",
        ColumnType::String => "Must be text",
    }
}

/// Evaluate one rule. `None` when the rule passes or does not apply to the value.
fn evaluate_rule(
    value: &CellValue,
    rule: &ValidationRule,
    pattern: Option<&Regex>,
    column: &str,
) -> Option<ValidationError> {
    let bound = rule.value.as_ref().and_then(|o| o.as_f64());

    let default_message = match (rule.kind, value) {
        (RuleKind::Required, CellValue::Null) => "This field is required".to_string(),
        (RuleKind::Required, CellValue::String(s)) if s.is_empty() => {
            "This field is required".to_string()
        }
        (RuleKind::Min, CellValue::Number(n)) => {
            let min = bound?;
            if *n >= min {
                return None;
            }
            format!("Must be at least {}", min)
        }
        (RuleKind::Max, CellValue::Number(n)) => {
            let max = bound?;
            if *n <= max {
                return None;
            }
            format!("Must be at most {}", max)
        }
        (RuleKind::Pattern, CellValue::String(s)) => {
            let re = pattern?;
            if re.is_match(s) {
                return None;
            }
            "Invalid format".to_string()
        }
        (RuleKind::MinLength, CellValue::String(s)) => {
            let min = bound?;
            if (s.chars().count() as f64) >= min {
                return None;
            }
            format!("Must be at least {} characters", min)
        }
        (RuleKind::MaxLength, CellValue::String(s)) => {
            let max = bound?;
            if (s.chars().count() as f64) <= max {
                return None;
            }
            format!("Must be at most {} characters", max)
        }
        _ => return None,
    };

    let message = rule.message.clone().unwrap_or(default_message);
    Some(ValidationError::new(rule.kind.into(), message, column))
}

/// Validate one cell against its column.
///
/// A type error and rule errors can appear together; rules run in declaration order.
pub fn validate_cell(value: &CellValue, column: &Column) -> Vec<ValidationError> {
    ColumnCheck::new(column).check(value)
}

fn check_row(row: &Row, checks: &[ColumnCheck<'_>]) -> IndexMap<String, Vec<ValidationError>> {
    checks
        .iter()
        .filter_map(|check| {
            let errors = match row.cells.get(&check.column.key) {
                Some(value) => check.check(value),
                None => check.check(&CellValue::Null),
            };
            (!errors.is_empty()).then(|| (check.column.key.clone(), errors))
        })
        .collect()
}

/// Validate every cell of a row. Only columns with errors appear in the result.
pub fn validate_row(row: &Row, columns: &[Column]) -> IndexMap<String, Vec<ValidationError>> {
    let checks: Vec<ColumnCheck<'_>> = columns.iter().map(ColumnCheck::new).collect();
    check_row(row, &checks)
}

/// Return new rows carrying fresh errors. Ids and cells are kept; inputs are untouched.
///
/// Patterns are compiled once per column for the whole pass.
pub fn validate_all_rows(rows: &[Arc<Row>], columns: &[Column]) -> Vec<Arc<Row>> {
    let checks: Vec<ColumnCheck<'_>> = columns.iter().map(ColumnCheck::new).collect();
    rows.iter()
        .map(|row| {
            Arc::new(Row {
                id: row.id.clone(),
                cells: row.cells.clone(),
                errors: check_row(row, &checks),
            })
        })
        .collect()
}

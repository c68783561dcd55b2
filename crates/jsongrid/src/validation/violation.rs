//! Cell-level validation errors.

use serde::{Deserialize, Serialize};

use crate::schema::RuleKind;

/// What produced a validation error: a type check or one of the declarative rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The value does not conform to the column type.
    Type,
    Required,
    Min,
    Max,
    Pattern,
    MinLength,
    MaxLength,
}

impl ViolationKind {
    pub fn label(&self) -> &'static str {
        match self {
            ViolationKind::Type => "Type Mismatch",
            ViolationKind::Required => "Required",
            ViolationKind::Min => "Minimum",
            ViolationKind::Max => "Maximum",
            ViolationKind::Pattern => "Pattern",
            ViolationKind::MinLength => "Minimum Length",
            ViolationKind::MaxLength => "Maximum Length",
        }
    }
}

impl From<RuleKind> for ViolationKind {
    fn from(kind: RuleKind) -> Self {
        match kind {
            RuleKind::Required => ViolationKind::Required,
            RuleKind::Min => ViolationKind::Min,
            RuleKind::Max => ViolationKind::Max,
            RuleKind::Pattern => ViolationKind::Pattern,
            RuleKind::MinLength => ViolationKind::MinLength,
            RuleKind::MaxLength => ViolationKind::MaxLength,
        }
    }
}

/// A single failed check on one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub rule: ViolationKind,
    pub message: String,
    /// Key of the column the cell belongs to.
    pub column: String,
}

impl ValidationError {
    pub fn new(rule: ViolationKind, message: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
            column: column.into(),
        }
    }
}

//! Validation engine: type conformance plus declarative column rules.

mod validators;
mod violation;

pub use validators::{
    check_rule_patterns, conforms_to_type, validate_all_rows, validate_cell, validate_row,
};
pub use violation::{ValidationError, ViolationKind};

//! Type inference for JSON record columns.

mod dates;
mod types;

pub use dates::{looks_like_date, parse_date};
pub use types::{TypeTally, classify_value, infer_column_type};

//! Fuzz target for date detection and type validation.
//!
//! This fuzzer tests that:
//! 1. Date parsing never panics on any string
//! 2. Anything inference calls a date also passes the date type check

#![no_main]

use jsongrid::inference::{looks_like_date, parse_date};
use jsongrid::validation::conforms_to_type;
use jsongrid::{CellValue, ColumnType};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(content) = std::str::from_utf8(data) {
        let _ = parse_date(content);
        if looks_like_date(content) {
            assert!(conforms_to_type(&CellValue::from(content), ColumnType::Date));
        }
    }
});

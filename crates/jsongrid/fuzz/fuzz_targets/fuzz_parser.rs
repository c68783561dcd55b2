//! Fuzz target for the JSON record parser and store.
//!
//! This fuzzer tests that parsing and loading:
//! 1. Never panic on malformed input
//! 2. Always leave the store in `loaded` or `error`, never `loading`

#![no_main]

use jsongrid::{DataStore, Parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = Parser::new().parse(text, "fuzz.json");

        let mut store = DataStore::default();
        store.load(text, "fuzz.json");
        assert!(matches!(store.state().name(), "loaded" | "error"));
    }
});

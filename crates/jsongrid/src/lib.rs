//! jsongrid: load, review, correct and export JSON record arrays as a typed table.
//!
//! A JSON array of flat objects is parsed into a [`DataSet`] whose column types are
//! inferred by majority vote, every cell is checked against its column type and any
//! declarative rules, and the result is held by a [`DataStore`] that callers edit
//! cell by cell.
//!
//! # Core Principles
//!
//! - **Non-blocking validation**: invalid values are stored and flagged, never rejected
//! - **Structural sharing**: an edit replaces only the touched row; other rows keep identity
//! - **State, not exceptions**: store failures are observed through [`DataStoreState`]
//!
//! # Example
//!
//! ```no_run
//! use jsongrid::{DataStore, StoreConfig, ValidationRule};
//!
//! let config = StoreConfig::default().with_rules("age", [ValidationRule::min(0.0)]);
//! let mut store = DataStore::new(config);
//! store.subscribe(|| println!("store changed"));
//!
//! store.load(r#"[{"name":"Alice","age":-1}]"#, "people.json");
//! println!("Errors: {}", store.error_count());
//!
//! let id = store.rows()[0].id.to_string();
//! store.update_cell(&id, "age", 30);
//! println!("Errors: {}", store.error_count());
//! ```

pub mod error;
pub mod inference;
pub mod input;
pub mod schema;
pub mod store;
pub mod validation;

pub use error::{ErrorKind, GridError, Result};
pub use input::{FileSource, LocalFile, MemoryFile, Parser, ParserConfig, parse};
pub use schema::{
    CellEdit, CellValue, Column, ColumnType, DataSet, DataSetMetadata, Row, RowId, RuleKind,
    RuleOperand, ValidationRule,
};
pub use store::{DataStore, DataStoreState, StoreConfig, StoreError, SubscriptionId};
pub use validation::{ValidationError, ViolationKind, validate_all_rows, validate_cell, validate_row};

//! Example: load a JSON file, list validation errors, fix them and export.
//!
//! Usage:
//!   cargo run --example review -- <file_path>
//!
//! Set `RUST_LOG=jsongrid=debug` to see parser and store logs.

use std::env;

use jsongrid::{
    CellEdit, CellValue, DataStore, DataStoreState, LocalFile, StoreConfig, ValidationRule,
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo run --example review -- <file_path>");
        std::process::exit(1);
    }

    let config = StoreConfig::default()
        .with_rules("email", [ValidationRule::pattern(r"^[^@\s]+@[^@\s]+$")]);
    let mut store = DataStore::new(config);
    store.subscribe(|| println!("-- store updated"));

    let file = LocalFile::open(&args[1]).await?;
    store.load_from_file(&file).await;

    let separator = "=".repeat(80);
    println!("{}", separator);
    match store.state() {
        DataStoreState::Loaded(data) => {
            println!(
                "Loaded {} rows x {} columns from {}",
                data.metadata.row_count, data.metadata.column_count, data.metadata.source_name
            );
        }
        DataStoreState::Error(err) => {
            println!("Load failed [{}]: {}", err.code(), err.message);
            return Ok(());
        }
        DataStoreState::Idle | DataStoreState::Loading => unreachable!("load always settles"),
    }
    println!("{}", separator);

    println!("## Columns");
    for column in store.columns() {
        println!("  {:20} {:10} {}", column.key, column.column_type, column.label);
    }
    println!();

    println!("## Errors ({} cells)", store.error_count());
    for row in store.rows_with_errors() {
        for (key, errors) in &row.errors {
            for error in errors {
                println!("  {} / {}: {}", row.id, key, error.message);
            }
        }
    }
    println!();

    // Blank out every invalid cell in one batch, then export.
    let edits: Vec<_> = store
        .rows_with_errors()
        .iter()
        .flat_map(|row| {
            row.errors
                .keys()
                .map(|key| CellEdit::new(row.id.as_str(), key.as_str(), CellValue::Null))
                .collect::<Vec<_>>()
        })
        .collect();
    store.batch_update_cells(edits);

    println!("## Export ({} errors remaining)", store.error_count());
    match serde_json::to_string_pretty(&store.export_data()) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize export: {}", e),
    }

    Ok(())
}

//! Validator performance benchmarks.
//!
//! Compares full-table validation against single-cell edits in the store.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jsongrid::{
    CellValue, Column, ColumnType, DataStore, StoreConfig, ValidationRule, validate_all_rows,
    validate_cell,
};

fn generate_people(rows: usize) -> String {
    let records: Vec<String> = (0..rows)
        .map(|i| {
            format!(
                r#"{{"name":"Person {i}","age":{},"email":"p{i}@example.org","joined":"2024-01-{:02}"}}"#,
                i % 90,
                (i % 28) + 1
            )
        })
        .collect();
    format!("[{}]", records.join(","))
}

fn rules_config() -> StoreConfig {
    StoreConfig::default()
        .with_rules("name", [ValidationRule::required(), ValidationRule::max_length(40)])
        .with_rules("age", [ValidationRule::min(18.0), ValidationRule::max(65.0)])
        .with_rules("email", [ValidationRule::pattern(r"^[^@\s]+@[^@\s]+$")])
}

/// Benchmark single-cell validation per rule type.
fn bench_validate_cell(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_cell");

    let cases = [
        (
            "number",
            Column::new("age", ColumnType::Number)
                .with_rules(vec![ValidationRule::min(0.0), ValidationRule::max(120.0)]),
            CellValue::from("42"),
        ),
        (
            "date",
            Column::new("joined", ColumnType::Date),
            CellValue::from("2024-01-15T10:30:00 +02:00"),
        ),
        (
            "pattern",
            Column::new("email", ColumnType::String)
                .with_rules(vec![ValidationRule::pattern(r"^[^@\s]+@[^@\s]+$")]),
            CellValue::from("someone@example.org"),
        ),
    ];

    for (name, column, value) in cases.iter() {
        group.bench_with_input(BenchmarkId::new("type", name), value, |b, value| {
            b.iter(|| black_box(validate_cell(value, column)))
        });
    }

    group.finish();
}

/// Benchmark full validation against a localized edit.
fn bench_full_vs_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_vs_edit");

    for rows in [1_000, 10_000].iter() {
        let mut store = DataStore::new(rules_config());
        store.load(&generate_people(*rows), "bench.json");
        let data = store.data_set().cloned().unwrap();
        let target = data.rows[rows / 2].id.to_string();

        group.bench_with_input(BenchmarkId::new("validate_all_rows", rows), &data, |b, data| {
            b.iter(|| black_box(validate_all_rows(&data.rows, &data.columns)))
        });
        group.bench_function(BenchmarkId::new("update_cell", rows), |b| {
            b.iter(|| store.update_cell(&target, "age", black_box(70)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_validate_cell, bench_full_vs_edit);
criterion_main!(benches);

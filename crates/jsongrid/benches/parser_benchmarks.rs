//! Parser performance benchmarks.
//!
//! Measures parsing and type inference across record counts and column counts.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use jsongrid::Parser;

/// Generate a synthetic JSON array with the specified number of records and fields.
fn generate_json_data(rows: usize, cols: usize) -> String {
    let mut data = String::from("[");

    for row in 0..rows {
        if row > 0 {
            data.push(',');
        }
        data.push('{');
        for col in 0..cols {
            if col > 0 {
                data.push(',');
            }
            data.push_str(&format!("\"field_{}\":", col + 1));
            // Mix of data types
            match col % 5 {
                0 => data.push_str(&format!("\"ID_{:06}\"", row)),
                1 => data.push_str(&format!("{:.2}", row as f64 * 1.5)),
                2 => data.push_str(&format!("\"2023-{:02}-{:02}\"", (row % 12) + 1, (row % 28) + 1)),
                3 => data.push_str(if row % 2 == 0 { "true" } else { "false" }),
                4 => data.push_str(&format!("{{\"group\":\"Category_{}\"}}", row % 10)),
                _ => unreachable!(),
            }
        }
        data.push('}');
    }

    data.push(']');
    data
}

/// Benchmark parsing arrays of various sizes.
fn bench_parse_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_rows");
    let parser = Parser::new();

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_json_data(*rows, 10);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| black_box(parser.parse(data, "bench.json").unwrap()))
        });
    }

    group.finish();
}

/// Benchmark parsing with varying column counts.
fn bench_parse_column_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_column_scaling");
    let parser = Parser::new();

    let rows = 1_000;
    for cols in [5, 10, 20, 50].iter() {
        let data = generate_json_data(rows, *cols);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("cols", cols), &data, |b, data| {
            b.iter(|| black_box(parser.parse(data, "bench.json").unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_rows, bench_parse_column_scaling);
criterion_main!(benches);

//! Criterion micro-benchmarks for configuration normalization and output decoding.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use brume_bench::{make_config_text, make_grid_output, make_scalar_output};
use brume_config::normalize;
use brume_exec::decode::{grid_tail, matrix_tail, parse_table, series_tail};

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_owned).collect()
}

/// Benchmark: normalize a 200-species model file (~400 directives).
fn bench_normalize_model(c: &mut Criterion) {
    let lines = split_lines(&make_config_text(200));

    c.bench_function("normalize_model_200_species", |b| {
        b.iter(|| {
            let out = normalize(black_box(&lines));
            black_box(out);
        });
    });
}

/// Benchmark: parse a headered 20-species count table with 1000 rows,
/// then slice one species column from the tail.
fn bench_parse_scalar_table(c: &mut Criterion) {
    let lines = split_lines(&make_scalar_output(20, 1000));

    c.bench_function("parse_scalar_table_20x1000", |b| {
        b.iter(|| {
            let table = parse_table(black_box(&lines), true).unwrap();
            let series = series_tail(&table, "sp7", 101);
            black_box(series);
        });
    });
}

/// Benchmark: parse an unheadered coordinate table and keep the tail
/// as a matrix.
fn bench_parse_matrix_table(c: &mut Criterion) {
    let mut text = String::new();
    for step in 0..1000 {
        text.push_str(&format!(
            "{} {} {} {} {} {} {}\n",
            step as f64 * 0.01,
            step % 10,
            step % 7,
            step % 5,
            step % 11,
            step % 13,
            step % 3,
        ));
    }
    let lines = split_lines(&text);

    c.bench_function("matrix_tail_6x1000", |b| {
        b.iter(|| {
            let table = parse_table(black_box(&lines), false).unwrap();
            let matrix = matrix_tail(&table, 101);
            black_box(matrix);
        });
    });
}

/// Benchmark: reshape 500 positional grid blocks of 30x40 counts.
fn bench_grid_reshape(c: &mut Criterion) {
    let lines = split_lines(&make_grid_output(500, 30, 40));

    c.bench_function("grid_tail_500x30x40", |b| {
        b.iter(|| {
            let grid = grid_tail(black_box(&lines), (30, 40), 101).unwrap();
            black_box(grid);
        });
    });
}

criterion_group!(
    benches,
    bench_normalize_model,
    bench_parse_scalar_table,
    bench_parse_matrix_table,
    bench_grid_reshape,
);
criterion_main!(benches);

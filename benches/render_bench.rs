//! Benchmarks for tabmark rendering.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tabmark::cells;
use tabmark::latex::escape;
use tabmark::prelude::*;

fn build_table(rows: usize) -> Table {
    let mut builder = Table::builder()
        .row(Row::header(["Name", "Age", "City", "Score", "Ratio"]))
        .column_format(["{}", "{:d}", "{}", "{:.2f}", "{:.1%}"]);
    for i in 0..rows {
        let i = i64::try_from(i).unwrap_or(i64::MAX);
        if i % 10 == 0 {
            builder = builder.row(cells![
                format!("User{i}"),
                Cell::new("Remote & Co_op")
                    .with_format("{}")
                    .with_column_span(2)
                    .unwrap(),
                80.5,
                0.25
            ]);
        } else {
            builder = builder.row(cells![format!("User{i}"), 20 + i, "New York", 80.5, 0.25]);
        }
    }
    builder.build().unwrap()
}

fn benchmark_table_build(c: &mut Criterion) {
    c.bench_function("table_build_100x5", |b| {
        b.iter(|| black_box(build_table(black_box(100))));
    });
}

fn benchmark_table_html(c: &mut Criterion) {
    let small = build_table(3);
    c.bench_function("table_html_3x5", |b| {
        b.iter(|| black_box(small.to_html().unwrap()));
    });

    let large = build_table(1000);
    c.bench_function("table_html_1000x5", |b| {
        b.iter(|| black_box(large.to_html().unwrap()));
    });
}

fn benchmark_table_latex(c: &mut Criterion) {
    let small = build_table(3);
    c.bench_function("table_latex_3x5", |b| {
        b.iter(|| black_box(small.to_latex().unwrap()));
    });

    let large = build_table(1000);
    c.bench_function("table_latex_1000x5", |b| {
        b.iter(|| black_box(large.to_latex().unwrap()));
    });
}

fn benchmark_escape(c: &mut Criterion) {
    c.bench_function("latex_escape_plain", |b| {
        b.iter(|| black_box(escape(black_box("plain text without specials"))));
    });
    c.bench_function("latex_escape_mixed", |b| {
        b.iter(|| black_box(escape(black_box(r"R&D_costs: $5 {est.} ~ \r\n"))));
    });
}

criterion_group!(
    benches,
    benchmark_table_build,
    benchmark_table_html,
    benchmark_table_latex,
    benchmark_escape,
);
criterion_main!(benches);

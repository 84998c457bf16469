//! Criterion benchmarks for adlens_core
//!
//! Run with: cargo bench -p adlens_core

use adlens_core::model::{CellValue, Row, Table};
use adlens_core::{GROUPING_COLUMN, MetricName, aggregate, read_delimited};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn create_table(rows: usize, products: usize) -> Table {
    let rows = (0..rows)
        .map(|i| {
            let mut cells = vec![(
                GROUPING_COLUMN.to_string(),
                CellValue::text(format!("Produto {}", i % products)),
            )];
            for metric in MetricName::ALL {
                let cell = if metric.is_ratio() || metric == MetricName::Ctr {
                    CellValue::text(format!("{}.{}%", i % 100, i % 10))
                } else {
                    CellValue::Int((i * 7) as i64)
                };
                cells.push((metric.column().to_string(), cell));
            }
            cells.into_iter().collect::<Row>()
        })
        .collect();
    Table::from_rows(rows)
}

fn create_csv(rows: usize, products: usize) -> String {
    let mut out = String::from(GROUPING_COLUMN);
    for metric in MetricName::ALL {
        out.push(',');
        out.push_str(metric.column());
    }
    out.push('\n');
    for i in 0..rows {
        out.push_str(&format!("Produto {}", i % products));
        for metric in MetricName::ALL {
            if metric.is_ratio() {
                out.push_str(&format!(",{}%", i % 100));
            } else {
                out.push_str(&format!(",{}", i * 3));
            }
        }
        out.push('\n');
    }
    out
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for rows in [100, 1_000, 10_000] {
        let table = create_table(rows, 50);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &table, |b, table| {
            b.iter(|| aggregate(black_box(table)))
        });
    }

    group.finish();
}

fn bench_read_delimited(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_delimited");

    for rows in [1_000, 10_000] {
        let csv = create_csv(rows, 50);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &csv, |b, csv| {
            b.iter(|| read_delimited(black_box(csv.as_bytes())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_read_delimited);
criterion_main!(benches);

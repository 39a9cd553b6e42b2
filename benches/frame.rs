//! Frame block benchmarks
//!
//! These benchmarks measure row append throughput, window slicing, and
//! the binary wire codec across representative block shapes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use frameblock::{FrameBlock, ValueKind};

fn mixed_block(rows: usize) -> FrameBlock {
    let mut block = FrameBlock::with_schema(vec![
        ValueKind::String,
        ValueKind::Boolean,
        ValueKind::Int,
        ValueKind::Float,
    ]);
    for i in 0..rows {
        let name = format!("row-{}", i);
        let int = (i as i64).to_string();
        let float = (i as f64 * 0.5).to_string();
        block
            .append_row_strings(&[
                Some(name.as_str()),
                Some(if i % 2 == 0 { "true" } else { "false" }),
                Some(int.as_str()),
                Some(float.as_str()),
            ])
            .unwrap();
    }
    block
}

fn bench_append_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_row");

    for rows in [1_000usize, 10_000] {
        group.bench_with_input(BenchmarkId::new("strings", rows), &rows, |b, &rows| {
            b.iter(|| black_box(mixed_block(rows)));
        });
    }

    group.finish();
}

fn bench_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("slice");
    let block = mixed_block(10_000);

    for window in [100usize, 5_000] {
        group.bench_with_input(BenchmarkId::new("rows", window), &window, |b, &window| {
            b.iter(|| black_box(block.slice(0, window - 1, 0, 3).unwrap()));
        });
    }

    group.finish();
}

fn bench_wire_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("wire_codec");
    let block = mixed_block(10_000);
    let bytes = block.serialize().unwrap();

    group.bench_function("serialize_10k", |b| {
        b.iter(|| black_box(block.serialize().unwrap()));
    });
    group.bench_function("deserialize_10k", |b| {
        b.iter(|| black_box(FrameBlock::deserialize(black_box(&bytes)).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_append_row, bench_slice, bench_wire_codec);
criterion_main!(benches);

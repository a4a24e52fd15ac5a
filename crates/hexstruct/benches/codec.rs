// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Bench code readability over pedantic
#![allow(clippy::cast_possible_truncation)] // Bench parameters
#![allow(clippy::missing_panics_doc)] // Benches panic on failure

//! Decode/encode throughput for hexstruct.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hexstruct::{
    parse_schema, Decoder, Encoder, Leaf, PrimitiveRegistry, Record, SchemaCatalog,
};

// ============================================================================
// Fixtures
// ============================================================================

fn catalog() -> SchemaCatalog {
    parse_schema(
        "struct Point\nint x\nint y\n\
         struct Reading\nstring sensor\nint value\nPoint at\n",
    )
    .expect("schema")
}

fn document(count: usize) -> Record {
    let records = (0..count)
        .map(|i| {
            let at = Record::new(
                "Point",
                ["int", "int"],
                vec![Leaf::int(i as u32).into(), Leaf::int((i * 3) as u32).into()],
            );
            Record::new(
                "Reading",
                ["string", "int", "Point"],
                vec![
                    Leaf::string(format!("sensor-{}", i % 16)).into(),
                    Leaf::int((i * 7) as u32).into(),
                    at.into(),
                ],
            )
        })
        .collect();
    Record::document(records)
}

// ============================================================================
// Benches
// ============================================================================

fn bench_decode(c: &mut Criterion) {
    let catalog = catalog();
    let registry = PrimitiveRegistry::builtin();
    let encoder = Encoder::new(&catalog, &registry);
    let decoder = Decoder::new(&catalog, &registry);

    let mut group = c.benchmark_group("decode");
    for count in [10usize, 100, 1000] {
        let hex = encoder.encode_document(&document(count)).expect("encode");
        group.throughput(Throughput::Bytes(hex.len() as u64));
        group.bench_with_input(BenchmarkId::new("readings", count), &hex, |b, hex| {
            b.iter(|| decoder.decode_document(black_box(hex)).expect("decode"));
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let catalog = catalog();
    let registry = PrimitiveRegistry::builtin();
    let encoder = Encoder::new(&catalog, &registry);

    let mut group = c.benchmark_group("encode");
    for count in [10usize, 100, 1000] {
        let doc = document(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("readings", count), &doc, |b, doc| {
            b.iter(|| encoder.encode_document(black_box(doc)).expect("encode"));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode);
criterion_main!(benches);

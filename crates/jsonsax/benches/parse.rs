//! Benchmark – `jsonsax::Parser` throughput by chunking strategy
#![allow(missing_docs)]

use std::{fmt::Write, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use jsonsax::{Flow, Parser};

/// A deterministic array of records, at least `target_len` bytes long.
fn make_records(target_len: usize) -> String {
    let mut s = String::with_capacity(target_len + 128);
    s.push('[');
    let mut i = 0u64;
    while s.len() < target_len {
        if i > 0 {
            s.push(',');
        }
        write!(
            s,
            r#"{{"id":{i},"name":"user {i}","score":{}.{},"tags":["a","b\n"],"active":{}}}"#,
            i * 7 % 1000,
            i % 100,
            i % 2 == 0
        )
        .unwrap();
        i += 1;
    }
    s.push(']');
    s
}

/// Feed `payload` in chunks of `chunk_size` and count the events seen.
fn run_parser(payload: &[u8], chunk_size: usize) -> usize {
    let mut events = 0usize;
    let mut parser = Parser::builder()
        .on_object_key(|_| {
            events += 1;
            Ok(Flow::Continue)
        })
        .build();
    for chunk in payload.chunks(chunk_size) {
        parser.feed(chunk).unwrap();
    }
    parser.finish().unwrap();
    drop(parser);
    events
}

fn bench_chunking(c: &mut Criterion) {
    let payload = make_records(100_000);
    let mut group = c.benchmark_group("chunking");
    group.throughput(Throughput::Bytes(payload.len() as u64));

    for &chunk_size in &[1usize, 64, 4_096, payload.len()] {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            &chunk_size,
            |b, &size| {
                b.iter(|| black_box(run_parser(black_box(payload.as_bytes()), size)));
            },
        );
    }
    group.finish();
}

fn bench_long_string(c: &mut Criterion) {
    let payload = format!("\"{}\"", "x".repeat(1_000_000));
    let mut group = c.benchmark_group("long_string");
    group.throughput(Throughput::Bytes(payload.len() as u64));

    for &chunk_size in &[64usize, 65_536, payload.len()] {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            &chunk_size,
            |b, &size| {
                b.iter(|| {
                    let mut len = 0;
                    let mut parser = Parser::builder()
                        .on_string(|s| {
                            len += s.len();
                            Ok(Flow::Continue)
                        })
                        .build();
                    for chunk in payload.as_bytes().chunks(size) {
                        parser.feed(chunk).unwrap();
                    }
                    parser.finish().unwrap();
                    drop(parser);
                    black_box(len)
                });
            },
        );
    }
    group.finish();
}

fn bench_deep_nesting(c: &mut Criterion) {
    let depth = 100_000;
    let payload = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    c.bench_function("deep_nesting", |b| {
        b.iter(|| {
            let mut parser = Parser::builder().build();
            parser.feed(black_box(payload.as_bytes())).unwrap();
            black_box(parser.finish().unwrap())
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(5));
    targets = bench_chunking, bench_long_string, bench_deep_nesting
}
criterion_main!(benches);

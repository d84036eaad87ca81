use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use payload_redactor::bench_support::{bench_engine, PayloadFixture, PayloadShape};
use payload_redactor_engine::RedactionMode;

const SHAPES: [(&str, PayloadShape); 3] = [
    ("small", PayloadShape::SMALL),
    ("medium", PayloadShape::MEDIUM),
    ("large", PayloadShape::LARGE),
];

const MODES: [RedactionMode; 3] = [
    RedactionMode::Mask,
    RedactionMode::Nullify,
    RedactionMode::Remove,
];

fn bench_tree_redaction(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_redaction");
    group
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(2));

    for (label, shape) in SHAPES {
        let fixture = PayloadFixture::new(shape, 42);
        group.throughput(Throughput::Bytes(fixture.bytes.len() as u64));

        for mode in MODES {
            let engine = bench_engine(mode);
            group.bench_with_input(
                BenchmarkId::new(mode.as_str(), label),
                &fixture.value,
                |b, value| {
                    b.iter(|| black_box(engine.redact(value.clone())));
                },
            );
        }
    }

    group.finish();
}

fn bench_bounded_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("slice_redaction");
    group
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(2));

    let engine = bench_engine(RedactionMode::Mask);
    for (label, shape) in SHAPES {
        let fixture = PayloadFixture::new(shape, 42);
        group.throughput(Throughput::Bytes(fixture.bytes.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("parse_redact_serialize", label),
            &fixture.bytes,
            |b, bytes| {
                b.iter(|| {
                    let payload = engine.redact_slice(bytes).expect("bench payload redacts");
                    black_box(payload)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(redaction_latency, bench_tree_redaction, bench_bounded_slice);
criterion_main!(redaction_latency);

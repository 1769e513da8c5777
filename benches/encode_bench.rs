use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use kquote::{Config, Encoder};
use std::hint::black_box;

fn create_test_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

fn bench_encode_various_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [1024, 10_240, 102_400, 1_024_000].iter() {
        let data = create_test_data(*size);

        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut output = Vec::new();
                kquote::encode(black_box(&data[..]), &mut output).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_encode_worst_case(c: &mut Criterion) {
    // Every byte takes a three-character unit
    let data = vec![0x80u8; 10_240];

    c.bench_function("encode_worst_case", |b| {
        b.iter(|| {
            let mut output = Vec::new();
            kquote::encode(black_box(&data[..]), &mut output).unwrap();
        });
    });
}

fn bench_encode_best_case(c: &mut Criterion) {
    // Plain text, nothing to quote
    let data = vec![0x41u8; 10_240];

    c.bench_function("encode_best_case", |b| {
        b.iter(|| {
            let mut output = Vec::new();
            kquote::encode(black_box(&data[..]), &mut output).unwrap();
        });
    });
}

fn bench_encode_translate_newlines(c: &mut Criterion) {
    // Line endings pass through raw unless -l asks for them to be quoted
    let data: Vec<u8> = b"\r\n".iter().copied().cycle().take(10_240).collect();
    let mut group = c.benchmark_group("encode_newlines");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for translate in [false, true] {
        let encoder = Encoder::with_config(Config::default().with_translate_newlines(translate));
        group.bench_with_input(BenchmarkId::from_parameter(translate), &translate, |b, _| {
            b.iter(|| {
                let mut output = Vec::new();
                encoder.encode(black_box(&data[..]), &mut output).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_encode_various_sizes,
    bench_encode_worst_case,
    bench_encode_best_case,
    bench_encode_translate_newlines
);
criterion_main!(benches);

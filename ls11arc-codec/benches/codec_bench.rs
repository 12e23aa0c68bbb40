//! Performance benchmarks for the LS11 entry codec.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ls11arc_codec::{decode, encode};
use std::hint::black_box;

/// Test data patterns.
mod test_data {
    /// Uniform data - one long run (best compression).
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    /// Random data - no patterns (worst compression).
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Text-like data - realistic scenario.
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. ";
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let remaining = size - data.len();
            let chunk = remaining.min(text.len());
            data.extend_from_slice(&text[..chunk]);
        }
        data
    }
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    let patterns: [(&str, fn(usize) -> Vec<u8>); 3] = [
        ("uniform", test_data::uniform),
        ("random", test_data::random),
        ("text", test_data::text_like),
    ];

    let size = 8 * 1024;
    for (name, generator) in patterns {
        let data = generator(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &data, |b, data| {
            b.iter(|| {
                let entry = encode(black_box(data)).unwrap();
                black_box(entry);
            });
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let patterns: [(&str, fn(usize) -> Vec<u8>); 3] = [
        ("uniform", test_data::uniform),
        ("random", test_data::random),
        ("text", test_data::text_like),
    ];

    let size = 8 * 1024;
    for (name, generator) in patterns {
        let original = generator(size);
        let entry = encode(&original).unwrap();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &entry, |b, entry| {
            b.iter(|| {
                let raw = decode(black_box(entry), size as u32).unwrap();
                black_box(raw);
            });
        });
    }

    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");

    let size = 4 * 1024;
    let data = test_data::text_like(size);

    group.throughput(Throughput::Bytes(size as u64));
    group.bench_function("text_4k", |b| {
        b.iter(|| {
            let entry = encode(black_box(&data)).unwrap();
            let raw = decode(&entry, size as u32).unwrap();
            black_box(raw);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_roundtrip);
criterion_main!(benches);

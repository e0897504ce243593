//! Benchmarks for board generation.

use std::hint::black_box;

use citrus_generator::BoardGenerator;
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for size in [8_usize, 12, 16] {
        group.bench_function(format!("{size}x{size}"), |b| {
            let mut generator = BoardGenerator::from_seed("bench");
            b.iter(|| black_box(generator.generate(size)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);

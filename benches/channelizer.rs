use channelizer_core::Channelizer;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use num_complex::Complex32;
use std::hint::black_box;

const INPUT_RATE_HZ: f64 = 10_000_000.0;

fn make_input(n: usize) -> Vec<Complex32> {
    (0..n)
        .map(|i| Complex32::new((i as f32 * 0.013).sin(), (i as f32 * 0.029).cos()))
        .collect()
}

fn bench_process_by_channel_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("Channelizer Process");
    let block = 8192usize;

    for &m in &[4usize, 8, 16, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(m), &m, |b, &m| {
            let mut chan = Channelizer::new(m, 0.0, 0.0, INPUT_RATE_HZ, block).unwrap();
            let input = make_input(block);
            b.iter(|| {
                chan.process(black_box(&input)).unwrap();
                black_box(chan.channel_output(0));
            });
        });
    }

    group.finish();
}

fn bench_process_by_block_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("Channelizer Block Sizes");
    let m = 16usize;

    for &block in &[256usize, 1024, 4096, 16384] {
        group.bench_with_input(BenchmarkId::from_parameter(block), &block, |b, &block| {
            let mut chan = Channelizer::new(m, 0.0, 0.0, INPUT_RATE_HZ, block).unwrap();
            let input = make_input(block);
            b.iter(|| {
                chan.process(black_box(&input)).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_process_by_channel_count, bench_process_by_block_size);
criterion_main!(benches);

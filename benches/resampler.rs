use channelizer_core::Resampler;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use num_complex::Complex32;
use std::hint::black_box;

fn make_input(n: usize) -> Vec<Complex32> {
    (0..n)
        .map(|i| Complex32::new((i as f32 * 0.017).sin(), (i as f32 * 0.031).cos()))
        .collect()
}

fn bench_process_by_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resampler Process");
    let block = 4096usize;

    let ratios: &[(f64, f64, &str)] = &[
        (48_000.0, 48_000.0, "bypass_1:1"),
        (48_000.0, 44_100.0, "interpolate_147:160"),
        (1_000_000.0, 250_000.0, "decimate_4:1"),
        (250_000.0, 1_000_000.0, "interpolate_1:4"),
    ];

    for &(r_in, r_out, label) in ratios {
        group.bench_with_input(BenchmarkId::from_parameter(label), &(r_in, r_out), |b, &(r_in, r_out)| {
            let mut resampler = Resampler::new(r_in, r_out, block).unwrap();
            let input = make_input(block);
            b.iter(|| {
                black_box(resampler.process(black_box(&input)).unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_process_by_ratio);
criterion_main!(benches);

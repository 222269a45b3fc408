use channelizer_core::FftPlan;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_forward_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("FFT Forward");

    for &n in &[2usize, 4, 8, 16, 32, 64, 256, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut plan = FftPlan::new(n).unwrap();
            let re: Vec<f32> = (0..n).map(|i| (i as f32 * 0.37).sin()).collect();
            let im: Vec<f32> = (0..n).map(|i| (i as f32 * 0.71).cos()).collect();
            let mut out_re = vec![0.0f32; n];
            let mut out_im = vec![0.0f32; n];

            b.iter(|| {
                plan.forward(black_box(&re), black_box(&im), &mut out_re, &mut out_im);
                black_box(&out_re);
            });
        });
    }

    group.finish();
}

fn bench_interleaved_vs_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("FFT Interleaved vs Split");
    let n = 32usize;

    group.bench_function("split", |b| {
        let mut plan = FftPlan::new(n).unwrap();
        let re: Vec<f32> = (0..n).map(|i| i as f32).collect();
        let im = vec![0.0f32; n];
        let mut out_re = vec![0.0f32; n];
        let mut out_im = vec![0.0f32; n];
        b.iter(|| {
            plan.forward(black_box(&re), black_box(&im), &mut out_re, &mut out_im);
        });
    });

    group.bench_function("interleaved", |b| {
        let mut plan = FftPlan::new(n).unwrap();
        let mut input = vec![0.0f32; 2 * n];
        for i in 0..n {
            input[2 * i] = i as f32;
        }
        let mut output = vec![0.0f32; 2 * n];
        b.iter(|| {
            plan.forward_interleaved(black_box(&input), &mut output);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_forward_by_size, bench_interleaved_vs_split);
criterion_main!(benches);

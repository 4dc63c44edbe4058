//! Criterion benchmarks for janus-dtw: exact vs. approximate alignment.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use janus_dtw::{ApproxDtw, ExactDtw, Signal};

fn make_sine_signal(n: usize, phase: f64) -> Signal {
    let values: Vec<f64> = (0..n).map(|i| (i as f64 * 0.1 + phase).sin()).collect();
    Signal::new(values).unwrap()
}

fn bench_exact_align(c: &mut Criterion) {
    let lengths = [64usize, 256, 1024];
    let mut group = c.benchmark_group("exact_align");

    for &len in &lengths {
        let a = make_sine_signal(len, 0.0);
        let b = make_sine_signal(len, 1.0);
        let dtw = ExactDtw::new();

        group.bench_with_input(BenchmarkId::from_parameter(len), &(a, b), |bencher, (a, b)| {
            bencher.iter(|| dtw.align(a.as_view(), b.as_view()));
        });
    }

    group.finish();
}

fn bench_approx_align(c: &mut Criterion) {
    let lengths = [256usize, 1024, 4096];
    let radii: &[usize] = &[1, 5, 20];
    let mut group = c.benchmark_group("approx_align");

    for &len in &lengths {
        for &radius in radii {
            let id = BenchmarkId::new(format!("len{len}"), format!("r{radius}"));
            let a = make_sine_signal(len, 0.0);
            let b = make_sine_signal(len, 1.0);
            let dtw = ApproxDtw::with_radius(radius);

            group.bench_with_input(id, &(a, b), |bencher, (a, b)| {
                bencher.iter(|| dtw.align(a.as_view(), b.as_view()));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_exact_align, bench_approx_align);
criterion_main!(benches);

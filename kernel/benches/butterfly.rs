use std::{f64::consts::PI, hint::black_box};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kernel::{AlignedBuffer, Complex, Q14, ScalarArithmetic};
use sampling::source::Source;

/// One radix-2 stage: `(x, y) <- (x + w*y, x - w*y)` over both halves.
fn butterfly_stage<R: ScalarArithmetic>(data: &mut [Complex<R>], twiddles: &[Complex<R>]) {
    let (lo, hi) = data.split_at_mut(data.len() >> 1);
    lo.iter_mut()
        .zip(hi.iter_mut())
        .zip(twiddles.iter())
        .for_each(|((x, y), w)| {
            let t: Complex<R> = *w * *y;
            let u: Complex<R> = *x;
            *x = u + t;
            *y = u - t;
        });
}

fn runner<R: ScalarArithmetic + 'static>(
    n: usize,
    mut source: Source,
    quantize: fn(f64, f64) -> Complex<R>,
) -> impl FnMut() {
    let mut data: AlignedBuffer<Complex<R>> = AlignedBuffer::from_fn(n, 5, |_| {
        quantize(source.next_f64(-0.5, 0.5), source.next_f64(-0.5, 0.5))
    });
    let twiddles: AlignedBuffer<Complex<R>> =
        AlignedBuffer::from_fn(n >> 1, 5, |i| Complex::unit(-2.0 * PI * i as f64 / n as f64));
    move || {
        butterfly_stage(&mut data, &twiddles);
        black_box(());
    }
}

pub fn bench_butterfly_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("butterfly_f64");
    let mut source: Source = Source::new([0u8; 32]);

    for log_n in [8, 10, 12, 14] {
        let id: BenchmarkId = BenchmarkId::from_parameter(format!("n: {}", 1 << log_n));
        let mut runner = runner::<f64>(1 << log_n, source.branch(), |re, im| Complex::new(re, im));
        group.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
    }

    group.finish();
}

pub fn bench_butterfly_q14(c: &mut Criterion) {
    let mut group = c.benchmark_group("butterfly_q14");
    let mut source: Source = Source::new([0u8; 32]);

    for log_n in [8, 10, 12, 14] {
        let id: BenchmarkId = BenchmarkId::from_parameter(format!("n: {}", 1 << log_n));
        let mut runner = runner::<Q14>(1 << log_n, source.branch(), Complex::<Q14>::from_f64);
        group.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
    }

    group.finish();
}

criterion_group!(benches, bench_butterfly_f64, bench_butterfly_q14);
criterion_main!(benches);

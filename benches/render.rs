#[macro_use]
extern crate criterion;
extern crate mandelbrot;
extern crate num;

use criterion::Criterion;
use mandelbrot::{CancelSignal, RenderConfig};
use num::Complex;

fn config(parallelism: usize) -> RenderConfig {
    RenderConfig {
        width: 320,
        height: 200,
        start: Complex::new(-2.2, -1.2),
        end: Complex::new(1.0, 1.2),
        bailout: 2.0,
        max_iterations: 255,
        parallelism,
    }
}

fn single_strip(c: &mut Criterion) {
    let config = config(1);
    c.bench_function("render 320x200, 1 strip", move |b| {
        b.iter(|| config.render(|_| (), &CancelSignal::never()))
    });
}

fn four_strips(c: &mut Criterion) {
    let config = config(4);
    c.bench_function("render 320x200, 4 strips", move |b| {
        b.iter(|| config.render(|_| (), &CancelSignal::never()))
    });
}

criterion_group!(benches, single_strip, four_strips);
criterion_main!(benches);

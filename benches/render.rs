use criterion::{black_box, criterion_group, criterion_main, Criterion};
use termdonut::{DonutConfig, RenderMode, Renderer};

fn bench_baseline_frame(c: &mut Criterion) {
    let mut renderer = Renderer::new(DonutConfig::default());

    c.bench_function("render_frame_baseline", |b| {
        b.iter(|| {
            black_box(renderer.render_frame());
            renderer.step_angles();
        })
    });
}

fn bench_optimized_frame(c: &mut Criterion) {
    let mut renderer = Renderer::new(DonutConfig {
        mode: RenderMode::Optimized,
        ..DonutConfig::default()
    });

    c.bench_function("render_frame_optimized", |b| {
        b.iter(|| {
            black_box(renderer.render_frame());
            renderer.step_angles();
        })
    });
}

fn bench_large_grid(c: &mut Criterion) {
    let renderer = Renderer::new(DonutConfig {
        width: 200,
        height: 60,
        k1: 80.0,
        ..DonutConfig::default()
    });

    c.bench_function("render_frame_200x60", |b| {
        b.iter(|| black_box(renderer.render_frame()))
    });
}

criterion_group!(benches, bench_baseline_frame, bench_optimized_frame, bench_large_grid);
criterion_main!(benches);

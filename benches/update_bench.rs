use criterion::{black_box, criterion_group, criterion_main, Criterion};
use touch_texture::{TouchOptions, TouchTexture};

/// A fast circular gesture: several samples per frame, trail near steady state.
fn busy_texture() -> TouchTexture {
    let mut t = TouchTexture::new(TouchOptions::default()).unwrap();
    for frame in 0..120 {
        for k in 0..4 {
            let a = (frame * 4 + k) as f32 * 0.05;
            t.add_touch(0.5 + 0.3 * a.cos(), 0.5 + 0.3 * a.sin());
        }
        t.update();
    }
    t
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("touch_texture");

    group.bench_function("update_busy_trail", |b| {
        let mut t = busy_texture();
        let mut frame = 0u32;
        b.iter(|| {
            let a = frame as f32 * 0.05;
            t.add_touch(0.5 + 0.3 * a.cos(), 0.5 + 0.3 * a.sin());
            t.update();
            frame = frame.wrapping_add(1);
            black_box(t.version())
        })
    });

    group.bench_function("update_empty", |b| {
        let mut t = TouchTexture::new(TouchOptions::default()).unwrap();
        b.iter(|| {
            t.update();
            black_box(t.needs_update())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);

//! Collision query throughput over a large generated level.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use platformer_core::core::rect::Rect;
use platformer_core::game::collision::{collides_with_any_tile, collides_with_non_platform};
use platformer_core::game::level::{Level, LevelLayout};
use platformer_core::game::{BuiltinLevels, LevelSource, SimConfig, World, step_frame};
use platformer_core::game::input::InputSnapshot;

/// 400x100 cells with a floor, scattered blocks and platform ledges.
fn large_level() -> Level {
    let width = 400;
    let height = 100;
    let rows = (0..height)
        .map(|row| {
            (0..width)
                .map(|col| match (row, col) {
                    (r, _) if r == height - 1 => '#',
                    (0, 1) => 'P',
                    (r, c) if r % 7 == 3 && c % 11 < 4 => '=',
                    (r, c) if (r * 31 + c * 17) % 23 == 0 => '#',
                    _ => '.',
                })
                .collect::<String>()
        })
        .collect();

    LevelLayout { name: "bench".to_string(), tile_size: 40, rows }
        .parse(SimConfig::default().grid_cell_size)
        .expect("bench layout")
        .level
}

fn bench_queries(c: &mut Criterion) {
    let level = large_level();
    let probes: Vec<Rect> = (0..256)
        .map(|i| Rect::new((i * 613) % 16_000, (i * 197) % 4_000, 40, 60))
        .collect();

    c.bench_function("collides_with_any_tile x256", |b| {
        b.iter(|| {
            probes
                .iter()
                .filter(|bx| collides_with_any_tile(black_box(&level), **bx))
                .count()
        })
    });

    c.bench_function("collides_with_non_platform x256", |b| {
        b.iter(|| {
            probes
                .iter()
                .filter(|bx| collides_with_non_platform(black_box(&level), **bx))
                .count()
        })
    });
}

fn bench_frame(c: &mut Criterion) {
    let layout = BuiltinLevels::default()
        .load("demo")
        .expect("demo level");
    let config = SimConfig::default();

    c.bench_function("demo frame", |b| {
        let loaded = layout.parse(config.grid_cell_size).expect("demo layout");
        let mut world = World::new(loaded, config.clone()).expect("demo world");
        let input = InputSnapshot::with(InputSnapshot::RIGHT | InputSnapshot::ATTACK);
        b.iter(|| step_frame(black_box(&mut world), input))
    });
}

criterion_group!(benches, bench_queries, bench_frame);
criterion_main!(benches);

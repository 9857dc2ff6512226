use criterion::{Criterion, criterion_group, criterion_main};
use minegrid_core::*;
use std::hint::black_box;

fn setup(c: &mut Criterion) {
    let mut group = c.benchmark_group("setup");
    for preset in Preset::ALL {
        group.bench_function(preset.name(), |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(GameSession::new_from_preset(preset, seed))
            })
        });
    }
    group.finish();
}

fn cascade(c: &mut Criterion) {
    // one mine in the corner, so a reveal opposite to it floods the whole grid
    let hard = Preset::Hard.config();
    let config = GameConfig::new(hard.width, hard.height, 1).unwrap();
    let placer = FixedMinePlacer::new(config, &[(0, 0)]).unwrap();
    let base = GameSession::with_placer(config, placer);
    let far_corner = (config.height - 1, config.width - 1);

    c.bench_function("cascade/hard_full_board", |b| {
        b.iter_batched(
            || base.clone(),
            |mut session| black_box(session.reveal(far_corner)),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, setup, cascade);
criterion_main!(benches);

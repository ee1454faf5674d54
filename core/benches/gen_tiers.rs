use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use memorizer_core::{BoardGenerator, DEFAULT_PALETTE, Difficulty, RandomBoardGenerator};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let config = difficulty.board_config();
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty),
            &config,
            |b, &config| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    RandomBoardGenerator::new(black_box(seed))
                        .generate(config, &DEFAULT_PALETTE)
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);

//! Benchmarks for map generation, turn resolution and complete games.
//!
//! The autoplay game loop is the hot path for the tournament command.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use tunti::game::{EngineConfig, GameRng, GameState, generate_map, take_turn};
use tunti::tournament::{TournamentConfig, run_game};

fn bench_map_generation(c: &mut Criterion) {
    c.bench_function("generate_map", |b| {
        b.iter(|| {
            let mut rng = GameRng::new(black_box(42));
            black_box(generate_map(&mut rng))
        });
    });
}

fn bench_single_turn(c: &mut Criterion) {
    // Advance a game a few turns so both sides have buildings to work with
    let mut state = GameState::new(EngineConfig {
        seed: 7,
        ..EngineConfig::default()
    });
    for _ in 0..10 {
        take_turn(&mut state);
        if state.end_turn().is_err() {
            break;
        }
    }

    c.bench_function("round_both_factions", |b| {
        b.iter_batched(
            || state.clone(),
            |mut s| {
                let report = take_turn(&mut s);
                black_box((report, s.end_turn()))
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_single_game(c: &mut Criterion) {
    let config = TournamentConfig::default();

    c.bench_function("single_game", |b| {
        b.iter(|| {
            let result = run_game(black_box(42), black_box(&config));
            black_box(result)
        });
    });
}

fn bench_many_seeds(c: &mut Criterion) {
    let config = TournamentConfig { max_turns: 100 };

    c.bench_function("ten_games_100_turns", |b| {
        b.iter(|| {
            for seed in 0..10 {
                black_box(run_game(black_box(seed), &config));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_map_generation,
    bench_single_turn,
    bench_single_game,
    bench_many_seeds
);
criterion_main!(benches);

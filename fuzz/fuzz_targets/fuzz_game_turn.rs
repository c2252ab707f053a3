#![no_main]

//! Full game turn fuzzer.
//!
//! Drives a game through arbitrary command sequences, including the
//! computer opponent, and checks after every command that the invariants
//! hold and that rejected commands left the state untouched.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tunti::game::rules::{BuildingKind, TILE_COUNT, UnitKind};
use tunti::game::{EngineConfig, GameState, check_invariants, take_turn};

/// A fuzzer-generated command.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzCommand {
    /// Construct a building on a tile.
    Build { index: u16, kind: u8 },
    /// Train a unit at a tile.
    Train { index: u16, kind: u8 },
    /// Move or attack from one tile to another.
    Act { from: u16, to: u16 },
    /// Let the heuristic play the active faction.
    Autoplay,
    /// Hand control to the next faction.
    EndTurn,
    /// Run a deferred opponent turn.
    RunPending,
    /// Start over.
    Reset,
}

/// Structured input for full game turn fuzzing.
#[derive(Arbitrary, Debug)]
struct GameTurnInput {
    seed: u64,
    /// Selects hot-seat, immediate or deferred opponent.
    mode: u8,
    commands: Vec<FuzzCommand>,
}

fn apply(state: &mut GameState, command: &FuzzCommand) -> bool {
    // Indices may overshoot the board to exercise InvalidTile
    let clamp = |index: u16| usize::from(index) % (TILE_COUNT + 8);
    match *command {
        FuzzCommand::Build { index, kind } => {
            let kind = BuildingKind::ALL[usize::from(kind) % BuildingKind::ALL.len()];
            state.build(clamp(index), kind).is_ok()
        }
        FuzzCommand::Train { index, kind } => {
            let kind = UnitKind::ALL[usize::from(kind) % UnitKind::ALL.len()];
            state.train(clamp(index), kind).is_ok()
        }
        FuzzCommand::Act { from, to } => state.attempt_action(clamp(from), clamp(to)).is_ok(),
        FuzzCommand::Autoplay => {
            if state.is_game_over() || state.is_ai_pending() {
                return false;
            }
            take_turn(state);
            true
        }
        FuzzCommand::EndTurn => state.end_turn().is_ok(),
        FuzzCommand::RunPending => state.run_pending_ai().is_some(),
        FuzzCommand::Reset => {
            state.reset_game();
            true
        }
    }
}

fuzz_target!(|input: GameTurnInput| {
    let (ai_faction, defer_ai) = match input.mode % 3 {
        0 => (None, false),
        1 => (Some(1), false),
        _ => (Some(1), true),
    };
    let mut state = GameState::new(EngineConfig {
        seed: input.seed,
        ai_faction,
        defer_ai,
    });

    for command in input.commands.iter().take(200) {
        let before = state.clone();
        let accepted = apply(&mut state, command);
        if !accepted {
            assert_eq!(state, before, "rejected {command:?} changed state");
        }

        let violations = check_invariants(&state);
        assert!(violations.is_empty(), "after {command:?}: {violations:?}");

        if ai_faction.is_some() && !state.is_ai_pending() {
            assert_eq!(state.active_faction(), 0);
        }
    }
});

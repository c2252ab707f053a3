//! Headless autoplay runner for Tunti games.
//!
//! Provides a pure function interface: `(seed, config) -> GameResult`
//!
//! Both factions are driven by the heuristic controller. Faction 0 plays
//! through [`take_turn`] followed by [`GameState::end_turn`]; faction 1 is the
//! engine's own computer opponent and runs inside `end_turn`. Nothing here
//! touches state except through the public commands.

use serde::Serialize;
use tracing::debug;

use crate::game::{
    AiReport, EngineConfig, FACTION_COUNT, FactionId, GameState, ResourceLedger, assert_invariants,
    take_turn,
};

/// Configuration for autoplay games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentConfig {
    /// Maximum turns before the game is called a draw.
    pub max_turns: u32,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self { max_turns: 200 }
    }
}

/// Statistics for a single faction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FactionStats {
    /// Faction identifier.
    pub faction_id: FactionId,
    /// Capital hit points at the end of the game.
    pub capital_hp: u8,
    /// Tiles owned at the end of the game.
    pub territory: u32,
    /// Units on the board at the end of the game.
    pub units: u32,
    /// Buildings constructed during the game.
    pub buildings_built: u32,
    /// Units trained during the game.
    pub units_trained: u32,
    /// Accepted unit actions (moves, combat, sieges).
    pub actions: u32,
    /// Resources held at the end of the game.
    pub resources: ResourceLedger,
}

impl FactionStats {
    fn record(&mut self, report: &AiReport) {
        self.buildings_built += u32::from(report.built.is_some());
        self.units_trained += u32::from(report.trained.is_some());
        #[allow(clippy::cast_possible_truncation)]
        let actions = report.actions.len() as u32;
        self.actions += actions;
    }
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// The winning faction (None if the turn limit was reached).
    pub winner: Option<FactionId>,
    /// Total turns played.
    pub turns_played: u32,
    /// Per-faction statistics, indexed by faction id.
    pub faction_stats: [FactionStats; FACTION_COUNT],
    /// The seed used for this game.
    pub seed: u64,
}

/// Run a complete autoplay game.
///
/// # Determinism
///
/// Given the same seed and configuration, this function always produces
/// the same `GameResult`.
#[must_use]
pub fn run_game(seed: u64, config: &TournamentConfig) -> GameResult {
    run_game_with_state(seed, config).0
}

/// Run a complete autoplay game and keep the final state.
#[must_use]
pub fn run_game_with_state(seed: u64, config: &TournamentConfig) -> (GameResult, GameState) {
    let state = GameState::new(EngineConfig {
        seed,
        ai_faction: Some(1),
        defer_ai: false,
    });
    play_out(state, config)
}

/// Autoplay an existing game to its end or the turn limit.
///
/// The state should have faction 1 as its computer opponent; faction 0 is
/// driven through [`take_turn`].
#[must_use]
pub fn play_out(mut state: GameState, config: &TournamentConfig) -> (GameResult, GameState) {
    let seed = state.config().seed;
    let mut stats = [
        FactionStats {
            faction_id: 0,
            ..FactionStats::default()
        },
        FactionStats {
            faction_id: 1,
            ..FactionStats::default()
        },
    ];

    while !state.is_game_over() && state.turn() < config.max_turns {
        let report = take_turn(&mut state);
        stats[0].record(&report);
        if state.is_game_over() {
            break;
        }

        // Only fails once the game is over, which was checked above.
        let Ok(turn) = state.end_turn() else {
            break;
        };
        if let Some(ai) = &turn.ai {
            stats[1].record(ai);
        }
        assert_invariants(&state);
    }

    for faction in state.factions() {
        let entry = &mut stats[usize::from(faction.id)];
        entry.capital_hp = faction.capital_hp;
        entry.territory = state.map().count_territory(faction.id);
        entry.units = state.map().count_units(faction.id);
        entry.resources = *faction.resources();
    }

    debug!(
        seed,
        winner = ?state.winner(),
        turns = state.turn(),
        "autoplay game finished"
    );

    let result = GameResult {
        winner: state.winner(),
        turns_played: state.turn(),
        faction_stats: stats,
        seed,
    };
    (result, state)
}

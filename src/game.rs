//! Game layer for Tunti.
//!
//! Implements the rules engine:
//! - Map with tiles (plains, forest, mountains, water, two capital cities)
//! - Factions with capitals and resource ledgers
//! - Economy (costs, per-turn production)
//! - Movement, combat and siege resolution
//! - Turn controller and heuristic computer opponent

pub mod ai;
mod combat;
mod economy;
mod faction;
pub mod invariants;
mod map;
pub mod mapgen;
mod rng;
pub mod rules;
mod state;

pub use ai::{AiReport, take_turn};
pub use combat::{
    ActionOutcome, CombatReport, ROLL_BONUS_SIDES, can_enter, resolve_action, resolve_combat,
    roll_bonus,
};
pub use economy::{ResourceLedger, accrue_production, production_for};
pub use faction::{CAPITALS, FACTION_COUNT, Faction, FactionId, opponent};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use map::{Coord, Map, Structure, Tile, Unit};
pub use mapgen::{generate_map, open_field};
pub use rng::GameRng;
pub use state::{EngineConfig, GameState, TurnReport};

// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Tunti: a deterministic two-faction territorial strategy engine.
//!
//! Two factions share an 18x12 grid. Each builds farms, lumber camps and
//! markets for income, trains units at barracks and ports, and marches on
//! the other's capital. The first capital brought to zero hit points ends
//! the game.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI / Tournament Runner / Render  │
//! ├─────────────────────────────────────┤
//! │   Turn Controller  │  AI Controller │
//! ├─────────────────────────────────────┤
//! │  Combat & Movement │    Economy     │
//! ├─────────────────────────────────────┤
//! │  Map Generator  │   Rule Tables     │
//! └─────────────────────────────────────┘
//! ```
//!
//! All state lives in a [`GameState`]; every change goes through its
//! commands, which either apply completely or return an [`ActionError`].
//! A single seeded [`GameRng`] drives map generation, combat and the
//! computer opponent, so a seed reproduces a whole game.

pub mod error;
pub mod game;
pub mod render;
pub mod tournament;

pub use error::{ActionError, ActionResult};

// Re-export key game types at crate root for convenience
pub use game::{
    ActionOutcome, Coord, EngineConfig, Faction, FactionId, GameRng, GameState, Map, Tile,
    TurnReport, Unit,
};

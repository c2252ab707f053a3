//! Game invariants - sanity checks that detect bugs.
//!
//! These should never trigger on a state produced through the public
//! commands. If they do, a rule is being enforced in the wrong place.

use thiserror::Error;

use crate::game::faction::{CAPITALS, Faction, FactionId};
use crate::game::rules::{CAPITAL_START_HP, TILE_COUNT, Terrain, UNIT_START_HP};
use crate::game::{GameState, can_enter};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: String) -> Self {
        Self { message }
    }
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let tiles = state.tiles();

    if tiles.len() != TILE_COUNT {
        violations.push(InvariantViolation::new(format!(
            "map has {} tiles, expected {TILE_COUNT}",
            tiles.len()
        )));
    }

    for (idx, tile) in tiles.iter().enumerate() {
        if tile.coord.index() != Some(idx) {
            violations.push(InvariantViolation::new(format!(
                "tile {idx} reports coordinate {:?}",
                tile.coord
            )));
        }

        let capital_of = CAPITALS
            .iter()
            .position(|&c| c == tile.coord)
            .and_then(|i| FactionId::try_from(i).ok());

        match capital_of {
            Some(id) => {
                let expected = Faction::new(id).landmark();
                if !tile.is_city || tile.terrain != Terrain::City {
                    violations.push(InvariantViolation::new(format!(
                        "capital of faction {id} at {:?} is not a city",
                        tile.coord
                    )));
                }
                if tile.owner != Some(id) {
                    violations.push(InvariantViolation::new(format!(
                        "capital of faction {id} is owned by {:?}",
                        tile.owner
                    )));
                }
                if tile.landmark() != Some(expected) {
                    violations.push(InvariantViolation::new(format!(
                        "capital of faction {id} lost its landmark"
                    )));
                }
            }
            None => {
                if tile.is_city || tile.terrain == Terrain::City || tile.landmark().is_some() {
                    violations.push(InvariantViolation::new(format!(
                        "tile {:?} carries city markings but is not a capital",
                        tile.coord
                    )));
                }
            }
        }

        if let Some(unit) = tile.unit {
            if unit.hp == 0 || unit.hp > UNIT_START_HP {
                violations.push(InvariantViolation::new(format!(
                    "unit at {:?} has {} hp",
                    tile.coord, unit.hp
                )));
            }
            if !can_enter(unit.stats(), tile) {
                violations.push(InvariantViolation::new(format!(
                    "{} at {:?} stands on {:?}",
                    unit.kind.name(),
                    tile.coord,
                    tile.terrain
                )));
            }
        }
    }

    let mut fallen = None;
    for faction in state.factions() {
        if faction.capital_hp > CAPITAL_START_HP {
            violations.push(InvariantViolation::new(format!(
                "faction {} capital has {} hp",
                faction.id, faction.capital_hp
            )));
        }
        if faction.is_defeated() {
            fallen = Some(faction.id);
        }
    }

    // Winner consistency
    match (state.winner(), fallen) {
        (Some(_), None) => violations.push(InvariantViolation::new(
            "winner declared while both capitals stand".to_string(),
        )),
        (None, Some(id)) => violations.push(InvariantViolation::new(format!(
            "capital of faction {id} fell but no winner was declared"
        ))),
        (Some(winner), Some(loser)) if winner == loser => {
            violations.push(InvariantViolation::new(format!(
                "faction {winner} won with a fallen capital"
            )));
        }
        _ => {}
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}

//! Heuristic computer opponent.
//!
//! The controller only issues the same commands a human would
//! ([`GameState::build`], [`GameState::train`], [`GameState::attempt_action`]),
//! so every rule is enforced in one place.

use serde::Serialize;
use tracing::trace;

use crate::game::combat::ActionOutcome;
use crate::game::faction::{CAPITALS, FactionId, opponent};
use crate::game::rules::{BuildingKind, UnitKind};
use crate::game::{Coord, GameState};

/// Buildings tried in order; the first affordable one with a free tile wins.
const BUILD_PRIORITY: [BuildingKind; 4] = [
    BuildingKind::Farm,
    BuildingKind::Lumber,
    BuildingKind::Market,
    BuildingKind::Barracks,
];

/// Land units tried in order when a barracks is free.
const TRAIN_PRIORITY: [UnitKind; 3] = [UnitKind::Infantry, UnitKind::Archer, UnitKind::Cavalry];

/// What the controller did during one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiReport {
    /// Faction the controller played.
    pub faction: FactionId,
    /// Building constructed and the tile index it went on.
    pub built: Option<(BuildingKind, usize)>,
    /// Unit trained and the tile index it appeared on.
    pub trained: Option<(UnitKind, usize)>,
    /// Outcome of every accepted unit action, in order.
    pub actions: Vec<ActionOutcome>,
    /// Number of unit actions the engine rejected.
    pub rejected: u32,
}

/// Play one turn for the active faction: build, train, then advance.
///
/// Does not end the turn.
pub fn take_turn(state: &mut GameState) -> AiReport {
    let faction = state.active_faction();
    let built = build_step(state, faction);
    let trained = train_step(state, faction);
    let (actions, rejected) = advance_step(state, faction);

    AiReport {
        faction,
        built,
        trained,
        actions,
        rejected,
    }
}

fn build_step(state: &mut GameState, faction: FactionId) -> Option<(BuildingKind, usize)> {
    let candidates: Vec<usize> = state
        .map()
        .tiles_owned_by(faction)
        .filter(|(_, t)| t.structure.is_none() && !t.terrain.is_water())
        .map(|(idx, _)| idx)
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let kind = BUILD_PRIORITY
        .into_iter()
        .find(|kind| state.can_afford(faction, kind.cost()))?;
    let target = *state.rng_mut().choose(&candidates)?;

    match state.build(target, kind) {
        Ok(()) => Some((kind, target)),
        Err(err) => {
            trace!(faction, building = kind.name(), target, %err, "ai build rejected");
            None
        }
    }
}

fn train_step(state: &mut GameState, faction: FactionId) -> Option<(UnitKind, usize)> {
    let barracks: Vec<usize> = state
        .map()
        .tiles_owned_by(faction)
        .filter(|(_, t)| t.building() == Some(BuildingKind::Barracks) && t.unit.is_none())
        .map(|(idx, _)| idx)
        .collect();
    if barracks.is_empty() {
        return None;
    }

    let kind = TRAIN_PRIORITY
        .into_iter()
        .find(|kind| state.can_afford(faction, kind.cost()))?;
    let target = *state.rng_mut().choose(&barracks)?;

    match state.train(target, kind) {
        Ok(()) => Some((kind, target)),
        Err(err) => {
            trace!(faction, unit = kind.name(), target, %err, "ai training rejected");
            None
        }
    }
}

/// One sign-step toward `target` on each axis.
fn step_toward(from: Coord, target: Coord) -> Option<Coord> {
    let dx = (i32::from(target.x) - i32::from(from.x)).signum();
    let dy = (i32::from(target.y) - i32::from(from.y)).signum();
    from.offset(dx, dy)
}

/// Move every unit one step toward the enemy capital.
///
/// Positions are taken before anything moves, so a unit acts at most once.
fn advance_step(state: &mut GameState, faction: FactionId) -> (Vec<ActionOutcome>, u32) {
    let target = CAPITALS[usize::from(opponent(faction))];
    let mut actions = Vec::new();
    let mut rejected = 0;

    for from in state.map().unit_positions(faction) {
        if state.is_game_over() {
            break;
        }
        let Some(dest) = Coord::from_index(from).and_then(|c| step_toward(c, target)) else {
            continue;
        };
        let Some(to) = dest.index() else {
            continue;
        };

        match state.attempt_action(from, to) {
            Ok(outcome) => actions.push(outcome),
            Err(err) => {
                trace!(faction, from, to, %err, "ai action rejected");
                rejected += 1;
            }
        }
    }

    (actions, rejected)
}

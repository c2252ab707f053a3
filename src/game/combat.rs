//! Movement, combat and siege resolution.
//!
//! [`resolve_action`] is the single entry point for unit actions, shared by
//! human commands and the computer opponent. All preconditions are checked
//! before anything is mutated, so a rejected action leaves the map and both
//! factions untouched.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ActionError, ActionResult};
use crate::game::faction::{FACTION_COUNT, Faction, FactionId};
use crate::game::rules::{BuildingKind, Domain, Terrain, UnitStats};
use crate::game::{GameRng, Map, Structure, Tile, Unit};

/// Exclusive upper bound of the random bonus added to each side's roll.
pub const ROLL_BONUS_SIDES: u8 = 3;

/// Numbers produced by one exchange of blows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CombatReport {
    /// Attacker's base attack plus bonus.
    pub attack_roll: u8,
    /// Defender's base defense plus bonus.
    pub defense_roll: u8,
    /// Hit points taken from the defender. Always at least 1.
    pub damage_to_defender: u8,
    /// Hit points taken from the attacker. May be 0.
    pub damage_to_attacker: u8,
}

/// Resolve one simultaneous exchange between two units.
///
/// The attacker rolls `attack + attack_bonus` against the defender's static
/// defense; the defender rolls `defense + defense_bonus` against the
/// attacker's static defense. The defender always takes at least one point.
#[must_use]
pub const fn resolve_combat(
    attacker: UnitStats,
    defender: UnitStats,
    attack_bonus: u8,
    defense_bonus: u8,
) -> CombatReport {
    let attack_roll = attacker.attack.saturating_add(attack_bonus);
    let defense_roll = defender.defense.saturating_add(defense_bonus);

    let raw_to_defender = attack_roll.saturating_sub(defender.defense);
    let damage_to_defender = if raw_to_defender == 0 { 1 } else { raw_to_defender };
    let damage_to_attacker = defense_roll.saturating_sub(attacker.defense);

    CombatReport {
        attack_roll,
        defense_roll,
        damage_to_defender,
        damage_to_attacker,
    }
}

/// Draw a bonus for one side of a fight: 0, 1 or 2.
pub fn roll_bonus(rng: &mut GameRng) -> u8 {
    rng.below(ROLL_BONUS_SIDES)
}

/// What a successful unit action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The unit moved onto an empty tile.
    Moved {
        /// Whether the destination was unowned and is now the mover's.
        claimed: bool,
    },
    /// The unit fought an enemy unit.
    Combat {
        /// Rolls and damage of the exchange.
        report: CombatReport,
        /// Whether the defender was destroyed.
        defender_destroyed: bool,
        /// Whether the attacker was destroyed.
        attacker_destroyed: bool,
        /// Whether the attacker moved into the defender's tile.
        advanced: bool,
    },
    /// The unit struck an enemy capital.
    Siege {
        /// Faction whose capital was hit.
        defender: FactionId,
        /// Capital hit points left.
        remaining_hp: u8,
    },
    /// The unit brought an enemy capital to zero.
    Victory {
        /// Faction that won the game.
        winner: FactionId,
    },
}

/// Check that a unit's domain allows it onto a tile.
///
/// Land units never enter water. Sea units sail on water, may approach a
/// city and may berth in a port, but never stand on other land.
#[must_use]
pub const fn can_enter(stats: UnitStats, tile: &Tile) -> bool {
    match stats.domain {
        Domain::Land => !tile.terrain.is_water(),
        Domain::Sea => {
            matches!(tile.terrain, Terrain::Water | Terrain::City)
                || matches!(tile.structure, Some(Structure::Building(BuildingKind::Port)))
        }
    }
}

/// Validate and execute a unit action from one tile index to another.
///
/// `actor` is the faction whose turn it is; the source unit must be theirs.
///
/// # Errors
///
/// Returns the first failed precondition: invalid indices, no own unit on the
/// source, destination out of range, terrain the unit cannot enter, or a
/// friendly unit on the destination.
pub fn resolve_action(
    map: &mut Map,
    factions: &mut [Faction; FACTION_COUNT],
    actor: FactionId,
    from: usize,
    to: usize,
    rng: &mut GameRng,
) -> ActionResult<ActionOutcome> {
    let source = *map.tile(from).ok_or(ActionError::InvalidTile(from))?;
    let dest = *map.tile(to).ok_or(ActionError::InvalidTile(to))?;

    let unit = source
        .unit
        .filter(|u| u.owner == actor)
        .ok_or(ActionError::NoSourceUnit)?;
    let stats = unit.stats();

    let distance = source.coord.manhattan(dest.coord);
    if distance > u16::from(stats.movement) {
        return Err(ActionError::OutOfRange {
            distance,
            movement: stats.movement,
        });
    }

    if !can_enter(stats, &dest) {
        return Err(ActionError::TerrainIncompatible);
    }

    match dest.unit {
        Some(defender) if defender.owner != unit.owner => {
            Ok(attack(map, from, to, unit, defender, rng))
        }
        Some(_) => Err(ActionError::OccupiedDestination),
        None => match dest.owner {
            Some(owner) if dest.is_city && owner != unit.owner => {
                Ok(siege(factions, unit.owner, owner))
            }
            _ => Ok(advance(map, from, to, unit)),
        },
    }
}

/// Fight the unit on `to` with the unit on `from`.
fn attack(
    map: &mut Map,
    from: usize,
    to: usize,
    mut attacker: Unit,
    mut defender: Unit,
    rng: &mut GameRng,
) -> ActionOutcome {
    let attack_bonus = roll_bonus(rng);
    let defense_bonus = roll_bonus(rng);
    let report = resolve_combat(
        attacker.stats(),
        defender.stats(),
        attack_bonus,
        defense_bonus,
    );

    defender.hp = defender.hp.saturating_sub(report.damage_to_defender);
    attacker.hp = attacker.hp.saturating_sub(report.damage_to_attacker);

    let defender_destroyed = defender.is_destroyed();
    let attacker_destroyed = attacker.is_destroyed();

    debug!(
        attacker = ?attacker.kind,
        defender = ?defender.kind,
        attack_roll = report.attack_roll,
        defense_roll = report.defense_roll,
        defender_hp = defender.hp,
        attacker_hp = attacker.hp,
        "combat resolved"
    );

    if let Some(tile) = map.tile_mut(to) {
        tile.unit = (!defender_destroyed).then_some(defender);
    }
    if let Some(tile) = map.tile_mut(from) {
        tile.unit = (!attacker_destroyed).then_some(attacker);
    }

    let advanced = defender_destroyed && !attacker_destroyed;
    if advanced {
        advance(map, from, to, attacker);
    }

    ActionOutcome::Combat {
        report,
        defender_destroyed,
        attacker_destroyed,
        advanced,
    }
}

/// Strike the defender's capital once.
fn siege(
    factions: &mut [Faction; FACTION_COUNT],
    attacker: FactionId,
    defender: FactionId,
) -> ActionOutcome {
    let Some(target) = factions.get_mut(usize::from(defender)) else {
        return ActionOutcome::Siege {
            defender,
            remaining_hp: 0,
        };
    };
    target.capital_hp = target.capital_hp.saturating_sub(1);

    if target.is_defeated() {
        info!(winner = attacker, loser = defender, "capital has fallen");
        ActionOutcome::Victory { winner: attacker }
    } else {
        debug!(
            defender,
            remaining_hp = target.capital_hp,
            "capital besieged"
        );
        ActionOutcome::Siege {
            defender,
            remaining_hp: target.capital_hp,
        }
    }
}

/// Move a unit onto an empty tile, claiming it if unowned.
fn advance(map: &mut Map, from: usize, to: usize, unit: Unit) -> ActionOutcome {
    if let Some(tile) = map.tile_mut(from) {
        tile.unit = None;
    }
    let mut claimed = false;
    if let Some(tile) = map.tile_mut(to) {
        tile.unit = Some(unit);
        if tile.owner.is_none() {
            tile.owner = Some(unit.owner);
            claimed = true;
        }
    }
    ActionOutcome::Moved { claimed }
}

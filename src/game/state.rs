//! Game state management.
//!
//! [`GameState`] owns everything the simulation needs and is the only thing
//! that mutates it. Commands either fully apply or return an [`ActionError`]
//! and leave the state exactly as it was.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ActionError, ActionResult};
use crate::game::ai::{self, AiReport};
use crate::game::combat::{self, ActionOutcome};
use crate::game::economy::{self, ResourceLedger};
use crate::game::faction::{FACTION_COUNT, Faction, FactionId, opponent};
use crate::game::map::Structure;
use crate::game::rules::{BuildingKind, Resource, UnitKind};
use crate::game::{GameRng, Map, Tile, Unit, mapgen};

/// Engine settings fixed for the lifetime of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the game's random stream.
    pub seed: u64,
    /// Faction played by the computer, if any.
    pub ai_faction: Option<FactionId>,
    /// Leave the computer's turn pending until [`GameState::run_pending_ai`].
    pub defer_ai: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            ai_faction: Some(1),
            defer_ai: false,
        }
    }
}

/// Summary of an `end_turn` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    /// Faction whose turn ended.
    pub faction: FactionId,
    /// Resources that faction produced.
    pub produced: ResourceLedger,
    /// Turn counter after advancing.
    pub turn: u32,
    /// What the computer opponent did, if it ran.
    pub ai: Option<AiReport>,
    /// Whether the computer's turn is waiting on [`GameState::run_pending_ai`].
    pub ai_pending: bool,
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// The game map.
    map: Map,
    /// Both factions, indexed by id.
    factions: [Faction; FACTION_COUNT],
    /// Current turn number (0-indexed).
    turn: u32,
    /// Faction whose commands are accepted.
    active: FactionId,
    /// Winner once a capital has fallen.
    winner: Option<FactionId>,
    /// Whether the computer's turn is waiting to run.
    ai_pending: bool,
    /// Tile highlighted by the presentation layer. Not simulation state.
    selected: Option<usize>,
    /// Engine settings.
    config: EngineConfig,
    /// The game's only random source.
    rng: GameRng,
}

impl GameState {
    /// Start a new game on a freshly generated map.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let mut rng = GameRng::new(config.seed);
        let map = mapgen::generate_map(&mut rng);
        Self::from_parts(map, config, rng)
    }

    /// Start a new game on a prepared map.
    ///
    /// The map should already carry both capitals, as produced by
    /// [`mapgen::generate_map`] or [`mapgen::open_field`].
    #[must_use]
    pub fn with_map(map: Map, config: EngineConfig) -> Self {
        Self::from_parts(map, config, GameRng::new(config.seed))
    }

    fn from_parts(map: Map, config: EngineConfig, rng: GameRng) -> Self {
        Self {
            map,
            factions: [Faction::new(0), Faction::new(1)],
            turn: 0,
            active: 0,
            winner: None,
            ai_pending: false,
            selected: None,
            config,
            rng,
        }
    }

    /// Restart with starting stock, full capitals and a new random map.
    pub fn reset_game(&mut self) {
        self.factions = [Faction::new(0), Faction::new(1)];
        self.turn = 0;
        self.active = 0;
        self.winner = None;
        self.ai_pending = false;
        self.selected = None;
        self.map = mapgen::generate_map(&mut self.rng);
        info!(seed = self.rng.seed(), "game reset");
    }

    /// Get the current turn number.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Faction whose commands are currently accepted.
    #[must_use]
    pub const fn active_faction(&self) -> FactionId {
        self.active
    }

    /// The game map.
    #[must_use]
    pub const fn map(&self) -> &Map {
        &self.map
    }

    /// All tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        self.map.tiles()
    }

    /// Both factions, indexed by id.
    #[must_use]
    pub const fn factions(&self) -> &[Faction; FACTION_COUNT] {
        &self.factions
    }

    /// Get a faction by id.
    #[must_use]
    pub fn faction(&self, id: FactionId) -> Option<&Faction> {
        self.factions.get(usize::from(id))
    }

    /// A faction's resource ledger.
    #[must_use]
    pub fn resources(&self, id: FactionId) -> Option<&ResourceLedger> {
        self.faction(id).map(Faction::resources)
    }

    /// A faction's remaining capital hit points.
    #[must_use]
    pub fn capital_hp(&self, id: FactionId) -> Option<u8> {
        self.faction(id).map(|f| f.capital_hp)
    }

    /// Check whether a faction can pay a cost. Never changes state.
    #[must_use]
    pub fn can_afford(&self, id: FactionId, cost: &[(Resource, u32)]) -> bool {
        self.resources(id).is_some_and(|r| r.can_afford(cost))
    }

    /// The winner, once a capital has fallen.
    #[must_use]
    pub const fn winner(&self) -> Option<FactionId> {
        self.winner
    }

    /// Check if the game is over.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Check whether the computer's turn is waiting to run.
    #[must_use]
    pub const fn is_ai_pending(&self) -> bool {
        self.ai_pending
    }

    /// Engine settings.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Tile highlighted by the presentation layer.
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Highlight a tile. Has no effect on the simulation.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    /// Reject commands while the game is over or the computer is due to move.
    fn ensure_accepting(&self) -> ActionResult<()> {
        if self.winner.is_some() {
            return Err(ActionError::GameOver);
        }
        if self.ai_pending {
            return Err(ActionError::AwaitingOpponent);
        }
        Ok(())
    }

    fn ledger_mut(&mut self, id: FactionId) -> &mut ResourceLedger {
        &mut self.factions[usize::from(id)].resources
    }

    /// Construct a building on a tile owned by the active faction.
    ///
    /// # Errors
    ///
    /// `NotOwned` if the tile is not the active faction's,
    /// `TerrainIncompatible` for anything but a port on water,
    /// `AlreadyBuilt` if any structure or landmark is present, and
    /// `InsufficientResources` if the cost cannot be paid.
    pub fn build(&mut self, index: usize, kind: BuildingKind) -> ActionResult<()> {
        self.ensure_accepting()?;
        let actor = self.active;
        let tile = *self.map.tile(index).ok_or(ActionError::InvalidTile(index))?;

        if tile.owner != Some(actor) {
            return Err(ActionError::NotOwned);
        }
        if kind != BuildingKind::Port && tile.terrain.is_water() {
            return Err(ActionError::TerrainIncompatible);
        }
        if tile.structure.is_some() {
            return Err(ActionError::AlreadyBuilt);
        }
        let cost = kind.cost();
        if !self.can_afford(actor, cost) {
            return Err(ActionError::InsufficientResources);
        }

        self.ledger_mut(actor).pay(cost);
        if let Some(tile) = self.map.tile_mut(index) {
            tile.structure = Some(Structure::Building(kind));
        }
        debug!(faction = actor, building = kind.name(), index, "building constructed");
        Ok(())
    }

    /// Train a unit on a tile with the matching barracks or port.
    ///
    /// # Errors
    ///
    /// `NotOwned` if the tile is not the active faction's, `MissingStructure`
    /// if it lacks the barracks (land units) or port (ships),
    /// `OccupiedDestination` if a unit already stands there, and
    /// `InsufficientResources` if the cost cannot be paid.
    pub fn train(&mut self, index: usize, kind: UnitKind) -> ActionResult<()> {
        self.ensure_accepting()?;
        let actor = self.active;
        let tile = *self.map.tile(index).ok_or(ActionError::InvalidTile(index))?;

        if tile.owner != Some(actor) {
            return Err(ActionError::NotOwned);
        }
        let required = kind.trained_at();
        if tile.building() != Some(required) {
            return Err(ActionError::MissingStructure { required });
        }
        if tile.unit.is_some() {
            return Err(ActionError::OccupiedDestination);
        }
        let cost = kind.cost();
        if !self.can_afford(actor, cost) {
            return Err(ActionError::InsufficientResources);
        }

        self.ledger_mut(actor).pay(cost);
        if let Some(tile) = self.map.tile_mut(index) {
            tile.unit = Some(Unit::new(kind, actor));
        }
        debug!(faction = actor, unit = kind.name(), index, "unit trained");
        Ok(())
    }

    /// Move, attack or besiege with the active faction's unit on `from`.
    ///
    /// # Errors
    ///
    /// See [`combat::resolve_action`]; additionally `GameOver` and
    /// `AwaitingOpponent`.
    pub fn attempt_action(&mut self, from: usize, to: usize) -> ActionResult<ActionOutcome> {
        self.ensure_accepting()?;
        let outcome = combat::resolve_action(
            &mut self.map,
            &mut self.factions,
            self.active,
            from,
            to,
            &mut self.rng,
        )?;
        if let ActionOutcome::Victory { winner } = outcome {
            self.winner = Some(winner);
        }
        Ok(outcome)
    }

    /// End the active faction's turn.
    ///
    /// Credits the ending faction's production, advances the turn counter and
    /// passes control to the other faction. If that is the computer, its turn
    /// runs now (or is left pending when deferred) and control returns.
    ///
    /// # Errors
    ///
    /// `GameOver` or `AwaitingOpponent`.
    pub fn end_turn(&mut self) -> ActionResult<TurnReport> {
        self.ensure_accepting()?;
        let faction = self.active;
        let produced = economy::accrue_production(
            &self.map,
            faction,
            &mut self.factions[usize::from(faction)].resources,
        );

        self.turn += 1;
        self.active = opponent(faction);
        debug!(turn = self.turn, active = self.active, "turn advanced");

        let mut ai = None;
        if self.config.ai_faction == Some(self.active) {
            if self.config.defer_ai {
                self.ai_pending = true;
            } else {
                ai = Some(self.play_ai_turn());
            }
        }

        Ok(TurnReport {
            faction,
            produced,
            turn: self.turn,
            ai,
            ai_pending: self.ai_pending,
        })
    }

    /// Run a deferred computer turn.
    ///
    /// Returns `None` when no computer turn is pending.
    pub fn run_pending_ai(&mut self) -> Option<AiReport> {
        if !self.ai_pending {
            return None;
        }
        self.ai_pending = false;
        Some(self.play_ai_turn())
    }

    /// Play the active (computer) faction's turn and hand control back.
    fn play_ai_turn(&mut self) -> AiReport {
        let ai_faction = self.active;
        let report = ai::take_turn(self);
        self.active = opponent(ai_faction);
        report
    }

    /// Random source, for the computer opponent's choices.
    pub(crate) fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::Terrain;
    use crate::game::{Coord, check_invariants};

    fn hot_seat() -> EngineConfig {
        EngineConfig {
            seed: 3,
            ai_faction: None,
            defer_ai: false,
        }
    }

    fn idx(x: u16, y: u16) -> usize {
        Coord::new(x, y).index().unwrap()
    }

    #[test]
    fn test_game_state_creation() {
        let game = GameState::new(EngineConfig::default());
        assert_eq!(game.turn(), 0);
        assert_eq!(game.active_faction(), 0);
        assert_eq!(game.capital_hp(0), Some(5));
        assert_eq!(game.capital_hp(1), Some(5));
        assert_eq!(game.capital_hp(2), None);
        assert!(!game.is_game_over());
        assert_eq!(game.tiles().len(), 18 * 12);
    }

    #[test]
    fn test_build_farm_then_already_built() {
        let mut game = GameState::with_map(mapgen::open_field(), hot_seat());
        let target = idx(3, 8);

        game.build(target, BuildingKind::Farm).unwrap();
        let r = game.resources(0).unwrap();
        assert_eq!(r.get(Resource::Timber), 80);
        assert_eq!(r.get(Resource::Gold), 90);

        assert_eq!(
            game.build(target, BuildingKind::Lumber),
            Err(ActionError::AlreadyBuilt)
        );
    }

    #[test]
    fn test_build_on_capital_rejected() {
        let mut game = GameState::with_map(mapgen::open_field(), hot_seat());
        let before = game.clone();
        assert_eq!(
            game.build(idx(4, 8), BuildingKind::Farm),
            Err(ActionError::AlreadyBuilt)
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_build_not_owned() {
        let mut game = GameState::with_map(mapgen::open_field(), hot_seat());
        assert_eq!(
            game.build(idx(12, 7), BuildingKind::Farm),
            Err(ActionError::NotOwned)
        );
        assert_eq!(
            game.build(idx(0, 0), BuildingKind::Farm),
            Err(ActionError::NotOwned)
        );
        assert_eq!(
            game.build(5000, BuildingKind::Farm),
            Err(ActionError::InvalidTile(5000))
        );
    }

    #[test]
    fn test_only_ports_on_water() {
        let mut map = mapgen::open_field();
        map.get_mut(Coord::new(3, 10)).unwrap().terrain = Terrain::Water;
        let mut game = GameState::with_map(map, hot_seat());
        let before = game.clone();
        assert_eq!(
            game.build(idx(3, 10), BuildingKind::Farm),
            Err(ActionError::TerrainIncompatible)
        );
        assert_eq!(game, before);

        game.build(idx(3, 10), BuildingKind::Port).unwrap();
        game.build(idx(2, 6), BuildingKind::Port).unwrap();
        assert_eq!(
            game.map().tile(idx(2, 6)).unwrap().building(),
            Some(BuildingKind::Port)
        );
    }

    #[test]
    fn test_ship_trained_in_land_port_stays_valid() {
        let mut map = mapgen::open_field();
        map.get_mut(Coord::new(3, 10)).unwrap().terrain = Terrain::Water;
        let mut game = GameState::with_map(map, hot_seat());
        let port = idx(3, 9);

        game.build(port, BuildingKind::Port).unwrap();
        game.train(port, UnitKind::Ship).unwrap();
        assert_eq!(game.map().tile(port).unwrap().terrain, Terrain::Plains);
        assert!(check_invariants(&game).is_empty());

        let outcome = game.attempt_action(port, idx(3, 10)).unwrap();
        assert_eq!(outcome, ActionOutcome::Moved { claimed: false });
        assert!(check_invariants(&game).is_empty());

        // The ship may berth again, but never lands on plains.
        assert_eq!(
            game.attempt_action(idx(3, 10), idx(2, 10)),
            Err(ActionError::TerrainIncompatible)
        );
        game.attempt_action(idx(3, 10), port).unwrap();
        assert!(check_invariants(&game).is_empty());
    }

    #[test]
    fn test_insufficient_resources_leaves_state() {
        let mut game = GameState::with_map(mapgen::open_field(), hot_seat());
        game.build(idx(2, 6), BuildingKind::Barracks).unwrap();
        // Two barracks spend all starting timber and gold.
        game.build(idx(3, 6), BuildingKind::Barracks).unwrap();
        let before = game.clone();
        assert_eq!(
            game.build(idx(5, 6), BuildingKind::Barracks),
            Err(ActionError::InsufficientResources)
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_train_requires_barracks() {
        let mut game = GameState::with_map(mapgen::open_field(), hot_seat());
        let tile = idx(3, 7);
        assert_eq!(
            game.train(tile, UnitKind::Infantry),
            Err(ActionError::MissingStructure {
                required: BuildingKind::Barracks
            })
        );

        game.build(tile, BuildingKind::Barracks).unwrap();
        assert_eq!(
            game.train(tile, UnitKind::Ship),
            Err(ActionError::MissingStructure {
                required: BuildingKind::Port
            })
        );
        game.train(tile, UnitKind::Infantry).unwrap();
        let unit = game.map().tile(tile).unwrap().unit.unwrap();
        assert_eq!(unit.owner, 0);
        assert_eq!(unit.hp, 3);
        assert_eq!(game.resources(0).unwrap().get(Resource::Rice), 90);

        assert_eq!(
            game.train(tile, UnitKind::Archer),
            Err(ActionError::OccupiedDestination)
        );
    }

    #[test]
    fn test_end_turn_alternates_without_ai() {
        let mut game = GameState::with_map(mapgen::open_field(), hot_seat());
        let report = game.end_turn().unwrap();
        assert_eq!(report.faction, 0);
        assert_eq!(report.turn, 1);
        assert!(report.ai.is_none());
        assert_eq!(game.active_faction(), 1);
        game.end_turn().unwrap();
        assert_eq!(game.active_faction(), 0);
        assert_eq!(game.turn(), 2);
    }

    #[test]
    fn test_end_turn_runs_ai_and_returns_control() {
        let mut game = GameState::new(EngineConfig::default());
        let report = game.end_turn().unwrap();
        assert!(report.ai.is_some());
        assert!(!report.ai_pending);
        assert_eq!(game.active_faction(), 0);
        assert_eq!(game.turn(), 1);
    }

    #[test]
    fn test_deferred_ai_blocks_commands() {
        let config = EngineConfig {
            defer_ai: true,
            ..EngineConfig::default()
        };
        let mut game = GameState::new(config);
        let report = game.end_turn().unwrap();
        assert!(report.ai_pending);
        assert_eq!(game.active_faction(), 1);
        assert_eq!(game.end_turn(), Err(ActionError::AwaitingOpponent));
        assert_eq!(
            game.build(idx(3, 8), BuildingKind::Farm),
            Err(ActionError::AwaitingOpponent)
        );

        assert!(game.run_pending_ai().is_some());
        assert_eq!(game.active_faction(), 0);
        assert!(game.run_pending_ai().is_none());
        game.end_turn().unwrap();
    }

    #[test]
    fn test_victory_ends_game() {
        let mut game = GameState::with_map(mapgen::open_field(), hot_seat());
        game.factions[1].capital_hp = 1;
        game.map
            .place_unit(Coord::new(11, 6), Unit::new(UnitKind::Infantry, 0));

        let outcome = game.attempt_action(idx(11, 6), idx(12, 6)).unwrap();
        assert_eq!(outcome, ActionOutcome::Victory { winner: 0 });
        assert_eq!(game.winner(), Some(0));
        assert_eq!(game.capital_hp(1), Some(0));
        assert_eq!(game.end_turn(), Err(ActionError::GameOver));
        assert_eq!(
            game.attempt_action(idx(11, 6), idx(12, 6)),
            Err(ActionError::GameOver)
        );
        assert_eq!(game.capital_hp(1), Some(0));
    }

    #[test]
    fn test_reset_restores_start() {
        let mut game = GameState::new(EngineConfig::default());
        let first_map = game.map().clone();
        let _ = game.build(idx(3, 7), BuildingKind::Lumber);
        game.end_turn().unwrap();
        game.select(Some(4));

        game.reset_game();
        assert_eq!(game.turn(), 0);
        assert_eq!(game.active_faction(), 0);
        assert_eq!(game.selected(), None);
        assert_eq!(game.resources(0), Some(&ResourceLedger::starting()));
        assert_eq!(game.resources(1), Some(&ResourceLedger::starting()));
        assert_eq!(game.capital_hp(1), Some(5));
        assert_ne!(game.map(), &first_map);
    }

    #[test]
    fn test_select_is_not_a_command() {
        let mut game = GameState::new(EngineConfig::default());
        game.select(Some(10));
        assert_eq!(game.selected(), Some(10));
        assert_eq!(game.turn(), 0);
    }
}

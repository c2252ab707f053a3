//! Scenario tests on hand-built boards.
//!
//! Each test sets up an open field (plains, both capitals, starting
//! territory), places units where needed and drives the engine through its
//! public commands only.
//!
//! Run with: cargo test scenarios

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use tunti::game::rules::{BuildingKind, Resource, Terrain, UnitKind};
use tunti::game::{
    ActionOutcome, Coord, EngineConfig, GameState, Map, ResourceLedger, Unit, open_field,
};
use tunti::ActionError;

fn hot_seat(map: Map) -> GameState {
    GameState::with_map(
        map,
        EngineConfig {
            seed: 2024,
            ai_faction: None,
            defer_ai: false,
        },
    )
}

fn idx(x: u16, y: u16) -> usize {
    Coord::new(x, y).index().unwrap()
}

#[test]
fn test_infantry_exchange_stays_within_roll_bounds() {
    for seed in 0..100 {
        let mut map = Map::new();
        map.place_unit(Coord::new(4, 8), Unit::new(UnitKind::Infantry, 0));
        map.place_unit(Coord::new(4, 9), Unit::new(UnitKind::Infantry, 1));
        let mut state = GameState::with_map(
            map,
            EngineConfig {
                seed,
                ai_faction: None,
                defer_ai: false,
            },
        );

        let outcome = state.attempt_action(idx(4, 8), idx(4, 9)).unwrap();
        let ActionOutcome::Combat { report, advanced, .. } = outcome else {
            panic!("expected combat, got {outcome:?}");
        };
        assert!((1..=2).contains(&report.damage_to_defender));
        assert!(report.damage_to_attacker <= 2);
        assert!(!advanced);

        let attacker = state.map().get(Coord::new(4, 8)).unwrap().unit.unwrap();
        let defender = state.map().get(Coord::new(4, 9)).unwrap().unit.unwrap();
        assert_eq!(attacker.hp, 3 - report.damage_to_attacker);
        assert_eq!(defender.hp, 3 - report.damage_to_defender);
        assert_eq!(defender.owner, 1);
    }
}

#[test]
fn test_attacker_occupies_tile_of_destroyed_defender() {
    for seed in 0..200 {
        let mut map = Map::new();
        map.place_unit(Coord::new(4, 8), Unit::new(UnitKind::Cavalry, 0));
        let mut weak = Unit::new(UnitKind::Archer, 1);
        weak.hp = 1;
        map.place_unit(Coord::new(4, 9), weak);
        let mut state = GameState::with_map(
            map,
            EngineConfig {
                seed,
                ai_faction: None,
                defer_ai: false,
            },
        );

        let outcome = state.attempt_action(idx(4, 8), idx(4, 9)).unwrap();
        let ActionOutcome::Combat {
            defender_destroyed,
            attacker_destroyed,
            advanced,
            ..
        } = outcome
        else {
            panic!("expected combat, got {outcome:?}");
        };
        // Archer defense roll is at most 3; cavalry defense is 2.
        assert!(!attacker_destroyed);
        assert!(defender_destroyed);
        assert!(advanced);

        let moved = state.map().get(Coord::new(4, 9)).unwrap();
        assert_eq!(moved.unit.unwrap().kind, UnitKind::Cavalry);
        assert_eq!(moved.owner, Some(0));
        assert!(state.map().get(Coord::new(4, 8)).unwrap().unit.is_none());
    }
}

#[test]
fn test_farm_build_then_already_built() {
    let mut state = hot_seat(open_field());
    let target = idx(3, 9);

    state.build(target, BuildingKind::Farm).unwrap();
    let ledger = state.resources(0).unwrap();
    assert_eq!(ledger.get(Resource::Timber), 80);
    assert_eq!(ledger.get(Resource::Gold), 90);
    assert_eq!(state.resources(1), Some(&ResourceLedger::starting()));

    let before = state.clone();
    assert_eq!(
        state.build(target, BuildingKind::Farm),
        Err(ActionError::AlreadyBuilt)
    );
    assert_eq!(state, before);
}

#[test]
fn test_farm_with_exact_resources_empties_timber() {
    let mut state = hot_seat(open_field());
    // Two markets take timber from 100 to 40, then one farm to 20.
    state.build(idx(2, 6), BuildingKind::Market).unwrap();
    state.build(idx(3, 6), BuildingKind::Market).unwrap();
    state.build(idx(5, 6), BuildingKind::Farm).unwrap();
    assert_eq!(state.resources(0).unwrap().get(Resource::Timber), 20);

    state.build(idx(6, 6), BuildingKind::Farm).unwrap();
    let ledger = state.resources(0).unwrap();
    assert_eq!(ledger.get(Resource::Timber), 0);
    assert_eq!(ledger.get(Resource::Gold), 80);

    assert_eq!(
        state.build(idx(2, 7), BuildingKind::Farm),
        Err(ActionError::InsufficientResources)
    );
}

#[test]
fn test_land_unit_cannot_enter_water() {
    let mut map = open_field();
    map.get_mut(Coord::new(8, 4)).unwrap().terrain = Terrain::Water;
    map.place_unit(Coord::new(8, 3), Unit::new(UnitKind::Infantry, 0));
    let mut state = hot_seat(map);
    let before = state.clone();

    assert_eq!(
        state.attempt_action(idx(8, 3), idx(8, 4)),
        Err(ActionError::TerrainIncompatible)
    );
    assert_eq!(state, before);
}

#[test]
fn test_end_turn_credits_farm_yield_only_to_owner() {
    let mut state = hot_seat(open_field());
    state.build(idx(3, 9), BuildingKind::Farm).unwrap();
    let rice_before = state.resources(0).unwrap().get(Resource::Rice);
    let other_before = *state.resources(1).unwrap();

    let report = state.end_turn().unwrap();
    assert_eq!(report.produced.get(Resource::Rice), 8);
    assert_eq!(
        state.resources(0).unwrap().get(Resource::Rice),
        rice_before + 8
    );
    assert_eq!(state.resources(1), Some(&other_before));
}

#[test]
fn test_siege_at_one_hp_ends_game() {
    let mut map = open_field();
    map.place_unit(Coord::new(11, 6), Unit::new(UnitKind::Infantry, 0));
    let mut state = hot_seat(map);
    let from = idx(11, 6);
    let capital = idx(12, 6);

    for expected in (1..=4).rev() {
        let outcome = state.attempt_action(from, capital).unwrap();
        assert_eq!(
            outcome,
            ActionOutcome::Siege {
                defender: 1,
                remaining_hp: expected
            }
        );
    }
    assert_eq!(state.capital_hp(1), Some(1));

    let outcome = state.attempt_action(from, capital).unwrap();
    assert_eq!(outcome, ActionOutcome::Victory { winner: 0 });
    assert_eq!(state.capital_hp(1), Some(0));
    assert_eq!(state.winner(), Some(0));

    // Ownership and landmark survive the siege.
    let tile = state.map().get(Coord::new(12, 6)).unwrap();
    assert_eq!(tile.owner, Some(1));
    assert!(tile.landmark().is_some());

    assert_eq!(
        state.attempt_action(from, capital),
        Err(ActionError::GameOver)
    );
    assert_eq!(state.capital_hp(1), Some(0));
}

#[test]
fn test_capital_landmark_cannot_be_replaced() {
    let mut state = hot_seat(open_field());
    for kind in BuildingKind::ALL {
        assert_eq!(
            state.build(idx(4, 8), kind),
            Err(ActionError::AlreadyBuilt)
        );
    }
}

#[test]
fn test_reset_then_two_end_turns_cycle_active_faction() {
    let mut state = hot_seat(open_field());
    state.reset_game();
    let original = state.active_faction();
    state.end_turn().unwrap();
    assert_ne!(state.active_faction(), original);
    state.end_turn().unwrap();
    assert_eq!(state.active_faction(), original);
}

#[test]
fn test_computer_turn_returns_control_to_human() {
    let mut state = GameState::new(EngineConfig::default());
    state.reset_game();
    for turn in 1..=5 {
        let report = state.end_turn().unwrap();
        assert_eq!(report.turn, turn);
        assert_eq!(report.ai.unwrap().faction, 1);
        assert_eq!(state.active_faction(), 0);
    }
}

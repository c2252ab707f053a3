#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tunti::game::rules::{Domain, UnitKind, UnitStats};
use tunti::game::{
    ActionOutcome, Coord, Faction, GameRng, Map, Unit, opponent, resolve_action, resolve_combat,
};

/// Structured input for combat fuzzing.
#[derive(Arbitrary, Debug)]
struct CombatInput {
    attack: u8,
    defense: u8,
    enemy_attack: u8,
    enemy_defense: u8,
    attack_bonus: u8,
    defense_bonus: u8,
    /// Selects the attacking unit kind.
    attacker_kind: u8,
    /// Selects the defending unit kind.
    defender_kind: u8,
    attacker_hp: u8,
    defender_hp: u8,
    /// Step from the attacker to the target, each axis in -2..=2.
    dx: i8,
    dy: i8,
    seed: u64,
}

fn kind(selector: u8) -> UnitKind {
    UnitKind::ALL[usize::from(selector) % UnitKind::ALL.len()]
}

fuzz_target!(|input: CombatInput| {
    // Pure arithmetic: never underflows and always wounds the defender
    let attacker = UnitStats {
        attack: input.attack,
        defense: input.defense,
        movement: 1,
        domain: Domain::Land,
    };
    let defender = UnitStats {
        attack: input.enemy_attack,
        defense: input.enemy_defense,
        movement: 1,
        domain: Domain::Land,
    };
    let report = resolve_combat(attacker, defender, input.attack_bonus % 3, input.defense_bonus % 3);
    assert!(report.damage_to_defender >= 1);

    // Full action on a board with two units
    let mut map = Map::new();
    let from = Coord::new(8, 6);
    let Some(to) = from.offset(i32::from(input.dx % 3), i32::from(input.dy % 3)) else {
        return;
    };
    let mut own = Unit::new(kind(input.attacker_kind), 0);
    own.hp = input.attacker_hp % 3 + 1;
    let mut enemy = Unit::new(kind(input.defender_kind), opponent(0));
    enemy.hp = input.defender_hp % 3 + 1;
    if !map.place_unit(from, own) {
        return;
    }
    if to != from {
        map.place_unit(to, enemy);
    }

    let (Some(from_idx), Some(to_idx)) = (from.index(), to.index()) else {
        return;
    };
    let mut factions = [Faction::new(0), Faction::new(1)];
    let mut rng = GameRng::new(input.seed);
    let before = map.clone();

    match resolve_action(&mut map, &mut factions, 0, from_idx, to_idx, &mut rng) {
        Err(_) => assert_eq!(map, before, "rejected action mutated the map"),
        Ok(ActionOutcome::Combat {
            defender_destroyed,
            attacker_destroyed,
            advanced,
            ..
        }) => {
            assert!(!(advanced && attacker_destroyed));
            if advanced {
                assert!(defender_destroyed);
                assert_eq!(map.get(to).and_then(|t| t.unit).map(|u| u.owner), Some(0));
            }
            for tile in map.tiles() {
                if let Some(unit) = tile.unit {
                    assert!((1..=3).contains(&unit.hp));
                }
            }
        }
        Ok(_) => {}
    }
});

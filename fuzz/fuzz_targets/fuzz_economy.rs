#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tunti::game::rules::{BuildingKind, Resource, TILE_COUNT};
use tunti::game::{Map, ResourceLedger, Structure, accrue_production, production_for};

/// Structured input for economy fuzzing.
#[derive(Arbitrary, Debug)]
struct EconomyInput {
    rice: u32,
    gold: u32,
    timber: u32,
    spices: u32,
    /// Buildings to place, as (tile index, kind selector, owner).
    buildings: Vec<(u16, u8, u8)>,
    /// Purchases to attempt, as kind selectors.
    purchases: Vec<u8>,
}

fuzz_target!(|input: EconomyInput| {
    // Cap amounts so production never overflows
    let mut ledger = ResourceLedger::from_amounts(&[
        (Resource::Rice, input.rice % 1_000_000),
        (Resource::Gold, input.gold % 1_000_000),
        (Resource::Timber, input.timber % 1_000_000),
        (Resource::Spices, input.spices % 1_000_000),
    ]);

    let mut map = Map::new();
    for &(index, selector, owner) in input.buildings.iter().take(TILE_COUNT) {
        let kind = BuildingKind::ALL[usize::from(selector) % BuildingKind::ALL.len()];
        if let Some(tile) = map.tile_mut(usize::from(index) % TILE_COUNT) {
            if tile.landmark().is_none() {
                tile.owner = Some(owner % 2);
                tile.structure = Some(Structure::Building(kind));
            }
        }
    }

    for &selector in input.purchases.iter().take(64) {
        let kind = BuildingKind::ALL[usize::from(selector) % BuildingKind::ALL.len()];
        let before = ledger;
        if ledger.can_afford(kind.cost()) {
            ledger.pay(kind.cost());
            for &(resource, amount) in kind.cost() {
                assert_eq!(ledger.get(resource), before.get(resource) - amount);
            }
        } else {
            assert_eq!(ledger, before);
        }
    }

    let expected = production_for(&map, 0);
    let before = ledger;
    let produced = accrue_production(&map, 0, &mut ledger);
    assert_eq!(produced, expected);
    for resource in Resource::ALL {
        assert_eq!(ledger.get(resource), before.get(resource) + produced.get(resource));
    }
});

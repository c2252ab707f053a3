//! Map generation.
//!
//! One pass produces a complete map: weighted random terrain, a carved
//! river, the two capitals and their starting territory.

// Map generation uses intentional casts for coordinate/RNG operations
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::game::faction::{CAPITALS, Faction, FactionId};
use crate::game::map::Structure;
use crate::game::rules::{HEIGHT, START_TERRITORY_RADIUS, Terrain, WIDTH};
use crate::game::{Coord, GameRng, Map};

/// Cumulative terrain thresholds checked against a uniform roll.
const TERRAIN_WEIGHTS: [(f64, Terrain); 3] = [
    (0.12, Terrain::Mountain),
    (0.30, Terrain::Forest),
    (0.36, Terrain::Water),
];

/// Generate a fresh map with capitals and starting territory.
#[must_use]
pub fn generate_map(rng: &mut GameRng) -> Map {
    let mut map = Map::new();

    generate_terrain(&mut map, rng);
    carve_river(&mut map);
    place_capitals(&mut map);

    map
}

/// A map of open plains with capitals and starting territory.
///
/// Deterministic; used for scenarios and tests that need a known board.
#[must_use]
pub fn open_field() -> Map {
    let mut map = Map::new();
    place_capitals(&mut map);
    map
}

/// Roll every tile's terrain independently.
fn generate_terrain(map: &mut Map, rng: &mut GameRng) {
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let roll = rng.unit();
            let terrain = TERRAIN_WEIGHTS
                .iter()
                .find(|(threshold, _)| roll < *threshold)
                .map_or(Terrain::Plains, |&(_, terrain)| terrain);

            if let Some(tile) = map.get_mut(Coord::new(x, y)) {
                tile.terrain = terrain;
            }
        }
    }
}

/// Row of the river in a given column.
///
/// A sine wave around mid-height, kept off the top and bottom rows.
#[must_use]
pub fn river_row(x: u16) -> u16 {
    let mid = f64::from(HEIGHT / 2);
    let row = (mid + (f64::from(x) / 2.0).sin() * 2.0).floor();
    (row as u16).clamp(1, HEIGHT - 2)
}

/// Force one tile per interior column to water.
fn carve_river(map: &mut Map) {
    for x in 2..WIDTH - 2 {
        if let Some(tile) = map.get_mut(Coord::new(x, river_row(x))) {
            tile.terrain = Terrain::Water;
        }
    }
}

/// Turn both capital tiles into cities and hand out starting territory.
fn place_capitals(map: &mut Map) {
    for (idx, &coord) in CAPITALS.iter().enumerate() {
        let faction = Faction::new(idx as FactionId);
        if let Some(tile) = map.get_mut(coord) {
            tile.terrain = Terrain::City;
            tile.is_city = true;
            tile.owner = Some(faction.id);
            tile.structure = Some(Structure::Landmark(faction.landmark()));
        }
    }

    for (idx, &coord) in CAPITALS.iter().enumerate() {
        give_territory(map, coord, idx as FactionId, START_TERRITORY_RADIUS);
    }
}

/// Claim every non-water tile in a square around `center`.
fn give_territory(map: &mut Map, center: Coord, owner: FactionId, radius: u16) {
    let r = i32::from(radius);
    for dy in -r..=r {
        for dx in -r..=r {
            let Some(coord) = center.offset(dx, dy) else {
                continue;
            };
            if let Some(tile) = map.get_mut(coord).filter(|t| !t.terrain.is_water()) {
                tile.owner = Some(owner);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::Landmark;

    #[test]
    fn test_map_generation_determinism() {
        let map1 = generate_map(&mut GameRng::new(42));
        let map2 = generate_map(&mut GameRng::new(42));
        assert_eq!(map1, map2);
    }

    #[test]
    fn test_map_generation_different_seeds() {
        let map1 = generate_map(&mut GameRng::new(42));
        let map2 = generate_map(&mut GameRng::new(43));

        let differences = map1
            .tiles()
            .iter()
            .zip(map2.tiles())
            .filter(|(a, b)| a.terrain != b.terrain)
            .count();
        assert!(differences > 0);
    }

    #[test]
    fn test_river_is_carved() {
        for seed in 0..20 {
            let map = generate_map(&mut GameRng::new(seed));
            for x in 2..WIDTH - 2 {
                let coord = Coord::new(x, river_row(x));
                if CAPITALS.contains(&coord) {
                    continue;
                }
                assert_eq!(map.get(coord).unwrap().terrain, Terrain::Water);
            }
        }
    }

    #[test]
    fn test_river_rows_stay_off_border() {
        for x in 0..WIDTH {
            let row = river_row(x);
            assert!((1..=HEIGHT - 2).contains(&row));
        }
        assert_eq!(river_row(0), 6);
        assert_eq!(river_row(3), 7);
    }

    #[test]
    fn test_capitals_placed() {
        let map = generate_map(&mut GameRng::new(5));
        let cities: Vec<_> = map.tiles().iter().filter(|t| t.is_city).collect();
        assert_eq!(cities.len(), 2);

        let pagoda = map.get(CAPITALS[0]).unwrap();
        assert_eq!(pagoda.terrain, Terrain::City);
        assert_eq!(pagoda.owner, Some(0));
        assert_eq!(pagoda.landmark(), Some(Landmark::Pagoda));

        let palace = map.get(CAPITALS[1]).unwrap();
        assert_eq!(palace.owner, Some(1));
        assert_eq!(palace.landmark(), Some(Landmark::Palace));
    }

    #[test]
    fn test_starting_territory_square_without_water() {
        for seed in 0..20 {
            let map = generate_map(&mut GameRng::new(seed));
            for (idx, &capital) in CAPITALS.iter().enumerate() {
                for tile in map.tiles() {
                    let inside = tile.coord.x.abs_diff(capital.x) <= 2
                        && tile.coord.y.abs_diff(capital.y) <= 2;
                    if !inside {
                        continue;
                    }
                    if tile.terrain.is_water() {
                        assert_eq!(tile.owner, None);
                    } else {
                        assert_eq!(tile.owner, Some(idx as FactionId));
                    }
                }
            }
        }
    }

    #[test]
    fn test_nothing_owned_outside_starting_squares() {
        let map = generate_map(&mut GameRng::new(11));
        let owned = map.tiles().iter().filter(|t| t.owner.is_some()).count();
        assert!(owned <= 2 * 25);
        assert!(map.tiles().iter().all(|t| t.unit.is_none()));
    }

    #[test]
    fn test_open_field() {
        let map = open_field();
        assert_eq!(map.count_territory(0), 25);
        assert_eq!(map.count_territory(1), 25);
        assert!(map.tiles().iter().all(|t| !t.terrain.is_water()));
    }
}

//! Plain-text dump of a game for the CLI and for debugging.
//!
//! Each tile is two characters: what stands on it, then its owner.
//!
//! ```text
//!  .  plains      "  forest      ^  mountain    ~  water    #  capital
//!  f l m b p      farm, lumber, market, barracks, port
//!  I A C S        faction 0 infantry, archer, cavalry, ship
//!  i a c s        faction 1 units
//! ```
//!
//! The owner column is the faction id, or a space for unowned tiles.

// Allow format! with push_str for readability
#![allow(clippy::format_push_string)]

use crate::game::rules::{BuildingKind, Terrain, UnitKind};
use crate::game::{GameState, Tile};

/// Render the grid followed by the status block.
#[must_use]
pub fn render_text(state: &GameState) -> String {
    let mut output = String::new();
    render_header(&mut output, state);
    render_grid(&mut output, state);
    output.push('\n');
    render_status(&mut output, state);
    output
}

fn render_header(output: &mut String, state: &GameState) {
    let active = state
        .faction(state.active_faction())
        .map_or("?", |f| f.label);
    output.push_str(&format!(
        "=== TURN {} ({} to move) ===\n\n",
        state.turn(),
        active
    ));
}

/// Render only the map grid, one row per line.
pub fn render_grid(output: &mut String, state: &GameState) {
    let map = state.map();
    let width = usize::from(map.width());
    for row in map.tiles().chunks(width) {
        let line: String = row
            .iter()
            .flat_map(|tile| [tile_glyph(tile), owner_glyph(tile)])
            .collect();
        output.push_str(line.trim_end());
        output.push('\n');
    }
}

fn render_status(output: &mut String, state: &GameState) {
    for faction in state.factions() {
        output.push_str(&format!(
            "{} [{}] capital {}/5, territory {}, units {}, {}\n",
            faction.label,
            faction.id,
            faction.capital_hp,
            state.map().count_territory(faction.id),
            state.map().count_units(faction.id),
            faction.resources()
        ));
    }

    if let Some(winner) = state.winner().and_then(|id| state.faction(id)) {
        output.push_str(&format!("Winner: {}\n", winner.label));
    }
}

/// Glyph for the contents of a tile: unit, then structure, then terrain.
#[must_use]
pub fn tile_glyph(tile: &Tile) -> char {
    if let Some(unit) = tile.unit {
        let glyph = match unit.kind {
            UnitKind::Infantry => 'i',
            UnitKind::Archer => 'a',
            UnitKind::Cavalry => 'c',
            UnitKind::Ship => 's',
        };
        return if unit.owner == 0 {
            glyph.to_ascii_uppercase()
        } else {
            glyph
        };
    }

    if tile.is_city {
        return '#';
    }

    if let Some(kind) = tile.building() {
        return match kind {
            BuildingKind::Farm => 'f',
            BuildingKind::Lumber => 'l',
            BuildingKind::Market => 'm',
            BuildingKind::Barracks => 'b',
            BuildingKind::Port => 'p',
        };
    }

    match tile.terrain {
        Terrain::Plains => '.',
        Terrain::Forest => '"',
        Terrain::Mountain => '^',
        Terrain::Water => '~',
        Terrain::City => '#',
    }
}

fn owner_glyph(tile: &Tile) -> char {
    match tile.owner {
        Some(0) => '0',
        Some(1) => '1',
        _ => ' ',
    }
}

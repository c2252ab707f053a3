//! Faction state management.

use serde::Serialize;

use crate::game::economy::ResourceLedger;
use crate::game::rules::{CAPITAL_START_HP, Landmark};
use crate::game::Coord;

/// Identifier of a faction: 0 or 1.
pub type FactionId = u8;

/// Number of factions in every game.
pub const FACTION_COUNT: usize = 2;

/// Fixed capital locations, indexed by faction.
pub const CAPITALS: [Coord; FACTION_COUNT] = [Coord::new(4, 8), Coord::new(12, 6)];

/// The other faction.
#[must_use]
pub const fn opponent(id: FactionId) -> FactionId {
    (id + 1) % FACTION_COUNT as FactionId
}

/// State for a single faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Faction {
    /// Unique identifier for this faction.
    pub id: FactionId,
    /// Display label.
    pub label: &'static str,
    /// Display color as a hex string.
    pub color: &'static str,
    /// Location of the faction's capital.
    pub capital: Coord,
    /// Remaining capital hit points. Reaching 0 loses the game.
    pub capital_hp: u8,
    /// Resource stock.
    pub(crate) resources: ResourceLedger,
}

impl Faction {
    /// Create a faction in its starting state.
    ///
    /// Ids other than 0 and 1 are clamped to faction 1.
    #[must_use]
    pub fn new(id: FactionId) -> Self {
        let (label, color) = if id == 0 {
            ("Myanmar", "#d4af37")
        } else {
            ("Thailand", "#2b7de9")
        };
        let id = id.min(1);
        Self {
            id,
            label,
            color,
            capital: CAPITALS[usize::from(id)],
            capital_hp: CAPITAL_START_HP,
            resources: ResourceLedger::starting(),
        }
    }

    /// Landmark standing on this faction's capital.
    #[must_use]
    pub const fn landmark(&self) -> Landmark {
        if self.id == 0 {
            Landmark::Pagoda
        } else {
            Landmark::Palace
        }
    }

    /// Read-only view of the faction's resources.
    #[must_use]
    pub const fn resources(&self) -> &ResourceLedger {
        &self.resources
    }

    /// Check whether the capital has fallen.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.capital_hp == 0
    }
}

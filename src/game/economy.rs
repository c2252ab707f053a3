//! Economy: affordability, payment and per-turn production.
//!
//! Ledgers are only changed through [`ResourceLedger::pay`] and
//! [`ResourceLedger::credit`]. Production is computed from tile ownership at
//! the moment a turn ends, not from a snapshot taken when it began.

use std::fmt;
use std::ops::Index;

use serde::Serialize;

use crate::game::rules::{Amounts, Resource, STARTING_STOCK};
use crate::game::{FactionId, Map};

/// A faction's stock of every resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResourceLedger {
    stock: [u32; 4],
}

impl ResourceLedger {
    /// An empty ledger.
    #[must_use]
    pub const fn empty() -> Self {
        Self { stock: [0; 4] }
    }

    /// The stock every faction starts the game with.
    #[must_use]
    pub const fn starting() -> Self {
        Self {
            stock: STARTING_STOCK,
        }
    }

    /// A ledger holding exactly the given amounts.
    #[must_use]
    pub fn from_amounts(amounts: &[(Resource, u32)]) -> Self {
        let mut ledger = Self::empty();
        ledger.credit(amounts);
        ledger
    }

    /// Current amount of a resource.
    #[must_use]
    pub const fn get(&self, resource: Resource) -> u32 {
        self.stock[resource.index()]
    }

    /// Check whether every listed amount is covered by the stock.
    ///
    /// Pure: never changes the ledger.
    #[must_use]
    pub fn can_afford(&self, cost: &[(Resource, u32)]) -> bool {
        cost.iter()
            .all(|&(resource, amount)| self.get(resource) >= amount)
    }

    /// Deduct every listed amount.
    ///
    /// Callers check [`Self::can_afford`] first; an unaffordable entry is
    /// floored at zero rather than wrapping.
    pub fn pay(&mut self, cost: &[(Resource, u32)]) {
        for &(resource, amount) in cost {
            let slot = &mut self.stock[resource.index()];
            *slot = slot.saturating_sub(amount);
        }
    }

    /// Add every listed amount.
    pub fn credit(&mut self, amounts: &[(Resource, u32)]) {
        for &(resource, amount) in amounts {
            let slot = &mut self.stock[resource.index()];
            *slot = slot.saturating_add(amount);
        }
    }

    /// Add another ledger's stock to this one.
    pub fn absorb(&mut self, other: &ResourceLedger) {
        for resource in Resource::ALL {
            self.credit(&[(resource, other.get(resource))]);
        }
    }

    /// Check whether every resource is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stock.iter().all(|&v| v == 0)
    }
}

impl Index<Resource> for ResourceLedger {
    type Output = u32;

    fn index(&self, resource: Resource) -> &u32 {
        &self.stock[resource.index()]
    }
}

impl fmt::Display for ResourceLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Resource::ALL
            .iter()
            .map(|&r| format!("{} {}", r.name(), self.get(r)))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Total yield of every producing building a faction owns.
#[must_use]
pub fn production_for(map: &Map, faction: FactionId) -> ResourceLedger {
    let mut produced = ResourceLedger::empty();
    for (_, tile) in map.tiles_owned_by(faction) {
        if let Some(kind) = tile.building() {
            let yields: Amounts = kind.production();
            produced.credit(yields);
        }
    }
    produced
}

/// Credit a faction's production to its ledger.
///
/// Returns what was produced.
pub fn accrue_production(
    map: &Map,
    faction: FactionId,
    ledger: &mut ResourceLedger,
) -> ResourceLedger {
    let produced = production_for(map, faction);
    ledger.absorb(&produced);
    produced
}

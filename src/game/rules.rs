//! Fixed rule tables: terrain, resources, costs, yields and unit stats.
//!
//! Nothing in here has behaviour beyond table lookups. Every other module
//! reads these values; none of them may be changed at runtime.

use serde::Serialize;

/// Map width in tiles.
pub const WIDTH: u16 = 18;

/// Map height in tiles.
pub const HEIGHT: u16 = 12;

/// Total number of tiles on the map.
pub const TILE_COUNT: usize = WIDTH as usize * HEIGHT as usize;

/// Hit points of a freshly trained unit.
pub const UNIT_START_HP: u8 = 3;

/// Hit points of a capital at game start.
pub const CAPITAL_START_HP: u8 = 5;

/// Radius of the square starting territory around each capital.
pub const START_TERRITORY_RADIUS: u16 = 2;

/// A list of `(resource, amount)` pairs used for costs and yields.
pub type Amounts = &'static [(Resource, u32)];

/// A tradeable resource held in a faction's ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    /// Food, produced by farms.
    Rice,
    /// Coin, produced by markets.
    Gold,
    /// Wood, produced by lumber camps.
    Timber,
    /// Luxury good, produced by markets.
    Spices,
}

impl Resource {
    /// Every resource, in ledger order.
    pub const ALL: [Resource; 4] = [
        Resource::Rice,
        Resource::Gold,
        Resource::Timber,
        Resource::Spices,
    ];

    /// Position of this resource inside a ledger.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Resource::Rice => 0,
            Resource::Gold => 1,
            Resource::Timber => 2,
            Resource::Spices => 3,
        }
    }

    /// Lowercase name used in text output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Resource::Rice => "rice",
            Resource::Gold => "gold",
            Resource::Timber => "timber",
            Resource::Spices => "spices",
        }
    }
}

/// Starting stock for every faction, indexed like [`Resource::ALL`].
pub const STARTING_STOCK: [u32; 4] = [100, 100, 100, 0];

/// Terrain of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    /// Open land.
    Plains,
    /// Wooded land.
    Forest,
    /// High ground.
    Mountain,
    /// Rivers and lakes. Only sea units may enter.
    Water,
    /// A capital. Only the two fixed capital tiles carry this terrain.
    City,
}

impl Terrain {
    /// Check whether this terrain is water.
    #[must_use]
    pub const fn is_water(self) -> bool {
        matches!(self, Terrain::Water)
    }
}

/// Movement domain of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Walks on any non-water terrain.
    Land,
    /// Sails on water and may approach cities.
    Sea,
}

/// A structure a faction may construct on its territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingKind {
    /// Produces rice.
    Farm,
    /// Produces timber.
    Lumber,
    /// Produces gold and spices.
    Market,
    /// Trains land units.
    Barracks,
    /// Trains ships.
    Port,
}

impl BuildingKind {
    /// Every building kind.
    pub const ALL: [BuildingKind; 5] = [
        BuildingKind::Farm,
        BuildingKind::Lumber,
        BuildingKind::Market,
        BuildingKind::Barracks,
        BuildingKind::Port,
    ];

    /// Resources spent to construct this building.
    #[must_use]
    pub const fn cost(self) -> Amounts {
        match self {
            BuildingKind::Farm => &[(Resource::Timber, 20), (Resource::Gold, 10)],
            BuildingKind::Lumber => &[(Resource::Gold, 10)],
            BuildingKind::Market => &[(Resource::Timber, 30), (Resource::Rice, 20)],
            BuildingKind::Barracks => &[(Resource::Timber, 50), (Resource::Gold, 50)],
            BuildingKind::Port => &[(Resource::Timber, 40), (Resource::Gold, 30)],
        }
    }

    /// Resources produced at the end of each of the owner's turns.
    ///
    /// Empty for buildings that only enable training.
    #[must_use]
    pub const fn production(self) -> Amounts {
        match self {
            BuildingKind::Farm => &[(Resource::Rice, 8)],
            BuildingKind::Lumber => &[(Resource::Timber, 6)],
            BuildingKind::Market => &[(Resource::Gold, 6), (Resource::Spices, 2)],
            BuildingKind::Barracks | BuildingKind::Port => &[],
        }
    }

    /// Lowercase name used in text output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            BuildingKind::Farm => "farm",
            BuildingKind::Lumber => "lumber",
            BuildingKind::Market => "market",
            BuildingKind::Barracks => "barracks",
            BuildingKind::Port => "port",
        }
    }
}

/// Permanent marker on a capital tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Landmark {
    /// Faction 0's capital.
    Pagoda,
    /// Faction 1's capital.
    Palace,
}

/// Combat and movement statistics shared by every unit of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitStats {
    /// Base attack value.
    pub attack: u8,
    /// Base defense value.
    pub defense: u8,
    /// Maximum Manhattan distance per action.
    pub movement: u8,
    /// Where the unit may stand.
    pub domain: Domain,
}

/// Kind of military unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// Sturdy foot soldiers.
    Infantry,
    /// Hard-hitting but fragile.
    Archer,
    /// Fast mounted troops.
    Cavalry,
    /// The only sea unit.
    Ship,
}

impl UnitKind {
    /// Every unit kind.
    pub const ALL: [UnitKind; 4] = [
        UnitKind::Infantry,
        UnitKind::Archer,
        UnitKind::Cavalry,
        UnitKind::Ship,
    ];

    /// Statistics for this kind.
    #[must_use]
    pub const fn stats(self) -> UnitStats {
        match self {
            UnitKind::Infantry => UnitStats {
                attack: 2,
                defense: 2,
                movement: 1,
                domain: Domain::Land,
            },
            UnitKind::Archer => UnitStats {
                attack: 3,
                defense: 1,
                movement: 1,
                domain: Domain::Land,
            },
            UnitKind::Cavalry => UnitStats {
                attack: 3,
                defense: 2,
                movement: 2,
                domain: Domain::Land,
            },
            UnitKind::Ship => UnitStats {
                attack: 3,
                defense: 2,
                movement: 2,
                domain: Domain::Sea,
            },
        }
    }

    /// Resources spent to train this unit.
    #[must_use]
    pub const fn cost(self) -> Amounts {
        match self {
            UnitKind::Infantry => &[(Resource::Rice, 10), (Resource::Gold, 10)],
            UnitKind::Archer => &[(Resource::Timber, 10), (Resource::Gold, 15)],
            UnitKind::Cavalry => &[(Resource::Rice, 20), (Resource::Gold, 30)],
            UnitKind::Ship => &[(Resource::Timber, 40), (Resource::Gold, 20)],
        }
    }

    /// Building a tile needs before this unit can be trained on it.
    #[must_use]
    pub const fn trained_at(self) -> BuildingKind {
        match self.stats().domain {
            Domain::Land => BuildingKind::Barracks,
            Domain::Sea => BuildingKind::Port,
        }
    }

    /// Lowercase name used in text output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            UnitKind::Infantry => "infantry",
            UnitKind::Archer => "archer",
            UnitKind::Cavalry => "cavalry",
            UnitKind::Ship => "ship",
        }
    }
}

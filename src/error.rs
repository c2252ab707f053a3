//! Rejection reasons for engine commands.
//!
//! Every rejection is recoverable and leaves the game state unchanged.

use thiserror::Error;

use crate::game::rules::BuildingKind;

/// Why a command was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    /// The acting faction does not own the target tile.
    #[error("tile is not owned by the acting faction")]
    NotOwned,
    /// Terrain and building or unit domain do not match.
    #[error("terrain is incompatible with this action")]
    TerrainIncompatible,
    /// The tile already carries a permanent structure.
    #[error("tile already has a permanent structure")]
    AlreadyBuilt,
    /// The faction cannot pay the cost.
    #[error("insufficient resources")]
    InsufficientResources,
    /// A unit already stands on the tile.
    #[error("tile is occupied by a unit")]
    OccupiedDestination,
    /// The destination is farther than the unit can move.
    #[error("destination is out of range: distance {distance}, movement {movement}")]
    OutOfRange {
        /// Manhattan distance to the destination.
        distance: u16,
        /// Movement range of the unit.
        movement: u8,
    },
    /// No unit of the acting faction stands on the source tile.
    #[error("no unit of the acting faction on the source tile")]
    NoSourceUnit,
    /// Training requires a structure the tile does not have.
    #[error("tile needs a {} to train this unit", .required.name())]
    MissingStructure {
        /// The structure that is needed.
        required: BuildingKind,
    },
    /// The tile index is not on the map.
    #[error("tile index {0} is not on the map")]
    InvalidTile(usize),
    /// A capital has fallen; only a reset is accepted.
    #[error("the game is over")]
    GameOver,
    /// The computer opponent's turn has not been run yet.
    #[error("waiting for the opponent to finish its turn")]
    AwaitingOpponent,
}

/// Result type for engine commands.
pub type ActionResult<T> = Result<T, ActionError>;

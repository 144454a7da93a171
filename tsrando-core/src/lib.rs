//! Logic engine for the Timespinner item randomiser.
//!
//! Given the world's item locations, each guarded by a [`Gate`] over player
//! capabilities, and the items placed in them, the engine answers which
//! locations are reachable, in which order progression unlocks, and whether a
//! placement can be finished at all. Producing the placement itself happens
//! elsewhere.

use thiserror::Error;

pub mod analysis;
pub mod gate;
pub mod items;
pub mod location;
pub mod location_map;
pub mod placement;
pub mod progressive;
pub mod requirement;
pub mod save;
pub mod seed;
pub mod solver;

pub use analysis::{check_completion, is_completable, progression_chain, Completion, ProgressionChain};
pub use gate::Gate;
pub use items::{ItemIdentifier, ItemInfo, ItemInfoProvider, ItemProvider, ItemUnlockingMap};
pub use location::{ItemKey, ItemLocation};
pub use location_map::ItemLocationMap;
pub use placement::Placement;
pub use progressive::ProgressiveChain;
pub use requirement::Requirement;
pub use save::GameSave;
pub use seed::{ParseSeedError, Seed, SeedOptions};

#[derive(Debug, Error)]
pub enum LogicError {
    #[error("duplicate item location {0}")]
    DuplicateLocation(ItemKey),
    #[error("no item location {0}")]
    UnknownLocation(ItemKey),
    #[error("invalid item key '{0}'")]
    InvalidItemKey(String),
    #[error("unknown requirement '{0}'")]
    UnknownRequirement(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LogicError>;

//! Domain layer for the game library.
//!
//! Core types independent of storage, worker or UI concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`codes`]: Platform, region and edition code tables
//! - [`release`]: Release records, included items and manual geometry

pub mod codes;
pub mod error;
pub mod release;

pub use codes::{Edition, Platform, Region};
pub use error::{GameLibraryError, Result};
pub use release::{parse_included_items, Game, GameId, IncludedItem, ManualInfo, ReleaseRecord};

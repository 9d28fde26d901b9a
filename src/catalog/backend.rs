//! Data source abstraction.
//!
//! This module defines the [`CatalogSource`] trait over the relational table
//! store. The core is read-only: it never writes back.
//!
//! The trait is minimal and maps one method to each query the application
//! issues, not a generic ORM.

use crate::domain::error::Result;
use crate::domain::{Game, GameId, ReleaseRecord};

/// Read-only access to the `games` and `game_releases` tables.
///
/// # Implementations
///
/// - [`JsonCatalogSource`](crate::catalog::JsonCatalogSource): reads a JSON
///   export of both tables
///
/// # Examples
///
/// ```no_run
/// use game_library::catalog::{CatalogSource, JsonCatalogSource};
/// use std::path::PathBuf;
///
/// let source = JsonCatalogSource::open(PathBuf::from("/tmp/catalog.json"))?;
/// let rows = source.fetch_catalog()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait CatalogSource: Send {
    /// Fetches every game ordered by title.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn fetch_games_ordered(&self) -> Result<Vec<Game>>;

    /// Fetches every release of one game, joined with its title.
    ///
    /// Returns an empty list for an unknown `game_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn fetch_releases_for_game(&self, game_id: GameId) -> Result<Vec<ReleaseRecord>>;

    /// Fetches every release joined with its game title, for table listing.
    ///
    /// Rows come back in table order. Releases whose `game_id` has no game
    /// row are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn fetch_catalog(&self) -> Result<Vec<ReleaseRecord>>;
}

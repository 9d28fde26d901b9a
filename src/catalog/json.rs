//! JSON file-based data source.
//!
//! Reads an export of the `games` and `game_releases` tables from a single
//! JSON document. The whole export is loaded on open and queried in memory.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "games": [
//!     { "id": 1, "title": "fallout4", "title_text": "Fallout 4" }
//!   ],
//!   "game_releases": [
//!     {
//!       "game_id": 1,
//!       "platform": "ps4",
//!       "region": "us",
//!       "edition": "std",
//!       "release_date": "2015-11-10",
//!       "genres": ["RPG", "FPS"],
//!       "cover_text": "...",
//!       "cover_width": 13.5,
//!       "cover_height": 17.0,
//!       "included_items": [
//!         { "item": "manual", "page_width": 12, "page_height": 17, "number_of_pages": 8 }
//!       ]
//!     }
//!   ]
//! }
//! ```

use crate::catalog::backend::CatalogSource;
use crate::catalog::models::{GameRecord, GameReleaseRecord};
use crate::domain::error::{GameLibraryError, Result};
use crate::domain::{Game, GameId, ReleaseRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Top-level structure of the JSON export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    /// Version of the export format.
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub games: Vec<GameRecord>,

    #[serde(default)]
    pub game_releases: Vec<GameReleaseRecord>,
}

const fn default_version() -> u32 {
    1
}

/// JSON export data source.
///
/// Holds the parsed export in memory. `Send` but not `Sync`; it is owned by
/// the worker thread.
pub struct JsonCatalogSource {
    /// Path the export was read from, if any.
    file_path: Option<PathBuf>,

    data: CatalogData,

    /// Game rows indexed by id.
    games_by_id: HashMap<GameId, usize>,
}

impl JsonCatalogSource {
    /// Opens and parses a JSON export.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid export.
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON catalog source");

        let data = Self::load_from_file(&file_path)?;
        let mut source = Self::from_data(data);
        source.file_path = Some(file_path);
        Ok(source)
    }

    /// Parses an export held in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid export.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: CatalogData = serde_json::from_str(json)
            .map_err(|e| GameLibraryError::Parse(format!("failed to parse catalog JSON: {e}")))?;
        Ok(Self::from_data(data))
    }

    /// Wraps already-parsed export data.
    #[must_use]
    pub fn from_data(data: CatalogData) -> Self {
        let games_by_id = data
            .games
            .iter()
            .enumerate()
            .map(|(index, game)| (game.id, index))
            .collect();

        tracing::debug!(
            version = data.version,
            games = data.games.len(),
            releases = data.game_releases.len(),
            "catalog source loaded"
        );

        Self {
            file_path: None,
            data,
            games_by_id,
        }
    }

    /// Returns the path the export was read from.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    fn load_from_file(path: &Path) -> Result<CatalogData> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| GameLibraryError::Parse(format!("failed to parse catalog JSON: {e}")))
    }

    fn game(&self, game_id: GameId) -> Option<&GameRecord> {
        self.games_by_id.get(&game_id).map(|&index| &self.data.games[index])
    }

    fn join<'a>(&'a self, rows: impl Iterator<Item = &'a GameReleaseRecord>) -> Vec<ReleaseRecord> {
        rows.filter_map(|row| match self.game(row.game_id) {
            Some(game) => Some(row.clone().into_release(game)),
            None => {
                tracing::warn!(game_id = row.game_id, "release references unknown game, skipping");
                None
            }
        })
        .collect()
    }
}

impl CatalogSource for JsonCatalogSource {
    fn fetch_games_ordered(&self) -> Result<Vec<Game>> {
        let _span = tracing::debug_span!("json_fetch_games_ordered").entered();

        let mut games: Vec<Game> = self.data.games.iter().map(Game::from).collect();
        games.sort_by(|a, b| a.title.cmp(&b.title));

        tracing::debug!(count = games.len(), "retrieved games");
        Ok(games)
    }

    fn fetch_releases_for_game(&self, game_id: GameId) -> Result<Vec<ReleaseRecord>> {
        let _span = tracing::debug_span!("json_fetch_releases_for_game", game_id = game_id).entered();

        let releases = self.join(self.data.game_releases.iter().filter(|row| row.game_id == game_id));

        tracing::debug!(count = releases.len(), "retrieved releases");
        Ok(releases)
    }

    fn fetch_catalog(&self) -> Result<Vec<ReleaseRecord>> {
        let _span = tracing::debug_span!("json_fetch_catalog").entered();

        let releases = self.join(self.data.game_releases.iter());

        tracing::debug!(count = releases.len(), "retrieved catalog");
        Ok(releases)
    }
}

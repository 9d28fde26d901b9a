//! Raw row models for the table store.
//!
//! These types mirror the `games` and `game_releases` tables as exported by
//! the backend. They are kept separate from the domain [`ReleaseRecord`] so
//! that loosely-typed columns (`genres`, `included_items`, `release_date`) are
//! normalized in one place.

use crate::domain::{parse_included_items, Game, GameId, ReleaseRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A row of the `games` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameId,

    /// Title identifier used in asset paths (e.g. `fallout4`).
    pub title: String,

    /// Display text shown in the table. Falls back to `title` when absent.
    #[serde(default)]
    pub title_text: Option<String>,
}

impl GameRecord {
    /// Returns the text to display for this game.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title_text.as_deref().unwrap_or(&self.title)
    }
}

impl From<&GameRecord> for Game {
    fn from(record: &GameRecord) -> Self {
        Self {
            id: record.id,
            title: record.display_title().to_string(),
        }
    }
}

/// A row of the `game_releases` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameReleaseRecord {
    pub game_id: GameId,
    pub platform: String,
    pub region: String,
    pub edition: String,

    /// ISO date (`YYYY-MM-DD`), optionally followed by a time component.
    #[serde(default)]
    pub release_date: Option<String>,

    /// A list of genres, a single genre string, or null.
    #[serde(default)]
    pub genres: JsonValue,

    #[serde(default)]
    pub cover_text: Option<String>,
    #[serde(default)]
    pub cover_width: Option<f64>,
    #[serde(default)]
    pub cover_height: Option<f64>,

    /// Free-form supplementary material payload.
    #[serde(default)]
    pub included_items: JsonValue,
}

impl GameReleaseRecord {
    /// Joins this row with its game into a domain record.
    #[must_use]
    pub fn into_release(self, game: &GameRecord) -> ReleaseRecord {
        let release_date = self.release_date.as_deref().and_then(parse_release_date);
        let genres = normalize_genres(&self.genres);
        let included_items = parse_included_items(&self.included_items);

        ReleaseRecord {
            game_id: self.game_id,
            title: game.display_title().to_string(),
            title_id: game.title.clone(),
            platform: self.platform.into(),
            region: self.region.into(),
            edition: self.edition.into(),
            release_date,
            genres,
            cover_text: self.cover_text,
            cover_width: self.cover_width,
            cover_height: self.cover_height,
            included_items,
        }
    }
}

/// Parses the date part of an ISO date or timestamp.
///
/// Unparseable dates are logged and treated as absent.
fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(raw = %raw, error = %e, "ignoring unparseable release date");
            None
        }
    }
}

/// Normalizes the `genres` column to an ordered list.
fn normalize_genres(value: &JsonValue) -> Vec<String> {
    match value {
        JsonValue::Array(entries) => entries
            .iter()
            .filter_map(JsonValue::as_str)
            .map(String::from)
            .collect(),
        JsonValue::String(genre) if !genre.is_empty() => vec![genre.clone()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Edition, Platform, Region};
    use serde_json::json;

    fn row(value: JsonValue) -> GameReleaseRecord {
        serde_json::from_value(value).unwrap()
    }

    fn game(title: &str) -> GameRecord {
        GameRecord { id: 1, title: title.to_lowercase().replace(' ', ""), title_text: Some(title.to_string()) }
    }

    #[test]
    fn joins_row_with_title() {
        let record = row(json!({
            "game_id": 7,
            "platform": "PS4",
            "region": "eur",
            "edition": "le",
            "release_date": "2015-11-10T00:00:00",
            "genres": ["RPG", "FPS"],
            "included_items": [{"item": "manual", "number_of_pages": 12}]
        }))
        .into_release(&game("Fallout 4"));

        assert_eq!(record.title, "Fallout 4");
        assert_eq!(record.title_id, "fallout4");
        assert_eq!(record.platform, Platform::Ps4);
        assert_eq!(record.region, Region::Eur);
        assert_eq!(record.edition, Edition::Limited);
        assert_eq!(record.release_date, NaiveDate::from_ymd_opt(2015, 11, 10));
        assert_eq!(record.genres, vec!["RPG", "FPS"]);
        assert_eq!(record.manual_info().page_count, 12);
    }

    #[test]
    fn single_genre_string_becomes_list() {
        let record = row(json!({
            "game_id": 1, "platform": "pc", "region": "us", "edition": "std",
            "genres": "Racing"
        }))
        .into_release(&game("X"));
        assert_eq!(record.genres, vec!["Racing"]);
    }

    #[test]
    fn missing_optional_columns_default() {
        let record = row(json!({
            "game_id": 1, "platform": "pc", "region": "us", "edition": "std",
            "release_date": "not a date"
        }))
        .into_release(&game("X"));
        assert!(record.release_date.is_none());
        assert!(record.genres.is_empty());
        assert!(record.included_items.is_empty());
    }

    #[test]
    fn display_title_prefers_title_text() {
        let game = GameRecord { id: 1, title: "fallout4".into(), title_text: Some("Fallout 4".into()) };
        assert_eq!(game.display_title(), "Fallout 4");
        let bare = GameRecord { id: 2, title: "mafia".into(), title_text: None };
        assert_eq!(bare.display_title(), "mafia");
    }
}

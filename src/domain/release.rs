//! Release domain model.
//!
//! A [`ReleaseRecord`] is one platform/region/edition variant of a game title,
//! joined with the title text. Records are loaded once per session and never
//! mutated; filtering and sorting produce derived views.

use super::codes::{Edition, Platform, Region};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Identifier shared by every release of the same title.
pub type GameId = i64;

/// A game title as stored in the `games` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub title: String,
}

/// One (title, platform, region, edition) combination.
///
/// `game_id` + `platform` + `region` + `edition` uniquely identifies a record
/// within the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub game_id: GameId,
    pub title: String,
    /// Title identifier used in asset paths.
    pub title_id: String,
    pub platform: Platform,
    pub region: Region,
    pub edition: Edition,
    pub release_date: Option<NaiveDate>,
    pub genres: Vec<String>,
    pub cover_text: Option<String>,
    pub cover_width: Option<f64>,
    pub cover_height: Option<f64>,
    pub included_items: Vec<IncludedItem>,
}

impl ReleaseRecord {
    /// Creates a record with no date, genres, cover metadata or included items.
    ///
    /// The asset title identifier defaults to the display title.
    ///
    /// # Examples
    ///
    /// ```
    /// use game_library::domain::{ReleaseRecord, Platform};
    ///
    /// let record = ReleaseRecord::new(1, "Fallout 4", "ps4", "us", "std");
    /// assert_eq!(record.platform, Platform::Ps4);
    /// assert!(record.included_items.is_empty());
    /// ```
    #[must_use]
    pub fn new(
        game_id: GameId,
        title: impl Into<String>,
        platform: impl Into<Platform>,
        region: impl Into<Region>,
        edition: impl Into<Edition>,
    ) -> Self {
        let title = title.into();
        Self {
            game_id,
            title_id: title.clone(),
            title,
            platform: platform.into(),
            region: region.into(),
            edition: edition.into(),
            release_date: None,
            genres: Vec::new(),
            cover_text: None,
            cover_width: None,
            cover_height: None,
            included_items: Vec::new(),
        }
    }

    /// Returns the identity tuple of this release.
    #[must_use]
    pub fn key(&self) -> (GameId, &Platform, &Region, &Edition) {
        (self.game_id, &self.platform, &self.region, &self.edition)
    }

    /// Returns the manual dimensions found among the included items.
    #[must_use]
    pub fn manual_info(&self) -> ManualInfo {
        ManualInfo::from_items(&self.included_items)
    }
}

/// Supplementary material shipped with a release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IncludedItem {
    /// An instruction manual with page geometry.
    Manual {
        page_width: Option<f64>,
        page_height: Option<f64>,
        page_count: u32,
    },
    /// Anything else (posters, maps, art books).
    Other { kind: String },
}

/// Raw shape of a manual entry in the `included_items` column.
#[derive(Debug, Deserialize)]
struct ManualEntry {
    #[serde(default)]
    page_width: Option<f64>,
    #[serde(default)]
    page_height: Option<f64>,
    #[serde(default)]
    number_of_pages: Option<u32>,
}

/// Manual geometry republished when a release is committed.
///
/// `page_count` is zero when the release carries no manual.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualInfo {
    pub page_width: Option<f64>,
    pub page_height: Option<f64>,
    pub page_count: u32,
}

impl ManualInfo {
    /// Extracts the last manual entry from a list of included items.
    #[must_use]
    pub fn from_items(items: &[IncludedItem]) -> Self {
        items
            .iter()
            .filter_map(|item| match item {
                IncludedItem::Manual { page_width, page_height, page_count } => Some(Self {
                    page_width: *page_width,
                    page_height: *page_height,
                    page_count: *page_count,
                }),
                IncludedItem::Other { .. } => None,
            })
            .last()
            .unwrap_or_default()
    }

    /// Number of spreads the manual can be flipped through.
    ///
    /// A manual of `n` pages shows the cover alone, then pairs, then the back:
    /// `n / 2 + 1` spreads.
    #[must_use]
    pub const fn spread_count(&self) -> u32 {
        self.page_count / 2 + 1
    }
}

/// Parses the free-form `included_items` column.
///
/// Accepts either an array of `{"item": ...}` objects or an object wrapping
/// such an array under `item` or `items`. `null` means no items. Any other
/// shape is logged and treated as no items.
#[must_use]
pub fn parse_included_items(value: &JsonValue) -> Vec<IncludedItem> {
    let entries = match value {
        JsonValue::Null => return Vec::new(),
        JsonValue::Array(entries) => entries,
        JsonValue::Object(map) => match map.get("item").or_else(|| map.get("items")) {
            Some(JsonValue::Array(entries)) => entries,
            _ => {
                tracing::warn!(payload = %value, "included items object has no item list");
                return Vec::new();
            }
        },
        _ => {
            tracing::warn!(payload = %value, "malformed included items payload");
            return Vec::new();
        }
    };

    entries
        .iter()
        .filter_map(|entry| {
            let kind = entry.get("item").and_then(JsonValue::as_str)?;
            if kind == "manual" {
                match serde_json::from_value::<ManualEntry>(entry.clone()) {
                    Ok(manual) => Some(IncludedItem::Manual {
                        page_width: manual.page_width,
                        page_height: manual.page_height,
                        page_count: manual.number_of_pages.unwrap_or(0),
                    }),
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping malformed manual entry");
                        None
                    }
                }
            } else {
                Some(IncludedItem::Other { kind: kind.to_string() })
            }
        })
        .collect()
}

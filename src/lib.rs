//! Game Library: catalog, selection and view-mode core for a virtual game-case
//! viewer.
//!
//! The crate holds everything a presentation layer needs except drawing and
//! sound:
//! - A session catalog of release records read once from a table store
//! - A pure filter / sort / paginate engine over that catalog
//! - A cascading title → platform → region → edition selection resolver
//! - A view-mode state machine for the case, cover, disc, manual and extras
//! - Background fetches on a worker thread with a cache-aside repository

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Line driver (main.rs)                              │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Store: event in, actions out, subscribers        │
//! │  - View modes, panel, image viewer                  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Table/Select  │   │ Worker Layer  │
//! │ (ui/)         │   │ (table/,      │   │ (worker/)     │
//! │ - Rendering   │   │  selection/)  │   │ - Fetches     │
//! │ - Genre theme │   │ - Filter/sort │   │ - Asset probe │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                   │
//! ┌─────────────────────────────────────────────────────┐
//! │  Catalog & Domain Layers                            │
//! │  - Data source trait + JSON export (catalog/)       │
//! │  - Memoized repository, asset store                 │
//! │  - Release records, code tables, errors (domain/)   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! The driver takes `key=value` arguments, parsed by [`Config::from_map`]:
//!
//! ```text
//! game-library catalog_file=~/games/catalog.json asset_root=~/games page_size=20 theme=library-light
//! ```
//!
//! # Example
//!
//! ```rust
//! use game_library::{initialize, Config, Event, Store};
//!
//! let mut store = Store::new(initialize(&Config::default()));
//! let actions = store.dispatch(&Event::Start)?;
//!
//! // Catalog and games list requested from the worker.
//! assert_eq!(actions.len(), 2);
//! assert!(store.state().loading.catalog);
//! # Ok::<(), game_library::GameLibraryError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod selection;
pub mod table;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, SoundCue, Store, ViewMode};
pub use domain::{GameLibraryError, ReleaseRecord, Result};
pub use ui::Theme;

use catalog::{CatalogRepository, JsonCatalogSource, LocalAssetStore};
use infrastructure::{expand_tilde, get_data_dir};
use std::collections::BTreeMap;
use std::path::PathBuf;
use table::{DEFAULT_PAGE_SIZE, PAGE_SIZES};
use worker::{CatalogWorker, WorkerHandle};

/// File name of the catalog export when `catalog_file` is not set.
pub const DEFAULT_CATALOG_FILE: &str = "catalog.json";

/// Driver configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON export of the `games` and `game_releases` tables.
    ///
    /// Default: `catalog.json` in the data directory.
    pub catalog_file: Option<String>,

    /// Directory the `images/...` store paths are resolved under.
    ///
    /// Default: the data directory.
    pub asset_root: Option<String>,

    /// Prefix for public image URLs. Without one, URLs are `file://` paths.
    pub asset_base_url: Option<String>,

    /// Rows per table page, one of [`PAGE_SIZES`]. Default: 10
    pub page_size: usize,

    /// Built-in theme name: `library-dark` or `library-light`. Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    pub theme_file: Option<String>,

    /// Tracing filter, e.g. `debug` or `game_library=trace`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Overrides the data directory (trace file, default catalog location).
    pub data_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_file: None,
            asset_root: None,
            asset_base_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            data_dir: None,
        }
    }
}

impl Config {
    /// Builds a configuration from string key/value pairs.
    ///
    /// Unknown keys are ignored. Blank values count as unset. A `page_size`
    /// that is not a number or not an offered size falls back to the default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use game_library::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("catalog_file".to_string(), "/srv/games.json".to_string());
    /// map.insert("page_size".to_string(), "20".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.catalog_file.as_deref(), Some("/srv/games.json"));
    /// assert_eq!(config.page_size, 20);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        let page_size = value("page_size").map_or(DEFAULT_PAGE_SIZE, |raw| {
            match raw.parse::<usize>() {
                Ok(size) if PAGE_SIZES.contains(&size) => size,
                _ => {
                    tracing::warn!(page_size = %raw, "unsupported page size, using default");
                    DEFAULT_PAGE_SIZE
                }
            }
        });

        Self {
            catalog_file: value("catalog_file"),
            asset_root: value("asset_root"),
            asset_base_url: value("asset_base_url"),
            page_size,
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level"),
            data_dir: value("data_dir"),
        }
    }

    /// Resolved location of the catalog export.
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.catalog_file.as_deref().map_or_else(
            || get_data_dir(self.data_dir.as_deref()).join(DEFAULT_CATALOG_FILE),
            expand_tilde,
        )
    }

    /// Resolved root of the image store.
    #[must_use]
    pub fn asset_root_path(&self) -> PathBuf {
        self.asset_root
            .as_deref()
            .map_or_else(|| get_data_dir(self.data_dir.as_deref()), expand_tilde)
    }
}

/// Creates the initial application state.
///
/// Theme resolution: `theme_file`, then `theme_name`, then the default theme.
/// A theme that fails to load is logged and replaced by the default.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing game library state");

    let theme = match (&config.theme_file, &config.theme_name) {
        (Some(theme_file), _) => Theme::from_file(expand_tilde(theme_file)).unwrap_or_else(|e| {
            tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
            Theme::default()
        }),
        (None, Some(theme_name)) => Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        }),
        (None, None) => Theme::default(),
    };

    AppState::new(theme, config.page_size)
}

/// Opens the configured catalog and asset store and starts the worker thread.
///
/// # Errors
///
/// Returns an error if the catalog export cannot be read or parsed, or if the
/// worker thread cannot be spawned.
pub fn spawn_worker(config: &Config) -> Result<WorkerHandle> {
    let catalog_path = config.catalog_path();
    let source = JsonCatalogSource::open(catalog_path.clone()).map_err(|e| {
        tracing::warn!(path = ?catalog_path, error = %e, "failed to open catalog");
        e
    })?;

    let assets = LocalAssetStore::new(config.asset_root_path(), config.asset_base_url.clone());
    tracing::debug!(catalog = ?catalog_path, assets = ?assets.root(), "starting catalog worker");

    CatalogWorker::new(CatalogRepository::new(Box::new(source)), Box::new(assets)).spawn()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_map(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_every_key() {
        let config = Config::from_map(&map(&[
            ("catalog_file", "/data/catalog.json"),
            ("asset_root", "/data"),
            ("asset_base_url", "https://cdn.example.com/"),
            ("page_size", "20"),
            ("theme", "library-light"),
            ("theme_file", "/themes/mine.toml"),
            ("trace_level", "debug"),
            ("data_dir", "/var/lib/games"),
            ("unknown", "ignored"),
        ]));

        assert_eq!(config.catalog_file.as_deref(), Some("/data/catalog.json"));
        assert_eq!(config.asset_root.as_deref(), Some("/data"));
        assert_eq!(config.asset_base_url.as_deref(), Some("https://cdn.example.com/"));
        assert_eq!(config.page_size, 20);
        assert_eq!(config.theme_name.as_deref(), Some("library-light"));
        assert_eq!(config.theme_file.as_deref(), Some("/themes/mine.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.data_dir.as_deref(), Some("/var/lib/games"));
    }

    #[test]
    fn bad_page_size_falls_back() {
        assert_eq!(Config::from_map(&map(&[("page_size", "15")])).page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(Config::from_map(&map(&[("page_size", "ten")])).page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn blank_values_are_unset() {
        let config = Config::from_map(&map(&[("theme", "  "), ("catalog_file", "")]));
        assert!(config.theme_name.is_none());
        assert!(config.catalog_file.is_none());
    }

    #[test]
    fn paths_default_to_data_dir() {
        let config = Config {
            data_dir: Some("/tmp/gl-data".to_string()),
            ..Config::default()
        };
        assert_eq!(config.catalog_path(), PathBuf::from("/tmp/gl-data/catalog.json"));
        assert_eq!(config.asset_root_path(), PathBuf::from("/tmp/gl-data"));

        let config = Config {
            catalog_file: Some("/srv/c.json".to_string()),
            ..config
        };
        assert_eq!(config.catalog_path(), PathBuf::from("/srv/c.json"));
    }

    #[test]
    fn initialize_uses_page_size_and_falls_back_on_unknown_theme() {
        let config = Config {
            page_size: 20,
            theme_name: Some("no-such-theme".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.window.page_size(), 20);
        assert_eq!(state.theme.name, Theme::default().name);
    }

    #[test]
    fn missing_catalog_is_an_error() {
        let config = Config {
            catalog_file: Some("/definitely/not/here/catalog.json".to_string()),
            ..Config::default()
        };
        assert!(spawn_worker(&config).is_err());
    }
}

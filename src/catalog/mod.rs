//! Catalog layer: data source access, caching and image assets.
//!
//! The catalog is read once per session from the table store and shared
//! immutably with the table engine and the selection resolver.
//!
//! # Modules
//!
//! - `backend`: [`CatalogSource`] trait over the `games` / `game_releases` tables
//! - `json`: JSON export implementation of the source
//! - `models`: Raw row types separate from domain records
//! - `cache`: [`Memo`] primitive and the cache-aside [`CatalogRepository`]
//! - `assets`: Image path convention and [`AssetStore`] probe

pub mod assets;
pub mod backend;
pub mod cache;
pub mod json;
pub mod models;

pub use assets::{AssetStore, AssetUrls, LocalAssetStore};
pub use backend::CatalogSource;
pub use cache::{CatalogRepository, Memo};
pub use json::{CatalogData, JsonCatalogSource};
pub use models::{GameRecord, GameReleaseRecord};

//! Error types for the game library core.
//!
//! This module defines the centralized error type [`GameLibraryError`] and a type
//! alias [`Result`] used throughout the crate. All errors are implemented with
//! `thiserror`.
//!
//! Nothing here is fatal to the process: callers degrade to an empty or
//! placeholder presentation state and surface the message to the user.

use thiserror::Error;

/// The main error type for catalog, selection and worker operations.
///
/// # Examples
///
/// ```
/// use game_library::GameLibraryError;
///
/// fn validate_page_size(size: usize) -> Result<(), GameLibraryError> {
///     if size == 0 {
///         return Err(GameLibraryError::Config("page size must be positive".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_page_size(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum GameLibraryError {
    /// The data source could not answer a query.
    ///
    /// Raised by [`CatalogSource`](crate::catalog::CatalogSource) implementations
    /// when the underlying table store is unreachable or rejects the query.
    #[error("Data source error: {0}")]
    Source(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A payload did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A selection value is not offered for the current parent choices.
    #[error("Selection error: {0}")]
    Selection(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Genre palette parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for game library operations.
pub type Result<T> = std::result::Result<T, GameLibraryError>;

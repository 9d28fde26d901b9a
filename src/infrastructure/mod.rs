//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves user-supplied paths from the configuration and the directory
//! used for trace output.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, DATA_DIR_ENV};

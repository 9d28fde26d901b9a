//! Background worker thread for catalog fetches and asset probes.
//!
//! This module implements the worker thread that handles all data source and
//! image store I/O so the driver loop never blocks. It uses `std::sync::mpsc`
//! channels for cross-thread communication and carries distributed tracing
//! context with every message.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation, message processing and thread handle

pub mod handler;
pub mod messages;

pub use handler::{CatalogWorker, WorkerHandle};
pub use messages::{FetchScope, TraceContext, WorkerMessage, WorkerResponse};

//! Span tracing exported to a local OTLP JSON file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → game-library-otlp.json
//! ```
//!
//! The trace file lives in the data directory (see
//! [`get_data_dir`](crate::infrastructure::get_data_dir)), rotates at 10 MB and
//! keeps three backups. The worker thread continues the dispatching span's
//! trace through the context carried in each request, so one user action shows
//! up as a single trace across both threads.
//!
//! Level resolution: `RUST_LOG`, then the `trace_level` config key, then
//! `"info"`.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};

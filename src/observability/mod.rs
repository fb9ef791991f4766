//! Span export to a local OTLP JSON file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter → JSON lines
//! ```
//!
//! Spans land in `~/.local/share/zellij/country-explorer/country-explorer-otlp.json`,
//! one OTLP document per exported batch. The file rotates at 10 MiB and keeps
//! three numbered backups.
//!
//! The level comes from the `trace_level` plugin option and defaults to `info`.
//! Request lifecycles are traced across the plugin/worker boundary through the
//! `TraceContext` carried on worker messages.
//!
//! ```rust
//! use country_explorer::observability::init_tracing;
//! use country_explorer::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME};

//! Background worker thread for response decoding.
//!
//! Response bodies are posted to the worker, decoded and normalized there, and
//! the resulting [`FetchOutcome`](crate::fetch::FetchOutcome) is posted back to
//! the plugin. Messages carry tracing context so worker spans join the plugin's
//! trace.
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::CountryExplorerWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};

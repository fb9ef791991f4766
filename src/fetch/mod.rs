//! Remote fetch pipeline for the countries dataset.
//!
//! The pipeline itself performs no I/O. It produces request descriptors that
//! the plugin shim hands to Zellij's `web_request`, and it shapes the bodies
//! that come back:
//!
//! ```text
//! QueryState → RemoteQuery → RequestSequencer::begin → FetchRequest → web_request
//!                                                                        │
//! FetchOutcome ← parse_countries (worker) ← WebRequestResult ←───────────┘
//! ```
//!
//! # Modules
//!
//! - [`request`]: URL building, request ids, host context map
//! - [`sequencer`]: Monotonic ids and stale-response rejection
//! - [`debounce`]: Debounced commit of search text
//! - [`response`]: Body decoding and client-side name filtering

pub mod debounce;
pub mod request;
pub mod response;
pub mod sequencer;

pub use debounce::Debouncer;
pub use request::{FetchRequest, RequestId};
pub use response::{parse_countries, FetchOutcome};
pub use sequencer::RequestSequencer;

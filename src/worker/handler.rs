//! Worker thread implementation for response decoding.
//!
//! A full `/all` response is a few hundred kilobytes of JSON. Decoding and
//! normalizing it on the worker keeps the plugin's render loop responsive; the
//! worker is stateless and simply answers each message with a response.

use crate::fetch::parse_countries;
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CountryExplorerWorker {}

impl CountryExplorerWorker {
    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::current().with_remote_span_context(span_context).attach())
    }

    /// Processes a worker message and returns the response to post back.
    #[must_use]
    pub fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        match message {
            WorkerMessage::ParseCountries {
                request_id,
                status,
                body,
                name_filter,
                ..
            } => {
                let _span = tracing::debug_span!(
                    "worker_parse_countries",
                    request_id = %request_id,
                    status,
                    body_len = body.len()
                )
                .entered();

                let outcome = parse_countries(status, body.as_bytes(), name_filter.as_deref());
                WorkerResponse::CountriesParsed { request_id, outcome }
            }
        }
    }
}

/// Tracks whether worker tracing has been initialized.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for CountryExplorerWorker {
    /// Handles a JSON-serialized [`WorkerMessage`] and posts the response back
    /// under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            crate::observability::init_tracing(&crate::Config::default());
        }

        let response = match serde_json::from_str::<WorkerMessage>(&payload) {
            Ok(worker_message) => self.handle_message(worker_message),
            Err(e) => {
                let request_id = WorkerMessage::request_id_from_payload(&payload);
                tracing::warn!(error = %e, request_id = ?request_id, "failed to deserialize worker message");
                WorkerResponse::Error {
                    request_id,
                    message: format!("invalid worker message: {e}"),
                }
            }
        };

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::debug!(error = %e, "failed to serialize worker response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchOutcome, RequestId};

    #[test]
    fn parses_body_for_request() {
        let worker = CountryExplorerWorker::default();
        let message = WorkerMessage::parse_countries(
            RequestId::new(4),
            200,
            r#"[{"name":{"common":"Uganda"}},{"name":{"common":"Kenya"}}]"#.to_string(),
            Some("ug".to_string()),
        );

        let WorkerResponse::CountriesParsed { request_id, outcome } = worker.handle_message(message) else {
            panic!("expected CountriesParsed");
        };
        assert_eq!(request_id, RequestId::new(4));
        let FetchOutcome::Countries(countries) = outcome else {
            panic!("expected countries");
        };
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].name, "Uganda");
    }

    #[test]
    fn failed_status_reports_failure() {
        let worker = CountryExplorerWorker::default();
        let message = WorkerMessage::parse_countries(RequestId::new(1), 500, String::new(), None);
        assert!(matches!(
            worker.handle_message(message),
            WorkerResponse::CountriesParsed { outcome: FetchOutcome::Failed { .. }, .. }
        ));
    }
}

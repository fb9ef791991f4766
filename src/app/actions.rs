//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) never talks to the host directly; it
//! returns actions that the plugin shim executes in order. This keeps every
//! state transition testable without a Zellij runtime.

use crate::fetch::FetchRequest;
use crate::worker::WorkerMessage;
use std::time::Duration;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues an HTTP GET through the host's `web_request`.
    ///
    /// The request's context map carries its id so the completion can be
    /// matched against the sequencer.
    Fetch(FetchRequest),

    /// Arms one host timer; its `Timer` event is delivered as
    /// [`Event::DebounceElapsed`](super::Event::DebounceElapsed).
    ArmTimer(Duration),

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),
}

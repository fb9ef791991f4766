//! Zellij plugin wrapper and entry point.
//!
//! This is the thin layer between the `country_explorer` library and the
//! Zellij plugin host. It translates host events into library events, and
//! library actions into host calls.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │      Zellij Main Thread      │
//! │  ┌────────────────────────┐  │
//! │  │     State (plugin)     │  │  ← UI state, event handling, web_request
//! │  └────────────────────────┘  │
//! │              │ IPC           │
//! │              ▼               │
//! │  ┌────────────────────────┐  │
//! │  │ CountryExplorerWorker  │  │  ← response decoding
//! │  └────────────────────────┘  │
//! └──────────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, create `AppState`, request
//!    `WebAccess`, subscribe to events
//! 2. **Permission granted**: the initial "all countries" request is issued
//! 3. **Update**: map host events, run `handle_event`, execute actions
//! 4. **Render**: record the viewport and draw the screen
//!
//! # Keybindings
//!
//! Normal mode:
//! - `j`/`Down`, `k`/`Up`: move selection (or the dropdown cursor)
//! - `Enter`: open the selected card, pick the dropdown option, close the modal
//! - `/`: focus the search field
//! - `f`: open or close the region filter; `1`-`5` pick a region while open
//! - `x`: clear the region filter
//! - `g`/`Home`: return to top
//! - `t`: toggle light/dark theme
//! - `Esc`: close the modal or dropdown
//! - `q`: hide the plugin
//!
//! Search mode:
//! - characters are typed into the field
//! - `Enter`/`Tab`: leave the field, keeping its text
//! - `Esc`: clear the search
//!
//! Global: `Ctrl+n`/`Ctrl+p` move down/up, mouse clicks and wheel scrolling.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::time::Duration;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use country_explorer::domain::Region;
use country_explorer::fetch::request::elapsed_ms;
use country_explorer::fetch::{FetchRequest, RequestId};
use country_explorer::worker::{CountryExplorerWorker, WorkerMessage, WorkerResponse};
use country_explorer::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);
register_worker!(CountryExplorerWorker, country_explorer_worker, COUNTRY_EXPLORER_WORKER);

/// Worker name; must match the `register_worker!` function prefix.
const WORKER_NAME: &str = "country_explorer";

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: country_explorer::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: country_explorer::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes tracing and state, requests web
    /// access, and subscribes to events.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        country_explorer::observability::init_tracing(&config);

        let _span = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(config = ?config, "parsed configuration");

        self.app = country_explorer::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Maps a host event, delegates to `handle_event`, and executes the
    /// resulting actions. Returns whether to re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"));
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match Self::map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_) => Event::DebounceElapsed,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Self::map_web_request_result(status, body, &context)
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => Event::PermissionsGranted,
                PermissionStatus::Denied => Event::PermissionsDenied,
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(rows, cols);
        country_explorer::ui::render(&self.app);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(_) => "Mouse".to_string(),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        if self.app.input_mode == InputMode::Search {
            return Some(match key.bare_key {
                BareKey::Esc => Event::CancelSearch,
                BareKey::Enter | BareKey::Tab => Event::LeaveSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::Activate,
            BareKey::Esc => Event::Escape,
            BareKey::Home | BareKey::Char('g') => Event::ScrollToTop,
            BareKey::Char('/') => Event::FocusSearch,
            BareKey::Char('f') => Event::ToggleFilter,
            BareKey::Char('x') => Event::CancelFilter,
            BareKey::Char('t') => Event::ToggleTheme,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Char(c @ '1'..='5') if self.app.dropdown.is_open() => {
                let index = c.to_digit(10).map_or(0, |d| d as usize - 1);
                Event::SelectRegion(Region::ALL[index])
            }
            _ => return None,
        })
    }

    /// Host mouse lines and columns are 0-based; the layout is 1-based.
    fn map_mouse_event(mouse: Mouse) -> Option<Event> {
        match mouse {
            Mouse::LeftClick(line, col) => {
                let row = usize::try_from(line).ok()?;
                Some(Event::Click { row: row + 1, col: col + 1 })
            }
            Mouse::ScrollUp(_) => Some(Event::KeyUp),
            Mouse::ScrollDown(_) => Some(Event::KeyDown),
            _ => None,
        }
    }

    fn map_web_request_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Event {
        let request_id = RequestId::from_context(context);
        tracing::debug!(
            request_id = ?request_id,
            status,
            body_len = body.len(),
            latency_ms = ?elapsed_ms(context),
            "web request completed"
        );
        Event::FetchCompleted { request_id, status, body }
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker message");
            }
        }
    }

    fn issue_request(request: &FetchRequest) {
        tracing::debug!(request_id = %request.id, url = %request.url, "issuing web request");
        web_request(&request.url, HttpVerb::Get, BTreeMap::new(), Vec::new(), request.context());
    }

    fn arm_timer(delay: Duration) {
        set_timeout(delay.as_secs_f64());
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::Fetch(request) => Self::issue_request(request),
            Action::ArmTimer(delay) => Self::arm_timer(*delay),
            Action::PostToWorker(message) => Self::post_worker_message(message),
        }
    }
}

//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place state changes in response to input. It
//! returns whether a re-render is needed and the [`Action`]s the plugin shim
//! must execute.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `Activate`, `ScrollToTop`
//! - **Search**: `FocusSearch`, `LeaveSearch`, `Char`, `Backspace`, `CancelSearch`, `DebounceElapsed`
//! - **Region filter**: `ToggleFilter`, `SelectRegion`, `CancelFilter`
//! - **Details**: `OpenCard`, `CloseModal`, `Escape`
//! - **Mouse**: `Click`, resolved through the screen layout
//! - **System**: `PermissionsGranted`, `PermissionsDenied`, `FetchCompleted`, `WorkerResponse`
//!
//! # Fetch pipeline
//!
//! ```text
//! Action::Fetch ─→ host ─→ FetchCompleted ─→ Action::PostToWorker
//!                                                   │
//!                    list updated ←─ WorkerResponse ←┘
//! ```
//!
//! Both `FetchCompleted` and `WorkerResponse` are checked against the request
//! sequencer; responses to superseded requests are dropped at either step.

use crate::app::modes::InputMode;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{ExplorerError, Region, RegionFilter};
use crate::fetch::RequestId;
use crate::ui::layout::ClickTarget;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, host callbacks, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection (or the dropdown cursor) down.
    KeyDown,
    /// Moves selection (or the dropdown cursor) up.
    KeyUp,
    /// Enter: opens the selected card, picks the dropdown option, or closes the modal.
    Activate,
    /// Returns to the first card.
    ScrollToTop,
    /// Hides the plugin pane.
    CloseFocus,
    /// Closes whichever overlay is open.
    Escape,

    /// Focuses the search field.
    FocusSearch,
    /// Leaves the search field, keeping its text.
    LeaveSearch,
    /// Types a character into the search field.
    Char(char),
    /// Deletes the last character of the search field.
    Backspace,
    /// Clears the search field and re-fetches immediately.
    CancelSearch,
    /// A debounce timer fired.
    DebounceElapsed,

    /// Opens or closes the region dropdown.
    ToggleFilter,
    SelectRegion(Region),
    /// Resets the region filter to all regions.
    CancelFilter,

    /// Opens the detail modal for the card at this list index.
    OpenCard(usize),
    CloseModal,

    /// Switches between the light and dark themes.
    ToggleTheme,

    /// Left click at a 1-based screen cell.
    Click { row: usize, col: usize },

    /// Web access was granted; the initial fetch can start.
    PermissionsGranted,
    PermissionsDenied,

    /// The host finished an HTTP request.
    FetchCompleted {
        /// Id from the request's context map; `None` if it was lost.
        request_id: Option<RequestId>,
        status: u16,
        body: Vec<u8>,
    },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`.
///
/// # Errors
///
/// Currently infallible for all events; the signature leaves room for
/// transitions that can fail.
///
/// # Example
///
/// ```rust
/// use country_explorer::app::{handle_event, Action, AppState, Event};
/// use country_explorer::ui::Theme;
/// use std::time::Duration;
///
/// let mut state = AppState::new(Theme::default(), "https://restcountries.com/v3.1", Duration::from_millis(500));
/// let (render, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
/// assert!(render);
/// assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
/// # Ok::<(), country_explorer::domain::ExplorerError>(())
/// ```
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventKind(event)).entered();

    match event {
        Event::KeyDown | Event::KeyUp => {
            let delta = if *event == Event::KeyDown { 1 } else { -1 };
            if state.dropdown.is_open() {
                state.dropdown = state.dropdown.moved(delta);
                return Ok((true, vec![]));
            }
            let moved = if delta > 0 {
                state.move_selection_down()
            } else {
                state.move_selection_up()
            };
            Ok((moved, vec![]))
        }
        Event::Activate => {
            if state.close_modal() {
                return Ok((true, vec![]));
            }
            if let Some(region) = state.dropdown.cursor_region() {
                return select_region(state, RegionFilter::Only(region));
            }
            Ok((state.open_card(state.selected_index), vec![]))
        }
        Event::ScrollToTop => Ok((state.scroll_to_top(), vec![])),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Escape => Ok((state.close_modal() || state.close_dropdown(), vec![])),

        Event::FocusSearch => {
            if state.modal.is_open() {
                return Ok((false, vec![]));
            }
            state.close_dropdown();
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::LeaveSearch => {
            let was_searching = state.input_mode == InputMode::Search;
            state.input_mode = InputMode::Normal;
            Ok((was_searching, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            let raw = format!("{}{c}", state.search_input);
            Ok(edit_search(state, &raw))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            let mut raw = state.search_input.clone();
            raw.pop();
            Ok(edit_search(state, &raw))
        }
        Event::CancelSearch => {
            tracing::debug!(text = %state.search_input, "search cancelled");
            let request = state.cancel_search();
            Ok((true, vec![Action::Fetch(request)]))
        }
        Event::DebounceElapsed => match state.commit_search() {
            Some(request) => Ok((true, vec![Action::Fetch(request)])),
            None => Ok((false, vec![])),
        },

        Event::ToggleFilter => {
            if state.modal.is_open() {
                return Ok((false, vec![]));
            }
            state.toggle_dropdown();
            Ok((true, vec![]))
        }
        Event::SelectRegion(region) => select_region(state, RegionFilter::Only(*region)),
        Event::CancelFilter => select_region(state, RegionFilter::All),

        Event::OpenCard(index) => Ok((state.open_card(*index), vec![])),
        Event::CloseModal => Ok((state.close_modal(), vec![])),

        Event::ToggleTheme => {
            state.theme = state.theme.toggled();
            tracing::debug!(theme = %state.theme.name, "theme toggled");
            Ok((true, vec![]))
        }

        Event::Click { row, col } => handle_click(state, *row, *col),

        Event::PermissionsGranted => {
            tracing::debug!("web access granted, fetching all countries");
            Ok((true, vec![Action::Fetch(state.recompute())]))
        }
        Event::PermissionsDenied => {
            let error = ExplorerError::Transport("web access permission was denied".to_string());
            tracing::warn!(error = %error, "cannot fetch countries");
            state.list = crate::app::state::ListContent::NoResults {
                reason: Some(error.to_string()),
            };
            Ok((true, vec![]))
        }

        Event::FetchCompleted {
            request_id,
            status,
            body,
        } => {
            let Some(id) = *request_id else {
                tracing::debug!(status, "response without request id, ignoring");
                return Ok((false, vec![]));
            };
            let Some(request) = state.sequencer.current(id) else {
                tracing::debug!(request_id = %id, status, "discarding stale response");
                return Ok((false, vec![]));
            };

            let message = WorkerMessage::parse_countries(
                id,
                *status,
                String::from_utf8_lossy(body).into_owned(),
                request.name_filter.clone(),
            );
            Ok((false, vec![Action::PostToWorker(message)]))
        }

        Event::WorkerResponse(response) => match response {
            WorkerResponse::CountriesParsed { request_id, outcome } => {
                Ok((state.receive_outcome(*request_id, outcome.clone()), vec![]))
            }
            WorkerResponse::Error { request_id, message } => {
                let error = ExplorerError::Worker(message.clone());
                match *request_id {
                    Some(id) if state.is_current(id) => {
                        tracing::error!(request_id = %id, error = %error, "worker failed to decode response");
                        Ok((state.fail_request(id, error.to_string()), vec![]))
                    }
                    Some(id) => {
                        tracing::debug!(request_id = %id, error = %error, "discarding worker error for stale request");
                        Ok((false, vec![]))
                    }
                    None => {
                        tracing::warn!(error = %error, "worker error for unknown request");
                        Ok((false, vec![]))
                    }
                }
            }
        },
    }
}

/// Applies an edit to the search field and restarts the debounce window.
fn edit_search(state: &mut AppState, raw: &str) -> (bool, Vec<Action>) {
    let changed = state.apply_search_input(raw);
    (changed, vec![Action::ArmTimer(state.debouncer.delay())])
}

fn select_region(state: &mut AppState, region: RegionFilter) -> Result<(bool, Vec<Action>)> {
    if state.modal.is_open() {
        return Ok((false, vec![]));
    }
    Ok((true, vec![Action::Fetch(state.set_region(region))]))
}

/// Resolves a click through the current layout.
///
/// A click anywhere except the dropdown closes it, and the click still acts on
/// whatever it landed on.
fn handle_click(state: &mut AppState, row: usize, col: usize) -> Result<(bool, Vec<Action>)> {
    let target = state.layout().hit_test(row, col);
    tracing::debug!(row, col, ?target, "click");

    let mut render = false;
    if !matches!(target, ClickTarget::DropdownOption(_) | ClickTarget::FilterTrigger) {
        render |= state.close_dropdown();
    }
    if !matches!(target, ClickTarget::SearchBox | ClickTarget::SearchCancel) && state.input_mode == InputMode::Search {
        state.input_mode = InputMode::Normal;
        render = true;
    }

    let (target_render, actions) = match target {
        ClickTarget::ModalClose | ClickTarget::ModalBackground => (state.close_modal(), vec![]),
        ClickTarget::ModalPanel | ClickTarget::Nothing => (false, vec![]),
        ClickTarget::DropdownOption(region) => select_region(state, RegionFilter::Only(region))?,
        ClickTarget::FilterTrigger => handle_event(state, &Event::ToggleFilter)?,
        ClickTarget::FilterCancel => select_region(state, RegionFilter::All)?,
        ClickTarget::ReturnToTop => (state.scroll_to_top(), vec![]),
        ClickTarget::SearchCancel => handle_event(state, &Event::CancelSearch)?,
        ClickTarget::SearchBox => handle_event(state, &Event::FocusSearch)?,
        ClickTarget::ListRow(offset) => match state.card_at_offset(offset) {
            Some(index) => (state.open_card(index), vec![]),
            None => (false, vec![]),
        },
    };

    Ok((render || target_render, actions))
}

/// Logs events without dumping response bodies.
struct EventKind<'a>(&'a Event);

impl std::fmt::Debug for EventKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::FetchCompleted { request_id, status, body } => f
                .debug_struct("FetchCompleted")
                .field("request_id", request_id)
                .field("status", status)
                .field("body_len", &body.len())
                .finish(),
            Event::WorkerResponse(WorkerResponse::CountriesParsed { request_id, .. }) => {
                write!(f, "WorkerResponse(CountriesParsed {request_id})")
            }
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::ListContent;
    use crate::domain::Endpoint;
    use crate::fetch::request::{build_url, DEFAULT_API_BASE};
    use crate::fetch::FetchRequest;
    use crate::ui::viewmodel::ListView;
    use crate::ui::Theme;
    use crate::worker::CountryExplorerWorker;
    use std::time::Duration;

    const EUROPE: &str = r#"[
        {"name":{"common":"France"},"population":67391582,"region":"Europe","capital":["Paris"],
         "currencies":{"EUR":{"name":"Euro","symbol":"€"}},"languages":{"fra":"French"},"tld":[".fr"],
         "borders":["AND","BEL","DEU"]},
        {"name":{"common":"United Kingdom"},"population":67215293,"region":"Europe","capital":["London"]},
        {"name":{"common":"Vatican City"},"population":451,"region":"Europe"}
    ]"#;

    fn new_state() -> AppState {
        let mut state = AppState::new(Theme::default(), DEFAULT_API_BASE, Duration::from_millis(500));
        state.set_viewport(30, 100);
        state
    }

    fn run(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    fn fetched(actions: &[Action]) -> FetchRequest {
        match actions {
            [Action::Fetch(request)] => request.clone(),
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    /// Completes `request` with `body`, routing it through the worker.
    fn complete(state: &mut AppState, request: &FetchRequest, status: u16, body: &str) -> bool {
        let (_, actions) = run(
            state,
            Event::FetchCompleted {
                request_id: Some(request.id),
                status,
                body: body.as_bytes().to_vec(),
            },
        );
        let [Action::PostToWorker(message)] = actions.as_slice() else {
            return false;
        };
        let response = CountryExplorerWorker::default().handle_message(message.clone());
        run(state, Event::WorkerResponse(response)).0
    }

    fn type_text(state: &mut AppState, text: &str) -> usize {
        run(state, Event::FocusSearch);
        let mut timers = 0;
        for c in text.chars() {
            let (_, actions) = run(state, Event::Char(c));
            timers += actions.iter().filter(|a| matches!(a, Action::ArmTimer(_))).count();
        }
        timers
    }

    /// Fires `timers` debounce timers; returns the fetch issued by the last one.
    fn elapse(state: &mut AppState, timers: usize) -> Option<FetchRequest> {
        let mut issued = None;
        for _ in 0..timers {
            let (_, actions) = run(state, Event::DebounceElapsed);
            if let [Action::Fetch(request)] = actions.as_slice() {
                issued = Some(request.clone());
            }
        }
        issued
    }

    fn card_names(state: &AppState) -> Vec<&str> {
        state.cards().iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn permission_grant_fetches_all() {
        let mut state = new_state();
        let (render, actions) = run(&mut state, Event::PermissionsGranted);
        assert!(render);
        assert_eq!(fetched(&actions).url, build_url(DEFAULT_API_BASE, &Endpoint::All));
        assert_eq!(state.list, ListContent::Loading);
    }

    #[test]
    fn debounced_search_fetches_by_name() {
        let mut state = new_state();
        let initial = fetched(&run(&mut state, Event::PermissionsGranted).1);
        complete(&mut state, &initial, 200, EUROPE);

        let timers = type_text(&mut state, "france");
        assert_eq!(timers, 6);
        assert_eq!(state.query.search_text(), "");

        let request = elapse(&mut state, timers).unwrap();
        assert_eq!(request.url, build_url(DEFAULT_API_BASE, &Endpoint::Name("france".into())));
        assert_eq!(request.name_filter, None);

        assert!(complete(&mut state, &request, 200, r#"[{"name":{"common":"France"}}]"#));
        assert_eq!(card_names(&state), vec!["France"]);
    }

    #[test]
    fn region_then_search_filters_client_side() {
        let mut state = new_state();
        run(&mut state, Event::PermissionsGranted);

        let region_request = fetched(&run(&mut state, Event::SelectRegion(Region::Europe)).1);
        assert_eq!(region_request.url, build_url(DEFAULT_API_BASE, &Endpoint::Region(Region::Europe)));

        let timers = type_text(&mut state, "united");
        let request = elapse(&mut state, timers).unwrap();
        assert_eq!(request.url, region_request.url);
        assert_eq!(request.name_filter.as_deref(), Some("united"));

        // The region-only response is now stale.
        assert!(!complete(&mut state, &region_request, 200, EUROPE));
        assert_eq!(state.list, ListContent::Loading);

        assert!(complete(&mut state, &request, 200, EUROPE));
        assert_eq!(card_names(&state), vec!["United Kingdom"]);
    }

    #[test]
    fn empty_array_shows_no_results() {
        let mut state = new_state();
        let request = fetched(&run(&mut state, Event::PermissionsGranted).1);
        assert!(complete(&mut state, &request, 200, "[]"));

        let ListView::Empty(empty) = state.compute_viewmodel().list else {
            panic!("expected empty state");
        };
        assert_eq!(empty.message, "No results were found");
        assert!(empty.subtitle.is_empty());
        assert!(state.cards().is_empty());
    }

    #[test]
    fn failure_shows_no_results_with_reason() {
        let mut state = new_state();
        let request = fetched(&run(&mut state, Event::PermissionsGranted).1);
        assert!(complete(&mut state, &request, 404, r#"{"status":404,"message":"Not Found"}"#));
        assert_eq!(
            state.list,
            ListContent::NoResults {
                reason: Some("Request failed with HTTP status 404".to_string())
            }
        );
        assert!(!state.is_current(request.id));
    }

    #[test]
    fn missing_currencies_render_as_none() {
        let mut state = new_state();
        let request = fetched(&run(&mut state, Event::PermissionsGranted).1);
        complete(&mut state, &request, 200, EUROPE);

        assert!(run(&mut state, Event::OpenCard(2)).0);
        let modal = state.compute_viewmodel().modal.unwrap();
        assert_eq!(modal.title, "Vatican City");
        assert_eq!(modal.field("Currencies"), Some("None"));
        assert_eq!(modal.field("Languages"), Some("None"));
        assert_eq!(modal.borders_display(), vec!["None".to_string()]);
    }

    #[test]
    fn opened_modal_matches_fetched_record() {
        let mut state = new_state();
        let request = fetched(&run(&mut state, Event::PermissionsGranted).1);
        complete(&mut state, &request, 200, EUROPE);
        let record = state.cards()[0].clone();

        run(&mut state, Event::Activate);
        assert_eq!(state.modal.country(), Some(&record));

        let modal = state.compute_viewmodel().modal.unwrap();
        assert_eq!(modal.field("Population"), Some("67,391,582"));
        assert_eq!(modal.field("Currencies"), Some("Euro"));
        assert_eq!(modal.field("Top Level Domain"), Some(".fr"));

        // A newer fetch replacing the list does not touch the open modal.
        let refresh = fetched(&run(&mut state, Event::PermissionsGranted).1);
        complete(&mut state, &refresh, 200, "[]");
        assert_eq!(state.modal.country(), Some(&record));
    }

    #[test]
    fn background_click_closes_modal_but_panel_click_does_not() {
        let mut state = new_state();
        let request = fetched(&run(&mut state, Event::PermissionsGranted).1);
        complete(&mut state, &request, 200, EUROPE);

        let first_row = state.layout().list.row;
        run(&mut state, Event::Click { row: first_row + 1, col: 5 });
        assert_eq!(state.modal.country().map(|c| c.name.as_str()), Some("United Kingdom"));

        let panel = state.layout().modal.unwrap();
        let (render, _) = run(&mut state, Event::Click { row: panel.row + 2, col: panel.col + 2 });
        assert!(!render);
        assert!(state.modal.is_open());

        assert!(!run(&mut state, Event::KeyDown).0);
        assert_eq!(state.selected_index, 1);

        let (render, _) = run(&mut state, Event::Click { row: 1, col: 1 });
        assert!(render);
        assert!(!state.modal.is_open());
        assert!(run(&mut state, Event::KeyDown).0);
    }

    #[test]
    fn close_control_closes_modal() {
        let mut state = new_state();
        let request = fetched(&run(&mut state, Event::PermissionsGranted).1);
        complete(&mut state, &request, 200, EUROPE);
        run(&mut state, Event::OpenCard(0));

        let close = state.layout().modal_close.unwrap();
        assert!(run(&mut state, Event::Click { row: close.row, col: close.col + 1 }).0);
        assert!(!state.modal.is_open());
    }

    #[test]
    fn cancel_filter_always_returns_to_all() {
        let mut state = new_state();
        run(&mut state, Event::PermissionsGranted);

        for region in Region::ALL {
            run(&mut state, Event::SelectRegion(region));
            assert_eq!(state.query.region(), RegionFilter::Only(region));
            let request = fetched(&run(&mut state, Event::CancelFilter).1);
            assert_eq!(state.query.region(), RegionFilter::All);
            assert_eq!(request.url, build_url(DEFAULT_API_BASE, &Endpoint::All));
        }

        let request = fetched(&run(&mut state, Event::CancelFilter).1);
        assert_eq!(request.url, build_url(DEFAULT_API_BASE, &Endpoint::All));
        assert_eq!(state.compute_viewmodel().filter_bar.label, "Filter by Region");
    }

    #[test]
    fn dropdown_by_click_and_keyboard() {
        let mut state = new_state();
        run(&mut state, Event::PermissionsGranted);

        let trigger = state.layout().filter_trigger;
        run(&mut state, Event::Click { row: trigger.row, col: trigger.col });
        assert!(state.dropdown.is_open());

        let option_row = state.layout().dropdown_option_row(Region::Oceania).unwrap();
        let (_, actions) = run(&mut state, Event::Click { row: option_row, col: trigger.col + 1 });
        assert!(fetched(&actions).url.ends_with(&format!("/region/Oceania?{}", crate::fetch::request::FIELDS_QUERY)));
        assert!(!state.dropdown.is_open());
        assert!(state.layout().filter_cancel.is_some());

        run(&mut state, Event::ToggleFilter);
        run(&mut state, Event::KeyUp);
        let (_, actions) = run(&mut state, Event::Activate);
        fetched(&actions);
        assert_eq!(state.query.region(), RegionFilter::Only(Region::Europe));

        let cancel = state.layout().filter_cancel.unwrap();
        fetched(&run(&mut state, Event::Click { row: cancel.row, col: cancel.col }).1);
        assert_eq!(state.query.region(), RegionFilter::All);
    }

    #[test]
    fn click_outside_dropdown_closes_it_and_still_acts() {
        let mut state = new_state();
        let request = fetched(&run(&mut state, Event::PermissionsGranted).1);
        complete(&mut state, &request, 200, EUROPE);
        run(&mut state, Event::ToggleFilter);

        let search = state.layout().search_box;
        let (render, _) = run(&mut state, Event::Click { row: search.row + 1, col: search.col + 4 });
        assert!(render);
        assert!(!state.dropdown.is_open());
        assert_eq!(state.input_mode, InputMode::Search);
    }

    #[test]
    fn search_text_is_sanitized_before_debounce() {
        let mut state = new_state();
        run(&mut state, Event::PermissionsGranted);

        let timers = type_text(&mut state, "  c0te d'iv@oire!");
        assert_eq!(state.search_input, "cte d'ivoire");

        let request = elapse(&mut state, timers).unwrap();
        assert_eq!(state.query.search_text(), "cte d'ivoire");
        assert!(request.url.contains("/name/cte%20d%27ivoire?"));
        assert!(state
            .query
            .search_text()
            .chars()
            .all(crate::domain::query::is_allowed_search_char));
    }

    #[test]
    fn only_last_timer_commits() {
        let mut state = new_state();
        run(&mut state, Event::PermissionsGranted);
        let timers = type_text(&mut state, "peru");

        for _ in 1..timers {
            assert_eq!(run(&mut state, Event::DebounceElapsed), (false, vec![]));
        }
        let request = fetched(&run(&mut state, Event::DebounceElapsed).1);
        assert!(request.url.contains("/name/peru?"));
        assert_eq!(request.id, crate::fetch::RequestId::new(2));
    }

    #[test]
    fn rejected_keystroke_restarts_debounce_window() {
        let mut state = new_state();
        run(&mut state, Event::PermissionsGranted);
        let mut timers = type_text(&mut state, "per");

        let (render, actions) = run(&mut state, Event::Char('1'));
        assert!(!render);
        assert!(matches!(actions.as_slice(), [Action::ArmTimer(_)]));
        assert_eq!(state.search_input, "per");
        timers += 1;

        // The timer armed before the rejected keystroke no longer commits.
        for _ in 1..timers {
            assert_eq!(run(&mut state, Event::DebounceElapsed), (false, vec![]));
        }
        let request = fetched(&run(&mut state, Event::DebounceElapsed).1);
        assert!(request.url.contains("/name/per?"));
    }

    #[test]
    fn cancel_search_fetches_immediately_and_drops_pending_commit() {
        let mut state = new_state();
        run(&mut state, Event::PermissionsGranted);
        let timers = type_text(&mut state, "chi");

        let request = fetched(&run(&mut state, Event::CancelSearch).1);
        assert_eq!(request.url, build_url(DEFAULT_API_BASE, &Endpoint::All));
        assert!(state.search_input.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(elapse(&mut state, timers), None);
    }

    #[test]
    fn recompute_is_idempotent_for_unchanged_query() {
        let mut state = new_state();
        state.query = state.query.with_region(RegionFilter::Only(Region::Asia)).with_search_text("korea");
        let first = state.recompute();
        let second = state.recompute();
        assert_eq!(first.url, second.url);
        assert_eq!(first.name_filter, second.name_filter);
        assert!(second.id > first.id);
    }

    #[test]
    fn typing_requires_search_focus() {
        let mut state = new_state();
        assert_eq!(run(&mut state, Event::Char('a')), (false, vec![]));
        assert!(state.search_input.is_empty());

        run(&mut state, Event::FocusSearch);
        run(&mut state, Event::Char('a'));
        let (render, actions) = run(&mut state, Event::Backspace);
        assert!(render);
        assert!(matches!(actions.as_slice(), [Action::ArmTimer(d)] if *d == Duration::from_millis(500)));
        assert!(run(&mut state, Event::LeaveSearch).0);
    }

    #[test]
    fn response_without_id_or_after_supersede_is_ignored() {
        let mut state = new_state();
        let first = fetched(&run(&mut state, Event::PermissionsGranted).1);
        run(&mut state, Event::SelectRegion(Region::Africa));

        let lost = Event::FetchCompleted {
            request_id: None,
            status: 200,
            body: b"[]".to_vec(),
        };
        assert_eq!(run(&mut state, lost), (false, vec![]));
        assert!(!complete(&mut state, &first, 200, EUROPE));
        assert_eq!(state.list, ListContent::Loading);
    }

    #[test]
    fn worker_error_fails_its_request() {
        let mut state = new_state();
        let request = fetched(&run(&mut state, Event::PermissionsGranted).1);
        let response = WorkerResponse::Error {
            request_id: Some(request.id),
            message: "invalid worker message".into(),
        };
        assert!(run(&mut state, Event::WorkerResponse(response)).0);
        assert!(matches!(state.list, ListContent::NoResults { reason: Some(_) }));
        assert!(!state.is_current(request.id));
    }

    #[test]
    fn worker_error_for_superseded_request_keeps_current_one() {
        let mut state = new_state();
        let first = fetched(&run(&mut state, Event::PermissionsGranted).1);
        let (_, actions) = run(
            &mut state,
            Event::FetchCompleted {
                request_id: Some(first.id),
                status: 200,
                body: EUROPE.as_bytes().to_vec(),
            },
        );
        assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));

        let second = fetched(&run(&mut state, Event::SelectRegion(Region::Europe)).1);

        let stale_error = WorkerResponse::Error {
            request_id: Some(first.id),
            message: "boom".into(),
        };
        assert_eq!(run(&mut state, Event::WorkerResponse(stale_error)), (false, vec![]));
        assert_eq!(state.list, ListContent::Loading);
        assert!(state.is_current(second.id));

        assert!(complete(&mut state, &second, 200, EUROPE));
        assert_eq!(card_names(&state), vec!["France", "United Kingdom", "Vatican City"]);
    }

    #[test]
    fn worker_error_without_request_is_ignored() {
        let mut state = new_state();
        run(&mut state, Event::PermissionsGranted);
        let response = WorkerResponse::Error {
            request_id: None,
            message: "invalid worker message".into(),
        };
        assert_eq!(run(&mut state, Event::WorkerResponse(response)), (false, vec![]));
        assert_eq!(state.list, ListContent::Loading);
    }

    #[test]
    fn permission_denied_shows_reason() {
        let mut state = new_state();
        run(&mut state, Event::PermissionsDenied);
        let ListView::Empty(empty) = state.compute_viewmodel().list else {
            panic!("expected empty state");
        };
        assert!(empty.subtitle.contains("permission"));
    }

    #[test]
    fn theme_toggle_updates_header() {
        let mut state = new_state();
        assert_eq!(state.compute_viewmodel().header.mode_label, "☀ Light Mode");
        run(&mut state, Event::ToggleTheme);
        assert_eq!(state.compute_viewmodel().header.mode_label, "☾ Dark Mode");
    }
}

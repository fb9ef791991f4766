//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the explorer: the committed
//! query, the search field text (which runs ahead of the query while the
//! debounce is pending), the request sequencer, the card list, and the UI
//! state machines.
//!
//! # Card ownership
//!
//! The list owns its [`Country`] records. Opening a card clones the record into
//! the modal; nothing is re-derived, so a card and its modal always agree.

use super::modes::{DropdownState, InputMode, ModalState};
use crate::domain::query::sanitize_search_input;
use crate::domain::{Country, QueryState, Region, RegionFilter};
use crate::fetch::{Debouncer, FetchOutcome, FetchRequest, RequestId, RequestSequencer};
use crate::ui::helpers::coalesce_indices;
use crate::ui::layout::ScreenLayout;
use crate::ui::theme::{Theme, DARK};
use crate::ui::viewmodel::{
    CardItem, DropdownOption, DropdownView, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo, ListView, ModalView,
    SearchBarInfo, UIViewModel, NO_RESULTS_MESSAGE,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::time::Duration;

const TITLE: &str = "Where in the world?";

/// What the list area currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListContent {
    /// The current request is in flight.
    Loading,
    /// Cards in API order; never empty.
    Cards(Vec<Country>),
    /// Nothing to show. `reason` is set when the request failed.
    NoResults { reason: Option<String> },
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Committed query; every change replaces the whole value.
    pub query: QueryState,

    /// Sanitized text shown in the search field.
    pub search_input: String,

    pub debouncer: Debouncer,
    pub sequencer: RequestSequencer,
    pub list: ListContent,

    /// Zero-based index of the selected card.
    pub selected_index: usize,

    pub input_mode: InputMode,
    pub dropdown: DropdownState,
    pub modal: ModalState,
    pub theme: Theme,

    /// Pane height in rows, updated on every render.
    pub rows: usize,
    /// Pane width in columns, updated on every render.
    pub cols: usize,

    /// Base URL of the countries API.
    pub api_base: String,
}

impl AppState {
    #[must_use]
    pub fn new(theme: Theme, api_base: impl Into<String>, debounce: Duration) -> Self {
        Self {
            query: QueryState::default(),
            search_input: String::new(),
            debouncer: Debouncer::new(debounce),
            sequencer: RequestSequencer::default(),
            list: ListContent::Loading,
            selected_index: 0,
            input_mode: InputMode::Normal,
            dropdown: DropdownState::Closed,
            modal: ModalState::Closed,
            theme,
            rows: 24,
            cols: 80,
            api_base: api_base.into(),
        }
    }

    /// Records the pane size; returns whether it changed.
    pub fn set_viewport(&mut self, rows: usize, cols: usize) -> bool {
        let changed = self.rows != rows || self.cols != cols;
        self.rows = rows;
        self.cols = cols;
        changed
    }

    /// Issues the request for the committed query and shows the loading state.
    ///
    /// Any in-flight request is superseded; its response will be discarded.
    pub fn recompute(&mut self) -> FetchRequest {
        let remote = self.query.remote_query();
        let request = self.sequencer.begin(&self.api_base, &remote);

        tracing::debug!(
            request_id = %request.id,
            url = %request.url,
            name_filter = ?request.name_filter,
            "query recomputed"
        );

        self.list = ListContent::Loading;
        self.selected_index = 0;
        request
    }

    /// Replaces the region filter and re-fetches. The search text is kept.
    pub fn set_region(&mut self, region: RegionFilter) -> FetchRequest {
        tracing::debug!(region = region.label(), "region filter changed");
        self.dropdown = DropdownState::Closed;
        self.query = self.query.with_region(region);
        self.recompute()
    }

    /// Rewrites the search field with the sanitized `raw` text and restarts
    /// the debounce window.
    ///
    /// Every input event schedules a commit, even one that sanitizes away, so
    /// the caller must always arm one host timer. Returns whether the field
    /// text changed.
    pub fn apply_search_input(&mut self, raw: &str) -> bool {
        let sanitized = sanitize_search_input(raw);
        let changed = sanitized != self.search_input;
        if changed {
            tracing::trace!(text = %sanitized, "search field updated");
            self.search_input.clone_from(&sanitized);
        }
        self.debouncer.schedule(sanitized);
        changed
    }

    /// Handles one debounce timer firing.
    ///
    /// Returns a request when the quiet period ended with text that differs
    /// from the committed search text.
    pub fn commit_search(&mut self) -> Option<FetchRequest> {
        let text = self.debouncer.on_timer()?;
        if text == self.query.search_text() {
            tracing::debug!(text = %text, "search text unchanged, skipping fetch");
            return None;
        }

        self.query = self.query.with_search_text(text);
        Some(self.recompute())
    }

    /// Clears the search field and re-fetches immediately.
    pub fn cancel_search(&mut self) -> FetchRequest {
        self.debouncer.cancel();
        self.search_input.clear();
        self.input_mode = InputMode::Normal;
        self.query = self.query.with_search_text("");
        self.recompute()
    }

    /// Opens the dropdown with the cursor on the active region, or closes it.
    pub fn toggle_dropdown(&mut self) {
        self.dropdown = if self.dropdown.is_open() {
            DropdownState::Closed
        } else {
            let cursor = match self.query.region() {
                RegionFilter::Only(region) => Region::ALL.iter().position(|&r| r == region).unwrap_or(0),
                RegionFilter::All => 0,
            };
            DropdownState::Open { cursor }
        };
    }

    /// Closes the dropdown; returns whether it was open.
    pub fn close_dropdown(&mut self) -> bool {
        let was_open = self.dropdown.is_open();
        self.dropdown = DropdownState::Closed;
        was_open
    }

    /// The listed cards, empty unless the list holds cards.
    #[must_use]
    pub fn cards(&self) -> &[Country] {
        match &self.list {
            ListContent::Cards(cards) => cards,
            ListContent::Loading | ListContent::NoResults { .. } => &[],
        }
    }

    /// Opens the modal on a copy of the card at `index`.
    pub fn open_card(&mut self, index: usize) -> bool {
        let Some(country) = self.cards().get(index).cloned() else {
            tracing::debug!(index, "no card at index");
            return false;
        };

        tracing::debug!(country = %country.name, index, "opening details");
        self.selected_index = index;
        self.dropdown = DropdownState::Closed;
        self.input_mode = InputMode::Normal;
        self.modal = ModalState::Open(Box::new(country));
        true
    }

    /// Closes the modal; returns whether it was open.
    pub fn close_modal(&mut self) -> bool {
        let was_open = self.modal.is_open();
        self.modal = ModalState::Closed;
        was_open
    }

    /// Moves selection down by one card, wrapping to the top.
    ///
    /// The list does not scroll while the modal is open.
    pub fn move_selection_down(&mut self) -> bool {
        let len = self.cards().len();
        if len == 0 || self.modal.is_open() {
            return false;
        }
        self.selected_index = (self.selected_index + 1) % len;
        true
    }

    /// Moves selection up by one card, wrapping to the bottom.
    pub fn move_selection_up(&mut self) -> bool {
        let len = self.cards().len();
        if len == 0 || self.modal.is_open() {
            return false;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
        true
    }

    /// Returns selection and scroll window to the first card.
    pub fn scroll_to_top(&mut self) -> bool {
        if self.modal.is_open() || self.selected_index == 0 {
            return false;
        }
        self.selected_index = 0;
        true
    }

    /// Whether a completion for `id` belongs to the current request.
    #[must_use]
    pub fn is_current(&self, id: RequestId) -> bool {
        self.sequencer.current(id).is_some()
    }

    /// Applies the outcome of request `id` to the list.
    ///
    /// Returns `false` and leaves the list untouched for stale ids.
    pub fn receive_outcome(&mut self, id: RequestId, outcome: FetchOutcome) -> bool {
        if self.sequencer.finish(id).is_none() {
            return false;
        }

        self.selected_index = 0;
        self.list = match outcome {
            FetchOutcome::Countries(countries) => {
                tracing::debug!(request_id = %id, count = countries.len(), "countries listed");
                ListContent::Cards(countries)
            }
            FetchOutcome::NoResults => ListContent::NoResults { reason: None },
            FetchOutcome::Failed { reason } => ListContent::NoResults { reason: Some(reason) },
        };
        true
    }

    /// Ends request `id` as failed, e.g. when the worker rejected its body.
    ///
    /// Like any other outcome, this is ignored unless `id` is current.
    pub fn fail_request(&mut self, id: RequestId, reason: String) -> bool {
        self.receive_outcome(id, FetchOutcome::Failed { reason })
    }

    /// Screen geometry for the current viewport and UI state.
    #[must_use]
    pub fn layout(&self) -> ScreenLayout {
        let region = self.query.region();
        ScreenLayout::new(self.rows, self.cols, region.label())
            .with_search_cancel(!self.search_input.is_empty())
            .with_filter_cancel(!region.is_all())
            .with_dropdown(self.dropdown.is_open())
            .with_modal(self.modal.is_open())
    }

    /// Range of card indices visible in the list area.
    ///
    /// The window is centered on the selection and pinned to the ends of the
    /// list, so it is a pure function of selection and viewport.
    #[must_use]
    pub fn visible_window(&self) -> (usize, usize) {
        let len = self.cards().len();
        let available = self.layout().list.height;

        let mut start = self.selected_index.saturating_sub(available / 2).min(len);
        let end = (start + available).min(len);
        if end - start < available && len >= available {
            start = end.saturating_sub(available);
        }
        (start, end)
    }

    /// Card index under the list row `offset`, if any.
    #[must_use]
    pub fn card_at_offset(&self, offset: usize) -> Option<usize> {
        let (start, end) = self.visible_window();
        let index = start + offset;
        (index < end).then_some(index)
    }

    /// Computes a renderable UI view model for the current viewport.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let list = match &self.list {
            ListContent::Loading => ListView::Loading,
            ListContent::NoResults { reason } => ListView::Empty(EmptyState {
                message: NO_RESULTS_MESSAGE.to_string(),
                subtitle: reason.clone().unwrap_or_default(),
            }),
            ListContent::Cards(cards) => {
                let (start, end) = self.visible_window();
                let search = self.query.search_text();
                let matcher = (!search.is_empty()).then(SkimMatcherV2::default);

                ListView::Cards(
                    cards[start..end]
                        .iter()
                        .enumerate()
                        .map(|(offset, country)| {
                            let ranges = matcher
                                .as_ref()
                                .map_or_else(Vec::new, |m| highlight_ranges(m, &country.name, search));
                            CardItem::from_country(country, start + offset == self.selected_index, ranges)
                        })
                        .collect(),
                )
            }
        };

        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.search_input.clone(),
                focused: self.input_mode == InputMode::Search,
                show_cancel: !self.search_input.is_empty(),
            },
            filter_bar: FilterBarInfo {
                label: self.query.region().label().to_string(),
                show_cancel: !self.query.region().is_all(),
            },
            list,
            dropdown: self.compute_dropdown(),
            modal: self.modal.country().map(ModalView::from_country),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let mode_label = if self.theme.name == DARK {
            "☾ Dark Mode"
        } else {
            "☀ Light Mode"
        };
        let title = match &self.list {
            ListContent::Cards(cards) => format!("{TITLE} ({})", cards.len()),
            ListContent::Loading | ListContent::NoResults { .. } => TITLE.to_string(),
        };
        HeaderInfo {
            title,
            mode_label: mode_label.to_string(),
        }
    }

    fn compute_dropdown(&self) -> Option<DropdownView> {
        let DropdownState::Open { cursor } = self.dropdown else {
            return None;
        };
        let active = self.query.region();
        Some(DropdownView {
            options: Region::ALL
                .iter()
                .enumerate()
                .map(|(i, &region)| DropdownOption {
                    region,
                    label: region.name().to_string(),
                    is_cursor: i == cursor,
                    is_active: active == RegionFilter::Only(region),
                })
                .collect(),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.modal.is_open() {
            "Esc/Enter: close  click outside: close  q: quit"
        } else if self.dropdown.is_open() {
            "j/k: move  Enter or 1-5: select region  x: clear region  Esc: close"
        } else if self.input_mode == InputMode::Search {
            "Type to search  Esc: clear search  Enter/Tab: done"
        } else {
            "j/k: navigate  Enter: details  /: search  f: region  x: clear region  g: top  t: theme  q: quit"
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Character ranges of `name` matched by `pattern`.
///
/// The contiguous case-insensitive match that the name filter accepts wins.
/// Names returned by the server-side name search may match only on fields
/// other than the common name; those fall back to fuzzy indices.
fn highlight_ranges(matcher: &SkimMatcherV2, name: &str, pattern: &str) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    if let Some(range) = substring_range(name, pattern) {
        return vec![range];
    }

    matcher
        .fuzzy_indices(name, pattern)
        .map(|(_score, indices)| coalesce_indices(&indices))
        .unwrap_or_default()
}

/// First case-insensitive occurrence of `pattern` in `name`, in character indices.
fn substring_range(name: &str, pattern: &str) -> Option<(usize, usize)> {
    let name: Vec<char> = name.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    if pattern.is_empty() || pattern.len() > name.len() {
        return None;
    }

    (0..=name.len() - pattern.len())
        .find(|&start| {
            name[start..start + pattern.len()]
                .iter()
                .zip(&pattern)
                .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
        })
        .map(|start| (start, start + pattern.len()))
}

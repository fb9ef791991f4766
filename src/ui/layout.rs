//! Screen geometry and click hit-testing.
//!
//! Rendering and mouse handling share one [`ScreenLayout`], so a click lands on
//! exactly the control that was drawn under it. All coordinates are 1-based to
//! match ANSI cursor positioning.
//!
//! ```text
//! row 1        header
//! row 2        border
//! rows 3-5     search box               [x]
//! row 6         Filter by Region ▾  ✕                    ↑ Top
//! row 7        NAME  POPULATION  REGION  CAPITAL
//! rows 8..     card rows
//! rows-1       border
//! rows         footer
//! ```
//!
//! The region dropdown overlays the rows directly below the filter trigger, and
//! the detail modal is a centered panel over everything else.

use crate::domain::Region;

/// Horizontal margin around the search box.
pub const SEARCH_BOX_MARGIN: usize = 5;

/// Width of the `[x]` cancel-search and close-modal controls.
const CLOSE_CONTROL_WIDTH: usize = 3;

/// Width of the ` ✕ ` cancel-filter control.
const FILTER_CANCEL_WIDTH: usize = 3;

/// Text of the return-to-top control.
pub const RETURN_TOP_LABEL: &str = " ↑ Top ";

const DROPDOWN_MIN_WIDTH: usize = 14;
const MODAL_MAX_WIDTH: usize = 72;
const MODAL_HEIGHT: usize = 16;

/// Rows above the list area (header, border, search box, filter bar, table header).
const LIST_TOP: usize = 8;

/// An axis-aligned cell rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[must_use]
    pub const fn new(row: usize, col: usize, width: usize, height: usize) -> Self {
        Self { row, col, width, height }
    }

    #[must_use]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row && row < self.row + self.height && col >= self.col && col < self.col + self.width
    }

    #[must_use]
    pub const fn bottom(&self) -> usize {
        self.row + self.height.saturating_sub(1)
    }

    #[must_use]
    pub const fn right(&self) -> usize {
        self.col + self.width.saturating_sub(1)
    }
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    ModalClose,
    ModalPanel,
    /// Anywhere outside the modal panel while it is open.
    ModalBackground,
    DropdownOption(Region),
    FilterTrigger,
    FilterCancel,
    ReturnToTop,
    SearchCancel,
    SearchBox,
    /// A list row, as an offset from the first visible row.
    ListRow(usize),
    Nothing,
}

/// Cell geometry of every interactive element for one viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    pub rows: usize,
    pub cols: usize,
    pub header_row: usize,
    pub top_border_row: usize,
    pub search_box: Rect,
    pub search_cancel: Option<Rect>,
    pub filter_row: usize,
    pub filter_trigger: Rect,
    pub filter_cancel: Option<Rect>,
    pub return_top: Rect,
    pub table_header_row: usize,
    pub list: Rect,
    pub dropdown: Option<Rect>,
    pub modal: Option<Rect>,
    pub modal_close: Option<Rect>,
    pub bottom_border_row: usize,
    pub footer_row: usize,
}

impl ScreenLayout {
    /// Computes the base layout with the filter trigger showing `filter_label`.
    ///
    /// Conditional controls start hidden; enable them with the `with_*` methods.
    #[must_use]
    pub fn new(rows: usize, cols: usize, filter_label: &str) -> Self {
        let search_box = Rect::new(3, SEARCH_BOX_MARGIN + 1, cols.saturating_sub(SEARCH_BOX_MARGIN * 2), 3);
        let filter_row = 6;
        let filter_trigger = Rect::new(filter_row, 2, filter_label.chars().count() + 4, 1);
        let return_width = RETURN_TOP_LABEL.chars().count();
        let return_top = Rect::new(filter_row, cols.saturating_sub(return_width).max(1), return_width, 1);

        Self {
            rows,
            cols,
            header_row: 1,
            top_border_row: 2,
            search_box,
            search_cancel: None,
            filter_row,
            filter_trigger,
            filter_cancel: None,
            return_top,
            table_header_row: 7,
            list: Rect::new(LIST_TOP, 1, cols, rows.saturating_sub(LIST_TOP + 1)),
            dropdown: None,
            modal: None,
            modal_close: None,
            bottom_border_row: rows.saturating_sub(1),
            footer_row: rows,
        }
    }

    /// Shows the `[x]` control inside the right end of the search box.
    #[must_use]
    pub fn with_search_cancel(mut self, visible: bool) -> Self {
        self.search_cancel = visible.then(|| {
            Rect::new(
                self.search_box.row + 1,
                self.search_box.right().saturating_sub(CLOSE_CONTROL_WIDTH + 1),
                CLOSE_CONTROL_WIDTH,
                1,
            )
        });
        self
    }

    /// Shows the cancel-filter control right after the trigger.
    #[must_use]
    pub fn with_filter_cancel(mut self, visible: bool) -> Self {
        self.filter_cancel = visible
            .then(|| Rect::new(self.filter_row, self.filter_trigger.right() + 2, FILTER_CANCEL_WIDTH, 1));
        self
    }

    /// Opens the option overlay below the filter trigger.
    #[must_use]
    pub fn with_dropdown(mut self, open: bool) -> Self {
        self.dropdown = open.then(|| {
            Rect::new(
                self.filter_row + 1,
                self.filter_trigger.col,
                self.filter_trigger.width.max(DROPDOWN_MIN_WIDTH),
                Region::ALL.len(),
            )
        });
        self
    }

    /// Opens the centered detail panel.
    #[must_use]
    pub fn with_modal(mut self, open: bool) -> Self {
        if !open {
            self.modal = None;
            self.modal_close = None;
            return self;
        }

        let width = self.cols.saturating_sub(8).min(MODAL_MAX_WIDTH);
        let height = self.rows.saturating_sub(4).min(MODAL_HEIGHT);
        let panel = Rect::new(
            self.rows.saturating_sub(height) / 2 + 1,
            self.cols.saturating_sub(width) / 2 + 1,
            width,
            height,
        );
        self.modal_close = Some(Rect::new(
            panel.row,
            panel.right().saturating_sub(CLOSE_CONTROL_WIDTH + 1),
            CLOSE_CONTROL_WIDTH,
            1,
        ));
        self.modal = Some(panel);
        self
    }

    /// Row of the dropdown option for `region`, if the dropdown is open.
    #[must_use]
    pub fn dropdown_option_row(&self, region: Region) -> Option<usize> {
        let dropdown = self.dropdown?;
        Region::ALL
            .iter()
            .position(|&candidate| candidate == region)
            .map(|offset| dropdown.row + offset)
    }

    /// Resolves a click to the topmost control under it.
    ///
    /// The modal captures every click while open; the dropdown overlay sits
    /// above the rest of the screen.
    #[must_use]
    pub fn hit_test(&self, row: usize, col: usize) -> ClickTarget {
        if let Some(panel) = self.modal {
            if self.modal_close.is_some_and(|close| close.contains(row, col)) {
                return ClickTarget::ModalClose;
            }
            return if panel.contains(row, col) {
                ClickTarget::ModalPanel
            } else {
                ClickTarget::ModalBackground
            };
        }

        if let Some(dropdown) = self.dropdown {
            if dropdown.contains(row, col) {
                if let Some(&region) = Region::ALL.get(row - dropdown.row) {
                    return ClickTarget::DropdownOption(region);
                }
            }
        }

        if self.filter_trigger.contains(row, col) {
            return ClickTarget::FilterTrigger;
        }
        if self.filter_cancel.is_some_and(|cancel| cancel.contains(row, col)) {
            return ClickTarget::FilterCancel;
        }
        if self.return_top.contains(row, col) {
            return ClickTarget::ReturnToTop;
        }
        if self.search_cancel.is_some_and(|cancel| cancel.contains(row, col)) {
            return ClickTarget::SearchCancel;
        }
        if self.search_box.contains(row, col) {
            return ClickTarget::SearchBox;
        }
        if self.list.contains(row, col) {
            return ClickTarget::ListRow(row - self.list.row);
        }

        ClickTarget::Nothing
    }
}

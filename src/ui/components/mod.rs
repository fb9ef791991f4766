//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title and theme indicator
//! - [`search`]: Search input box with cancel control
//! - [`filter`]: Region filter bar, return-to-top control, and dropdown overlay
//! - [`table`]: Card list (NAME, POPULATION, REGION, CAPITAL)
//! - [`empty`]: Empty and loading states for the list area
//! - [`modal`]: Country detail panel
//! - [`footer`]: Keybinding hints
//!
//! Components draw at positions taken from a [`ScreenLayout`], the same one
//! used for mouse hit-testing.

mod empty;
mod filter;
mod footer;
mod header;
mod modal;
mod search;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::layout::ScreenLayout;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ListView, UIViewModel};

/// Renders a horizontal border line at the specified row.
fn render_border(row: usize, color: &str, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
}

/// Renders the full screen in stacking order: base chrome and list, then the
/// dropdown overlay, then the modal.
///
/// ```text
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [Filter Bar]
/// [Table Headers]
/// [Cards | Loading | Empty]
/// [Border]
/// [Footer]
/// ```
pub fn render_screen(vm: &UIViewModel, layout: &ScreenLayout, theme: &Theme) {
    let cols = layout.cols;

    header::render_header(layout.header_row, &vm.header, theme, cols);
    render_border(layout.top_border_row, &theme.colors.border, cols);
    search::render_search_bar(layout, &vm.search_bar, theme);
    filter::render_filter_bar(layout, &vm.filter_bar, theme);
    table::render_table_headers(layout.table_header_row, theme, cols);

    match &vm.list {
        ListView::Cards(items) => table::render_table_rows(layout.list, items, theme),
        ListView::Loading => empty::render_loading(layout.list, theme),
        ListView::Empty(state) => empty::render_empty_state(layout.list, state, theme),
    }

    render_border(layout.bottom_border_row, &theme.colors.border, cols);
    footer::render_footer(layout.footer_row, &vm.footer, theme, cols);

    if let Some(dropdown) = &vm.dropdown {
        filter::render_dropdown(layout, dropdown, theme);
    }
    if let Some(modal) = &vm.modal {
        modal::render_modal(layout, modal, theme);
    }
}

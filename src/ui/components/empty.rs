//! Empty and loading state renderers for the list area.

use crate::ui::helpers::{char_width, position_cursor, truncate};
use crate::ui::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyState, LOADING_MESSAGE};

/// Renders a centered message with a dim subtitle below it.
///
/// ```text
///                       No results were found
///               Request failed with HTTP status 404
/// ```
pub fn render_empty_state(area: Rect, empty: &EmptyState, theme: &Theme) {
    clear_area(area);
    let row = area.row + area.height.min(6) / 2;

    print_centered(row, area, &empty.message, &theme.colors.empty_state_fg, false);
    if !empty.subtitle.is_empty() {
        print_centered(row + 1, area, &empty.subtitle, &theme.colors.text_dim, true);
    }
}

/// Renders the in-flight indicator in place of the list.
pub fn render_loading(area: Rect, theme: &Theme) {
    clear_area(area);
    let row = area.row + area.height.min(6) / 2;
    print_centered(row, area, LOADING_MESSAGE, &theme.colors.text_dim, false);
}

fn clear_area(area: Rect) {
    for offset in 0..area.height {
        position_cursor(area.row + offset, area.col);
        print!("{}", " ".repeat(area.width));
    }
}

fn print_centered(row: usize, area: Rect, text: &str, color: &str, dim: bool) {
    if row > area.bottom() {
        return;
    }
    let text = truncate(text, area.width);
    let padding = area.width.saturating_sub(char_width(&text)) / 2;

    position_cursor(row, area.col + padding);
    if dim {
        print!("{}", Theme::dim());
    }
    print!("{}{text}{}", Theme::fg(color), Theme::reset());
}

//! Search bar component renderer.
//!
//! ```text
//!      ┌────────────────────────────────────────────┐
//!      │ ⌕ Search for a country... fra▏         [x] │
//!      └────────────────────────────────────────────┘
//! ```

use crate::ui::helpers::{char_width, position_cursor, truncate};
use crate::ui::layout::ScreenLayout;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

const PLACEHOLDER: &str = "Search for a country...";

/// Renders the 3-line search box with its optional cancel control.
pub fn render_search_bar(layout: &ScreenLayout, search: &SearchBarInfo, theme: &Theme) {
    let frame = layout.search_box;
    let inner_width = frame.width.saturating_sub(2);
    let border = if search.focused {
        &theme.colors.search_bar_focus
    } else {
        &theme.colors.search_bar_border
    };

    position_cursor(frame.row, frame.col);
    print!("{}┌{}┐{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());

    // Room for " ⌕ " on the left and "[x] " on the right.
    let text_room = inner_width.saturating_sub(7);
    let (text, text_color) = if search.query.is_empty() && !search.focused {
        (PLACEHOLDER.to_string(), &theme.colors.text_dim)
    } else {
        let cursor = if search.focused { "▏" } else { "" };
        (format!("{}{cursor}", search.query), &theme.colors.text_normal)
    };
    let text = truncate(&text, text_room);

    position_cursor(frame.row + 1, frame.col);
    print!("{}│", Theme::fg(border));
    print!("{} ⌕ ", Theme::fg(&theme.colors.text_dim));
    print!("{}{text}", Theme::fg(text_color));
    print!("{}", " ".repeat(text_room.saturating_sub(char_width(&text))));
    if search.show_cancel {
        print!("{}{}[x]{}", Theme::fg(&theme.colors.text_normal), Theme::bold(), Theme::reset());
    } else {
        print!("   ");
    }
    print!(" {}│{}", Theme::fg(border), Theme::reset());

    position_cursor(frame.row + 2, frame.col);
    print!("{}└{}┘{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());
}

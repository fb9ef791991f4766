//! Header component renderer.

use crate::ui::helpers::{char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title bar: title on the left, theme indicator on the right.
///
/// ```text
///  Where in the world?                                 ☾ Dark Mode
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let title = format!(" {}", header.title);
    let mode = format!("{} ", header.mode_label);
    let gap = cols.saturating_sub(char_width(&title) + char_width(&mode));

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}{title}", Theme::bold());
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(gap));
    print!("{mode}");
    print!("{}", Theme::reset());
}

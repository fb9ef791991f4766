//! Region filter bar and dropdown overlay.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::layout::{ScreenLayout, RETURN_TOP_LABEL};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DropdownView, FilterBarInfo};

/// Renders the filter row: trigger, optional cancel control, and return-to-top.
pub fn render_filter_bar(layout: &ScreenLayout, filter: &FilterBarInfo, theme: &Theme) {
    position_cursor(layout.filter_row, 1);
    print!("{}", " ".repeat(layout.cols));

    let trigger = layout.filter_trigger;
    position_cursor(trigger.row, trigger.col);
    print!("{}", Theme::fg(&theme.colors.filter_fg));
    print!("{}", Theme::bg(&theme.colors.tag_bg));
    print!(" {} ▾ ", filter.label);
    print!("{}", Theme::reset());

    if let Some(cancel) = layout.filter_cancel.filter(|_| filter.show_cancel) {
        position_cursor(cancel.row, cancel.col);
        print!("{}{} ✕ {}", Theme::bold(), Theme::fg(&theme.colors.filter_fg), Theme::reset());
    }

    position_cursor(layout.return_top.row, layout.return_top.col);
    print!("{}{RETURN_TOP_LABEL}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
}

/// Renders the open option list below the trigger.
///
/// Options are numbered so they can be picked with the digit keys.
pub fn render_dropdown(layout: &ScreenLayout, dropdown: &DropdownView, theme: &Theme) {
    let Some(area) = layout.dropdown else {
        return;
    };

    for (offset, option) in dropdown.options.iter().enumerate() {
        let Some(row) = layout.dropdown_option_row(option.region) else {
            continue;
        };
        position_cursor(row, area.col);
        if option.is_cursor {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.filter_fg));
            print!("{}", Theme::bg(&theme.colors.tag_bg));
        }
        if option.is_active {
            print!("{}", Theme::bold());
        }
        let line = format!(" {} {}", offset + 1, option.label);
        print!("{}", fit(&line, area.width));
        print!("{}", Theme::reset());
    }
}

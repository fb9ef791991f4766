//! Card list renderer.
//!
//! Each card is one row with NAME, POPULATION, REGION, and CAPITAL columns.
//! Population is right-aligned; the remaining width is split between name and
//! capital.

use crate::ui::helpers::{self, fit, position_cursor, truncate};
use crate::ui::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CardItem;

const POPULATION_WIDTH: usize = 15;
const REGION_WIDTH: usize = 10;
const GUTTER: usize = 2;

/// Column widths `(name, population, region, capital)` for a pane width.
#[must_use]
pub fn column_widths(cols: usize) -> (usize, usize, usize, usize) {
    let flexible = cols.saturating_sub(1 + POPULATION_WIDTH + REGION_WIDTH + GUTTER * 3);
    let name = (flexible * 3 / 5).max(8);
    let capital = flexible.saturating_sub(name);
    (name, POPULATION_WIDTH, REGION_WIDTH, capital)
}

pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) {
    let (name, population, region, capital) = column_widths(cols);
    let gutter = " ".repeat(GUTTER);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        " {}{gutter}{:>population$}{gutter}{}{gutter}{}",
        fit("NAME", name),
        "POPULATION",
        fit("REGION", region),
        fit("CAPITAL", capital),
    );
    print!("{}", Theme::reset());
}

/// Renders visible cards into the list area, blanking unused rows.
pub fn render_table_rows(area: Rect, items: &[CardItem], theme: &Theme) {
    for offset in 0..area.height {
        let row = area.row + offset;
        match items.get(offset) {
            Some(item) => render_table_row(row, item, theme, area.width),
            None => {
                position_cursor(row, area.col);
                print!("{}", " ".repeat(area.width));
            }
        }
    }
}

/// Renders one card, filling the full width so the selection background is even.
fn render_table_row(row: usize, item: &CardItem, theme: &Theme, cols: usize) {
    let (name_width, population_width, region_width, capital_width) = column_widths(cols);
    let gutter = " ".repeat(GUTTER);

    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    let name = truncate(&item.name, name_width);
    print!(" ");
    helpers::render_highlighted_text(&name, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(name_width.saturating_sub(helpers::char_width(&name))));

    print!(
        "{gutter}{:>population_width$}{gutter}{}{gutter}{}",
        truncate(&item.population, population_width),
        fit(&item.region, region_width),
        fit(&item.capital, capital_width),
    );

    let used = 1 + name_width + population_width + region_width + capital_width + GUTTER * 3;
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_fill_the_pane() {
        let (name, population, region, capital) = column_widths(100);
        assert_eq!(1 + name + population + region + capital + GUTTER * 3, 100);
        assert!(name > capital);
    }

    #[test]
    fn narrow_pane_keeps_a_name_column() {
        let (name, _, _, capital) = column_widths(20);
        assert_eq!(name, 8);
        assert_eq!(capital, 0);
    }
}

//! Detail modal renderer.
//!
//! ```text
//! ┌─ Belgium ──────────────────────────────────[x]─┐
//! │ Flag: The flag of Belgium is composed of ...   │
//! │                                                │
//! │ Native Name: Belgium     Top Level Domain: .be │
//! │ Population: 11,555,997   Currencies: Euro      │
//! │ ...                                            │
//! │ Border Countries: [FRA] [DEU] [LUX] [NLD]      │
//! │                   [CHE] [ITA] [ESP] +2         │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! Border tags wrap under the label; only when the panel runs out of rows is
//! the remainder collapsed into a `+N` marker.

use crate::ui::helpers::{char_width, fit, position_cursor, truncate};
use crate::ui::layout::{Rect, ScreenLayout};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ModalField, ModalView};

/// Renders the panel over whatever is below it.
pub fn render_modal(layout: &ScreenLayout, modal: &ModalView, theme: &Theme) {
    let Some(panel) = layout.modal else {
        return;
    };
    if panel.width < 4 || panel.height < 3 {
        return;
    }

    let inner = panel.width - 2;
    let border = Theme::fg(&theme.colors.modal_border);

    let title = truncate(&format!(" {} ", modal.title), inner.saturating_sub(8));
    position_cursor(panel.row, panel.col);
    print!("{border}┌─{}{title}{}", Theme::bold(), Theme::reset());
    print!("{border}{}", "─".repeat(inner.saturating_sub(char_width(&title) + 5)));
    print!("{}{}[x]{}{border}─┐{}", Theme::bold(), Theme::fg(&theme.colors.text_normal), Theme::reset(), Theme::reset());

    let body = body_lines(modal, inner.saturating_sub(2), panel.height - 2);
    for offset in 1..panel.height - 1 {
        position_cursor(panel.row + offset, panel.col);
        print!("{border}│{}", Theme::reset());
        print!(" ");
        match body.get(offset - 1) {
            Some(BodyLine::Text(text)) => {
                print!("{}{}", Theme::fg(&theme.colors.text_normal), fit(text, inner.saturating_sub(2)));
            }
            Some(BodyLine::Tags { labelled, tags, hidden }) => {
                render_tags(*labelled, tags, *hidden, theme, inner.saturating_sub(2));
            }
            None => print!("{}", " ".repeat(inner.saturating_sub(2))),
        }
        print!(" ");
        print!("{border}│{}", Theme::reset());
    }

    position_cursor(panel.bottom(), panel.col);
    print!("{border}└{}┘{}", "─".repeat(inner), Theme::reset());

    render_shadow(panel, layout);
}

const BORDERS_LABEL: &str = "Border Countries: ";

#[derive(Debug, PartialEq, Eq)]
enum BodyLine {
    Text(String),
    /// One row of border tags; only the first row carries the label, and only
    /// the last row carries a non-zero `hidden` count.
    Tags {
        labelled: bool,
        tags: Vec<String>,
        hidden: usize,
    },
}

/// Lays out the panel body in at most `max_rows` rows of `width` cells.
fn body_lines(modal: &ModalView, width: usize, max_rows: usize) -> Vec<BodyLine> {
    let mut lines = vec![BodyLine::Text(format!("Flag: {}", modal.flag)), BodyLine::Text(String::new())];

    let half = width / 2;
    let rows = modal.primary.len().max(modal.secondary.len());
    for i in 0..rows {
        let left = modal.primary.get(i).map(field_text).unwrap_or_default();
        let right = modal.secondary.get(i).map(field_text).unwrap_or_default();
        lines.push(BodyLine::Text(format!("{}{right}", fit(&left, half))));
    }
    lines.push(BodyLine::Text(String::new()));

    let tag_rows = max_rows.saturating_sub(lines.len()).max(1);
    let (rows, hidden) = wrap_tags(&modal.borders_display(), width.saturating_sub(BORDERS_LABEL.len()), tag_rows);
    let last = rows.len() - 1;
    lines.extend(rows.into_iter().enumerate().map(|(i, tags)| BodyLine::Tags {
        labelled: i == 0,
        tags,
        hidden: if i == last { hidden } else { 0 },
    }));
    lines
}

fn field_text(field: &ModalField) -> String {
    format!("{}: {}", field.label, field.value)
}

/// Cells one tag occupies: padded text plus a separating space.
fn tag_cells(tag: &str) -> usize {
    char_width(tag) + 3
}

fn row_cells(row: &[String]) -> usize {
    row.iter().map(|tag| tag_cells(tag)).sum()
}

/// Packs tags into at most `max_rows` rows of `room` cells.
///
/// Returns the rows (never empty) and how many tags did not fit. When tags are
/// hidden, the last row keeps room for the `+N` marker.
fn wrap_tags(tags: &[String], room: usize, max_rows: usize) -> (Vec<Vec<String>>, usize) {
    let mut rows: Vec<Vec<String>> = vec![Vec::new()];
    for tag in tags {
        let needs_break = rows
            .last()
            .is_some_and(|row| !row.is_empty() && row_cells(row) + tag_cells(tag) > room);
        if needs_break {
            rows.push(Vec::new());
        }
        if let Some(row) = rows.last_mut() {
            row.push(tag.clone());
        }
    }

    if rows.len() <= max_rows {
        return (rows, 0);
    }

    rows.truncate(max_rows.max(1));
    let shown: usize = rows.iter().map(Vec::len).sum();
    let mut hidden = tags.len() - shown;
    if let Some(last) = rows.last_mut() {
        while !last.is_empty() && row_cells(last) + format!("+{hidden}").len() > room {
            last.pop();
            hidden += 1;
        }
    }
    (rows, hidden)
}

fn render_tags(labelled: bool, tags: &[String], hidden: usize, theme: &Theme, width: usize) {
    if labelled {
        print!("{}{}{BORDERS_LABEL}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal), Theme::reset());
    } else {
        print!("{}", " ".repeat(BORDERS_LABEL.len()));
    }

    let mut used = BORDERS_LABEL.len();
    for tag in tags {
        print!("{}{} {tag} {} ", Theme::fg(&theme.colors.tag_fg), Theme::bg(&theme.colors.tag_bg), Theme::reset());
        used += tag_cells(tag);
    }
    if hidden > 0 {
        let marker = format!("+{hidden}");
        print!("{}{marker}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
        used += marker.len();
    }
    print!("{}", " ".repeat(width.saturating_sub(used)));
}

/// Dims the column right of the panel to separate it from the background.
fn render_shadow(panel: Rect, layout: &ScreenLayout) {
    let col = panel.right() + 1;
    if col > layout.cols {
        return;
    }
    for row in panel.row + 1..=panel.bottom() {
        position_cursor(row, col);
        print!("{} {}", Theme::bg("#000000"), Theme::reset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Country;

    fn codes(n: usize) -> Vec<String> {
        ["AFG", "BTN", "MMR", "HKG", "IND", "KAZ", "PRK", "KGZ", "LAO", "MAC", "MNG", "PAK", "RUS", "TJK", "VNM", "NPL"]
            .iter()
            .take(n)
            .map(ToString::to_string)
            .collect()
    }

    fn tag_lines(lines: &[BodyLine]) -> Vec<(bool, usize, usize)> {
        lines
            .iter()
            .filter_map(|line| match line {
                BodyLine::Tags { labelled, tags, hidden } => Some((*labelled, tags.len(), *hidden)),
                BodyLine::Text(_) => None,
            })
            .collect()
    }

    #[test]
    fn many_borders_wrap_onto_following_rows() {
        let china = Country {
            name: "China".into(),
            borders: codes(16),
            ..Country::default()
        };
        let modal = ModalView::from_country(&china);

        // 72-wide panel: 68 body cells, 14 body rows.
        let lines = body_lines(&modal, 68, 14);
        let rows = tag_lines(&lines);

        assert_eq!(rows.iter().map(|(_, shown, _)| shown).sum::<usize>(), 16);
        assert!(rows.iter().all(|(_, _, hidden)| *hidden == 0));
        assert!(rows[0].0);
        assert!(rows[1..].iter().all(|(labelled, _, _)| !labelled));
        assert!(lines.len() <= 14);
    }

    #[test]
    fn full_panel_collapses_remainder_into_marker() {
        let (rows, hidden) = wrap_tags(&codes(16), 30, 2);
        let shown: usize = rows.iter().map(Vec::len).sum();

        assert_eq!(rows.len(), 2);
        assert!(hidden > 0);
        assert_eq!(shown + hidden, 16);
        let last = rows.last().unwrap();
        assert!(row_cells(last) + format!("+{hidden}").len() <= 30);
    }

    #[test]
    fn no_borders_render_placeholder_tag() {
        let modal = ModalView::from_country(&Country::default());
        assert_eq!(tag_lines(&body_lines(&modal, 68, 14)), vec![(true, 1, 0)]);
    }
}

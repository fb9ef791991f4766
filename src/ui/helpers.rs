//! Shared rendering utilities.
//!
//! All width arithmetic here counts characters, not bytes: country names such
//! as "Côte d'Ivoire" or "Åland Islands" must line up with ASCII ones.

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column (`\u{1b}[{row};{col}H`).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_width(text: &str) -> usize {
    text.chars().count()
}

/// Truncates `text` to `width` characters, ending in `…` when cut.
///
/// # Examples
///
/// ```
/// use country_explorer::ui::helpers::truncate;
///
/// assert_eq!(truncate("Saint Vincent and the Grenadines", 12), "Saint Vince…");
/// assert_eq!(truncate("Chad", 12), "Chad");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if char_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Truncates or right-pads `text` to exactly `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let pad = width.saturating_sub(char_width(&cut));
    format!("{cut}{}", " ".repeat(pad))
}

/// Renders text with highlighted character ranges for search matches.
///
/// Ranges are `(start, end)` character indices, end exclusive. Highlighting is
/// skipped on the selected row so the selection colors stay readable.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Coalesces sorted match indices into `(start, end)` ranges.
#[must_use]
pub fn coalesce_indices(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_counts_characters() {
        assert_eq!(fit("Åland", 7), "Åland  ");
        assert_eq!(char_width(&fit("Côte d'Ivoire", 6)), 6);
        assert_eq!(fit("Peru", 0), "");
    }

    #[test]
    fn indices_coalesce_into_runs() {
        assert_eq!(coalesce_indices(&[0, 1, 2, 5, 7, 8]), vec![(0, 3), (5, 6), (7, 9)]);
        assert!(coalesce_indices(&[]).is_empty());
    }
}

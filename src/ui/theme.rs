//! Theme management and ANSI escape sequence generation.
//!
//! Two built-in themes mirror the explorer's light and dark modes; custom themes
//! can be loaded from TOML files with the same shape.
//!
//! # Built-in Themes
//!
//! - `light`: Light background, dark text (default)
//! - `dark`: Dark blue-grey background, light text
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#111517"
//! selection_fg = "#ffffff"
//! selection_bg = "#2b3945"
//! text_normal = "#111517"
//! text_dim = "#858585"
//! border = "#c4c4c4"
//! search_bar_border = "#858585"
//! search_bar_focus = "#2b3945"
//! match_highlight_fg = "#111517"
//! match_highlight_bg = "#f2d479"
//! empty_state_fg = "#2b3945"
//! filter_fg = "#111517"
//! modal_border = "#2b3945"
//! tag_fg = "#111517"
//! tag_bg = "#e6e6e6"
//! ```

use crate::domain::{ExplorerError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the built-in light theme.
pub const LIGHT: &str = "light";

/// Name of the built-in dark theme.
pub const DARK: &str = "dark";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#2b3945"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected card row.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, labels, and secondary info.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    /// Search bar border while the field has focus.
    pub search_bar_focus: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Region filter trigger and dropdown options.
    pub filter_fg: String,

    pub modal_border: String,
    /// Border country tags in the detail modal.
    pub tag_fg: String,
    pub tag_bg: String,
}

impl Theme {
    /// Loads a built-in theme by name (`light` or `dark`).
    ///
    /// # Example
    ///
    /// ```rust
    /// use country_explorer::ui::Theme;
    ///
    /// let theme = Theme::from_name("dark").unwrap();
    /// assert_eq!(theme.name, "dark");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            LIGHT => include_str!("../../themes/light.toml"),
            DARK => include_str!("../../themes/dark.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ExplorerError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| ExplorerError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Returns the opposite built-in theme (light ⇄ dark).
    ///
    /// Custom themes toggle to `dark`.
    #[must_use]
    pub fn toggled(&self) -> Self {
        let next = if self.name == DARK { LIGHT } else { DARK };
        Self::from_name(next).unwrap_or_else(|| self.clone())
    }

    /// Converts a hex color to an RGB tuple, falling back to white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color escape sequence (`\x1b[38;2;r;g;bm`).
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence (`\x1b[48;2;r;g;bm`).
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling (colors, bold, dim, etc.).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the built-in light theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name(LIGHT).expect("Built-in light theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_themes_parse() {
        assert_eq!(Theme::default().name, LIGHT);
        assert_eq!(Theme::from_name(DARK).map(|t| t.name), Some(DARK.to_string()));
    }

    #[test]
    fn toggle_alternates_light_and_dark() {
        let light = Theme::default();
        let dark = light.toggled();
        assert_eq!(dark.name, DARK);
        assert_eq!(dark.toggled(), light);
    }

    #[test]
    fn loads_theme_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut custom = include_str!("../../themes/dark.toml").replace("name = \"dark\"", "name = \"midnight\"");
        custom.push('\n');
        file.write_all(custom.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "midnight");
        assert_eq!(theme.toggled().name, DARK);
    }

    #[test]
    fn invalid_theme_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = 3").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(ExplorerError::Theme(_))));
        assert!(Theme::from_file("/definitely/not/here.toml").is_err());
    }

    #[test]
    fn hex_colors_become_escape_sequences() {
        assert_eq!(Theme::fg("#2b3945"), "\u{1b}[38;2;43;57;69m");
        assert_eq!(Theme::bg("nonsense"), "\u{1b}[48;2;255;255;255m");
    }
}

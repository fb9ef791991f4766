//! Country Explorer: a Zellij plugin for browsing the REST Countries dataset.
//!
//! The plugin lists countries as cards in a terminal pane and provides:
//! - Debounced name search with input sanitization
//! - A region filter (Africa, Americas, Asia, Europe, Oceania) that combines
//!   with the search text
//! - A detail modal for any card, opened by keyboard or mouse
//! - Light and dark themes
//! - Response decoding on a Zellij worker thread

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Fetch Layer   │   │ Worker Layer  │
//! │ (ui/)         │   │ (fetch/)      │   │ (worker/)     │
//! │ - Rendering   │   │ - URLs, ids   │   │ - JSON decode │
//! │ - Layout/hits │   │ - Sequencing  │   │ - Name filter │
//! │ - Theming     │   │ - Debounce    │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Country record, query state (domain/)            │
//! │  - Error types (domain/error)                       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Country record, query state, errors
//! - [`fetch`]: Request descriptors, sequencing, debounce, response decoding
//! - [`infrastructure`]: Sandbox paths
//! - [`worker`]: Background worker for response decoding
//! - [`ui`]: Terminal rendering with theme support
//! - `observability`: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/country-explorer.wasm" {
//!         theme "dark"
//!         debounce_ms "300"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load**: parse configuration, initialize tracing, build `AppState`,
//!    subscribe to events, request web access
//! 2. **Permission Granted**: issue the initial "all countries" request
//! 3. **Response**: the host delivers the body; it is posted to the worker,
//!    decoded, filtered, and posted back
//! 4. **UI Rendering**: compute the view model and layout, draw components
//!
//! # Example
//!
//! ```rust
//! use country_explorer::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! # Ok::<(), country_explorer::ExplorerError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator with mouse reporting

pub mod app;
pub mod domain;
pub mod fetch;
pub mod infrastructure;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{Country, ExplorerError, Result};
pub use ui::Theme;

use crate::fetch::debounce::DEFAULT_DEBOUNCE;
use crate::fetch::request::DEFAULT_API_BASE;
use std::collections::BTreeMap;
use std::time::Duration;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/country-explorer.wasm" {
///     api_base "https://restcountries.com/v3.1"
///     theme "light"
///     theme_file "~/.config/country-explorer/theme.toml"
///     trace_level "debug"
///     debounce_ms "500"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the countries API. Default: `https://restcountries.com/v3.1`
    pub api_base: String,

    /// Built-in theme name: `light` (default) or `dark`.
    ///
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file, `~` expanded to `/host`.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing level filter. Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Quiet period before search text is committed.
    pub debounce: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unparseable or empty values fall back to their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::time::Duration;
    /// use country_explorer::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("theme".to_string(), "dark".to_string());
    /// map.insert("debounce_ms".to_string(), "250".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.theme_name.as_deref(), Some("dark"));
    /// assert_eq!(config.debounce, Duration::from_millis(250));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let debounce = non_empty("debounce_ms")
            .and_then(|ms| ms.parse::<u64>().ok())
            .map_or(DEFAULT_DEBOUNCE, Duration::from_millis);

        Self {
            api_base: non_empty("api_base").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            theme_name: non_empty("theme"),
            theme_file: non_empty("theme_file").map(|path| infrastructure::expand_tilde(&path)),
            trace_level: non_empty("trace_level"),
            debounce,
        }
    }

    /// Resolves the theme: file first, then built-in name, then the default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            match Theme::from_file(theme_file) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                }
            }
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial application state from configuration.
///
/// No request is issued here; the first fetch starts once web access is granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_base = %config.api_base, "initializing country explorer plugin");
    AppState::new(config.load_theme(), config.api_base.clone(), config.debounce)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = Config::from_zellij(&map(&[
            ("api_base", "http://localhost:8080/v3.1"),
            ("theme", "dark"),
            ("theme_file", "~/themes/mine.toml"),
            ("trace_level", "debug"),
            ("debounce_ms", "120"),
        ]));
        assert_eq!(config.api_base, "http://localhost:8080/v3.1");
        assert_eq!(config.theme_name.as_deref(), Some("dark"));
        assert_eq!(config.theme_file.as_deref(), Some("/host/themes/mine.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.debounce, Duration::from_millis(120));
    }

    #[test]
    fn bad_values_fall_back() {
        let config = Config::from_zellij(&map(&[("api_base", "  "), ("debounce_ms", "soon")]));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.debounce, DEFAULT_DEBOUNCE);
    }

    #[test]
    fn theme_resolution_order() {
        let dark = Config {
            theme_name: Some("dark".into()),
            ..Config::default()
        };
        assert_eq!(dark.load_theme().name, "dark");

        let unknown = Config {
            theme_name: Some("neon".into()),
            ..Config::default()
        };
        assert_eq!(unknown.load_theme().name, "light");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        let custom = include_str!("../themes/light.toml").replace("name = \"light\"", "name = \"paper\"");
        file.write_all(custom.as_bytes()).unwrap();
        let from_file = Config {
            theme_name: Some("dark".into()),
            theme_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };
        assert_eq!(from_file.load_theme().name, "paper");

        let missing = Config {
            theme_name: Some("dark".into()),
            theme_file: Some("/nowhere/theme.toml".into()),
            ..Config::default()
        };
        assert_eq!(missing.load_theme().name, "dark");
    }

    #[test]
    fn initialize_applies_config() {
        let state = initialize(&Config {
            api_base: "http://example.test".into(),
            debounce: Duration::from_millis(50),
            ..Config::default()
        });
        assert_eq!(state.api_base, "http://example.test");
        assert_eq!(state.debouncer.delay(), Duration::from_millis(50));
        assert!(state.cards().is_empty());
    }
}

//! Sandbox path mapping.

use std::path::PathBuf;

/// Directory for the plugin's trace files.
///
/// Resolves to `~/.local/share/zellij/country-explorer` when Zellij was started
/// from the home directory, since `/host` maps to that directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("country-explorer")
}

/// Rewrites a leading `~` to the sandbox's `/host` mount.
///
/// Used for user-supplied paths such as `theme_file`.
///
/// ```
/// use country_explorer::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path == "~" {
        "/host".to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("/host/{rest}")
    } else {
        path.to_string()
    }
}

//! Per-user config and log directories.

use std::env;
use std::path::{Path, PathBuf};

/// Application directory name under the config base.
const APP_DIR: &str = "msmaaedeh";

/// What: Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`)
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty
///
/// Output:
/// - Resolved base directory path (relative to `.` when `HOME` is unset too)
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    home_default
        .iter()
        .fold(PathBuf::from(home), |base, seg| base.join(seg))
}

/// What: Config directory, `$XDG_CONFIG_HOME/msmaaedeh` or `~/.config/msmaaedeh`.
///
/// Inputs:
/// - `override_dir`: Directory given on the command line, used as-is when present
///
/// Output:
/// - Directory path; creation is attempted but failure is not fatal
pub fn config_dir(override_dir: Option<&Path>) -> PathBuf {
    let dir = override_dir.map_or_else(
        || xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR),
        Path::to_path_buf,
    );
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::debug!(path = %dir.display(), error = %e, "failed to create config directory");
    }
    dir
}

/// Logs directory under the config directory (creation attempted).
pub fn logs_dir(config_dir: &Path) -> PathBuf {
    let dir = config_dir.join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Settings file holding the language preference.
#[must_use]
pub fn settings_file(config_dir: &Path) -> PathBuf {
    config_dir.join("settings.conf")
}

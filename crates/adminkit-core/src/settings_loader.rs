//! Loading [`Settings`] from TOML, JSON and `ADMINKIT_*` environment variables.
//!
//! Keys absent from a file keep their defaults. Environment variables are
//! applied last:
//!
//! | Env Var | Setting |
//! |---|---|
//! | `ADMINKIT_DEBUG` | `debug` |
//! | `ADMINKIT_SITE_TITLE` | `site_title` |
//! | `ADMINKIT_DEFAULT_NAMESPACE` | `default_namespace` |
//! | `ADMINKIT_ROOT_NAMESPACE` | `root_namespace` |
//! | `ADMINKIT_DEFAULT_SORT_ORDER` | `default_sort_order` |
//! | `ADMINKIT_LOG_LEVEL` | `log_level` |
//!
//! ```rust,no_run
//! use adminkit_core::settings_loader;
//!
//! let mut settings = settings_loader::from_toml_file("config/admin.toml").unwrap();
//! settings_loader::apply_env_overrides(&mut settings);
//! ```

use std::path::Path;

use crate::error::{AdminError, AdminResult};
use crate::settings::Settings;

/// Parses settings from TOML.
///
/// # Errors
///
/// Returns [`AdminError::ConfigurationError`] for malformed TOML or a value
/// of the wrong type.
pub fn from_toml_str(source: &str) -> AdminResult<Settings> {
    toml::from_str(source)
        .map_err(|e| AdminError::ConfigurationError(format!("invalid TOML settings: {e}")))
}

/// Parses settings from JSON.
///
/// # Errors
///
/// Returns [`AdminError::ConfigurationError`] for malformed JSON or a value
/// of the wrong type.
pub fn from_json_str(source: &str) -> AdminResult<Settings> {
    serde_json::from_str(source)
        .map_err(|e| AdminError::ConfigurationError(format!("invalid JSON settings: {e}")))
}

/// Reads and parses a TOML settings file.
///
/// # Errors
///
/// Returns [`AdminError::ConfigurationError`] when the file cannot be read or
/// parsed.
pub fn from_toml_file(path: impl AsRef<Path>) -> AdminResult<Settings> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| {
        AdminError::ConfigurationError(format!("cannot read '{}': {e}", path.display()))
    })?;
    from_toml_str(&source)
}

/// Returns the defaults with environment overrides applied.
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `ADMINKIT_*` overrides.
///
/// `ADMINKIT_DEBUG` is true for "true", "1" or "yes". Blank values are
/// ignored.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Some(val) = env_var("ADMINKIT_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }
    for (name, target) in [
        ("ADMINKIT_SITE_TITLE", &mut settings.site_title),
        ("ADMINKIT_DEFAULT_NAMESPACE", &mut settings.default_namespace),
        ("ADMINKIT_ROOT_NAMESPACE", &mut settings.root_namespace),
        ("ADMINKIT_DEFAULT_SORT_ORDER", &mut settings.default_sort_order),
        ("ADMINKIT_LOG_LEVEL", &mut settings.log_level),
    ] {
        if let Some(val) = env_var(name) {
            *target = val;
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

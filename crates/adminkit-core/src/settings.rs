//! Settings for adminkit.
//!
//! This module provides the [`Settings`] struct, which holds the process-wide
//! defaults every namespace and resource inherits, and [`LazySettings`], a
//! globally-accessible, lazily-initialized settings instance.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// The complete set of adminkit settings.
///
/// # Examples
///
/// ```
/// use adminkit_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.default_namespace, "admin");
/// assert_eq!(settings.default_sort_order, "id_desc");
/// ```
///
/// Missing keys keep their default values when deserializing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled.
    pub debug: bool,
    /// Title shown by the admin interface.
    pub site_title: String,

    // ── Namespaces ───────────────────────────────────────────────────

    /// The namespace resources are registered into when none is given.
    pub default_namespace: String,
    /// The name that denotes the unnamed root namespace.
    pub root_namespace: String,

    // ── Resources ────────────────────────────────────────────────────

    /// Sort order used by resources registered without a `sort_order` option.
    pub default_sort_order: String,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            site_title: "Admin".to_string(),
            default_namespace: "admin".to_string(),
            root_namespace: "root".to_string(),
            default_sort_order: "id_desc".to_string(),
            log_level: "info".to_string(),
            extra: HashMap::new(),
        }
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup to set the
/// settings, then use [`get`](LazySettings::get) to access them.
///
/// # Panics
///
/// [`get`](LazySettings::get) panics if settings have not been configured.
/// [`configure`](LazySettings::configure) panics if called more than once.
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        self.inner
            .set(settings)
            .expect("Settings have already been configured");
    }

    /// Returns a reference to the configured settings.
    ///
    /// # Panics
    ///
    /// Panics if settings have not been configured.
    pub fn get(&self) -> &Settings {
        self.inner
            .get()
            .expect("Settings have not been configured. Call SETTINGS.configure() first.")
    }

    /// Returns the configured settings, or `None` if nothing was configured yet.
    pub fn try_get(&self) -> Option<&Settings> {
        self.inner.get()
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
///
/// Call `SETTINGS.configure(settings)` once at application startup, then
/// access settings via `SETTINGS.get()` anywhere.
pub static SETTINGS: LazySettings = LazySettings::new();

//! Logging integration for adminkit.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-registration
//! spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level is read from `settings.log_level` (e.g. "debug", "info",
/// "warn", "error"). In debug mode a pretty, human-readable format is used; in
/// production a structured JSON format is used. Installing a subscriber twice
/// is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span covering the registration of one resource.
///
/// Everything logged while the registration's setup closure runs carries the
/// namespace and entity name.
///
/// # Examples
///
/// ```
/// use adminkit_core::logging::registration_span;
///
/// let span = registration_span("admin", "Category");
/// let _guard = span.enter();
/// tracing::debug!("applying menu options");
/// ```
pub fn registration_span(namespace: &str, entity: &str) -> tracing::Span {
    tracing::debug_span!("register", namespace = namespace, entity = entity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_twice_is_harmless() {
        let settings = Settings::default();
        setup_logging(&settings);
        setup_logging(&settings);
    }

    #[test]
    fn test_registration_span_enter() {
        let span = registration_span("admin", "Post");
        let _guard = span.enter();
        tracing::debug!("inside registration");
    }
}

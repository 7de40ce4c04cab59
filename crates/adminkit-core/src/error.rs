//! Core error types for adminkit.
//!
//! [`AdminError`] covers the failures the configuration engine can report:
//! configuration-time rejections (malformed entity identities, conflicting
//! registrations), deferred argument errors raised when a request resolves a
//! misconfigured scope chain, and settings loading failures.

use thiserror::Error;

/// The primary error type for adminkit.
///
/// Lookup misses (an unknown scope id, an unregistered entity) are not errors;
/// those APIs return `Option` and callers branch on absence.
#[derive(Error, Debug)]
pub enum AdminError {
    // ── Configuration time ───────────────────────────────────────────

    /// A registration cannot be accepted (malformed entity name, conflicting
    /// resource names within one namespace).
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// A settings value is missing, malformed, or cannot be loaded.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Request time ─────────────────────────────────────────────────

    /// A stored declaration turned out to be unusable when first evaluated,
    /// e.g. a `scope_to` value that is neither a closure nor a method.
    #[error("Argument error: {0}")]
    ArgumentError(String),

    /// The owner object returned by a scope-to method has no accessor for the
    /// requested association.
    #[error("Association not found: {owner} has no association '{association}'")]
    AssociationNotFound {
        /// The method that produced the owner (e.g. `current_user`).
        owner: String,
        /// The association accessor that was requested (e.g. `categories`).
        association: String,
    },

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AdminError {
    /// Returns `true` for errors that can only happen while the application is
    /// being configured, before any request is served.
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::ImproperlyConfigured(_) | Self::ConfigurationError(_) | Self::IoError(_)
        )
    }
}

/// A convenience type alias for `Result<T, AdminError>`.
pub type AdminResult<T> = Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_error_display() {
        let err = AdminError::ArgumentError("bad scope".into());
        assert_eq!(err.to_string(), "Argument error: bad scope");

        let err = AdminError::ImproperlyConfigured("empty name".into());
        assert_eq!(err.to_string(), "Improperly configured: empty name");
    }

    #[test]
    fn test_association_not_found_display() {
        let err = AdminError::AssociationNotFound {
            owner: "current_user".into(),
            association: "categories".into(),
        };
        assert_eq!(
            err.to_string(),
            "Association not found: current_user has no association 'categories'"
        );
    }

    #[test]
    fn test_is_configuration_error() {
        assert!(AdminError::ImproperlyConfigured("x".into()).is_configuration_error());
        assert!(AdminError::ConfigurationError("x".into()).is_configuration_error());
        assert!(!AdminError::ArgumentError("x".into()).is_configuration_error());
        assert!(!AdminError::AssociationNotFound {
            owner: "a".into(),
            association: "b".into(),
        }
        .is_configuration_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: AdminError = io_err.into();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("file missing"));
    }
}

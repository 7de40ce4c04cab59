//! # adminkit-core
//!
//! Core types shared by the adminkit crates: the error taxonomy, settings and
//! their loaders, tracing setup, and the text inflection helpers used to derive
//! resource names.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`utils`] - Inflection helpers and a lazily-initialized value wrapper
//! - [`settings`] - Application defaults and global configuration
//! - [`settings_loader`] - Loading settings from TOML, JSON and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{AdminError, AdminResult};
pub use settings::{Settings, SETTINGS};

//! Utility types and functions for adminkit.
//!
//! This module provides:
//! - [`LazyObject`]: A lazily-initialized value wrapper.
//! - [`text`]: Inflection helpers (underscore, camelize, pluralize, etc.).

mod lazy;
pub mod text;

pub use lazy::LazyObject;

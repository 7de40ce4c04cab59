//! # adminkit
//!
//! Declarative admin configuration for domain entities.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient access.
//! Depend on `adminkit` for everything, or on the individual crates for finer
//! control.
//!
//! ```
//! use adminkit::prelude::*;
//!
//! let mut app = Application::from_settings(Settings::default());
//! let class = EntityClass::new("Category").leak();
//! let category = app
//!     .register_class(class, ResourceOptions::new(), |r| {
//!         r.menu(MenuOptions::new().priority(1))
//!             .scope("visible", ScopeOptions::new());
//!     })
//!     .unwrap();
//!
//! assert_eq!(category.controller_name(), "Admin::CategoriesController");
//! assert_eq!(category.route_collection_path(), "admin_categories_path");
//! ```

/// Error types, settings, logging, and inflection helpers.
pub use adminkit_core as core;

/// Resources, namespaces, and the registration builder.
#[cfg(feature = "resource")]
pub use adminkit_resource as resource;

pub use serde;
pub use serde_json;
pub use tracing;
pub use tracing_subscriber;

/// The types most registrations need.
pub mod prelude {
    pub use adminkit_core::{AdminError, AdminResult, Settings};

    #[cfg(feature = "resource")]
    pub use adminkit_resource::{
        csv::CsvBuilder,
        entity::{Column, ColumnKind, Entity, EntityClass},
        menu::MenuOptions,
        namespace::{Namespace, NamespaceSettings},
        resource::{NamespaceOption, Resource, ResourceDsl, ResourceOptions},
        scope_chain::{AssociationOwner, Controller, ScopeTo},
        scopes::ScopeOptions,
        Application,
    };
}

//! # adminkit-resource
//!
//! Per-entity admin configuration. Registering an entity with a
//! [`Namespace`](namespace::Namespace) creates a [`Resource`](resource::Resource)
//! holding the names, routes, menu placement, association-chain scoping,
//! named scopes, and CSV export of that entity.
//!
//! ## Modules
//!
//! - [`entity`] - Introspectable entity classes
//! - [`naming`] - Resource name derivation
//! - [`routes`] - Controller and route helper names
//! - [`menu`] - Menu options and the navigation tree
//! - [`scope_chain`] - Association-chain scoping
//! - [`scopes`] - Named index scopes
//! - [`csv`] - CSV export descriptor
//! - [`resource`] - The resource aggregate and its registration builder
//! - [`namespace`] - Namespaces and registration
//! - [`application`] - The set of namespaces

pub mod application;
pub mod csv;
pub mod entity;
pub mod menu;
pub mod namespace;
pub mod naming;
pub mod resource;
pub mod routes;
pub mod scope_chain;
pub mod scopes;

pub use application::Application;
pub use entity::{Entity, EntityClass};
pub use namespace::Namespace;
pub use resource::{Resource, ResourceDsl, ResourceOptions};

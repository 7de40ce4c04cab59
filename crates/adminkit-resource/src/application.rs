//! The application: the set of namespaces built at boot.

use adminkit_core::{AdminResult, Settings, SETTINGS};

use crate::entity::{Entity, EntityClass};
use crate::namespace::{Namespace, NamespaceName, NamespaceSettings};
use crate::resource::{NamespaceOption, Resource, ResourceDsl, ResourceOptions};

/// Owns every namespace and routes registrations to them.
///
/// # Examples
///
/// ```
/// use adminkit_core::Settings;
/// use adminkit_resource::application::Application;
/// use adminkit_resource::entity::EntityClass;
/// use adminkit_resource::resource::ResourceOptions;
///
/// let mut app = Application::from_settings(Settings::default());
/// let class = EntityClass::new("Post").leak();
/// app.register_class(class, ResourceOptions::new(), |_| {}).unwrap();
/// app.register_class(class, ResourceOptions::new().namespace(false), |_| {}).unwrap();
///
/// assert_eq!(app.namespaces().len(), 2);
/// assert!(app.find_namespace("admin").is_some());
/// ```
#[derive(Debug)]
pub struct Application {
    settings: Settings,
    namespaces: Vec<Namespace>,
}

impl Default for Application {
    fn default() -> Self {
        Self::from_settings(Settings::default())
    }
}

impl Application {
    /// Creates an application with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an application from loaded settings.
    pub fn from_settings(settings: Settings) -> Self {
        Self {
            settings,
            namespaces: Vec::new(),
        }
    }

    /// Creates an application from the process-wide settings, or the
    /// defaults when they were never configured.
    pub fn from_global_settings() -> Self {
        Self::from_settings(SETTINGS.try_get().cloned().unwrap_or_default())
    }

    /// Returns the settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the sort order inherited by new namespaces.
    pub fn default_sort_order(&self) -> &str {
        &self.settings.default_sort_order
    }

    fn namespace_name(&self, name: &str) -> NamespaceName {
        NamespaceName::new(name, &self.settings.root_namespace)
    }

    /// Returns the namespace called `name`, creating it on first use.
    pub fn namespace(&mut self, name: &str) -> &mut Namespace {
        let wanted = self.namespace_name(name);
        let position = match self.namespaces.iter().position(|ns| *ns.name() == wanted) {
            Some(position) => position,
            None => {
                tracing::debug!(namespace = %wanted, "creating namespace");
                self.namespaces
                    .push(Namespace::new(name, NamespaceSettings::from(&self.settings)));
                self.namespaces.len() - 1
            }
        };
        &mut self.namespaces[position]
    }

    /// Returns the root namespace, creating it on first use.
    pub fn root_namespace(&mut self) -> &mut Namespace {
        let root = self.settings.root_namespace.clone();
        self.namespace(&root)
    }

    /// Looks up an existing namespace.
    pub fn find_namespace(&self, name: &str) -> Option<&Namespace> {
        let wanted = self.namespace_name(name);
        self.namespaces.iter().find(|ns| *ns.name() == wanted)
    }

    /// Returns every namespace in creation order.
    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    /// Registers the entity type `E` in the namespace its options select.
    ///
    /// # Errors
    ///
    /// See [`Namespace::register_class`].
    pub fn register<E, F>(&mut self, options: ResourceOptions, setup: F) -> AdminResult<&mut Resource>
    where
        E: Entity,
        F: FnOnce(&mut ResourceDsl<'_>),
    {
        self.register_class(E::entity_class(), options, setup)
    }

    /// Registers `class` in the namespace its options select: the default
    /// namespace, a named one, or the root for `namespace: false`.
    ///
    /// # Errors
    ///
    /// See [`Namespace::register_class`].
    pub fn register_class<F>(
        &mut self,
        class: &'static EntityClass,
        options: ResourceOptions,
        setup: F,
    ) -> AdminResult<&mut Resource>
    where
        F: FnOnce(&mut ResourceDsl<'_>),
    {
        let target = match &options.namespace {
            NamespaceOption::Default => self.settings.default_namespace.clone(),
            NamespaceOption::Named(name) => name.clone(),
            NamespaceOption::Disabled => self.settings.root_namespace.clone(),
        };
        self.namespace(&target).register_class(class, options, setup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_find_or_create() {
        let mut app = Application::new();
        app.namespace("admin");
        app.namespace("admin");
        app.namespace("ops");
        assert_eq!(app.namespaces().len(), 2);
        assert!(app.find_namespace("ops").is_some());
        assert!(app.find_namespace("missing").is_none());
    }

    #[test]
    fn test_root_aliases() {
        let mut app = Application::new();
        app.namespace("");
        app.root_namespace();
        assert_eq!(app.namespaces().len(), 1);
        assert!(app.namespaces()[0].is_root());
    }

    #[test]
    fn test_register_uses_default_namespace() {
        let mut app = Application::new();
        let resource = app
            .register_class(EntityClass::new("Post").leak(), ResourceOptions::new(), |_| {})
            .unwrap();
        assert_eq!(resource.route_prefix(), Some("admin"));
    }

    #[test]
    fn test_register_named_namespace() {
        let mut app = Application::new();
        let resource = app
            .register_class(
                EntityClass::new("Post").leak(),
                ResourceOptions::new().namespace("ops"),
                |_| {},
            )
            .unwrap();
        assert_eq!(resource.controller_name(), "Ops::PostsController");
    }

    #[test]
    fn test_register_without_namespace() {
        let mut app = Application::new();
        let resource = app
            .register_class(
                EntityClass::new("Post").leak(),
                ResourceOptions::new().namespace(false),
                |_| {},
            )
            .unwrap();
        assert_eq!(resource.route_prefix(), None);
        assert!(app.find_namespace("root").is_some());
    }

    #[test]
    fn test_sort_order_from_settings() {
        let settings = Settings {
            default_sort_order: "updated_at_desc".to_string(),
            ..Settings::default()
        };
        let mut app = Application::from_settings(settings);
        assert_eq!(app.default_sort_order(), "updated_at_desc");
        let resource = app
            .register_class(EntityClass::new("Post").leak(), ResourceOptions::new(), |_| {})
            .unwrap();
        assert_eq!(resource.sort_order(), "updated_at_desc");
    }

    #[test]
    fn test_from_global_settings_without_configuration() {
        let app = Application::from_global_settings();
        assert!(!app.settings().root_namespace.is_empty());
        assert!(app.namespaces().is_empty());
    }

    #[test]
    fn test_custom_default_namespace() {
        let settings = Settings {
            default_namespace: "backoffice".to_string(),
            ..Settings::default()
        };
        let mut app = Application::from_settings(settings);
        app.register_class(EntityClass::new("Post").leak(), ResourceOptions::new(), |_| {})
            .unwrap();
        assert!(app.find_namespace("backoffice").is_some());
    }
}

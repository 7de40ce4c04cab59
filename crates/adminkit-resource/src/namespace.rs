//! Namespaces.
//!
//! A [`Namespace`] groups resources under a shared routing prefix and shared
//! defaults (e.g. `admin` vs the unprefixed root). It owns its resources;
//! each entity is registered at most once per namespace.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use adminkit_core::logging::registration_span;
use adminkit_core::utils::text;
use adminkit_core::{AdminError, AdminResult, Settings};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityClass, EntityKey};
use crate::menu::{Menu, MenuItem};
use crate::resource::{Resource, ResourceDsl, ResourceOptions};
use crate::routes::RouteDescriptor;

/// The name of a namespace. The root namespace has none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamespaceName(Option<String>);

impl NamespaceName {
    /// Resolves `name`, treating an empty name or `root_alias` as the root.
    pub fn new(name: &str, root_alias: &str) -> Self {
        let name = name.trim();
        if name.is_empty() || name == root_alias {
            Self::root()
        } else {
            Self(Some(name.to_string()))
        }
    }

    /// Returns the root namespace name.
    pub const fn root() -> Self {
        Self(None)
    }

    /// Returns whether this is the root namespace.
    pub const fn is_root(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the name, `None` for the root namespace.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Returns the camel-cased module segment (`Admin`).
    pub fn module_name(&self) -> Option<String> {
        self.0.as_deref().map(text::camelize)
    }
}

impl fmt::Display for NamespaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_deref().unwrap_or("root"))
    }
}

/// Defaults a namespace hands down to its resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceSettings {
    /// Sort order for resources without an explicit one.
    pub default_sort_order: String,
    /// Name that denotes the root namespace.
    pub root_namespace: String,
}

impl Default for NamespaceSettings {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for NamespaceSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            default_sort_order: settings.default_sort_order.clone(),
            root_namespace: settings.root_namespace.clone(),
        }
    }
}

/// A named partition of resources.
///
/// # Examples
///
/// ```
/// use adminkit_resource::entity::EntityClass;
/// use adminkit_resource::namespace::{Namespace, NamespaceSettings};
/// use adminkit_resource::resource::ResourceOptions;
///
/// let mut admin = Namespace::new("admin", NamespaceSettings::default());
/// let class = EntityClass::new("Category").leak();
/// admin.register_class(class, ResourceOptions::new(), |_| {}).unwrap();
///
/// let category = admin.resource_for(class).unwrap();
/// assert_eq!(category.controller_name(), "Admin::CategoriesController");
/// ```
#[derive(Debug)]
pub struct Namespace {
    name: NamespaceName,
    settings: Arc<NamespaceSettings>,
    resources: Vec<Resource>,
    index: HashMap<EntityKey, usize>,
}

impl Namespace {
    /// Creates a namespace. `root` (per the settings) or an empty name
    /// creates the root namespace.
    pub fn new(name: &str, settings: NamespaceSettings) -> Self {
        Self {
            name: NamespaceName::new(name, &settings.root_namespace),
            settings: Arc::new(settings),
            resources: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Returns the namespace name.
    pub const fn name(&self) -> &NamespaceName {
        &self.name
    }

    /// Returns whether this is the root namespace.
    pub const fn is_root(&self) -> bool {
        self.name.is_root()
    }

    /// Returns the defaults shared with the resources.
    pub fn settings(&self) -> &NamespaceSettings {
        &self.settings
    }

    pub(crate) fn shared_settings(&self) -> Arc<NamespaceSettings> {
        Arc::clone(&self.settings)
    }

    /// Returns the sort order resources fall back to.
    pub fn default_sort_order(&self) -> &str {
        &self.settings.default_sort_order
    }

    /// Registers the entity type `E`, then runs `setup` against its resource.
    ///
    /// # Errors
    ///
    /// See [`register_class`](Self::register_class).
    pub fn register<E, F>(&mut self, options: ResourceOptions, setup: F) -> AdminResult<&mut Resource>
    where
        E: Entity,
        F: FnOnce(&mut ResourceDsl<'_>),
    {
        self.register_class(E::entity_class(), options, setup)
    }

    /// Registers `class`, then runs `setup` against its resource.
    ///
    /// Registering an entity that is already registered reopens its resource:
    /// `setup` runs again against it and the original options are kept.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ImproperlyConfigured`] when the class name is
    /// malformed, or when another entity in this namespace already derives the
    /// same resource name.
    pub fn register_class<F>(
        &mut self,
        class: &'static EntityClass,
        options: ResourceOptions,
        setup: F,
    ) -> AdminResult<&mut Resource>
    where
        F: FnOnce(&mut ResourceDsl<'_>),
    {
        let key = class.key();
        let span = registration_span(&self.name.to_string(), key.as_str());
        let _guard = span.enter();

        let position = if let Some(&position) = self.index.get(&key) {
            let existing = &self.resources[position];
            if *existing.options() != options {
                tracing::warn!(
                    namespace = %self.name,
                    resource = existing.underscored_resource_name(),
                    "resource reopened with different options; keeping the original ones"
                );
            }
            tracing::debug!(namespace = %self.name, resource = existing.underscored_resource_name(), "reopening resource");
            position
        } else {
            let resource =
                Resource::build(self.name.clone(), self.shared_settings(), class, options)?;
            if let Some(clash) = self
                .resources
                .iter()
                .find(|r| r.underscored_resource_name() == resource.underscored_resource_name())
            {
                return Err(AdminError::ImproperlyConfigured(format!(
                    "{} and {} both resolve to resource '{}' in namespace {}",
                    clash.entity_class().qualified_name(),
                    class.qualified_name(),
                    resource.underscored_resource_name(),
                    self.name
                )));
            }
            tracing::info!(
                namespace = %self.name,
                resource = resource.underscored_resource_name(),
                "registered resource"
            );
            self.resources.push(resource);
            self.index.insert(key, self.resources.len() - 1);
            self.resources.len() - 1
        };

        let resource = &mut self.resources[position];
        setup(&mut ResourceDsl::new(resource));
        Ok(resource)
    }

    /// Looks up the resource registered for `class`.
    pub fn resource_for(&self, class: &EntityClass) -> Option<&Resource> {
        self.index.get(&class.key()).map(|&i| &self.resources[i])
    }

    /// Looks up the resource registered for `class` for editing.
    pub fn resource_for_mut(&mut self, class: &EntityClass) -> Option<&mut Resource> {
        let position = *self.index.get(&class.key())?;
        Some(&mut self.resources[position])
    }

    /// Looks up the resource registered for the entity type `E`.
    pub fn resource_for_entity<E: Entity>(&self) -> Option<&Resource> {
        self.resource_for(E::entity_class())
    }

    /// Looks up a resource by its underscored name.
    pub fn find_resource(&self, underscored: &str) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|r| r.underscored_resource_name() == underscored)
    }

    /// Iterates resources in registration order.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    /// Returns the number of registered resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Builds the navigation tree from every resource included in the menu.
    pub fn menu(&self) -> Menu {
        let mut menu = Menu::new();
        for resource in self.resources.iter().filter(|r| r.include_in_menu()) {
            let item = MenuItem::new(
                resource.menu_item_name(),
                resource.menu_item_priority(),
                Some(resource.route_collection_path()),
                resource.menu_item_display_if(),
            );
            menu.add(resource.parent_menu_item_name(), item);
        }
        menu.sort();
        menu
    }

    /// Returns the route names of every resource in registration order.
    pub fn route_table(&self) -> Vec<RouteDescriptor> {
        self.resources.iter().map(Resource::route_descriptor).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuOptions;
    use crate::scopes::ScopeOptions;

    fn admin() -> Namespace {
        Namespace::new("admin", NamespaceSettings::default())
    }

    #[test]
    fn test_namespace_name() {
        assert!(NamespaceName::new("root", "root").is_root());
        assert!(NamespaceName::new("", "root").is_root());
        assert!(NamespaceName::new("main", "main").is_root());
        let admin = NamespaceName::new("admin", "root");
        assert_eq!(admin.as_str(), Some("admin"));
        assert_eq!(admin.module_name().as_deref(), Some("Admin"));
        assert_eq!(admin.to_string(), "admin");
        assert_eq!(NamespaceName::root().to_string(), "root");
    }

    #[test]
    fn test_register_and_lookup() {
        let mut ns = admin();
        let class = EntityClass::new("Category").leak();
        ns.register_class(class, ResourceOptions::new(), |_| {}).unwrap();
        assert_eq!(ns.len(), 1);
        assert!(ns.resource_for(class).is_some());
        assert!(ns.find_resource("category").is_some());
        assert!(ns.resource_for(&EntityClass::new("Post")).is_none());
    }

    #[test]
    fn test_register_runs_setup() {
        let mut ns = admin();
        let class = EntityClass::new("Post").leak();
        let resource = ns
            .register_class(class, ResourceOptions::new(), |r| {
                r.scope("published", ScopeOptions::new());
            })
            .unwrap();
        assert_eq!(resource.scopes().len(), 1);
    }

    #[test]
    fn test_reregister_reopens() {
        let mut ns = admin();
        let class = EntityClass::new("Post").leak();
        ns.register_class(class, ResourceOptions::new().sort_order("title_asc"), |r| {
            r.scope("published", ScopeOptions::new());
        })
        .unwrap();
        let resource = ns
            .register_class(class, ResourceOptions::new(), |r| {
                r.scope("drafts", ScopeOptions::new());
            })
            .unwrap();
        assert_eq!(resource.scopes().len(), 2);
        assert_eq!(resource.sort_order(), "title_asc");
        assert_eq!(ns.len(), 1);
    }

    #[test]
    fn test_name_collision_rejected() {
        let mut ns = admin();
        ns.register_class(EntityClass::new("Category").leak(), ResourceOptions::new(), |_| {})
            .unwrap();
        let err = ns
            .register_class(
                EntityClass::new("Tag").leak(),
                ResourceOptions::new().as_name("Category"),
                |_| {},
            )
            .unwrap_err();
        assert!(matches!(err, AdminError::ImproperlyConfigured(_)));
        assert_eq!(ns.len(), 1);
    }

    #[test]
    fn test_same_name_in_other_namespace() {
        let class = EntityClass::new("Category").leak();
        let mut admin = admin();
        let mut root = Namespace::new("root", NamespaceSettings::default());
        admin.register_class(class, ResourceOptions::new(), |_| {}).unwrap();
        root.register_class(class, ResourceOptions::new(), |_| {}).unwrap();
        assert_eq!(
            root.resource_for(class).unwrap().controller_name(),
            "CategoriesController"
        );
    }

    #[test]
    fn test_resources_keep_registration_order() {
        let mut ns = admin();
        for name in ["Zebra", "Apple", "Mango"] {
            ns.register_class(EntityClass::new(name).leak(), ResourceOptions::new(), |_| {})
                .unwrap();
        }
        let names: Vec<&str> = ns.resources().map(Resource::resource_name).collect();
        assert_eq!(names, vec!["Zebra", "Apple", "Mango"]);
    }

    #[test]
    fn test_menu_tree() {
        let mut ns = admin();
        ns.register_class(EntityClass::new("Post").leak(), ResourceOptions::new(), |r| {
            r.menu(MenuOptions::new().parent("Blog").priority(1));
        })
        .unwrap();
        ns.register_class(EntityClass::new("Comment").leak(), ResourceOptions::new(), |r| {
            r.belongs_to("post");
        })
        .unwrap();
        ns.register_class(EntityClass::new("User").leak(), ResourceOptions::new(), |r| {
            r.menu(MenuOptions::new().priority(1));
        })
        .unwrap();
        ns.register_class(EntityClass::new("Setting").leak(), ResourceOptions::new(), |r| {
            r.menu(false);
        })
        .unwrap();

        let menu = ns.menu();
        let labels: Vec<&str> = menu.items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Users", "Blog"]);
        let posts = menu.find("Blog").and_then(|b| b.child("Posts")).unwrap();
        assert_eq!(posts.url.as_deref(), Some("admin_posts_path"));
    }

    #[test]
    fn test_menu_tree_child_registered_first() {
        let mut ns = admin();
        ns.register_class(EntityClass::new("Post").leak(), ResourceOptions::new(), |r| {
            r.menu(MenuOptions::new().parent("Blogs").priority(1));
        })
        .unwrap();
        ns.register_class(EntityClass::new("Blog").leak(), ResourceOptions::new(), |r| {
            r.menu(MenuOptions::new().priority(0));
        })
        .unwrap();

        let menu = ns.menu();
        let top: Vec<(&str, Option<&str>, usize)> = menu
            .items()
            .iter()
            .map(|i| (i.label.as_str(), i.url.as_deref(), i.children.len()))
            .collect();
        assert_eq!(top, vec![("Blogs", Some("admin_blogs_path"), 1)]);
    }

    #[test]
    fn test_single_letter_entity_names() {
        let mut ns = admin();
        let resource = ns
            .register_class(EntityClass::new("S").leak(), ResourceOptions::new(), |_| {})
            .unwrap();
        assert_eq!(resource.underscored_resource_name(), "s");
        assert_eq!(resource.controller_name(), "Admin::SController");
        assert_eq!(resource.route_collection_path(), "admin_s_path");
    }

    #[test]
    fn test_route_table() {
        let mut ns = admin();
        ns.register_class(EntityClass::new("Post").leak(), ResourceOptions::new(), |_| {})
            .unwrap();
        let table = ns.route_table();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].route_collection_path, "admin_posts_path");
    }

    #[test]
    fn test_default_sort_order() {
        let ns = Namespace::new(
            "admin",
            NamespaceSettings {
                default_sort_order: "name_asc".to_string(),
                root_namespace: "root".to_string(),
            },
        );
        assert_eq!(ns.default_sort_order(), "name_asc");
    }
}

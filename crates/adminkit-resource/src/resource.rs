//! The per-entity configuration aggregate.
//!
//! A [`Resource`] is created when an entity is registered with a
//! [`Namespace`] and holds everything the admin needs to know about that
//! entity: its names, routes, menu placement, access scoping, scopes, CSV
//! export and page configurations. Registration blocks configure it through a
//! [`ResourceDsl`].

use std::collections::HashMap;
use std::sync::Arc;

use adminkit_core::utils::{text, LazyObject};
use adminkit_core::AdminResult;
use serde::{Deserialize, Serialize};

use crate::csv::CsvBuilder;
use crate::entity::EntityClass;
use crate::menu::{DisplayPredicate, MenuConfig, MenuDirective};
use crate::namespace::{Namespace, NamespaceName, NamespaceSettings};
use crate::naming::ResourceNaming;
use crate::routes::{self, RouteDescriptor};
use crate::scope_chain::{Controller, ScopeTo};
use crate::scopes::{Scope, ScopeOptions, ScopeRegistry};

// ── Options ─────────────────────────────────────────────────────────

/// Which namespace a registration targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamespaceOption {
    /// The application's default namespace.
    #[default]
    Default,
    /// The namespace with this name.
    Named(String),
    /// No namespace: the resource is unprefixed.
    Disabled,
}

impl From<&str> for NamespaceOption {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for NamespaceOption {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

/// `namespace: false` disables the namespace; `true` keeps the default.
impl From<bool> for NamespaceOption {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Default
        } else {
            Self::Disabled
        }
    }
}

/// Options given at registration. Immutable once the resource exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceOptions {
    /// Display-name override (`as`).
    pub as_name: Option<String>,
    /// Explicit sort order.
    pub sort_order: Option<String>,
    /// Target namespace.
    pub namespace: NamespaceOption,
}

impl ResourceOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the display name.
    #[must_use]
    pub fn as_name(mut self, name: impl Into<String>) -> Self {
        self.as_name = Some(name.into());
        self
    }

    /// Sets the sort order (e.g. `title_asc`).
    #[must_use]
    pub fn sort_order(mut self, order: impl Into<String>) -> Self {
        self.sort_order = Some(order.into());
        self
    }

    /// Chooses the namespace; `false` disables it.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<NamespaceOption>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

/// A declared parent relation nesting the resource under another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BelongsTo {
    /// The parent resource (e.g. `user`).
    pub target: String,
    /// Whether the resource is also reachable without a parent.
    pub optional: bool,
}

impl BelongsTo {
    /// Returns the route parameter naming the parent (`user_id`).
    pub fn param(&self) -> String {
        format!("{}_id", text::singularize(&text::underscore(&self.target)))
    }
}

// ── Resource ────────────────────────────────────────────────────────

/// Configuration aggregate for one admin-managed entity.
///
/// The resource refers to its namespace by name and shares the namespace's
/// defaults; it never owns or points back at the [`Namespace`] itself.
#[derive(Debug)]
pub struct Resource {
    namespace: NamespaceName,
    defaults: Arc<NamespaceSettings>,
    entity_class: &'static EntityClass,
    options: ResourceOptions,
    naming: ResourceNaming,
    menu: MenuConfig,
    belongs_to: Option<BelongsTo>,
    scope_to: ScopeTo,
    scopes: ScopeRegistry,
    page_configs: HashMap<String, serde_json::Value>,
    csv_builder: LazyObject<CsvBuilder>,
}

impl Resource {
    /// Creates the resource for `class` in `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ImproperlyConfigured`](adminkit_core::AdminError::ImproperlyConfigured)
    /// when no valid name can be derived for the class.
    pub fn new(
        namespace: &Namespace,
        class: &'static EntityClass,
        options: ResourceOptions,
    ) -> AdminResult<Self> {
        Self::build(namespace.name().clone(), namespace.shared_settings(), class, options)
    }

    pub(crate) fn build(
        namespace: NamespaceName,
        defaults: Arc<NamespaceSettings>,
        class: &'static EntityClass,
        options: ResourceOptions,
    ) -> AdminResult<Self> {
        let naming = ResourceNaming::resolve(class, options.as_name.as_deref())?;
        Ok(Self {
            namespace,
            defaults,
            entity_class: class,
            options,
            naming,
            menu: MenuConfig::default(),
            belongs_to: None,
            scope_to: ScopeTo::None,
            scopes: ScopeRegistry::new(),
            page_configs: HashMap::new(),
            csv_builder: LazyObject::new(move || CsvBuilder::default_for(class)),
        })
    }

    // ── Identity ────────────────────────────────────────────────────

    /// Returns the name of the owning namespace.
    pub const fn namespace_name(&self) -> &NamespaceName {
        &self.namespace
    }

    /// Returns the entity this resource manages.
    pub const fn entity_class(&self) -> &'static EntityClass {
        self.entity_class
    }

    /// Returns the registration options.
    pub const fn options(&self) -> &ResourceOptions {
        &self.options
    }

    /// Returns every derived name.
    pub const fn naming(&self) -> &ResourceNaming {
        &self.naming
    }

    /// Returns the display name (`Category`, or the `as` override).
    pub fn resource_name(&self) -> &str {
        &self.naming.singular
    }

    /// Returns the plural display name (`Categories`).
    pub fn plural_resource_name(&self) -> &str {
        &self.naming.plural
    }

    /// Returns the singular underscored token (`category`).
    pub fn underscored_resource_name(&self) -> &str {
        &self.naming.underscored
    }

    /// Returns the camel-cased token (`Category`).
    pub fn camelized_resource_name(&self) -> &str {
        &self.naming.camelized
    }

    /// Returns the plural underscored token (`categories`).
    pub fn plural_underscored_resource_name(&self) -> &str {
        &self.naming.plural_underscored
    }

    /// Returns the quoted table name.
    pub fn resource_table_name(&self) -> &str {
        &self.naming.table_name
    }

    // ── Routes ──────────────────────────────────────────────────────

    /// Returns the routing prefix: the namespace name, or `None` in the root
    /// namespace or when registered with `namespace: false`.
    pub fn route_prefix(&self) -> Option<&str> {
        if self.options.namespace == NamespaceOption::Disabled {
            return None;
        }
        self.namespace.as_str()
    }

    /// Returns the controller name (`Admin::CategoriesController`).
    pub fn controller_name(&self) -> String {
        routes::controller_name(self.route_prefix(), &self.naming)
    }

    /// Returns the collection route helper (`admin_categories_path`).
    pub fn route_collection_path(&self) -> String {
        routes::route_collection_path(self.route_prefix(), &self.naming)
    }

    /// Returns the member route helper (`admin_category_path`).
    pub fn route_instance_path(&self) -> String {
        routes::route_instance_path(self.route_prefix(), &self.naming)
    }

    /// Returns all route names at once.
    pub fn route_descriptor(&self) -> RouteDescriptor {
        RouteDescriptor::new(self.route_prefix(), &self.naming)
    }

    // ── Menu ────────────────────────────────────────────────────────

    /// Applies a `menu(...)` declaration.
    pub fn menu(&mut self, directive: impl Into<MenuDirective>) {
        self.menu.apply(directive.into());
    }

    /// Returns the menu settings.
    pub const fn menu_config(&self) -> &MenuConfig {
        &self.menu
    }

    /// Returns the menu label: the explicit label or the plural display name.
    pub fn menu_item_name(&self) -> &str {
        self.menu.label().unwrap_or(&self.naming.plural)
    }

    /// Returns the parent menu item label, if any.
    pub fn parent_menu_item_name(&self) -> Option<&str> {
        self.menu.parent()
    }

    /// Returns the menu priority (10 unless set).
    pub fn menu_item_priority(&self) -> i32 {
        self.menu.priority()
    }

    /// Returns the menu visibility predicate.
    pub fn menu_item_display_if(&self) -> Arc<dyn DisplayPredicate> {
        self.menu.display_if()
    }

    /// Returns whether the resource gets a menu entry.
    ///
    /// Only `menu(false)` or a non-optional `belongs_to` remove it.
    pub fn include_in_menu(&self) -> bool {
        self.menu.is_displayed() && self.belongs_to.as_ref().map_or(true, |b| b.optional)
    }

    // ── Relations and scoping ───────────────────────────────────────

    /// Declares a parent relation.
    pub fn belongs_to(&mut self, target: impl Into<String>, optional: bool) {
        self.belongs_to = Some(BelongsTo {
            target: target.into(),
            optional,
        });
    }

    /// Returns the parent relation, if declared.
    pub const fn belongs_to_config(&self) -> Option<&BelongsTo> {
        self.belongs_to.as_ref()
    }

    /// Returns whether a parent relation is declared.
    pub const fn has_belongs_to(&self) -> bool {
        self.belongs_to.is_some()
    }

    /// Declares the association-chain scoping. Never fails; an invalid
    /// declaration fails when the chain is resolved.
    pub fn scope_to(&mut self, scope: impl Into<ScopeTo>) {
        self.scope_to = scope.into();
        if let ScopeTo::Invalid(value) = &self.scope_to {
            tracing::debug!(
                resource = %self.naming.underscored,
                value = %value,
                "scope_to declared with a non-callable value"
            );
        }
    }

    /// Returns the scope-to declaration.
    pub const fn scope_to_config(&self) -> &ScopeTo {
        &self.scope_to
    }

    /// Returns the association accessor used by method scoping: the
    /// `association_method` override, else the plural underscored name.
    pub fn method_for_association_chain(&self) -> &str {
        self.scope_to
            .association_method_override()
            .unwrap_or(&self.naming.plural_underscored)
    }

    /// Resolves the association chain for one request.
    ///
    /// # Errors
    ///
    /// See [`ScopeTo::resolve`].
    pub fn association_chain<C: Controller>(&self, controller: &C) -> AdminResult<C::Collection> {
        self.scope_to
            .resolve(controller, self.entity_class, self.method_for_association_chain())
            .inspect_err(|err| {
                tracing::warn!(resource = %self.naming.underscored, error = %err, "association chain failed");
            })
    }

    // ── Scopes ──────────────────────────────────────────────────────

    /// Declares a scope; re-declaring an id replaces it in place.
    pub fn scope(&mut self, id: impl Into<String>, options: ScopeOptions) -> &Scope {
        let scope = self.scopes.add(id, options);
        tracing::debug!(resource = %self.naming.underscored, scope = scope.id(), "scope declared");
        scope
    }

    /// Returns the scopes in declaration order.
    pub fn scopes(&self) -> &[Scope] {
        self.scopes.as_slice()
    }

    /// Returns the scope registry.
    pub const fn scope_registry(&self) -> &ScopeRegistry {
        &self.scopes
    }

    /// Looks up a scope by id.
    pub fn get_scope_by_id(&self, id: &str) -> Option<&Scope> {
        self.scopes.get(id)
    }

    /// Returns the scope selected when none is requested.
    pub fn default_scope(&self) -> Option<&Scope> {
        self.scopes.default_scope()
    }

    // ── Pages, export, ordering ─────────────────────────────────────

    /// Returns the per-page configurations.
    pub const fn page_configs(&self) -> &HashMap<String, serde_json::Value> {
        &self.page_configs
    }

    /// Returns the per-page configurations for editing.
    pub fn page_configs_mut(&mut self) -> &mut HashMap<String, serde_json::Value> {
        &mut self.page_configs
    }

    /// Returns the CSV export descriptor, building the default on first use.
    pub fn csv_builder(&self) -> &CsvBuilder {
        self.csv_builder.get()
    }

    /// Replaces the CSV export descriptor.
    pub fn set_csv_builder(&mut self, builder: CsvBuilder) {
        self.csv_builder.set(builder);
    }

    /// Returns the explicit sort order, else the namespace default.
    pub fn sort_order(&self) -> &str {
        self.options
            .sort_order
            .as_deref()
            .unwrap_or(&self.defaults.default_sort_order)
    }
}

// ── Registration builder ────────────────────────────────────────────

/// The configuration builder handed to registration setup closures.
///
/// # Examples
///
/// ```
/// use adminkit_resource::entity::EntityClass;
/// use adminkit_resource::menu::MenuOptions;
/// use adminkit_resource::namespace::{Namespace, NamespaceSettings};
/// use adminkit_resource::resource::ResourceOptions;
/// use adminkit_resource::scopes::ScopeOptions;
///
/// let mut admin = Namespace::new("admin", NamespaceSettings::default());
/// let class = EntityClass::new("Post").leak();
/// let post = admin
///     .register_class(class, ResourceOptions::new(), |r| {
///         r.menu(MenuOptions::new().priority(3).parent("Blog"))
///             .scope("published", ScopeOptions::new());
///     })
///     .unwrap();
///
/// assert_eq!(post.menu_item_priority(), 3);
/// assert_eq!(post.scopes()[0].name(), "Published");
/// ```
pub struct ResourceDsl<'a> {
    resource: &'a mut Resource,
}

impl<'a> ResourceDsl<'a> {
    pub(crate) fn new(resource: &'a mut Resource) -> Self {
        Self { resource }
    }

    /// Returns the resource being configured.
    pub fn resource(&self) -> &Resource {
        self.resource
    }

    /// Sets menu options, or hides the entry with `false`.
    pub fn menu(&mut self, directive: impl Into<MenuDirective>) -> &mut Self {
        self.resource.menu(directive);
        self
    }

    /// Nests the resource under a required parent.
    pub fn belongs_to(&mut self, target: impl Into<String>) -> &mut Self {
        self.resource.belongs_to(target, false);
        self
    }

    /// Nests the resource under a parent it can also live without.
    pub fn belongs_to_optional(&mut self, target: impl Into<String>) -> &mut Self {
        self.resource.belongs_to(target, true);
        self
    }

    /// Scopes the association chain.
    pub fn scope_to(&mut self, scope: impl Into<ScopeTo>) -> &mut Self {
        self.resource.scope_to(scope);
        self
    }

    /// Declares a scope.
    pub fn scope(&mut self, id: impl Into<String>, options: ScopeOptions) -> &mut Self {
        self.resource.scope(id, options);
        self
    }

    /// Replaces the CSV export descriptor.
    pub fn csv(&mut self, builder: CsvBuilder) -> &mut Self {
        self.resource.set_csv_builder(builder);
        self
    }

    /// Stores a page configuration under `page`.
    pub fn page_config(&mut self, page: impl Into<String>, config: serde_json::Value) -> &mut Self {
        self.resource.page_configs.insert(page.into(), config);
        self
    }
}

//! Resource naming.
//!
//! Every name a resource exposes is derived here from either its entity class
//! or the `as` override given at registration. The functions are pure;
//! [`ResourceNaming`] resolves them once per resource.

use adminkit_core::utils::text;
use adminkit_core::{AdminError, AdminResult};
use serde::Serialize;

use crate::entity::EntityClass;

/// Returns the singular underscored token identifying the resource.
///
/// Without an override the module path and class name are flattened into one
/// token (`Mock::Resource` -> `mock_resource`); only the class segment is
/// singularized. With an override its words are underscored and the result
/// singularized (`"Blog Categories"` -> `blog_category`).
pub fn underscored_resource_name(class: &EntityClass, as_name: Option<&str>) -> String {
    if let Some(name) = as_name {
        return text::singularize(&text::underscore(name));
    }
    class
        .module_path()
        .iter()
        .map(|part| text::underscore(part))
        .chain(std::iter::once(text::singularize(&text::underscore(
            class.name(),
        ))))
        .collect::<Vec<_>>()
        .join("_")
}

/// Returns the plural underscored token (`category` -> `categories`).
pub fn plural_underscored_resource_name(class: &EntityClass, as_name: Option<&str>) -> String {
    text::pluralize(&underscored_resource_name(class, as_name))
}

/// Returns the camel-cased underscored name (`blog_category` -> `BlogCategory`).
pub fn camelized_resource_name(underscored: &str) -> String {
    text::camelize(underscored)
}

/// Returns the display name: the override verbatim, else the titleized class name.
pub fn resource_name(class: &EntityClass, as_name: Option<&str>) -> String {
    as_name.map_or_else(|| text::titleize(class.name()), str::to_string)
}

/// Returns the pluralized display name.
pub fn plural_resource_name(class: &EntityClass, as_name: Option<&str>) -> String {
    text::pluralize(&resource_name(class, as_name))
}

/// Returns the quoted storage table name. The `as` override never affects it.
pub fn resource_table_name(class: &EntityClass) -> String {
    class.quoted_table_name()
}

/// All names derived for one resource.
///
/// # Examples
///
/// ```
/// use adminkit_resource::entity::EntityClass;
/// use adminkit_resource::naming::ResourceNaming;
///
/// let class = EntityClass::new("Category");
/// let naming = ResourceNaming::resolve(&class, Some("Blog Categories")).unwrap();
/// assert_eq!(naming.underscored, "blog_category");
/// assert_eq!(naming.camelized, "BlogCategory");
/// assert_eq!(naming.plural_underscored, "blog_categories");
/// assert_eq!(naming.table_name, "\"categories\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceNaming {
    /// Singular underscored token (`category`).
    pub underscored: String,
    /// Camel-cased singular token (`Category`).
    pub camelized: String,
    /// Plural underscored token (`categories`), used for routes and the
    /// default association accessor.
    pub plural_underscored: String,
    /// Camel-cased plural token (`Categories`), used for controller names.
    pub plural_camelized: String,
    /// Singular display name (`Category`).
    pub singular: String,
    /// Plural display name (`Categories`).
    pub plural: String,
    /// Quoted table name (`"categories"`).
    pub table_name: String,
}

impl ResourceNaming {
    /// Resolves every name for `class`, honoring the `as` override.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ImproperlyConfigured`] when the class name is
    /// malformed or the override contains no word characters, since either
    /// would yield an empty resource name.
    pub fn resolve(class: &EntityClass, as_name: Option<&str>) -> AdminResult<Self> {
        class.validate()?;
        if let Some(name) = as_name {
            if !name.chars().any(char::is_alphanumeric) {
                return Err(AdminError::ImproperlyConfigured(format!(
                    "resource name override '{name}' for {} has no word characters",
                    class.qualified_name()
                )));
            }
        }

        let underscored = underscored_resource_name(class, as_name);
        let plural_underscored = plural_underscored_resource_name(class, as_name);
        if underscored.is_empty() || plural_underscored.is_empty() {
            return Err(AdminError::ImproperlyConfigured(format!(
                "{} resolves to an empty resource name",
                class.qualified_name()
            )));
        }
        Ok(Self {
            camelized: camelized_resource_name(&underscored),
            plural_camelized: text::camelize(&plural_underscored),
            singular: resource_name(class, as_name),
            plural: plural_resource_name(class, as_name),
            table_name: resource_table_name(class),
            underscored,
            plural_underscored,
        })
    }
}

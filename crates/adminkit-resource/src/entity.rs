//! Entity introspection.
//!
//! An [`EntityClass`] describes a domain type the admin can manage: its name
//! and enclosing module path, its storage table, its primary key, and its
//! columns. Domain types expose their class statically through the [`Entity`]
//! trait, the same way ORM models expose their metadata.

use std::fmt;

use adminkit_core::utils::text;
use adminkit_core::{AdminError, AdminResult};
use serde::{Deserialize, Serialize};

/// The storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Integer column (including auto-incrementing keys).
    Integer,
    /// Short string column.
    String,
    /// Long text column.
    Text,
    /// Boolean column.
    Boolean,
    /// Date and time column.
    DateTime,
    /// Fixed-point decimal column.
    Decimal,
    /// Foreign key to another entity.
    Reference,
}

/// A single column of an entity's table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// The column name.
    pub name: String,
    /// The storage type.
    pub kind: ColumnKind,
    /// The entity this column references, for relation columns.
    pub relation: Option<String>,
}

impl Column {
    /// Creates a plain (non-relation) column.
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
            relation: None,
        }
    }

    /// Creates a foreign-key column referencing `target`.
    pub fn reference(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Reference,
            relation: Some(target.into()),
        }
    }

    /// Returns whether this column points at another entity.
    pub const fn is_relation(&self) -> bool {
        self.relation.is_some()
    }
}

/// Identity of an entity class: its fully qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey(String);

impl EntityKey {
    /// Returns the fully qualified name, e.g. `Mock::Resource`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Introspectable description of a domain entity type.
///
/// # Examples
///
/// ```
/// use adminkit_resource::entity::{Column, ColumnKind, EntityClass};
///
/// let class = EntityClass::new("Blog::Category")
///     .column(Column::new("id", ColumnKind::Integer))
///     .column(Column::new("name", ColumnKind::String))
///     .column(Column::reference("parent_id", "Blog::Category"));
///
/// assert_eq!(class.name(), "Category");
/// assert_eq!(class.module_path(), ["Blog"]);
/// assert_eq!(class.table_name(), "categories");
/// assert_eq!(class.content_columns().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityClass {
    module_path: Vec<String>,
    name: String,
    table_name: Option<String>,
    primary_key: String,
    columns: Vec<Column>,
}

impl EntityClass {
    /// Creates a class from its fully qualified name (`Module::Class`).
    ///
    /// The name is validated when the class is registered, not here.
    pub fn new(qualified_name: &str) -> Self {
        let mut parts: Vec<String> = qualified_name.split("::").map(str::to_string).collect();
        let name = parts.pop().unwrap_or_default();
        Self {
            module_path: parts,
            name,
            table_name: None,
            primary_key: "id".to_string(),
            columns: Vec::new(),
        }
    }

    /// Overrides the conventional (tableized) table name.
    #[must_use]
    pub fn table_name_override(mut self, table: impl Into<String>) -> Self {
        self.table_name = Some(table.into());
        self
    }

    /// Sets the primary key column name.
    #[must_use]
    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = column.into();
        self
    }

    /// Appends a column.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Replaces all columns.
    #[must_use]
    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Moves the class to the heap for the rest of the process.
    ///
    /// Classes live as long as the configuration that references them, so
    /// classes built at runtime (e.g. from schema introspection) are leaked
    /// once at boot.
    pub fn leak(self) -> &'static Self {
        Box::leak(Box::new(self))
    }

    /// Returns the simple class name, e.g. `Resource` for `Mock::Resource`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the enclosing module path.
    pub fn module_path(&self) -> &[String] {
        &self.module_path
    }

    /// Returns the fully qualified name, e.g. `Mock::Resource`.
    pub fn qualified_name(&self) -> String {
        if self.module_path.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.module_path.join("::"), self.name)
        }
    }

    /// Returns the identity used to key resources.
    pub fn key(&self) -> EntityKey {
        EntityKey(self.qualified_name())
    }

    /// Returns the storage table name.
    ///
    /// Defaults to the pluralized, underscored simple name (`categories`).
    pub fn table_name(&self) -> String {
        self.table_name
            .clone()
            .unwrap_or_else(|| text::tableize(&self.name))
    }

    /// Returns the table name quoted as a storage identifier (`"categories"`).
    pub fn quoted_table_name(&self) -> String {
        quote_identifier(&self.table_name())
    }

    /// Returns the primary key column name.
    pub fn primary_key_name(&self) -> &str {
        &self.primary_key
    }

    /// Returns all columns in declaration order.
    pub fn all_columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the columns that hold content: everything except the primary
    /// key and relation columns.
    pub fn content_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| c.name != self.primary_key && !c.is_relation())
            .collect()
    }

    /// Checks that every path segment is a valid identifier.
    pub fn validate(&self) -> AdminResult<()> {
        let segments = self.module_path.iter().chain(std::iter::once(&self.name));
        for segment in segments {
            if !is_identifier(segment) {
                return Err(AdminError::ImproperlyConfigured(format!(
                    "'{}' is not a valid entity class name (bad segment '{segment}')",
                    self.qualified_name()
                )));
            }
        }
        Ok(())
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Quotes an identifier with double quotes, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// A domain type that can be registered as an admin resource.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
///
/// use adminkit_resource::entity::{Column, ColumnKind, Entity, EntityClass};
///
/// struct Category;
///
/// impl Entity for Category {
///     fn entity_class() -> &'static EntityClass {
///         static CLASS: LazyLock<EntityClass> = LazyLock::new(|| {
///             EntityClass::new("Category")
///                 .column(Column::new("id", ColumnKind::Integer))
///                 .column(Column::new("name", ColumnKind::String))
///         });
///         &CLASS
///     }
/// }
///
/// assert_eq!(Category::entity_class().table_name(), "categories");
/// ```
pub trait Entity: 'static {
    /// Returns the static class description for this type.
    fn entity_class() -> &'static EntityClass;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category() -> EntityClass {
        EntityClass::new("Category").columns(vec![
            Column::new("id", ColumnKind::Integer),
            Column::new("name", ColumnKind::String),
            Column::new("description", ColumnKind::Text),
            Column::reference("parent_id", "Category"),
        ])
    }

    #[test]
    fn test_new_splits_module_path() {
        let class = EntityClass::new("Mock::Nested::Resource");
        assert_eq!(class.name(), "Resource");
        assert_eq!(class.module_path(), ["Mock", "Nested"]);
        assert_eq!(class.qualified_name(), "Mock::Nested::Resource");
    }

    #[test]
    fn test_table_name_defaults_to_tableized_name() {
        assert_eq!(category().table_name(), "categories");
        assert_eq!(EntityClass::new("BlogPost").table_name(), "blog_posts");
    }

    #[test]
    fn test_table_name_override() {
        let class = category().table_name_override("taxonomy");
        assert_eq!(class.table_name(), "taxonomy");
        assert_eq!(class.quoted_table_name(), "\"taxonomy\"");
    }

    #[test]
    fn test_quoted_table_name() {
        assert_eq!(category().quoted_table_name(), "\"categories\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_content_columns_skip_pk_and_relations() {
        let class = category();
        let names: Vec<&str> = class
            .content_columns()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["name", "description"]);
        assert_eq!(class.all_columns().len(), 4);
    }

    #[test]
    fn test_custom_primary_key_excluded() {
        let class = EntityClass::new("Tag")
            .primary_key("slug")
            .column(Column::new("slug", ColumnKind::String))
            .column(Column::new("label", ColumnKind::String));
        assert_eq!(class.primary_key_name(), "slug");
        assert_eq!(class.content_columns().len(), 1);
    }

    #[test]
    fn test_key_identity() {
        assert_eq!(EntityClass::new("Mock::Resource").key().as_str(), "Mock::Resource");
        assert_ne!(
            EntityClass::new("Mock::Resource").key(),
            EntityClass::new("Resource").key()
        );
    }

    #[test]
    fn test_validate() {
        assert!(category().validate().is_ok());
        assert!(EntityClass::new("Mock::Resource").validate().is_ok());
        assert!(EntityClass::new("").validate().is_err());
        assert!(EntityClass::new("Mock::").validate().is_err());
        assert!(EntityClass::new("1Thing").validate().is_err());
        assert!(EntityClass::new("Bad Name").validate().is_err());
    }

    #[test]
    fn test_column_reference() {
        let col = Column::reference("author_id", "User");
        assert!(col.is_relation());
        assert_eq!(col.kind, ColumnKind::Reference);
        assert!(!Column::new("title", ColumnKind::String).is_relation());
    }
}

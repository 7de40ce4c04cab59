//! Named scopes for the resource index.
//!
//! A [`Scope`] is a selectable filter narrowing the records a resource lists
//! (e.g. "Published", "Drafts"). Scopes are kept in declaration order by a
//! [`ScopeRegistry`]; identifiers are unique within a resource.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use adminkit_core::utils::text;
use adminkit_core::{AdminError, AdminResult};

/// A collection that can be narrowed by a named scope method.
pub trait ScopedCollection: Sized + 'static {
    /// Applies the scope method called `name`.
    fn named_scope(self, name: &str) -> AdminResult<Self>;
}

/// Serialized records narrow by a truthy field of the same name, the way
/// list filters match serialized objects.
impl ScopedCollection for Vec<serde_json::Value> {
    fn named_scope(self, name: &str) -> AdminResult<Self> {
        Ok(self
            .into_iter()
            .filter(|record| record.get(name).is_some_and(is_truthy))
            .collect())
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i != 0,
            (_, Some(u), _) => u != 0,
            (_, _, Some(f)) => f.abs() > f64::EPSILON,
            _ => false,
        },
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(a) => !a.is_empty(),
        serde_json::Value::Object(_) => true,
    }
}

type ScopeBlock<C> = Box<dyn Fn(C) -> C + Send + Sync>;

/// How a scope narrows its collection.
#[derive(Clone)]
pub enum ScopeFilter {
    /// No narrowing.
    All,
    /// Calls the named scope method on the collection.
    Method(String),
    /// Runs a closure over the collection.
    Block {
        /// The stored `Fn(C) -> C`.
        block: Arc<dyn Any + Send + Sync>,
        /// Name of the collection type the closure accepts.
        collection: &'static str,
    },
}

impl ScopeFilter {
    /// Wraps a closure over collections of type `C`.
    pub fn block<C, F>(f: F) -> Self
    where
        C: ScopedCollection,
        F: Fn(C) -> C + Send + Sync + 'static,
    {
        let boxed: ScopeBlock<C> = Box::new(f);
        Self::Block {
            block: Arc::new(boxed),
            collection: type_name::<C>(),
        }
    }
}

impl fmt::Debug for ScopeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Method(name) => f.debug_tuple("Method").field(name).finish(),
            Self::Block { collection, .. } => f
                .debug_struct("Block")
                .field("collection", collection)
                .finish_non_exhaustive(),
        }
    }
}

impl PartialEq for ScopeFilter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::All, Self::All) => true,
            (Self::Method(a), Self::Method(b)) => a == b,
            (Self::Block { block: a, .. }, Self::Block { block: b, .. }) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Options accepted when declaring a scope.
#[derive(Debug, Clone, Default)]
pub struct ScopeOptions {
    name: Option<String>,
    default: bool,
    filter: Option<ScopeFilter>,
}

impl ScopeOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Marks the scope as selected when none is requested.
    #[must_use]
    pub const fn default_scope(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    /// Uses a scope method other than the scope id.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.filter = Some(ScopeFilter::Method(method.into()));
        self
    }

    /// Filters with a closure instead of a scope method.
    #[must_use]
    pub fn block<C, F>(mut self, f: F) -> Self
    where
        C: ScopedCollection,
        F: Fn(C) -> C + Send + Sync + 'static,
    {
        self.filter = Some(ScopeFilter::block(f));
        self
    }
}

/// A declared scope. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    id: String,
    name: String,
    filter: ScopeFilter,
    default: bool,
}

impl Scope {
    /// Builds a scope from its id and options.
    ///
    /// The display name defaults to the titleized id (`published` ->
    /// `Published`). Without a method or block the scope calls the method
    /// named after its id; the id `all` narrows nothing.
    pub fn new(id: impl Into<String>, options: ScopeOptions) -> Self {
        let id = id.into();
        let name = options.name.unwrap_or_else(|| text::titleize(&id));
        let filter = options.filter.unwrap_or_else(|| {
            if id == "all" {
                ScopeFilter::All
            } else {
                ScopeFilter::Method(id.clone())
            }
        });
        Self {
            id,
            name,
            filter,
            default: options.default,
        }
    }

    /// Returns the identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the filter.
    pub const fn filter(&self) -> &ScopeFilter {
        &self.filter
    }

    /// Returns whether this scope is selected by default.
    pub const fn is_default(&self) -> bool {
        self.default
    }

    /// Narrows `collection` by this scope.
    ///
    /// # Errors
    ///
    /// Propagates errors from the collection's scope method, and returns
    /// [`AdminError::ArgumentError`] when a block was declared for another
    /// collection type.
    pub fn apply<C: ScopedCollection>(&self, collection: C) -> AdminResult<C> {
        match &self.filter {
            ScopeFilter::All => Ok(collection),
            ScopeFilter::Method(method) => collection.named_scope(method),
            ScopeFilter::Block { block, collection: expected } => {
                let block = block.downcast_ref::<ScopeBlock<C>>().ok_or_else(|| {
                    AdminError::ArgumentError(format!(
                        "scope '{}' filters `{expected}`, not `{}`",
                        self.id,
                        type_name::<C>()
                    ))
                })?;
                Ok(block(collection))
            }
        }
    }
}

/// Ordered, id-unique collection of scopes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeRegistry {
    scopes: Vec<Scope>,
}

impl ScopeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a scope, appending it or replacing an existing scope with the
    /// same id in place.
    pub fn add(&mut self, id: impl Into<String>, options: ScopeOptions) -> &Scope {
        let scope = Scope::new(id, options);
        let index = match self.scopes.iter().position(|s| s.id == scope.id) {
            Some(index) => {
                self.scopes[index] = scope;
                index
            }
            None => {
                self.scopes.push(scope);
                self.scopes.len() - 1
            }
        };
        &self.scopes[index]
    }

    /// Looks up a scope by id.
    pub fn get(&self, id: &str) -> Option<&Scope> {
        self.scopes.iter().find(|s| s.id == id)
    }

    /// Returns the first scope flagged as default.
    pub fn default_scope(&self) -> Option<&Scope> {
        self.scopes.iter().find(|s| s.default)
    }

    /// Iterates scopes in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Scope> {
        self.scopes.iter()
    }

    /// Returns the scopes as a slice.
    pub fn as_slice(&self) -> &[Scope] {
        &self.scopes
    }

    /// Returns the number of scopes.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Returns whether no scope is declared.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl<'a> IntoIterator for &'a ScopeRegistry {
    type Item = &'a Scope;
    type IntoIter = std::slice::Iter<'a, Scope>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

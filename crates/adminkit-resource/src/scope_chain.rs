//! Association-chain scoping.
//!
//! A resource's `scope_to` declaration decides where the generated controller
//! starts its query (the "association chain") before any other filtering:
//!
//! - [`ScopeTo::None`]: the entity's default collection.
//! - [`ScopeTo::Block`]: whatever a closure over the controller returns.
//! - [`ScopeTo::Method`]: a closure over the controller yields an owner object
//!   (e.g. the current user); the chain is that owner's association accessor
//!   named by the resource's association method.
//! - [`ScopeTo::Invalid`]: any other declared value. Accepted when declared,
//!   rejected with [`AdminError::ArgumentError`] on first resolution.
//!
//! Closures are stored type-erased so that [`Resource`](crate::resource::Resource)
//! does not carry the controller type. Resolving against a controller type
//! other than the one a closure was declared for is also an argument error.
//! Resolution is recomputed on every call and reads nothing but the stored
//! closure and the controller it is given.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use adminkit_core::{AdminError, AdminResult};

use crate::entity::EntityClass;

/// The per-request controller generated for a resource.
pub trait Controller: Send + Sync + 'static {
    /// The queryable collection type handed out by the persistence layer.
    type Collection: 'static;

    /// Returns the unscoped collection for `entity`.
    fn default_collection(&self, entity: &EntityClass) -> Self::Collection;
}

/// An object exposing collections through named association accessors.
pub trait AssociationOwner<C> {
    /// Returns the collection behind `association`, or `None` when the owner
    /// has no such accessor.
    fn association(&self, association: &str) -> Option<C>;
}

type BlockFn<C> = Box<dyn Fn(&C) -> <C as Controller>::Collection + Send + Sync>;
type MethodFn<C> = Box<dyn Fn(&C, &str) -> AdminResult<<C as Controller>::Collection> + Send + Sync>;

/// A closure stored without its controller type.
#[derive(Clone)]
pub struct ErasedScopeFn {
    inner: Arc<dyn Any + Send + Sync>,
    controller: &'static str,
}

impl ErasedScopeFn {
    fn new<T: Any + Send + Sync>(f: T, controller: &'static str) -> Self {
        Self {
            inner: Arc::new(f),
            controller,
        }
    }

    fn downcast<T: Any>(&self, requested: &'static str) -> AdminResult<&T> {
        self.inner.downcast_ref::<T>().ok_or_else(|| {
            AdminError::ArgumentError(format!(
                "scope_to was declared for controller `{}` but resolved with `{requested}`",
                self.controller
            ))
        })
    }

    /// Returns the name of the controller type the closure was declared for.
    pub const fn controller_type(&self) -> &'static str {
        self.controller
    }
}

impl fmt::Debug for ErasedScopeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedScopeFn")
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

/// A `scope_to` declaration.
///
/// # Examples
///
/// ```
/// use adminkit_resource::entity::EntityClass;
/// use adminkit_resource::scope_chain::{AssociationOwner, Controller, ScopeTo};
///
/// struct User;
///
/// impl AssociationOwner<Vec<String>> for User {
///     fn association(&self, name: &str) -> Option<Vec<String>> {
///         (name == "categories").then(|| vec!["mine".to_string()])
///     }
/// }
///
/// struct CategoriesController;
///
/// impl Controller for CategoriesController {
///     type Collection = Vec<String>;
///     fn default_collection(&self, _: &EntityClass) -> Vec<String> { Vec::new() }
/// }
///
/// let scope = ScopeTo::method("current_user", |_: &CategoriesController| User);
/// let chain = scope
///     .resolve(&CategoriesController, &EntityClass::new("Category"), "categories")
///     .unwrap();
/// assert_eq!(chain, vec!["mine".to_string()]);
/// ```
#[derive(Clone, Default)]
pub enum ScopeTo {
    /// No scoping: the entity's default collection.
    #[default]
    None,
    /// The closure's return value is the chain.
    Block(ErasedScopeFn),
    /// The chain is an association of the owner the closure returns.
    Method {
        /// Name of the controller method the closure stands for.
        method: String,
        /// Association accessor override.
        association_method: Option<String>,
        /// The owner-then-association resolver.
        resolve: ErasedScopeFn,
    },
    /// A value that is neither; rejected when resolved.
    Invalid(serde_json::Value),
}

impl ScopeTo {
    /// Scopes the chain to the closure's return value.
    pub fn block<C, F>(f: F) -> Self
    where
        C: Controller,
        F: Fn(&C) -> C::Collection + Send + Sync + 'static,
    {
        let boxed: BlockFn<C> = Box::new(f);
        Self::Block(ErasedScopeFn::new(boxed, type_name::<C>()))
    }

    /// Scopes the chain to an association of the owner `owner` returns.
    ///
    /// `method` names what the closure stands for (e.g. `current_user`); it
    /// shows up in errors and logs.
    pub fn method<C, O, F>(method: impl Into<String>, owner: F) -> Self
    where
        C: Controller,
        O: AssociationOwner<C::Collection>,
        F: Fn(&C) -> O + Send + Sync + 'static,
    {
        let method = method.into();
        let owner_name = method.clone();
        let resolve: MethodFn<C> = Box::new(move |controller: &C, association: &str| {
            owner(controller)
                .association(association)
                .ok_or_else(|| AdminError::AssociationNotFound {
                    owner: owner_name.clone(),
                    association: association.to_string(),
                })
        });
        Self::Method {
            method,
            association_method: None,
            resolve: ErasedScopeFn::new(resolve, type_name::<C>()),
        }
    }

    /// Overrides the association accessor used by [`ScopeTo::Method`].
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn association_method(self, name: impl Into<String>) -> Self {
        match self {
            Self::Method { method, resolve, .. } => Self::Method {
                method,
                association_method: Some(name.into()),
                resolve,
            },
            other => other,
        }
    }

    /// Records an arbitrary declared value. Resolution will fail.
    pub fn value(value: impl Into<serde_json::Value>) -> Self {
        Self::Invalid(value.into())
    }

    /// Returns the association accessor override, if one was declared.
    pub fn association_method_override(&self) -> Option<&str> {
        match self {
            Self::Method {
                association_method, ..
            } => association_method.as_deref(),
            _ => None,
        }
    }

    /// Returns whether any scoping was declared.
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Resolves the association chain for one request.
    ///
    /// `association` is the accessor used by the method strategy.
    ///
    /// # Errors
    ///
    /// [`AdminError::ArgumentError`] for an invalid declaration or a
    /// controller type mismatch; [`AdminError::AssociationNotFound`] when the
    /// owner lacks the accessor.
    pub fn resolve<C: Controller>(
        &self,
        controller: &C,
        entity: &EntityClass,
        association: &str,
    ) -> AdminResult<C::Collection> {
        match self {
            Self::None => Ok(controller.default_collection(entity)),
            Self::Block(f) => {
                let block = f.downcast::<BlockFn<C>>(type_name::<C>())?;
                Ok(block(controller))
            }
            Self::Method { resolve, method, .. } => {
                let resolve = resolve.downcast::<MethodFn<C>>(type_name::<C>())?;
                tracing::trace!(method = %method, association, "resolving association chain");
                resolve(controller, association)
            }
            Self::Invalid(value) => {
                tracing::warn!(
                    entity = %entity.qualified_name(),
                    value = %value,
                    "scope_to value is neither a closure nor a method"
                );
                Err(AdminError::ArgumentError(format!(
                    "scope_to for {} expects a closure or a method, got {value}",
                    entity.qualified_name()
                )))
            }
        }
    }
}

impl From<serde_json::Value> for ScopeTo {
    fn from(value: serde_json::Value) -> Self {
        Self::Invalid(value)
    }
}

impl fmt::Debug for ScopeTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Block(erased) => f.debug_tuple("Block").field(erased).finish(),
            Self::Method {
                method,
                association_method,
                ..
            } => f
                .debug_struct("Method")
                .field("method", method)
                .field("association_method", association_method)
                .finish_non_exhaustive(),
            Self::Invalid(value) => f.debug_tuple("Invalid").field(value).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TestController {
        user_calls: AtomicUsize,
        tenant: &'static str,
    }

    impl TestController {
        fn new(tenant: &'static str) -> Self {
            Self {
                user_calls: AtomicUsize::new(0),
                tenant,
            }
        }

        fn current_user(&self) -> TestUser {
            self.user_calls.fetch_add(1, Ordering::SeqCst);
            TestUser {
                tenant: self.tenant,
            }
        }
    }

    impl Controller for TestController {
        type Collection = String;

        fn default_collection(&self, entity: &EntityClass) -> String {
            format!("all {}", entity.table_name())
        }
    }

    struct TestUser {
        tenant: &'static str,
    }

    impl AssociationOwner<String> for TestUser {
        fn association(&self, association: &str) -> Option<String> {
            match association {
                "categories" | "blog_categories" => Some(format!("{}.{association}", self.tenant)),
                _ => None,
            }
        }
    }

    struct OtherController;

    impl Controller for OtherController {
        type Collection = String;

        fn default_collection(&self, _: &EntityClass) -> String {
            String::new()
        }
    }

    fn category() -> EntityClass {
        EntityClass::new("Category")
    }

    #[test]
    fn test_none_uses_default_collection() {
        let chain = ScopeTo::None
            .resolve(&TestController::new("acme"), &category(), "categories")
            .unwrap();
        assert_eq!(chain, "all categories");
    }

    #[test]
    fn test_block_returns_block_value() {
        let scope = ScopeTo::block(|_: &TestController| "scoped".to_string());
        let chain = scope
            .resolve(&TestController::new("acme"), &category(), "categories")
            .unwrap();
        assert_eq!(chain, "scoped");
    }

    #[test]
    fn test_block_sees_controller_state() {
        let scope = ScopeTo::block(|c: &TestController| c.tenant.to_string());
        let chain = scope
            .resolve(&TestController::new("globex"), &category(), "categories")
            .unwrap();
        assert_eq!(chain, "globex");
    }

    #[test]
    fn test_method_calls_owner_then_association() {
        let scope = ScopeTo::method("current_user", TestController::current_user);
        let controller = TestController::new("acme");
        let chain = scope.resolve(&controller, &category(), "categories").unwrap();
        assert_eq!(chain, "acme.categories");
        assert_eq!(controller.user_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_method_is_reevaluated_per_call() {
        let scope = ScopeTo::method("current_user", TestController::current_user);
        let controller = TestController::new("acme");
        scope.resolve(&controller, &category(), "categories").unwrap();
        scope.resolve(&controller, &category(), "categories").unwrap();
        assert_eq!(controller.user_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_method_missing_association() {
        let scope = ScopeTo::method("current_user", TestController::current_user);
        let err = scope
            .resolve(&TestController::new("acme"), &category(), "posts")
            .unwrap_err();
        assert!(matches!(
            err,
            AdminError::AssociationNotFound { ref owner, ref association }
                if owner == "current_user" && association == "posts"
        ));
    }

    #[test]
    fn test_association_method_override() {
        let scope = ScopeTo::method("current_user", TestController::current_user)
            .association_method("blog_categories");
        assert_eq!(scope.association_method_override(), Some("blog_categories"));
        assert!(ScopeTo::None
            .association_method("ignored")
            .association_method_override()
            .is_none());
    }

    #[test]
    fn test_invalid_value_fails_on_resolve() {
        let scope = ScopeTo::value("Some string");
        let err = scope
            .resolve(&TestController::new("acme"), &category(), "categories")
            .unwrap_err();
        assert!(matches!(err, AdminError::ArgumentError(_)));
        assert!(err.to_string().contains("Some string"));
    }

    #[test]
    fn test_controller_mismatch_is_argument_error() {
        let scope = ScopeTo::block(|_: &TestController| "scoped".to_string());
        let err = scope
            .resolve(&OtherController, &category(), "categories")
            .unwrap_err();
        assert!(matches!(err, AdminError::ArgumentError(_)));
        assert!(err.to_string().contains("TestController"));
    }

    #[test]
    fn test_debug_output() {
        let scope = ScopeTo::method("current_user", TestController::current_user);
        let debug = format!("{scope:?}");
        assert!(debug.contains("current_user"));
        assert_eq!(format!("{:?}", ScopeTo::None), "None");
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScopeTo>();
    }
}

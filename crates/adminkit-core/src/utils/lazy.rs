//! Lazy initialization primitive.
//!
//! [`LazyObject`] defers the creation of a value until it is first accessed.
//! The value is computed once and then cached, unless an explicit value is
//! assigned first, in which case the factory never runs.

use std::ops::Deref;
use std::sync::OnceLock;

/// A lazily-initialized wrapper that creates its value on first access.
///
/// The factory function is called at most once. Subsequent accesses return
/// a reference to the cached value. Assigning a value with
/// [`set`](LazyObject::set) replaces whatever is cached and stops the factory
/// from ever being consulted. `LazyObject` is `Send + Sync` as long as the
/// contained value is.
///
/// # Examples
///
/// ```
/// use adminkit_core::utils::LazyObject;
///
/// let mut lazy = LazyObject::new(|| vec!["id", "title"]);
/// assert_eq!(lazy.len(), 2);
///
/// lazy.set(vec!["id"]);
/// assert_eq!(*lazy, vec!["id"]);
/// ```
pub struct LazyObject<T> {
    init: OnceLock<T>,
    factory: Box<dyn Fn() -> T + Send + Sync>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for LazyObject<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.init.get() {
            Some(value) => f.debug_tuple("LazyObject").field(value).finish(),
            None => f
                .debug_tuple("LazyObject")
                .field(&"<uninitialized>")
                .finish(),
        }
    }
}

impl<T> LazyObject<T> {
    /// Creates a new `LazyObject` with the given factory function.
    ///
    /// The factory is not called until the value is first accessed.
    pub fn new(factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            init: OnceLock::new(),
            factory: Box::new(factory),
        }
    }

    /// Returns a reference to the initialized value, calling the factory if necessary.
    pub fn get(&self) -> &T {
        self.init.get_or_init(&self.factory)
    }

    /// Replaces the value. The factory is never called after this.
    pub fn set(&mut self, value: T) {
        self.init = OnceLock::from(value);
    }

    /// Returns `true` if the value has been initialized or assigned.
    pub fn is_initialized(&self) -> bool {
        self.init.get().is_some()
    }
}

impl<T> Deref for LazyObject<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.get()
    }
}

//! Menu placement.
//!
//! [`MenuConfig`] holds a resource's menu options (label, parent, priority,
//! visibility predicate) and whether it was hidden with `menu(false)`.
//! [`Menu`] is the navigation tree a namespace builds from its resources.

use std::fmt;
use std::sync::Arc;

/// Priority given to menu items that do not set one.
pub const DEFAULT_MENU_PRIORITY: i32 = 10;

/// A zero-argument predicate deciding whether a menu item is shown.
///
/// Closures `Fn() -> bool` implement it directly.
pub trait DisplayPredicate: Send + Sync {
    /// Evaluates the predicate.
    fn evaluate(&self) -> bool;
}

/// The default predicate: always displayed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysDisplay;

impl DisplayPredicate for AlwaysDisplay {
    fn evaluate(&self) -> bool {
        true
    }
}

impl<F> DisplayPredicate for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn evaluate(&self) -> bool {
        self()
    }
}

/// Options accepted by `menu(...)`. Unset fields leave the current value alone.
///
/// # Examples
///
/// ```
/// use adminkit_resource::menu::MenuOptions;
///
/// let options = MenuOptions::new()
///     .label("Taxonomy")
///     .parent("Blog")
///     .priority(2)
///     .display_if(|| false);
/// ```
#[derive(Clone, Default)]
pub struct MenuOptions {
    label: Option<String>,
    parent: Option<String>,
    priority: Option<i32>,
    display_if: Option<Arc<dyn DisplayPredicate>>,
}

impl MenuOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the menu label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Nests the item under the parent item with this label.
    #[must_use]
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Sets the sort priority (lower sorts first).
    #[must_use]
    pub const fn priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the visibility predicate.
    #[must_use]
    pub fn display_if(mut self, predicate: impl DisplayPredicate + 'static) -> Self {
        self.display_if = Some(Arc::new(predicate));
        self
    }
}

impl fmt::Debug for MenuOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuOptions")
            .field("label", &self.label)
            .field("parent", &self.parent)
            .field("priority", &self.priority)
            .field("display_if", &self.display_if.as_ref().map(|_| "<predicate>"))
            .finish()
    }
}

/// A `menu(...)` declaration: either options to merge or a visibility switch.
///
/// `menu(false)` converts to [`MenuDirective::Hide`].
#[derive(Debug, Clone)]
pub enum MenuDirective {
    /// Merge these options.
    Options(MenuOptions),
    /// Remove the resource from the menu.
    Hide,
    /// Put the resource back in the menu.
    Show,
}

impl From<MenuOptions> for MenuDirective {
    fn from(options: MenuOptions) -> Self {
        Self::Options(options)
    }
}

impl From<bool> for MenuDirective {
    fn from(display: bool) -> Self {
        if display {
            Self::Show
        } else {
            Self::Hide
        }
    }
}

/// The resolved menu settings of one resource.
#[derive(Debug, Clone)]
pub struct MenuConfig {
    options: MenuOptions,
    display: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            options: MenuOptions::default(),
            display: true,
        }
    }
}

impl MenuConfig {
    /// Applies a directive; set fields overwrite earlier values.
    pub fn apply(&mut self, directive: MenuDirective) {
        match directive {
            MenuDirective::Hide => self.display = false,
            MenuDirective::Show => self.display = true,
            MenuDirective::Options(options) => {
                if options.label.is_some() {
                    self.options.label = options.label;
                }
                if options.parent.is_some() {
                    self.options.parent = options.parent;
                }
                if options.priority.is_some() {
                    self.options.priority = options.priority;
                }
                if options.display_if.is_some() {
                    self.options.display_if = options.display_if;
                }
            }
        }
    }

    /// Returns the explicit label, if any.
    pub fn label(&self) -> Option<&str> {
        self.options.label.as_deref()
    }

    /// Returns the parent item label, if any.
    pub fn parent(&self) -> Option<&str> {
        self.options.parent.as_deref()
    }

    /// Returns the priority, [`DEFAULT_MENU_PRIORITY`] when unset.
    pub fn priority(&self) -> i32 {
        self.options.priority.unwrap_or(DEFAULT_MENU_PRIORITY)
    }

    /// Returns the visibility predicate, [`AlwaysDisplay`] when unset.
    pub fn display_if(&self) -> Arc<dyn DisplayPredicate> {
        self.options
            .display_if
            .clone()
            .unwrap_or_else(|| Arc::new(AlwaysDisplay))
    }

    /// Returns `false` after `menu(false)`.
    pub const fn is_displayed(&self) -> bool {
        self.display
    }
}

/// One entry of the navigation tree.
#[derive(Clone)]
pub struct MenuItem {
    /// The text shown for the entry.
    pub label: String,
    /// Sort priority among siblings.
    pub priority: i32,
    /// Route helper of the resource, absent for pure grouping items.
    pub url: Option<String>,
    /// Nested entries.
    pub children: Vec<MenuItem>,
    display_if: Arc<dyn DisplayPredicate>,
}

impl MenuItem {
    /// Creates an item pointing at `url`.
    pub fn new(
        label: impl Into<String>,
        priority: i32,
        url: Option<String>,
        display_if: Arc<dyn DisplayPredicate>,
    ) -> Self {
        Self {
            label: label.into(),
            priority,
            url,
            children: Vec::new(),
            display_if,
        }
    }

    /// Creates a grouping item with no route of its own.
    pub fn group(label: impl Into<String>) -> Self {
        Self::new(label, DEFAULT_MENU_PRIORITY, None, Arc::new(AlwaysDisplay))
    }

    /// Evaluates the item's visibility predicate.
    pub fn is_displayed(&self) -> bool {
        self.display_if.evaluate()
    }

    /// Finds a direct child by label.
    pub fn child(&self, label: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.label == label)
    }

    fn sort(&mut self) {
        sort_items(&mut self.children);
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .field("priority", &self.priority)
            .field("url", &self.url)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

fn sort_items(items: &mut [MenuItem]) {
    items.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.label.cmp(&b.label)));
    for item in items {
        item.sort();
    }
}

/// The navigation tree of a namespace.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use adminkit_resource::menu::{AlwaysDisplay, Menu, MenuItem};
///
/// let mut menu = Menu::new();
/// menu.add(None, MenuItem::new("Posts", 10, Some("admin_posts_path".into()), Arc::new(AlwaysDisplay)));
/// menu.add(Some("Blog"), MenuItem::new("Categories", 10, None, Arc::new(AlwaysDisplay)));
/// menu.sort();
///
/// assert_eq!(menu.items().len(), 2);
/// assert!(menu.find("Blog").unwrap().child("Categories").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    /// Creates an empty menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item at the top level or under `parent`, creating the parent
    /// as a grouping item when no top-level item has that label yet.
    ///
    /// A top-level item whose label matches an earlier grouping item takes
    /// that group's place and keeps its children, so the tree does not depend
    /// on registration order.
    pub fn add(&mut self, parent: Option<&str>, item: MenuItem) {
        let Some(parent) = parent else {
            match self
                .items
                .iter_mut()
                .find(|i| i.label == item.label && i.url.is_none())
            {
                Some(group) => {
                    let children = std::mem::take(&mut group.children);
                    *group = item;
                    group.children.extend(children);
                }
                None => self.items.push(item),
            }
            return;
        };
        if let Some(existing) = self.items.iter_mut().find(|i| i.label == parent) {
            existing.children.push(item);
        } else {
            let mut group = MenuItem::group(parent);
            group.children.push(item);
            self.items.push(group);
        }
    }

    /// Sorts every level by priority, then label.
    pub fn sort(&mut self) {
        sort_items(&mut self.items);
    }

    /// Returns the top-level items.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Finds a top-level item by label.
    pub fn find(&self, label: &str) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.label == label)
    }

    /// Returns whether the menu has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

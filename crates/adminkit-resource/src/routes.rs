//! Route naming.
//!
//! Computes the controller name and route helper names the routing
//! collaborator expects for a resource. Nothing here registers routes.

use adminkit_core::utils::text;
use serde::Serialize;

use crate::naming::ResourceNaming;

/// Returns the fully qualified controller name.
///
/// `Admin::CategoriesController` with a prefix, `CategoriesController` without.
pub fn controller_name(prefix: Option<&str>, naming: &ResourceNaming) -> String {
    prefix.map_or_else(
        || format!("{}Controller", naming.plural_camelized),
        |p| format!("{}::{}Controller", text::camelize(p), naming.plural_camelized),
    )
}

/// Returns the collection route helper (`admin_categories_path`).
pub fn route_collection_path(prefix: Option<&str>, naming: &ResourceNaming) -> String {
    helper_name(prefix, &naming.plural_underscored)
}

/// Returns the member route helper (`admin_category_path`).
pub fn route_instance_path(prefix: Option<&str>, naming: &ResourceNaming) -> String {
    helper_name(prefix, &naming.underscored)
}

fn helper_name(prefix: Option<&str>, token: &str) -> String {
    prefix.map_or_else(
        || format!("{token}_path"),
        |p| format!("{p}_{token}_path"),
    )
}

/// The route metadata of one resource, as handed to the routing collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    /// The controller serving the resource.
    pub controller_name: String,
    /// The routing prefix, absent for unprefixed resources.
    pub route_prefix: Option<String>,
    /// Helper name for the collection route.
    pub route_collection_path: String,
    /// Helper name for the member route.
    pub route_instance_path: String,
}

impl RouteDescriptor {
    /// Builds the descriptor for a resource under `prefix`.
    pub fn new(prefix: Option<&str>, naming: &ResourceNaming) -> Self {
        Self {
            controller_name: controller_name(prefix, naming),
            route_prefix: prefix.map(str::to_string),
            route_collection_path: route_collection_path(prefix, naming),
            route_instance_path: route_instance_path(prefix, naming),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityClass;

    fn naming(class: &str, as_name: Option<&str>) -> ResourceNaming {
        ResourceNaming::resolve(&EntityClass::new(class), as_name).unwrap()
    }

    #[test]
    fn test_controller_name_prefixed() {
        assert_eq!(
            controller_name(Some("admin"), &naming("Category", None)),
            "Admin::CategoriesController"
        );
    }

    #[test]
    fn test_controller_name_unprefixed() {
        assert_eq!(
            controller_name(None, &naming("Category", None)),
            "CategoriesController"
        );
    }

    #[test]
    fn test_controller_name_with_override() {
        assert_eq!(
            controller_name(Some("admin"), &naming("Category", Some("Blog Categories"))),
            "Admin::BlogCategoriesController"
        );
    }

    #[test]
    fn test_route_collection_path() {
        let n = naming("Category", None);
        assert_eq!(route_collection_path(Some("admin"), &n), "admin_categories_path");
        assert_eq!(route_collection_path(None, &n), "categories_path");
    }

    #[test]
    fn test_route_instance_path() {
        let n = naming("Mock::Resource", None);
        assert_eq!(route_instance_path(Some("admin"), &n), "admin_mock_resource_path");
        assert_eq!(route_instance_path(None, &n), "mock_resource_path");
    }

    #[test]
    fn test_descriptor() {
        let d = RouteDescriptor::new(Some("admin"), &naming("Post", None));
        assert_eq!(d.controller_name, "Admin::PostsController");
        assert_eq!(d.route_prefix.as_deref(), Some("admin"));
        assert_eq!(d.route_collection_path, "admin_posts_path");
        assert_eq!(d.route_instance_path, "admin_post_path");

        let d = RouteDescriptor::new(None, &naming("Post", None));
        assert!(d.route_prefix.is_none());
    }
}

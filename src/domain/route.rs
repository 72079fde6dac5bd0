//! Site routes produced by navigation actions.

use super::{Category, PostId};
use std::fmt;

/// A page of the storefront the host should navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// Post detail page.
    Post(PostId),
    /// Full search results page carrying the (trimmed) query.
    Search(String),
    Category(Category),
    /// Any other site path, used by the auth gate redirects.
    Path(String),
}

impl Route {
    /// Renders the route as a site-relative path with an encoded query string.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Post(id) => format!("/post/{}", urlencoding::encode(id.as_str())),
            Self::Search(query) => format!("/search?q={}", urlencoding::encode(query)),
            Self::Category(category) => category.route_path(),
            Self::Path(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_route_encodes_query() {
        let route = Route::Search("red shoes & caps".into());
        assert_eq!(route.path(), "/search?q=red%20shoes%20%26%20caps");
    }

    #[test]
    fn post_and_category_paths() {
        assert_eq!(Route::Post(PostId::new("abc123")).path(), "/post/abc123");
        assert_eq!(Route::Category(Category::Watches).path(), "/category/lifestyle/watches");
        assert_eq!(Route::Home.to_string(), "/");
    }
}

//! Fixed set of storefront categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category a post belongs to.
///
/// The lifestyle subcategories are categories of their own on the backend but
/// live under `/category/lifestyle/` in the site's routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Shirts,
    Pants,
    Shoes,
    Electronics,
    Kitchen,
    BabyProducts,
    Bracelets,
    Caps,
    Glasses,
    Jewelry,
    Watches,
}

impl Category {
    /// Every category, in navigation order.
    pub const ALL: [Self; 11] = [
        Self::Shirts,
        Self::Pants,
        Self::Shoes,
        Self::Electronics,
        Self::Kitchen,
        Self::BabyProducts,
        Self::Bracelets,
        Self::Caps,
        Self::Glasses,
        Self::Jewelry,
        Self::Watches,
    ];

    /// Backend slug, as used in query strings and URLs.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Shirts => "shirts",
            Self::Pants => "pants",
            Self::Shoes => "shoes",
            Self::Electronics => "electronics",
            Self::Kitchen => "kitchen",
            Self::BabyProducts => "baby-products",
            Self::Bracelets => "bracelets",
            Self::Caps => "caps",
            Self::Glasses => "glasses",
            Self::Jewelry => "jewelry",
            Self::Watches => "watches",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shirts => "Shirts",
            Self::Pants => "Pants",
            Self::Shoes => "Shoes",
            Self::Electronics => "Electronics",
            Self::Kitchen => "Kitchen",
            Self::BabyProducts => "Baby Products",
            Self::Bracelets => "Bracelets",
            Self::Caps => "Caps",
            Self::Glasses => "Glasses",
            Self::Jewelry => "Jewelry",
            Self::Watches => "Watches",
        }
    }

    /// Whether the category sits under the lifestyle dropdown.
    #[must_use]
    pub const fn is_lifestyle(self) -> bool {
        matches!(
            self,
            Self::Bracelets | Self::Caps | Self::Glasses | Self::Jewelry | Self::Watches
        )
    }

    /// Site path of the category page.
    #[must_use]
    pub fn route_path(self) -> String {
        if self.is_lifestyle() {
            format!("/category/lifestyle/{}", self.slug())
        } else {
            format!("/category/{}", self.slug())
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifestyle_categories_nest_their_route() {
        assert_eq!(Category::Bracelets.route_path(), "/category/lifestyle/bracelets");
        assert_eq!(Category::BabyProducts.route_path(), "/category/baby-products");
    }

    #[test]
    fn slug_round_trips_through_from_str_and_serde() {
        for category in Category::ALL {
            assert_eq!(category.slug().parse::<Category>(), Ok(category));
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.slug()));
        }
        assert!("hats".parse::<Category>().is_err());
    }
}

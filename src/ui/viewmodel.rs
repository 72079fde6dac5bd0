//! View model types representing renderable page state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) by
//! `compute_viewmodel` and consumed by the renderer. They contain only
//! display-ready data: formatted dates, highlight segments and routes.

use super::highlight::Segment;
use super::share::ShareLinks;
use crate::domain::{Category, PostId, Route, SearchResult};

/// Everything the page shell renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageViewModel {
    pub nav: NavView,
    pub search: SearchPanelView,
    /// Present while a post detail page is open.
    pub post: Option<PostPageView>,
    /// Newsletter status line, if any.
    pub newsletter_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavView {
    pub menu_open: bool,
    pub mobile_search_open: bool,
    pub lifestyle_open: bool,
    /// Links shown in the lifestyle dropdown, as `(label, path)`.
    pub lifestyle_links: Vec<(String, String)>,
}

/// Live search dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPanelView {
    Hidden,
    Loading,
    Results {
        items: Vec<ResultItem>,
        view_all: Route,
    },
    NoResults {
        message: String,
    },
}

/// One row of the live search dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    pub id: PostId,
    pub title: Vec<Segment>,
    pub category: String,
    /// Short date, e.g. `Mar 5`.
    pub date: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostPageView {
    Loading,
    NotFound,
    Unavailable { message: String },
    Loaded(Box<PostBody>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBody {
    pub id: PostId,
    pub title: String,
    pub category: String,
    pub author: String,
    /// Long date, e.g. `March 5, 2024`.
    pub date: String,
    pub views: u64,
    /// Always the length of `comments`.
    pub comment_count: usize,
    pub content: String,
    pub image_url: Option<String>,
    pub related: Vec<RelatedItem>,
    pub comments: Vec<CommentItem>,
    pub submit_enabled: bool,
    pub share: ShareLinks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedItem {
    pub id: PostId,
    pub title: String,
    pub route: Route,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentItem {
    pub name: String,
    pub date: String,
    pub body: String,
}

/// Listing page for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPageView {
    pub heading: String,
    pub posts: Vec<SearchResult>,
    pub empty_message: Option<String>,
}

impl CategoryPageView {
    /// Keeps the posts of `category` from a mixed feed, in feed order.
    #[must_use]
    pub fn build(category: Category, feed: &[SearchResult]) -> Self {
        let posts: Vec<SearchResult> = feed
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect();
        let empty_message = posts
            .is_empty()
            .then(|| format!("No {} posts available.", category.label().to_lowercase()));

        Self {
            heading: format!("{} News", category.label()),
            posts,
            empty_message,
        }
    }
}

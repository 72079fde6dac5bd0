//! Backend abstraction over the storefront REST endpoints.
//!
//! [`Backend`] is the seam between the worker and the outside world. The
//! production implementation is [`HttpBackend`](super::HttpBackend); tests
//! substitute in-memory fakes.

use crate::domain::{Category, Comment, CommentDraft, Post, PostId, Result, SearchResult};
use async_trait::async_trait;
use serde::Deserialize;

/// Query parameters accepted by `GET /api/posts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub search: Option<String>,
    pub category: Option<Category>,
    pub limit: Option<usize>,
    pub exclude: Option<PostId>,
}

impl PostQuery {
    /// Free-text search capped at `limit` results.
    pub fn search(query: impl Into<String>, limit: usize) -> Self {
        Self {
            search: Some(query.into()),
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Every post in one category, for the listing pages.
    #[must_use]
    pub fn in_category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    /// Posts sharing `category`, excluding the post currently shown.
    #[must_use]
    pub fn related(category: Category, exclude: PostId, limit: usize) -> Self {
        Self {
            category: Some(category),
            exclude: Some(exclude),
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Query string pairs in the order the site has always sent them.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category {
            pairs.push(("category", category.slug().to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(exclude) = &self.exclude {
            pairs.push(("exclude", exclude.to_string()));
        }
        pairs
    }
}

/// Operations the storefront consumes from its backend.
///
/// Every call is a single attempt; callers bound them with a timeout.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /api/posts/{id}`. A 404 yields `Ok(None)`.
    async fn fetch_post(&self, id: &PostId) -> Result<Option<Post>>;

    /// `POST /api/posts/{id}/view`. The response body is ignored.
    async fn record_view(&self, id: &PostId) -> Result<()>;

    /// `GET /api/posts?...`, unwrapping the `{ posts }` envelope.
    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<SearchResult>>;

    /// `GET /api/posts/{id}/comments`, unwrapping the `{ comments }` envelope.
    async fn fetch_comments(&self, id: &PostId) -> Result<Vec<Comment>>;

    /// `POST /api/posts/{id}/comments` with `{name, email, comment}`.
    async fn create_comment(&self, id: &PostId, draft: &CommentDraft) -> Result<Comment>;

    /// `POST /api/subscribe` with `{email}`. Returns the optional server message.
    async fn subscribe(&self, email: &str) -> Result<Option<String>>;
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostsEnvelope {
    #[serde(default)]
    pub posts: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentsEnvelope {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Error or informational body returned by mutating endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MessageBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.error.or(self.message).filter(|m| !m.trim().is_empty())
    }
}

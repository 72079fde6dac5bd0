//! Post, comment and search result models.
//!
//! These types mirror the JSON documents served by the storefront backend.
//! Field names on the wire are camelCase and the identifier is `_id`; the
//! serde attributes below keep the Rust side idiomatic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;

/// Opaque backend identifier of a post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Wraps a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A publishable content item with engagement metrics.
///
/// `views` is incremented server-side by the view tracking endpoint and
/// `comment_count` mirrors the size of the comment collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: PostId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub author: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub comment_count: u64,
}

impl Post {
    /// Projects the post down to the fields shown in result lists.
    #[must_use]
    pub fn summary(&self) -> SearchResult {
        SearchResult {
            id: self.id.clone(),
            title: self.title.clone(),
            category: self.category,
            image_url: self.image_url.clone(),
            created_at: self.created_at,
        }
    }
}

/// Projection of a [`Post`] returned by list and search endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(rename = "_id")]
    pub id: PostId,
    pub title: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A reader comment attached to a post. Never edited or deleted client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub post_id: PostId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "comment")]
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Field of the comment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Email,
    Body,
}

/// Transient comment form state.
///
/// Serializes to the create-comment request body `{name, email, comment}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommentDraft {
    pub name: String,
    pub email: String,
    #[serde(rename = "comment")]
    pub body: String,
}

impl CommentDraft {
    /// Replaces one field of the draft.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Name => self.name = value,
            DraftField::Email => self.email = value,
            DraftField::Body => self.body = value,
        }
    }

    /// Returns the fields that are empty after trimming, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<DraftField> {
        [
            (DraftField::Name, &self.name),
            (DraftField::Email, &self.email),
            (DraftField::Body, &self.body),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Resets every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_deserializes_backend_document() {
        let json = r#"{
            "_id": "65f1",
            "title": "New Shoes",
            "content": "Fresh drops",
            "category": "shoes",
            "imageUrl": "https://res.cloudinary.com/x.png",
            "author": "Dana",
            "createdAt": "2024-03-05T10:00:00Z",
            "views": 12,
            "commentCount": 2
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id.as_str(), "65f1");
        assert_eq!(post.category, Category::Shoes);
        assert_eq!(post.views, 12);
        assert_eq!(post.summary().title, "New Shoes");
    }

    #[test]
    fn missing_counters_default_to_zero() {
        let json = r#"{"_id":"1","title":"t","category":"caps","createdAt":"2024-01-01T00:00:00Z"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.views, 0);
        assert_eq!(post.comment_count, 0);
        assert!(post.image_url.is_none());
    }

    #[test]
    fn draft_serializes_as_request_body() {
        let draft = CommentDraft {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            body: "Nice".into(),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "Ana", "email": "ana@example.com", "comment": "Nice"})
        );
    }

    #[test]
    fn whitespace_fields_count_as_missing() {
        let mut draft = CommentDraft::default();
        draft.set(DraftField::Name, "Ana");
        draft.set(DraftField::Email, "   ");
        assert_eq!(draft.missing_fields(), vec![DraftField::Email, DraftField::Body]);

        draft.clear();
        assert_eq!(draft, CommentDraft::default());
    }
}

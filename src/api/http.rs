//! `reqwest`-based implementation of [`Backend`].

use super::backend::{Backend, CommentsEnvelope, MessageBody, PostQuery, PostsEnvelope};
use crate::domain::{Comment, CommentDraft, Post, PostId, Result, SearchResult, ShopError};
use crate::observability::TraceContext;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

/// HTTP client for the storefront API rooted at a base URL.
///
/// Every request carries a W3C `traceparent` header when an OpenTelemetry span
/// context is active, so backend traces join the client's.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Creates a backend for `base_url` (e.g. `http://localhost:3000`).
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::Config`] if the URL does not parse or cannot be a base.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a backend reusing an existing `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::Config`] if the URL does not parse or cannot be a base.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| ShopError::Config(format!("invalid base url {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ShopError::Config(format!("base url cannot be a base: {base_url}")));
        }
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ShopError::Config(format!("invalid request path {path:?}: {e}")))
    }

    fn post_path(id: &PostId, suffix: &str) -> String {
        format!("api/posts/{}{suffix}", urlencoding::encode(id.as_str()))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = match TraceContext::from_current() {
            Some(ctx) => request.header("traceparent", ctx.traceparent()),
            None => request,
        };
        request.send().await.map_err(ShopError::from)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ShopError::Decode(e.to_string()))
    }

    async fn failure(response: Response) -> ShopError {
        let status = response.status().as_u16();
        let message = match response.text().await {
            Ok(text) => serde_json::from_str::<MessageBody>(&text)
                .ok()
                .and_then(MessageBody::into_message),
            Err(_) => None,
        };
        ShopError::Server { status, message }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_post(&self, id: &PostId) -> Result<Option<Post>> {
        let url = self.url(&Self::post_path(id, ""))?;
        tracing::debug!(post_id = %id, "fetching post");

        let response = self.send(self.client.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        Self::decode(response).await.map(Some)
    }

    async fn record_view(&self, id: &PostId) -> Result<()> {
        let url = self.url(&Self::post_path(id, "/view"))?;
        let response = self.send(self.client.post(url)).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::failure(response).await)
        }
    }

    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<SearchResult>> {
        let url = self.url("api/posts")?;
        let response = self
            .send(self.client.get(url).query(&query.to_pairs()))
            .await?;
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        let envelope: PostsEnvelope = Self::decode(response).await?;
        Ok(envelope.posts)
    }

    async fn fetch_comments(&self, id: &PostId) -> Result<Vec<Comment>> {
        let url = self.url(&Self::post_path(id, "/comments"))?;
        let response = self.send(self.client.get(url)).await?;
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        let envelope: CommentsEnvelope = Self::decode(response).await?;
        Ok(envelope.comments)
    }

    async fn create_comment(&self, id: &PostId, draft: &CommentDraft) -> Result<Comment> {
        let url = self.url(&Self::post_path(id, "/comments"))?;
        let response = self.send(self.client.post(url).json(draft)).await?;
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        Self::decode(response).await
    }

    async fn subscribe(&self, email: &str) -> Result<Option<String>> {
        let url = self.url("api/subscribe")?;
        let body = serde_json::json!({ "email": email });
        let response = self.send(self.client.post(url).json(&body)).await?;
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        let text = response.text().await.unwrap_or_default();
        Ok(serde_json::from_str::<MessageBody>(&text)
            .ok()
            .and_then(MessageBody::into_message))
    }
}

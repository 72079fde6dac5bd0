//! In-memory backend shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use shopnow::api::{Backend, PostQuery};
use shopnow::domain::{Category, Comment, CommentDraft, Post, PostId, SearchResult};
use shopnow::{Config, Result, ShopError};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchPost(String),
    RecordView(String),
    ListPosts(PostQuery),
    FetchComments(String),
    CreateComment(String),
    Subscribe(String),
}

#[derive(Default)]
pub struct FakeBackend {
    posts: Mutex<HashMap<PostId, Post>>,
    comments: Mutex<HashMap<PostId, Vec<Comment>>>,
    search_delays: Mutex<HashMap<String, Duration>>,
    latency: Mutex<Duration>,
    comment_error: Mutex<Option<ShopError>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let backend = Self::default();
        {
            let mut map = backend.posts.lock().unwrap();
            for post in posts {
                map.insert(post.id.clone(), post);
            }
        }
        backend
    }

    /// Delay applied to every call.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    /// Extra delay for searches of exactly `query`.
    pub fn delay_search(&self, query: &str, delay: Duration) {
        self.search_delays.lock().unwrap().insert(query.to_string(), delay);
    }

    pub fn fail_comments_with(&self, error: ShopError) {
        *self.comment_error.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matches(c)).count()
    }

    pub fn views(&self, id: &str) -> u64 {
        self.posts
            .lock()
            .unwrap()
            .get(&PostId::new(id))
            .map_or(0, |p| p.views)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn wait(&self, extra: Duration) {
        let latency = *self.latency.lock().unwrap();
        let total = latency + extra;
        if !total.is_zero() {
            tokio::time::sleep(total).await;
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn fetch_post(&self, id: &PostId) -> Result<Option<Post>> {
        self.record(Call::FetchPost(id.to_string()));
        self.wait(Duration::ZERO).await;
        Ok(self.posts.lock().unwrap().get(id).cloned())
    }

    async fn record_view(&self, id: &PostId) -> Result<()> {
        self.record(Call::RecordView(id.to_string()));
        self.wait(Duration::ZERO).await;
        match self.posts.lock().unwrap().get_mut(id) {
            Some(post) => {
                post.views += 1;
                Ok(())
            }
            None => Err(ShopError::NotFound(id.to_string())),
        }
    }

    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<SearchResult>> {
        self.record(Call::ListPosts(query.clone()));
        let extra = query
            .search
            .as_ref()
            .and_then(|q| self.search_delays.lock().unwrap().get(q).copied())
            .unwrap_or_default();
        self.wait(extra).await;

        let posts = self.posts.lock().unwrap();
        let mut found: Vec<SearchResult> = posts
            .values()
            .filter(|p| query.category.map_or(true, |c| p.category == c))
            .filter(|p| query.exclude.as_ref() != Some(&p.id))
            .filter(|p| {
                query.search.as_ref().map_or(true, |q| {
                    p.title.to_lowercase().contains(&q.to_lowercase())
                })
            })
            .map(Post::summary)
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        if let Some(limit) = query.limit {
            found.truncate(limit);
        }
        Ok(found)
    }

    async fn fetch_comments(&self, id: &PostId) -> Result<Vec<Comment>> {
        self.record(Call::FetchComments(id.to_string()));
        self.wait(Duration::ZERO).await;
        Ok(self.comments.lock().unwrap().get(id).cloned().unwrap_or_default())
    }

    async fn create_comment(&self, id: &PostId, draft: &CommentDraft) -> Result<Comment> {
        self.record(Call::CreateComment(id.to_string()));
        self.wait(Duration::ZERO).await;
        if let Some(error) = self.comment_error.lock().unwrap().clone() {
            return Err(error);
        }

        let mut comments = self.comments.lock().unwrap();
        let list = comments.entry(id.clone()).or_default();
        let comment = Comment {
            id: format!("c{}", list.len() + 1),
            post_id: id.clone(),
            name: draft.name.clone(),
            email: draft.email.clone(),
            body: draft.body.clone(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        };
        list.push(comment.clone());
        Ok(comment)
    }

    async fn subscribe(&self, email: &str) -> Result<Option<String>> {
        self.record(Call::Subscribe(email.to_string()));
        self.wait(Duration::ZERO).await;
        Ok(Some("Subscribed".to_string()))
    }
}

pub fn post(id: &str, title: &str, category: Category) -> Post {
    Post {
        id: PostId::new(id),
        title: title.to_string(),
        content: format!("Body of {title}"),
        category,
        image_url: None,
        author: "Staff".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(),
        views: 0,
        comment_count: 0,
    }
}

pub fn catalog() -> Vec<Post> {
    vec![
        post("p1", "New Shoes for Spring", Category::Shoes),
        post("p2", "Shoe Care Guide", Category::Shoes),
        post("p3", "Running Shoes Review", Category::Shoes),
        post("p4", "Shoelace Tricks", Category::Shoes),
        post("p5", "Best Watches 2024", Category::Watches),
    ]
}

pub fn config() -> Config {
    Config::default()
}

//! Post detail loader and comment submission.
//!
//! Opening a post issues the primary fetch. Once it succeeds, three follow-up
//! requests run concurrently: the view increment, related posts and the
//! comment collection. Each request is tagged with the loader's generation;
//! opening another post or closing the page bumps the generation and cancels
//! outstanding work, and any late completion for an older generation is
//! dropped.
//!
//! The view guard is keyed by post id and reset on a genuine identifier
//! change, so navigating A → B → A records a view for A twice while
//! re-entering the same post records it once.

use super::Action;
use crate::api::PostQuery;
use crate::domain::{
    Comment, CommentDraft, DraftField, Post, PostId, Result, SearchResult, ShopError,
};

pub const COMMENT_ADDED: &str = "Comment added successfully!";
pub const COMMENT_FAILED: &str = "Failed to submit comment";
pub const COMMENT_FIELDS_REQUIRED: &str = "Please fill in your name, email and comment";

/// Outcome of the primary post fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostLoad {
    /// No post open.
    Idle,
    Loading,
    Loaded(Box<Post>),
    /// The backend has no post with this id. Terminal for the page.
    NotFound,
    /// The primary fetch failed. Terminal for the page; never retried.
    Failed(ShopError),
}

#[derive(Debug, Clone)]
pub struct PostDetail {
    current: Option<PostId>,
    generation: u64,
    load: PostLoad,
    related: Vec<SearchResult>,
    comments: Vec<Comment>,
    comments_seq: u64,
    view_tracked_for: Option<PostId>,
    draft: CommentDraft,
    submitting: bool,
    related_limit: usize,
}

impl PostDetail {
    #[must_use]
    pub const fn new(related_limit: usize) -> Self {
        Self {
            current: None,
            generation: 0,
            load: PostLoad::Idle,
            related: Vec::new(),
            comments: Vec::new(),
            comments_seq: 0,
            view_tracked_for: None,
            draft: CommentDraft {
                name: String::new(),
                email: String::new(),
                body: String::new(),
            },
            submitting: false,
            related_limit,
        }
    }

    #[must_use]
    pub const fn current(&self) -> Option<&PostId> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn load(&self) -> &PostLoad {
        &self.load
    }

    #[must_use]
    pub fn post(&self) -> Option<&Post> {
        match &self.load {
            PostLoad::Loaded(post) => Some(post.as_ref()),
            _ => None,
        }
    }

    #[must_use]
    pub fn related(&self) -> &[SearchResult] {
        &self.related
    }

    /// Comments in backend order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    #[must_use]
    pub const fn draft(&self) -> &CommentDraft {
        &self.draft
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Navigation to `/post/{id}`.
    pub fn on_open(&mut self, id: &PostId) -> Vec<Action> {
        let _span = tracing::debug_span!("open_post", post_id = %id).entered();

        if self.current.as_ref() == Some(id) {
            tracing::debug!("post already open, ignoring re-entry");
            return vec![];
        }

        let mut actions = Vec::with_capacity(2);
        if self.current.is_some() {
            actions.push(Action::CancelPostRequests);
        }

        self.reset();
        self.current = Some(id.clone());
        self.load = PostLoad::Loading;
        actions.push(Action::FetchPost {
            generation: self.generation,
            id: id.clone(),
        });
        actions
    }

    /// Leaving the detail page.
    pub fn on_close(&mut self) -> Vec<Action> {
        if self.current.is_none() {
            return vec![];
        }
        self.reset();
        vec![Action::CancelPostRequests]
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.current = None;
        self.load = PostLoad::Idle;
        self.related.clear();
        self.comments.clear();
        self.view_tracked_for = None;
        self.draft.clear();
        self.submitting = false;
    }

    fn is_stale(&self, generation: u64, what: &str) -> bool {
        if generation == self.generation {
            return false;
        }
        tracing::debug!(
            generation,
            current = self.generation,
            response = what,
            "discarding response for a previous post"
        );
        true
    }

    fn fetch_comments(&mut self, generation: u64, id: PostId) -> Action {
        self.comments_seq += 1;
        Action::FetchComments {
            generation,
            seq: self.comments_seq,
            id,
        }
    }

    /// Primary fetch completed.
    pub fn on_post_loaded(&mut self, generation: u64, outcome: Result<Option<Post>>) -> (bool, Vec<Action>) {
        if self.is_stale(generation, "post") {
            return (false, vec![]);
        }

        match outcome {
            Ok(Some(post)) => {
                let mut actions = Vec::with_capacity(3);

                if self.view_tracked_for.as_ref() != Some(&post.id) {
                    self.view_tracked_for = Some(post.id.clone());
                    actions.push(Action::RecordView {
                        generation,
                        id: post.id.clone(),
                    });
                }
                actions.push(Action::FetchRelated {
                    generation,
                    query: PostQuery::related(post.category, post.id.clone(), self.related_limit),
                });
                actions.push(self.fetch_comments(generation, post.id.clone()));

                tracing::debug!(post_id = %post.id, category = %post.category, "post loaded");
                self.load = PostLoad::Loaded(Box::new(post));
                (true, actions)
            }
            Ok(None) => {
                tracing::debug!(post_id = ?self.current, "post not found");
                self.load = PostLoad::NotFound;
                (true, vec![])
            }
            Err(e) => {
                tracing::error!(post_id = ?self.current, error = %e, "failed to load post");
                self.load = PostLoad::Failed(e);
                (true, vec![])
            }
        }
    }

    /// View increment completed. Never affects rendering.
    pub fn on_view_recorded(&self, generation: u64, outcome: Result<()>) {
        if self.is_stale(generation, "view") {
            return;
        }
        if let Err(e) = outcome {
            tracing::warn!(post_id = ?self.current, error = %e, "failed to record view");
        }
    }

    pub fn on_related_loaded(&mut self, generation: u64, outcome: Result<Vec<SearchResult>>) -> bool {
        if self.is_stale(generation, "related") {
            return false;
        }
        match outcome {
            Ok(mut related) => {
                let current = self.current.clone();
                related.retain(|p| Some(&p.id) != current.as_ref());
                related.truncate(self.related_limit);
                self.related = related;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load related posts");
                false
            }
        }
    }

    /// Comment collection fetched. Only the most recently issued fetch may
    /// replace the list.
    pub fn on_comments_loaded(&mut self, generation: u64, seq: u64, outcome: Result<Vec<Comment>>) -> bool {
        if self.is_stale(generation, "comments") {
            return false;
        }
        if seq != self.comments_seq {
            tracing::debug!(seq, latest = self.comments_seq, "discarding superseded comment fetch");
            return false;
        }
        match outcome {
            Ok(comments) => {
                tracing::debug!(count = comments.len(), "comments loaded");
                self.comments = comments;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load comments");
                false
            }
        }
    }

    pub fn on_draft_changed(&mut self, field: DraftField, value: &str) {
        self.draft.set(field, value);
    }

    /// Comment form submitted.
    ///
    /// Ignored while a previous submission is in flight. Required fields are
    /// checked before anything is sent.
    pub fn on_submit_comment(&mut self) -> Vec<Action> {
        let Some(id) = self.current.clone() else {
            return vec![];
        };
        if self.post().is_none() {
            return vec![];
        }
        if self.submitting {
            tracing::debug!(post_id = %id, "comment submission already in flight");
            return vec![];
        }

        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(?missing, "comment draft incomplete");
            return vec![Action::Notify(COMMENT_FIELDS_REQUIRED.to_string())];
        }

        self.submitting = true;
        vec![Action::CreateComment {
            generation: self.generation,
            id,
            draft: self.draft.clone(),
        }]
    }

    /// Comment creation completed.
    ///
    /// On success the collection is fetched again instead of inserting the
    /// new comment locally, keeping list and count authoritative.
    pub fn on_comment_submitted(&mut self, generation: u64, outcome: Result<Comment>) -> (bool, Vec<Action>) {
        if self.is_stale(generation, "comment") {
            return (false, vec![]);
        }
        self.submitting = false;

        match outcome {
            Ok(comment) => {
                tracing::debug!(comment_id = %comment.id, "comment created");
                self.draft.clear();
                let mut actions = vec![Action::Notify(COMMENT_ADDED.to_string())];
                if let Some(id) = self.current.clone() {
                    actions.push(self.fetch_comments(generation, id));
                }
                (true, actions)
            }
            Err(e) => {
                tracing::warn!(error = %e, "comment submission failed");
                let message = e.server_message().unwrap_or(COMMENT_FAILED).to_string();
                (true, vec![Action::Notify(message)])
            }
        }
    }
}

//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input and
//! worker completions, translating them into state changes and action
//! sequences. It is the single entry point through which every controller is
//! driven.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the page shell or from completed worker tasks
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via the controller owning that part of the page
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Search input**: `QueryChanged`, `SearchFocused`, `SubmitSearch`,
//!   `SelectResult`, `ViewAllResults`, `PointerDown`
//! - **Navigation chrome**: `ToggleMenu`, `ToggleMobileSearch`, `ToggleLifestyle`
//! - **Post page**: `OpenPost`, `ClosePost`, `DraftChanged`, `SubmitComment`
//! - **Newsletter**: `EmailChanged`, `SubmitSubscribe`
//! - **Completions**: `DebounceElapsed`, `SearchCompleted`, `PostLoaded`,
//!   `ViewRecorded`, `RelatedLoaded`, `CommentsLoaded`, `CommentSubmitted`,
//!   `SubscribeCompleted`
//!
//! # Example
//!
//! ```text
//! let mut state = AppState::new(&Config::default());
//! let (needs_render, actions) = handle_event(&mut state, &Event::QueryChanged("shoe".into()))?;
//! assert!(needs_render);
//! assert!(matches!(actions[1], Action::ScheduleSearch { .. }));
//! ```

use crate::app::{Action, AppState};
use crate::domain::error::{Result, ShopError};
use crate::domain::{Comment, DraftField, Post, PostId, SearchResult};

/// Events triggered by user input or worker completions.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The search input text changed.
    QueryChanged(String),
    /// The debounce timer for `token` fired.
    DebounceElapsed { token: u64 },
    /// The live search request for `token` finished.
    SearchCompleted {
        token: u64,
        outcome: Result<Vec<SearchResult>>,
    },
    /// The search input regained focus.
    SearchFocused,
    /// The search form was submitted.
    SubmitSearch,
    /// A live result was picked.
    SelectResult(PostId),
    /// The "View all results" link was followed.
    ViewAllResults,
    /// A pointer press anywhere on the page.
    PointerDown { inside_search: bool },

    /// Hamburger menu button.
    ToggleMenu,
    /// Mobile search button.
    ToggleMobileSearch,
    /// Lifestyle dropdown trigger.
    ToggleLifestyle,

    /// The route now points at `/post/{id}`.
    OpenPost(PostId),
    /// The post page was left.
    ClosePost,
    /// Primary post fetch finished. `Ok(None)` means the post does not exist.
    PostLoaded {
        generation: u64,
        outcome: Result<Option<Post>>,
    },
    ViewRecorded {
        generation: u64,
        outcome: Result<()>,
    },
    RelatedLoaded {
        generation: u64,
        outcome: Result<Vec<SearchResult>>,
    },
    CommentsLoaded {
        generation: u64,
        seq: u64,
        outcome: Result<Vec<Comment>>,
    },
    /// A comment form field was edited.
    DraftChanged { field: DraftField, value: String },
    /// The comment form was submitted.
    SubmitComment,
    CommentSubmitted {
        generation: u64,
        outcome: Result<Comment>,
    },

    /// The newsletter email field was edited.
    EmailChanged(String),
    /// The newsletter form was submitted.
    SubmitSubscribe,
    /// The subscribe request finished, carrying the server's message if any.
    SubscribeCompleted { outcome: Result<Option<String>> },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// A pair of a render flag and the actions to execute in order. The flag is
/// `false` when nothing visible changed, e.g. for a discarded stale response.
///
/// # Errors
///
/// Returns [`ShopError::Validation`] when asked to open a post with an empty id.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event for debugging.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::QueryChanged(text) => Ok((true, state.search.on_query_changed(text))),
        Event::DebounceElapsed { token } => {
            let actions = state.search.on_debounce_elapsed(*token);
            Ok((false, actions))
        }
        Event::SearchCompleted { token, outcome } => {
            let changed = state.search.on_search_completed(*token, outcome.clone());
            Ok((changed, vec![]))
        }
        Event::SearchFocused => Ok(state.search.on_focus()),
        Event::SubmitSearch => {
            let actions = state.search.on_submit();
            if actions.is_empty() {
                return Ok((false, actions));
            }
            state.nav.close_all();
            Ok((true, actions))
        }
        Event::SelectResult(id) => {
            let actions = state.search.on_select(id);
            state.nav.close_all();
            Ok((true, actions))
        }
        Event::ViewAllResults => {
            let actions = state.search.on_view_all();
            if actions.is_empty() {
                return Ok((false, actions));
            }
            state.nav.close_all();
            Ok((true, actions))
        }
        Event::PointerDown { inside_search } => {
            Ok((state.search.on_pointer_down(*inside_search), vec![]))
        }

        Event::ToggleMenu => {
            state.nav.toggle_menu();
            Ok((true, vec![]))
        }
        Event::ToggleMobileSearch => {
            state.nav.toggle_mobile_search();
            Ok((true, vec![]))
        }
        Event::ToggleLifestyle => {
            state.nav.toggle_lifestyle();
            Ok((true, vec![]))
        }

        Event::OpenPost(id) => {
            if id.as_str().trim().is_empty() {
                return Err(ShopError::Validation("post id must not be empty".into()));
            }
            let actions = state.post.on_open(id);
            Ok((!actions.is_empty(), actions))
        }
        Event::ClosePost => {
            let actions = state.post.on_close();
            Ok((!actions.is_empty(), actions))
        }
        Event::PostLoaded { generation, outcome } => {
            Ok(state.post.on_post_loaded(*generation, outcome.clone()))
        }
        Event::ViewRecorded { generation, outcome } => {
            state.post.on_view_recorded(*generation, outcome.clone());
            Ok((false, vec![]))
        }
        Event::RelatedLoaded { generation, outcome } => {
            let changed = state.post.on_related_loaded(*generation, outcome.clone());
            Ok((changed, vec![]))
        }
        Event::CommentsLoaded { generation, seq, outcome } => {
            let changed = state.post.on_comments_loaded(*generation, *seq, outcome.clone());
            Ok((changed, vec![]))
        }
        Event::DraftChanged { field, value } => {
            state.post.on_draft_changed(*field, value);
            Ok((true, vec![]))
        }
        Event::SubmitComment => {
            let actions = state.post.on_submit_comment();
            Ok((!actions.is_empty(), actions))
        }
        Event::CommentSubmitted { generation, outcome } => {
            Ok(state.post.on_comment_submitted(*generation, outcome.clone()))
        }

        Event::EmailChanged(email) => {
            state.newsletter.on_email_changed(email);
            Ok((true, vec![]))
        }
        Event::SubmitSubscribe => Ok((true, state.newsletter.on_submit())),
        Event::SubscribeCompleted { outcome } => {
            state.newsletter.on_completed(outcome.clone());
            Ok((true, vec![]))
        }
    }
}

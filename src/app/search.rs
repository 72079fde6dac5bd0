//! Live search controller.
//!
//! Turns keystrokes into a debounced remote lookup and a navigable result
//! list.
//!
//! # State Machine
//!
//! ```text
//!            keystroke (non-empty)            debounce fires (latest token)
//!  Idle ─────────────────────────► Pending ─────────────────────────► Searching
//!   ▲   keystroke (blank)            │ ▲ keystroke                          │
//!   └────────────────────────────────┘ └──────────── Results / Errored ◄────┘
//!                                                        response (latest token)
//!
//!  any state ── outside pointer / submit / select ──► Dismissed
//! ```
//!
//! Every keystroke issues a new token. Timers and responses carry the token
//! they were issued for and are dropped unless it is still the latest, so a
//! slow earlier request can never overwrite a later one and at most one
//! request is issued per pause in typing.

use super::Action;
use crate::domain::{PostId, Result, Route, SearchResult, ShopError};
use std::time::Duration;

/// Lifecycle of the live search panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Empty query; panel hidden.
    Idle,
    /// Debounce timer running; no request yet.
    Pending,
    /// Request in flight; panel shows a loading indicator.
    Searching,
    /// Response received for the current query.
    Results,
    /// The request for the current query failed. Rendered like an empty
    /// result set but kept apart for diagnostics.
    Errored,
    /// Hidden by an outside click or a navigation, regardless of query.
    Dismissed,
}

#[derive(Debug, Clone)]
pub struct SearchController {
    query: String,
    phase: SearchPhase,
    results: Vec<SearchResult>,
    latest_token: u64,
    last_error: Option<ShopError>,
    debounce: Duration,
    limit: usize,
}

impl SearchController {
    #[must_use]
    pub const fn new(debounce: Duration, limit: usize) -> Self {
        Self {
            query: String::new(),
            phase: SearchPhase::Idle,
            results: Vec::new(),
            latest_token: 0,
            last_error: None,
            debounce,
            limit,
        }
    }

    /// Raw query text as typed.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn trimmed_query(&self) -> &str {
        self.query.trim()
    }

    #[must_use]
    pub const fn phase(&self) -> SearchPhase {
        self.phase
    }

    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    #[must_use]
    pub const fn latest_token(&self) -> u64 {
        self.latest_token
    }

    #[must_use]
    pub const fn last_error(&self) -> Option<&ShopError> {
        self.last_error.as_ref()
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    fn next_token(&mut self) -> u64 {
        self.latest_token += 1;
        self.latest_token
    }

    /// Handles new input text. Returns the actions to run.
    pub fn on_query_changed(&mut self, text: &str) -> Vec<Action> {
        self.query = text.to_string();
        let token = self.next_token();

        if self.trimmed_query().is_empty() {
            tracing::trace!(token, "blank query, hiding results");
            self.phase = SearchPhase::Idle;
            self.results.clear();
            self.last_error = None;
            return vec![Action::CancelSearch];
        }

        tracing::trace!(token, query = %self.query, "query changed, debouncing");
        self.phase = SearchPhase::Pending;
        vec![
            Action::CancelSearch,
            Action::ScheduleSearch {
                token,
                delay: self.debounce,
            },
        ]
    }

    /// Handles the debounce timer firing for `token`.
    pub fn on_debounce_elapsed(&mut self, token: u64) -> Vec<Action> {
        if token != self.latest_token || self.phase != SearchPhase::Pending {
            tracing::trace!(token, latest = self.latest_token, "ignoring superseded debounce");
            return vec![];
        }

        self.phase = SearchPhase::Searching;
        tracing::debug!(token, query = %self.trimmed_query(), "issuing search");
        vec![Action::FetchSearch {
            token,
            query: self.trimmed_query().to_string(),
            limit: self.limit,
        }]
    }

    /// Commits a search response if it belongs to the latest token.
    ///
    /// Returns `true` when visible state changed.
    pub fn on_search_completed(&mut self, token: u64, outcome: Result<Vec<SearchResult>>) -> bool {
        if token != self.latest_token {
            tracing::debug!(token, latest = self.latest_token, "discarding stale search response");
            return false;
        }

        let dismissed = self.phase == SearchPhase::Dismissed;
        match outcome {
            Ok(mut results) => {
                results.truncate(self.limit);
                tracing::debug!(token, count = results.len(), "search results received");
                self.results = results;
                self.last_error = None;
                if !dismissed {
                    self.phase = SearchPhase::Results;
                }
            }
            Err(e) => {
                tracing::warn!(token, error = %e, "search request failed");
                self.results.clear();
                self.last_error = Some(e);
                if !dismissed {
                    self.phase = SearchPhase::Errored;
                }
            }
        }
        !dismissed
    }

    /// Re-opens the panel when the input regains focus.
    ///
    /// Existing results for the current query are shown again; a query whose
    /// request never completed is searched again.
    pub fn on_focus(&mut self) -> (bool, Vec<Action>) {
        if self.phase != SearchPhase::Dismissed || self.trimmed_query().is_empty() {
            return (false, vec![]);
        }

        if self.results.is_empty() {
            let token = self.next_token();
            self.phase = SearchPhase::Pending;
            return (
                true,
                vec![Action::ScheduleSearch {
                    token,
                    delay: self.debounce,
                }],
            );
        }

        self.phase = SearchPhase::Results;
        (true, vec![])
    }

    /// Submits the form: navigates to the full results page.
    pub fn on_submit(&mut self) -> Vec<Action> {
        let query = self.trimmed_query().to_string();
        if query.is_empty() {
            return vec![];
        }
        self.reset_after_navigation();
        vec![Action::CancelSearch, Action::Navigate(Route::Search(query))]
    }

    /// Picks one result: navigates straight to its post.
    pub fn on_select(&mut self, id: &PostId) -> Vec<Action> {
        self.reset_after_navigation();
        vec![Action::CancelSearch, Action::Navigate(Route::Post(id.clone()))]
    }

    /// "View all results" link under the live list. Keeps the query text.
    pub fn on_view_all(&mut self) -> Vec<Action> {
        let query = self.trimmed_query().to_string();
        if query.is_empty() {
            return vec![];
        }
        self.phase = SearchPhase::Dismissed;
        vec![Action::Navigate(Route::Search(query))]
    }

    /// Pointer pressed somewhere on the page. Returns `true` if the panel closed.
    pub fn on_pointer_down(&mut self, inside_search: bool) -> bool {
        if inside_search || matches!(self.phase, SearchPhase::Dismissed | SearchPhase::Idle) {
            return false;
        }
        tracing::trace!(phase = ?self.phase, "outside click dismissed search");
        self.phase = SearchPhase::Dismissed;
        true
    }

    fn reset_after_navigation(&mut self) {
        self.query.clear();
        self.results.clear();
        self.last_error = None;
        self.next_token();
        self.phase = SearchPhase::Dismissed;
    }
}

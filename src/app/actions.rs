//! Actions representing side effects to be executed by the worker.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! controllers never perform I/O themselves; every remote call, timer and
//! navigation is described here and carried out by
//! [`Worker`](crate::worker::Worker).
//!
//! Actions that complete asynchronously carry the token or generation that was
//! current when they were issued. The completion event echoes it back so the
//! controllers can discard responses that arrive after their query or post
//! has been superseded.

use crate::api::PostQuery;
use crate::domain::{CommentDraft, PostId, Route};
use std::time::Duration;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Starts (or restarts) the debounce timer for a search token.
    ///
    /// When `delay` elapses without being superseded the worker feeds back
    /// `Event::DebounceElapsed { token }`.
    ScheduleSearch {
        token: u64,
        delay: Duration,
    },

    /// Runs the live search request for `token`.
    FetchSearch {
        token: u64,
        query: String,
        limit: usize,
    },

    /// Aborts any pending debounce timer and in-flight search request.
    CancelSearch,

    /// Asks the host to navigate to a page.
    Navigate(Route),

    /// Shows a blocking notice to the user (the site used `alert`).
    Notify(String),

    /// Loads the post shown on the detail page.
    FetchPost {
        generation: u64,
        id: PostId,
    },

    /// Records one view of the post. Fire-and-forget.
    RecordView {
        generation: u64,
        id: PostId,
    },

    /// Loads posts related to the one shown.
    FetchRelated {
        generation: u64,
        query: PostQuery,
    },

    /// Loads the full comment collection of a post. `seq` orders fetches
    /// issued under the same generation.
    FetchComments {
        generation: u64,
        seq: u64,
        id: PostId,
    },

    /// Submits a comment draft.
    CreateComment {
        generation: u64,
        id: PostId,
        draft: CommentDraft,
    },

    /// Aborts every outstanding request issued for the previous post.
    CancelPostRequests,

    /// Subscribes an address to the newsletter.
    Subscribe {
        email: String,
    },
}

//! Action executor running remote calls and timers on the tokio runtime.
//!
//! Each asynchronous action becomes one spawned task. A task performs a single
//! bounded attempt and feeds exactly one completion [`Event`] back through the
//! channel, carrying the token or generation it was started with. Tasks
//! belonging to a superseded search, comment fetch or post are aborted.
//! Finished tasks are reaped whenever a new one is spawned.

use crate::api::{Backend, PostQuery};
use crate::app::{Action, Event};
use crate::domain::error::{Result, ShopError};
use crate::worker::shell::Shell;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::{AbortHandle, JoinSet};
use tracing::Instrument;

/// Runs `fut` with a deadline. Expiry is reported as [`ShopError::Timeout`].
pub async fn bounded<T>(timeout: Duration, fut: impl Future<Output = Result<T>>) -> Result<T> {
    tokio::time::timeout(timeout, fut)
        .await
        .unwrap_or_else(|_| Err(ShopError::Timeout(timeout)))
}

pub struct Worker {
    backend: Arc<dyn Backend>,
    events: UnboundedSender<Event>,
    timeout: Duration,
    tasks: JoinSet<()>,
    debounce: Option<AbortHandle>,
    search: Option<AbortHandle>,
    comments: Option<AbortHandle>,
    post: Vec<AbortHandle>,
}

impl Worker {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, events: UnboundedSender<Event>, timeout: Duration) -> Self {
        Self {
            backend,
            events,
            timeout,
            tasks: JoinSet::new(),
            debounce: None,
            search: None,
            comments: None,
            post: Vec::new(),
        }
    }

    /// Whether any spawned task has not finished yet.
    pub fn has_pending(&mut self) -> bool {
        while self.tasks.try_join_next().is_some() {}
        !self.tasks.is_empty()
    }

    /// Number of spawned tasks not yet reaped.
    #[must_use]
    pub fn tracked_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Waits until some spawned task finishes.
    ///
    /// Cancel safe. Returns immediately when nothing is running.
    pub async fn reap(&mut self) {
        if let Some(Err(e)) = self.tasks.join_next().await {
            if e.is_panic() {
                tracing::error!(error = %e, "worker task panicked");
            }
        }
    }

    /// Executes one action.
    ///
    /// Navigation and notices go to `shell` synchronously; everything else is
    /// spawned. Must be called from within a tokio runtime.
    pub fn execute(&mut self, action: Action, shell: &mut dyn Shell) {
        tracing::debug!(action = ?action, "executing action");

        match action {
            Action::ScheduleSearch { token, delay } => {
                abort(&mut self.debounce);
                let handle = self.spawn(
                    tracing::trace_span!("debounce", token),
                    async move {
                        tokio::time::sleep(delay).await;
                        Event::DebounceElapsed { token }
                    },
                );
                self.debounce = Some(handle);
            }
            Action::FetchSearch { token, query, limit } => {
                abort(&mut self.search);
                let backend = Arc::clone(&self.backend);
                let timeout = self.timeout;
                let handle = self.spawn(
                    tracing::debug_span!("live_search", token, query = %query),
                    async move {
                        let query = PostQuery::search(query, limit);
                        let outcome = bounded(timeout, backend.list_posts(&query)).await;
                        Event::SearchCompleted { token, outcome }
                    },
                );
                self.search = Some(handle);
            }
            Action::CancelSearch => {
                abort(&mut self.debounce);
                abort(&mut self.search);
            }
            Action::Navigate(route) => shell.navigate(&route),
            Action::Notify(message) => shell.notify(&message),
            Action::FetchPost { generation, id } => {
                let backend = Arc::clone(&self.backend);
                let timeout = self.timeout;
                let span = tracing::debug_span!("fetch_post", generation, post_id = %id);
                self.spawn_post(span, async move {
                    let outcome = bounded(timeout, backend.fetch_post(&id)).await;
                    Event::PostLoaded { generation, outcome }
                });
            }
            Action::RecordView { generation, id } => {
                let backend = Arc::clone(&self.backend);
                let timeout = self.timeout;
                let span = tracing::debug_span!("record_view", generation, post_id = %id);
                self.spawn_post(span, async move {
                    let outcome = bounded(timeout, backend.record_view(&id)).await;
                    Event::ViewRecorded { generation, outcome }
                });
            }
            Action::FetchRelated { generation, query } => {
                let backend = Arc::clone(&self.backend);
                let timeout = self.timeout;
                let span = tracing::debug_span!("fetch_related", generation);
                self.spawn_post(span, async move {
                    let outcome = bounded(timeout, backend.list_posts(&query)).await;
                    Event::RelatedLoaded { generation, outcome }
                });
            }
            Action::FetchComments { generation, seq, id } => {
                abort(&mut self.comments);
                let backend = Arc::clone(&self.backend);
                let timeout = self.timeout;
                let span = tracing::debug_span!("fetch_comments", generation, seq, post_id = %id);
                let handle = self.spawn_post(span, async move {
                    let outcome = bounded(timeout, backend.fetch_comments(&id)).await;
                    Event::CommentsLoaded { generation, seq, outcome }
                });
                self.comments = Some(handle);
            }
            Action::CreateComment { generation, id, draft } => {
                let backend = Arc::clone(&self.backend);
                let timeout = self.timeout;
                let span = tracing::debug_span!("create_comment", generation, post_id = %id);
                self.spawn_post(span, async move {
                    let outcome = bounded(timeout, backend.create_comment(&id, &draft)).await;
                    Event::CommentSubmitted { generation, outcome }
                });
            }
            Action::CancelPostRequests => {
                tracing::debug!(count = self.post.len(), "cancelling post requests");
                abort(&mut self.comments);
                for handle in self.post.drain(..) {
                    handle.abort();
                }
            }
            Action::Subscribe { email } => {
                let backend = Arc::clone(&self.backend);
                let timeout = self.timeout;
                self.spawn(tracing::debug_span!("subscribe"), async move {
                    let outcome = bounded(timeout, backend.subscribe(&email)).await;
                    Event::SubscribeCompleted { outcome }
                });
            }
        }
    }

    fn spawn_post<F>(&mut self, span: tracing::Span, task: F) -> AbortHandle
    where
        F: Future<Output = Event> + Send + 'static,
    {
        self.post.retain(|handle| !handle.is_finished());
        let handle = self.spawn(span, task);
        self.post.push(handle.clone());
        handle
    }

    fn spawn<F>(&mut self, span: tracing::Span, task: F) -> AbortHandle
    where
        F: Future<Output = Event> + Send + 'static,
    {
        while let Some(joined) = self.tasks.try_join_next() {
            if let Err(e) = joined {
                if e.is_panic() {
                    tracing::error!(error = %e, "worker task panicked");
                }
            }
        }

        let events = self.events.clone();
        self.tasks.spawn(
            async move {
                let event = task.await;
                if events.send(event).is_err() {
                    tracing::debug!("session gone, dropping completion");
                }
            }
            .instrument(span),
        )
    }
}

fn abort(slot: &mut Option<AbortHandle>) {
    if let Some(handle) = slot.take() {
        handle.abort();
    }
}

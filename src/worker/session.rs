//! A running page: state, worker and host wired together.

use crate::api::Backend;
use crate::app::{handle_event, AppState, Event};
use crate::domain::error::Result;
use crate::ui::PageViewModel;
use crate::worker::handler::Worker;
use crate::worker::shell::Shell;
use crate::Config;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};

enum Wake {
    Event(Event),
    TaskDone,
}

/// Owns the application state and drives it with events.
///
/// User events go through [`dispatch`](Self::dispatch). Completions produced
/// by the worker are pulled with [`next_completion`](Self::next_completion)
/// or all at once with [`run_until_idle`](Self::run_until_idle).
pub struct Session<S: Shell> {
    state: AppState,
    worker: Worker,
    events: UnboundedReceiver<Event>,
    shell: S,
}

impl<S: Shell> Session<S> {
    #[must_use]
    pub fn new(config: &Config, backend: Arc<dyn Backend>, shell: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(config),
            worker: Worker::new(backend, tx, config.request_timeout),
            events: rx,
            shell,
        }
    }

    /// Handles one event and executes the resulting actions.
    ///
    /// Returns whether the page should be re-rendered.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn dispatch(&mut self, event: Event) -> Result<bool> {
        let (needs_render, actions) = handle_event(&mut self.state, &event)?;
        for action in actions {
            self.worker.execute(action, &mut self.shell);
        }
        Ok(needs_render)
    }

    /// Waits for the next completion event from the worker.
    ///
    /// Cancel safe, so it can sit in a `select!` next to user input.
    pub async fn next_completion(&mut self) -> Option<Event> {
        self.events.recv().await
    }

    /// Dispatches completions until no task is running and the queue is empty.
    ///
    /// Timers are awaited too, so under a paused test clock this advances
    /// through debounce delays and request timeouts.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`dispatch`](Self::dispatch).
    pub async fn run_until_idle(&mut self) -> Result<()> {
        loop {
            while let Ok(event) = self.events.try_recv() {
                self.dispatch(event)?;
            }
            if !self.worker.has_pending() {
                if self.events.is_empty() {
                    return Ok(());
                }
                continue;
            }

            let wake = tokio::select! {
                Some(event) = self.events.recv() => Wake::Event(event),
                () = self.worker.reap() => Wake::TaskDone,
            };
            if let Wake::Event(event) = wake {
                self.dispatch(event)?;
            }
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn shell(&self) -> &S {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut S {
        &mut self.shell
    }

    #[must_use]
    pub fn viewmodel(&self) -> PageViewModel {
        self.state.compute_viewmodel()
    }
}

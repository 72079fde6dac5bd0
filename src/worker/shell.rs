//! Host-side effects that are not remote calls.

use crate::domain::Route;

/// The page host: performs navigation and shows notices.
pub trait Shell {
    fn navigate(&mut self, route: &Route);
    fn notify(&mut self, message: &str);
}

/// Shell that records what was asked of it.
///
/// Used by the terminal front end, which drains it after each step, and by
/// tests asserting on navigation and notices.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingShell {
    pub routes: Vec<Route>,
    pub notices: Vec<String>,
}

impl RecordingShell {
    /// Takes everything recorded so far.
    pub fn drain(&mut self) -> (Vec<Route>, Vec<String>) {
        (
            std::mem::take(&mut self.routes),
            std::mem::take(&mut self.notices),
        )
    }
}

impl Shell for RecordingShell {
    fn navigate(&mut self, route: &Route) {
        tracing::debug!(route = %route, "navigate");
        self.routes.push(route.clone());
    }

    fn notify(&mut self, message: &str) {
        tracing::debug!(message, "notify");
        self.notices.push(message.to_string());
    }
}

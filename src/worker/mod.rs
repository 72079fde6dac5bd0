//! Asynchronous execution of actions.
//!
//! The controllers in [`app`](crate::app) never perform I/O. This module runs
//! the actions they emit on the tokio runtime and feeds completions back as
//! events.
//!
//! # Architecture
//!
//! - `handler`: [`Worker`], spawning one bounded task per remote call or timer
//! - `session`: [`Session`], owning state, worker and the completion channel
//! - `shell`: [`Shell`], the host seam for navigation and notices

pub mod handler;
pub mod session;
pub mod shell;

pub use handler::{bounded, Worker};
pub use session::Session;
pub use shell::{RecordingShell, Shell};

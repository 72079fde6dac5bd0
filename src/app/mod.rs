//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the page shell (main.rs, or any embedding host)
//! and the worker. It implements the event-driven architecture that powers
//! the storefront components.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Worker
//!                           ↑                                  ↓
//!                           └────── Completion Events ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transition coordinator
//! - [`search`]: Debounced live search with stale-response rejection
//! - [`post`]: Post detail loader, view tracking and comments
//! - [`newsletter`]: Newsletter subscribe form
//! - [`nav`]: Menu, mobile search and lifestyle dropdown toggles
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod nav;
pub mod newsletter;
pub mod post;
pub mod search;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use nav::{NavState, Overlay};
pub use newsletter::{Newsletter, SubscribeStatus};
pub use post::{PostDetail, PostLoad};
pub use search::{SearchController, SearchPhase};
pub use state::AppState;

//! Presentation layer.
//!
//! ```text
//! AppState → compute_viewmodel → PageViewModel → render_page → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready view model types
//! - [`highlight`]: case-insensitive query highlighting in titles
//! - [`share`]: social share URLs and copy-link feedback
//! - [`render`]: plain-text rendering for the terminal shell

pub mod highlight;
pub mod render;
pub mod share;
pub mod viewmodel;

pub use highlight::{highlight, highlight_ranges, Segment};
pub use render::{render_category, render_page};
pub use share::{CopyFeedback, ShareLinks};
pub use viewmodel::{
    CategoryPageView, CommentItem, NavView, PageViewModel, PostBody, PostPageView, RelatedItem,
    ResultItem, SearchPanelView,
};

//! Remote API layer.
//!
//! - [`backend`]: the [`Backend`] trait and request/response envelopes
//! - [`http`]: [`HttpBackend`], the `reqwest` implementation

pub mod backend;
pub mod http;

pub use backend::{Backend, PostQuery};
pub use http::HttpBackend;

//! Domain layer for the storefront client.
//!
//! Core types shared by the controllers, the HTTP backend and the view layer,
//! independent of any transport or runtime.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`post`]: Posts, comments, search results and the comment draft
//! - [`category`]: The fixed category set and its routes
//! - [`route`]: Navigation targets emitted by the controllers

pub mod category;
pub mod error;
pub mod post;
pub mod route;

pub use category::Category;
pub use error::{Result, ShopError};
pub use post::{Comment, CommentDraft, DraftField, Post, PostId, SearchResult};
pub use route::Route;

//! ShopNow: client core for the ShopNow storefront.
//!
//! The crate models the interactive parts of the storefront as pure state
//! machines driven by events, with every remote call and timer executed by an
//! asynchronous worker:
//! - Debounced live search with stale-response rejection
//! - Post detail loading with one-shot view tracking, related posts and comments
//! - Newsletter signup with client-side address validation
//! - Navigation chrome, share links, category listings and an auth route gate

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal shell (main.rs) / embedding host          │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machines
//! │  - Event handling                                   │
//! │  - Action emission                                  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Worker Layer  │   │ API Layer     │
//! │ (ui/)         │   │ (worker/)     │   │ (api/)        │
//! │ - View models │   │ - tokio tasks │   │ - Backend     │
//! │ - Highlighting│   │ - Timeouts    │   │ - reqwest     │
//! │ - Share links │   │ - Cancellation│   │ - traceparent │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Auth Layers                               │
//! │  - Posts, comments, categories, routes (domain/)    │
//! │  - Error types (domain/error)                       │
//! │  - Route gate (auth/)                               │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber                               │
//! │  - OpenTelemetry JSON-lines span export             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Controllers with the event/action model
//! - [`api`]: Backend trait and its HTTP implementation
//! - [`auth`]: Route gate over verified identity claims
//! - [`domain`]: Core domain types (posts, comments, categories, routes, errors)
//! - [`worker`]: Action execution on the tokio runtime
//! - [`ui`]: View models, highlighting, share links and text rendering
//! - [`observability`]: Tracing setup and span export
//!
//! # Configuration
//!
//! Configuration comes from a string map, `SHOPNOW_*` environment variables
//! or a TOML file:
//!
//! ```toml
//! base_url = "http://localhost:3000"
//! site_url = "https://shopnow.example"
//! request_timeout_ms = 8000
//! debounce_ms = 300
//! search_limit = 5
//! related_limit = 3
//! admin_email = "owner@shopnow.test"
//! trace_level = "debug"
//! trace_file = "/tmp/shopnow/traces.jsonl"
//! ```
//!
//! # Event Flow
//!
//! 1. **Input**: the host turns user input into an [`Event`]
//! 2. **Handling**: [`handle_event`] mutates state and returns [`Action`]s
//! 3. **Execution**: the [`worker::Worker`] spawns one bounded task per
//!    remote call or timer
//! 4. **Completion**: each task feeds back one event tagged with the token or
//!    generation it started with; superseded ones are discarded
//! 5. **Rendering**: [`AppState::compute_viewmodel`] produces the page
//!
//! # Example
//!
//! ```text
//! let backend = Arc::new(HttpBackend::new(&config.base_url)?);
//! let mut session = Session::new(&config, backend, RecordingShell::default());
//! session.dispatch(Event::QueryChanged("shoe".into()))?;
//! session.run_until_idle().await?;
//! println!("{}", render_page(&session.viewmodel()));
//! ```

pub mod api;
pub mod app;
pub mod auth;
pub mod domain;
pub mod observability;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{Result, ShopError};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(8);
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_SEARCH_LIMIT: usize = 5;
pub const DEFAULT_RELATED_LIMIT: usize = 3;

const ENV_PREFIX: &str = "SHOPNOW_";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Origin of the storefront API.
    ///
    /// Default: `http://localhost:3000`
    pub base_url: String,

    /// Public origin used in share links. Falls back to `base_url`.
    pub site_url: Option<String>,

    /// Upper bound on each remote call. Default: 8 s
    pub request_timeout: Duration,

    /// Quiet period before a live search is issued. Default: 300 ms
    pub debounce: Duration,

    /// Maximum live search results shown. Default: 5
    pub search_limit: usize,

    /// Maximum related posts shown. Default: 3
    pub related_limit: usize,

    /// Address granted the admin area together with the `admin` role.
    pub admin_email: Option<String>,

    /// Tracing level filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// File receiving exported spans as JSON lines. Export is off when unset.
    pub trace_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            site_url: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            debounce: DEFAULT_DEBOUNCE,
            search_limit: DEFAULT_SEARCH_LIMIT,
            related_limit: DEFAULT_RELATED_LIMIT,
            admin_email: None,
            trace_level: None,
            trace_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// # Parsing Rules
    ///
    /// - `base_url`: non-blank string, default `http://localhost:3000`
    /// - `site_url`: optional string, share links use `base_url` when unset
    /// - `request_timeout_ms`, `debounce_ms`: positive integer milliseconds
    /// - `search_limit`, `related_limit`: positive integers
    /// - `admin_email`, `trace_level`, `trace_file`: optional strings
    ///
    /// Missing, zero or unparsable values fall back to their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use shopnow::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "150".to_string());
    /// map.insert("search_limit".to_string(), "0".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.debounce.as_millis(), 150);
    /// assert_eq!(config.search_limit, 5);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| {
            map.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let positive = |key: &str| {
            map.get(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|n| *n > 0)
        };
        let millis = |key: &str, default: Duration| positive(key).map_or(default, Duration::from_millis);
        let count = |key: &str, default: usize| {
            positive(key)
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(default)
        };

        Self {
            base_url: text("base_url").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            site_url: text("site_url"),
            request_timeout: millis("request_timeout_ms", DEFAULT_REQUEST_TIMEOUT),
            debounce: millis("debounce_ms", DEFAULT_DEBOUNCE),
            search_limit: count("search_limit", DEFAULT_SEARCH_LIMIT),
            related_limit: count("related_limit", DEFAULT_RELATED_LIMIT),
            admin_email: text("admin_email"),
            trace_level: text("trace_level"),
            trace_file: text("trace_file").map(PathBuf::from),
        }
    }

    /// Origin that share links point at, without a trailing slash.
    #[must_use]
    pub fn public_origin(&self) -> &str {
        self.site_url
            .as_deref()
            .unwrap_or(&self.base_url)
            .trim_end_matches('/')
    }

    /// Reads `SHOPNOW_*` environment variables, e.g. `SHOPNOW_BASE_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    fn from_vars(vars: impl Iterator<Item = (String, String)>) -> Self {
        let map = vars
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .map(|name| (name.to_ascii_lowercase(), value))
            })
            .collect();
        Self::from_map(&map)
    }

    /// Loads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::Io`] if the file cannot be read and
    /// [`ShopError::Config`] if it is not a flat TOML table.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let table: toml::Table = contents
            .parse()
            .map_err(|e: toml::de::Error| ShopError::Config(format!("{}: {}", path.display(), e.message())))?;

        let mut map = BTreeMap::new();
        for (key, value) in table {
            let value = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(n) => n.to_string(),
                other => {
                    return Err(ShopError::Config(format!(
                        "{}: unsupported value for `{key}`: {other}",
                        path.display()
                    )))
                }
            };
            map.insert(key, value);
        }

        tracing::debug!(path = %path.display(), keys = map.len(), "loaded config file");
        Ok(Self::from_map(&map))
    }
}

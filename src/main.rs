//! Terminal front end for the storefront client.
//!
//! Reads one command per line from stdin, feeds the matching event into a
//! [`Session`] and prints the re-rendered page. Completions from the worker
//! (debounce timers, search results, post loads) are rendered as they arrive.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   Event    ┌──────────────────────────┐
//! │ stdin lines │ ─────────→ │ Session                  │
//! └─────────────┘            │  AppState ←─ completions │
//!        ↑                   │  Worker ──→ HttpBackend  │
//!        │ render            └──────────────────────────┘
//!   stdout ←──────── PageViewModel ─┘
//! ```
//!
//! # Commands
//!
//! Search:
//! - `type <text>`: replace the search input text
//! - `focus`: focus the search input
//! - `click-outside`: press outside the search area
//! - `enter`: submit the search form
//! - `pick <n>`: open the n-th live result
//! - `all`: follow "View all results"
//!
//! Post page:
//! - `open <id>` / `close`
//! - `name <text>`, `email <text>`, `comment <text>`: edit the comment form
//! - `send`: submit the comment
//! - `copy`: copy the page link
//!
//! Other:
//! - `subscribe <email>`: newsletter signup
//! - `menu`, `mobile-search`, `lifestyle`: navigation toggles
//! - `category <slug>`: list a category
//! - `goto <path>`: check a path against the route gate
//! - `quit`
//!
//! # Configuration
//!
//! `SHOPNOW_CONFIG` names a TOML file; otherwise `SHOPNOW_*` variables apply.

#![allow(clippy::multiple_crate_versions)]

use shopnow::api::{Backend, HttpBackend, PostQuery};
use shopnow::auth::{self, GateDecision};
use shopnow::domain::{Category, DraftField, PostId, Route};
use shopnow::ui::{render_category, render_page, CategoryPageView, CopyFeedback, PostPageView, SearchPanelView};
use shopnow::worker::{bounded, RecordingShell, Session};
use shopnow::{observability, Config, Event, Result, ShopError};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};

struct Frontend {
    session: Session<RecordingShell>,
    backend: Arc<dyn Backend>,
    config: Config,
    copy_feedback: CopyFeedback,
}

enum Input {
    Line(Option<String>),
    Completion(Option<Event>),
}

#[tokio::main]
async fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("shopnow: {e}");
            std::process::exit(2);
        }
    };
    observability::init_tracing(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "shopnow exited with error");
        eprintln!("shopnow: {e}");
        std::process::exit(1);
    }
}

fn load_config() -> Result<Config> {
    match std::env::var_os("SHOPNOW_CONFIG") {
        Some(path) => Config::from_file(&PathBuf::from(path)),
        None => Ok(Config::from_env()),
    }
}

async fn run(config: Config) -> Result<()> {
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&config.base_url)?);
    tracing::info!(base_url = %config.base_url, "storefront client started");

    let mut frontend = Frontend {
        session: Session::new(&config, Arc::clone(&backend), RecordingShell::default()),
        backend,
        config,
        copy_feedback: CopyFeedback::default(),
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let input = tokio::select! {
            line = lines.next_line() => Input::Line(line?),
            event = frontend.session.next_completion() => Input::Completion(event),
        };

        let needs_render = match input {
            Input::Line(None) => break,
            Input::Line(Some(line)) => match frontend.command(line.trim()).await {
                Ok(Some(render)) => render,
                Ok(None) => break,
                Err(e) => {
                    println!("error: {e}");
                    false
                }
            },
            Input::Completion(Some(event)) => frontend.session.dispatch(event)?,
            Input::Completion(None) => break,
        };

        frontend.follow_navigation();
        if needs_render {
            print!("{}", render_page(&frontend.session.viewmodel()));
        }
    }

    tracing::info!("storefront client stopped");
    Ok(())
}

impl Frontend {
    /// Runs one command line. `Ok(None)` means quit.
    async fn command(&mut self, line: &str) -> Result<Option<bool>> {
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
        let event = match verb {
            "" => return Ok(Some(false)),
            "quit" | "exit" => return Ok(None),
            "type" => Event::QueryChanged(rest.to_string()),
            "focus" => Event::SearchFocused,
            "click-outside" => Event::PointerDown { inside_search: false },
            "enter" => Event::SubmitSearch,
            "all" => Event::ViewAllResults,
            "pick" => Event::SelectResult(self.live_result(rest)?),
            "open" => Event::OpenPost(PostId::new(rest.trim())),
            "close" => Event::ClosePost,
            "name" => draft(DraftField::Name, rest),
            "email" => draft(DraftField::Email, rest),
            "comment" => draft(DraftField::Body, rest),
            "send" => Event::SubmitComment,
            "subscribe" => {
                self.session.dispatch(Event::EmailChanged(rest.trim().to_string()))?;
                Event::SubmitSubscribe
            }
            "menu" => Event::ToggleMenu,
            "mobile-search" => Event::ToggleMobileSearch,
            "lifestyle" => Event::ToggleLifestyle,
            "category" => {
                self.show_category(rest.trim()).await?;
                return Ok(Some(false));
            }
            "copy" => {
                self.copy_link();
                return Ok(Some(false));
            }
            "goto" => {
                self.goto(rest.trim());
                return Ok(Some(false));
            }
            other => {
                return Err(ShopError::Validation(format!("unknown command `{other}`")));
            }
        };
        self.session.dispatch(event).map(Some)
    }

    fn live_result(&self, index: &str) -> Result<PostId> {
        let SearchPanelView::Results { items, .. } = self.session.viewmodel().search else {
            return Err(ShopError::Validation("no live results shown".into()));
        };
        index
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|n| items.get(n))
            .map(|item| item.id.clone())
            .ok_or_else(|| ShopError::Validation(format!("no result `{index}`")))
    }

    async fn show_category(&self, slug: &str) -> Result<()> {
        let category: Category = slug.parse().map_err(ShopError::Validation)?;
        let query = PostQuery::in_category(category);
        let feed = bounded(self.config.request_timeout, self.backend.list_posts(&query)).await?;
        print!("{}", render_category(&CategoryPageView::build(category, &feed)));
        Ok(())
    }

    fn copy_link(&mut self) {
        let Some(PostPageView::Loaded(body)) = self.session.viewmodel().post else {
            println!("nothing to copy");
            return;
        };
        let now = Instant::now();
        self.copy_feedback.mark_copied(now);
        println!("{} [{}]", body.share.page_url, self.copy_feedback.label(now));
    }

    fn goto(&mut self, path: &str) {
        match auth::gate(path, None, self.config.admin_email.as_deref()) {
            GateDecision::Next => println!("-> {path}"),
            GateDecision::Redirect(target) => {
                println!("{path} redirected");
                self.session.shell_mut().routes.push(Route::Path(target));
            }
        }
    }

    /// Prints notices and routes, opening or closing the post page to match.
    fn follow_navigation(&mut self) {
        let (routes, notices) = self.session.shell_mut().drain();
        for notice in notices {
            println!("! {notice}");
        }
        for route in routes {
            println!("-> {route}");
            let event = match route {
                Route::Post(id) => Event::OpenPost(id),
                _ => Event::ClosePost,
            };
            if let Err(e) = self.session.dispatch(event) {
                println!("error: {e}");
            }
        }
    }
}

fn draft(field: DraftField, value: &str) -> Event {
    Event::DraftChanged {
        field,
        value: value.to_string(),
    }
}

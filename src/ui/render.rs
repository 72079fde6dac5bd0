//! Plain-text rendering of view models for the terminal shell.
//!
//! Matched query segments are wrapped in ANSI reverse-video escapes; every
//! other piece of text is emitted as-is.

use super::highlight::Segment;
use super::viewmodel::{CategoryPageView, PageViewModel, PostPageView, SearchPanelView};
use std::fmt::Write;

const MATCH_ON: &str = "\u{1b}[7m";
const RESET: &str = "\u{1b}[0m";

/// Renders title segments, marking matched runs.
#[must_use]
pub fn render_segments(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.matched {
            let _ = write!(out, "{MATCH_ON}{}{RESET}", segment.text);
        } else {
            out.push_str(&segment.text);
        }
    }
    out
}

/// Renders the whole page to a string.
#[must_use]
pub fn render_page(vm: &PageViewModel) -> String {
    let mut out = String::new();

    if vm.nav.menu_open {
        out.push_str("[menu]\n");
    }
    if vm.nav.lifestyle_open {
        for (label, path) in &vm.nav.lifestyle_links {
            let _ = writeln!(out, "  {label} -> {path}");
        }
    }

    render_search_panel(&mut out, &vm.search);

    if let Some(post) = &vm.post {
        render_post(&mut out, post);
    }

    if let Some(status) = &vm.newsletter_status {
        let _ = writeln!(out, "newsletter: {status}");
    }
    out
}

fn render_search_panel(out: &mut String, panel: &SearchPanelView) {
    match panel {
        SearchPanelView::Hidden => {}
        SearchPanelView::Loading => out.push_str("search: ...\n"),
        SearchPanelView::NoResults { message } => {
            let _ = writeln!(out, "search: {message}");
        }
        SearchPanelView::Results { items, view_all } => {
            for (idx, item) in items.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{:>2}. {}  [{}] {}",
                    idx + 1,
                    render_segments(&item.title),
                    item.category,
                    item.date
                );
            }
            let _ = writeln!(out, "    View all results -> {view_all}");
        }
    }
}

fn render_post(out: &mut String, post: &PostPageView) {
    match post {
        PostPageView::Loading => out.push_str("loading post...\n"),
        PostPageView::NotFound => out.push_str("Post Not Found\n"),
        PostPageView::Unavailable { message } => {
            let _ = writeln!(out, "Post unavailable: {message}");
        }
        PostPageView::Loaded(body) => {
            let _ = writeln!(out, "{} [{}]", body.title, body.category);
            let _ = writeln!(
                out,
                "by {} on {} | {} views | {} comments",
                body.author, body.date, body.views, body.comment_count
            );
            if !body.content.is_empty() {
                let _ = writeln!(out, "\n{}\n", body.content);
            }
            let _ = writeln!(out, "share: {}", body.share.twitter);
            if !body.related.is_empty() {
                out.push_str("related:\n");
                for related in &body.related {
                    let _ = writeln!(out, "  {} -> {}", related.title, related.route);
                }
            }
            for comment in &body.comments {
                let _ = writeln!(out, "  {} ({}): {}", comment.name, comment.date, comment.body);
            }
            if !body.submit_enabled {
                out.push_str("  submitting comment...\n");
            }
        }
    }
}

/// Renders a category listing.
#[must_use]
pub fn render_category(view: &CategoryPageView) -> String {
    let mut out = format!("{}\n", view.heading);
    if let Some(message) = &view.empty_message {
        let _ = writeln!(out, "{message}");
    }
    for post in &view.posts {
        let _ = writeln!(out, "  {} ({})", post.title, post.id);
    }
    out
}

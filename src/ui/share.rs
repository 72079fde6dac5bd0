//! Social share links and copy-link feedback for the post page.

use std::time::{Duration, Instant};

pub const DEFAULT_SHARE_TITLE: &str = "Check out this post";

/// How long the "Copied!" confirmation stays visible.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

/// Outbound share URLs for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    pub page_url: String,
    pub facebook: String,
    pub twitter: String,
    pub linkedin: String,
}

impl ShareLinks {
    /// Builds the share URLs for `page_url`, falling back to a generic title.
    #[must_use]
    pub fn new(page_url: &str, title: Option<&str>) -> Self {
        let url = urlencoding::encode(page_url);
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_SHARE_TITLE);

        Self {
            page_url: page_url.to_string(),
            facebook: format!("https://www.facebook.com/sharer/sharer.php?u={url}"),
            twitter: format!(
                "https://twitter.com/intent/tweet?url={url}&text={}",
                urlencoding::encode(title)
            ),
            linkedin: format!("https://www.linkedin.com/sharing/share-offsite/?url={url}"),
        }
    }
}

/// Tracks the transient "Copied!" confirmation after copying a link.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyFeedback {
    copied_at: Option<Instant>,
}

impl CopyFeedback {
    pub fn mark_copied(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    #[must_use]
    pub fn is_showing(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < COPY_FEEDBACK)
    }

    #[must_use]
    pub fn label(&self, now: Instant) -> &'static str {
        if self.is_showing(now) {
            "Copied!"
        } else {
            "Copy link"
        }
    }
}

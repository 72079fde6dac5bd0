//! Footer newsletter signup.

use super::Action;
use crate::domain::{Result, ShopError};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const SUBSCRIBING: &str = "Subscribing...";
pub const SUBSCRIBED: &str = "Thank you for subscribing!";
pub const SUBSCRIBE_FAILED: &str = "Subscription failed. Please try again.";

/// Returns `true` if `email` has the `local@domain.tld` shape the form accepts.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubscribeStatus {
    #[default]
    Idle,
    Invalid,
    Subscribing,
    Subscribed,
    Failed(String),
}

impl SubscribeStatus {
    /// Status line shown under the form.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Invalid => Some(INVALID_EMAIL),
            Self::Subscribing => Some(SUBSCRIBING),
            Self::Subscribed => Some(SUBSCRIBED),
            Self::Failed(message) => Some(message),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Newsletter {
    email: String,
    status: SubscribeStatus,
}

impl Newsletter {
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub const fn status(&self) -> &SubscribeStatus {
        &self.status
    }

    pub fn on_email_changed(&mut self, email: &str) {
        self.email = email.to_string();
    }

    /// Validates the address and, if it passes, requests the subscription.
    pub fn on_submit(&mut self) -> Vec<Action> {
        if self.status == SubscribeStatus::Subscribing {
            return vec![];
        }
        if !is_valid_email(&self.email) {
            tracing::debug!(email = %self.email, "rejected newsletter address");
            self.status = SubscribeStatus::Invalid;
            return vec![];
        }
        self.status = SubscribeStatus::Subscribing;
        vec![Action::Subscribe {
            email: self.email.clone(),
        }]
    }

    pub fn on_completed(&mut self, outcome: Result<Option<String>>) {
        match outcome {
            Ok(_) => {
                self.status = SubscribeStatus::Subscribed;
                self.email.clear();
            }
            Err(e) => {
                tracing::warn!(error = %e, "newsletter subscription failed");
                self.status = SubscribeStatus::Failed(failure_message(&e));
            }
        }
    }
}

fn failure_message(err: &ShopError) -> String {
    err.server_message().unwrap_or(SUBSCRIBE_FAILED).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn invalid_address_sends_nothing() {
        let mut form = Newsletter::default();
        form.on_email_changed("not-an-email");
        assert!(form.on_submit().is_empty());
        assert_eq!(form.status().message(), Some(INVALID_EMAIL));
    }

    #[test]
    fn valid_address_issues_one_request() {
        let mut form = Newsletter::default();
        form.on_email_changed("a@b.com");
        assert_eq!(
            form.on_submit(),
            vec![Action::Subscribe {
                email: "a@b.com".into()
            }]
        );
        assert_eq!(form.status(), &SubscribeStatus::Subscribing);
        assert!(form.on_submit().is_empty(), "second submit while in flight");

        form.on_completed(Ok(None));
        assert_eq!(form.status().message(), Some(SUBSCRIBED));
        assert_eq!(form.email(), "");
    }

    #[test]
    fn failure_prefers_server_message() {
        let mut form = Newsletter::default();
        form.on_email_changed("a@b.com");
        form.on_submit();
        form.on_completed(Err(ShopError::Server {
            status: 409,
            message: Some("Already subscribed".into()),
        }));
        assert_eq!(form.status().message(), Some("Already subscribed"));
        assert_eq!(form.email(), "a@b.com");

        form.on_submit();
        form.on_completed(Err(ShopError::Timeout(std::time::Duration::from_secs(8))));
        assert_eq!(form.status().message(), Some(SUBSCRIBE_FAILED));
    }
}

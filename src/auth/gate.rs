//! Route gate for the admin, user and auth areas.

use serde::{Deserialize, Serialize};

pub const LOGIN_PATH: &str = "/auth/login";
pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
pub const USER_DASHBOARD: &str = "/user/dashboard";

/// Identity claims carried by a verified session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub role: String,
}

impl Claims {
    /// Admin requires both the `admin` role and the configured admin address.
    #[must_use]
    pub fn is_admin(&self, admin_email: Option<&str>) -> bool {
        self.role == "admin" && admin_email.is_some_and(|admin| admin == self.email)
    }
}

/// Verifies an opaque session token issued by the identity provider.
pub trait TokenVerifier {
    /// Returns the claims for a valid token, `None` otherwise.
    fn verify(&self, token: &str) -> Option<Claims>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Next,
    Redirect(String),
}

/// Decides whether a request for `path` proceeds or is redirected.
#[must_use]
pub fn gate(path: &str, claims: Option<&Claims>, admin_email: Option<&str>) -> GateDecision {
    let is_admin = claims.is_some_and(|c| c.is_admin(admin_email));

    let redirect = if path.starts_with("/admin") {
        match claims {
            None => Some(LOGIN_PATH),
            Some(_) if !is_admin => Some("/"),
            Some(_) => None,
        }
    } else if path.starts_with("/user") {
        claims.is_none().then_some(LOGIN_PATH)
    } else if path.starts_with("/auth") {
        claims.map(|_| if is_admin { ADMIN_DASHBOARD } else { USER_DASHBOARD })
    } else {
        None
    };

    match redirect {
        Some(target) => {
            tracing::debug!(path, target, authenticated = claims.is_some(), "gate redirect");
            GateDecision::Redirect(target.to_string())
        }
        None => GateDecision::Next,
    }
}

/// Verifies `token` (if any) and applies [`gate`].
pub fn authorize(
    path: &str,
    token: Option<&str>,
    verifier: &dyn TokenVerifier,
    admin_email: Option<&str>,
) -> GateDecision {
    let claims = token.and_then(|t| verifier.verify(t));
    gate(path, claims.as_ref(), admin_email)
}

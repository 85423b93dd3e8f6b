//! Admin session handling.
//!
//! The session is the presence of a fixed cookie name/value pair, nothing
//! more: no signature, no server-side state. `Max-Age` is the only expiry,
//! enforced client-side.

use axum::http::{header, HeaderMap};

pub const SESSION_COOKIE: &str = "admin_session";
pub const SESSION_AUTHENTICATED: &str = "1";

/// 7 days.
pub const SESSION_MAX_AGE_SECS: u32 = 604_800;

/// Decides whether a request carries a valid admin session.
pub trait SessionValidator: Send + Sync {
    fn is_authorized(&self, headers: &HeaderMap) -> bool;
}

/// Production validator: looks for `admin_session=1` in the Cookie header.
pub struct CookieSession;

impl SessionValidator for CookieSession {
    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        let cookie_header = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        has_admin_session(cookie_header)
    }
}

/// Pure predicate over the raw Cookie header: true iff a semicolon-delimited
/// segment's trimmed name is the session cookie and its value is the
/// authenticated sentinel.
pub fn has_admin_session(cookie_header: &str) -> bool {
    cookie_header.split(';').any(|part| {
        let mut segments = part.trim().split('=');
        segments.next() == Some(SESSION_COOKIE)
            && segments.next() == Some(SESSION_AUTHENTICATED)
    })
}

/// The Set-Cookie value issued on successful login.
pub fn session_cookie() -> String {
    format!(
        "{SESSION_COOKIE}={SESSION_AUTHENTICATED}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={SESSION_MAX_AGE_SECS}"
    )
}

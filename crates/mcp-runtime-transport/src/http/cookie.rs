//! The session cookie: set on every response that establishes or touches a
//! session, so a browser-hosted client can rely on cookie-based
//! correlation without having to thread the session id through JS itself.

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Cookie name carrying the session id.
pub const SESSION_COOKIE_NAME: &str = "mcp_session_id";

/// Build the `Set-Cookie` value for a session id: secure, http-only,
/// `SameSite=Lax` (not `Strict`, since the 2024 profile's message path may
/// be posted cross-origin by a client library rather than navigated to).
#[must_use]
pub fn session_cookie(session_id: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, session_id.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_is_http_only_and_secure() {
        let cookie = session_cookie("abc123");
        assert_eq!(cookie.value(), "abc123");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
    }
}

// ============================================================================
// Session Cookie Module
// ============================================================================
//
// The backend session token lives client-side in an HTTP-only cookie. This
// module owns the cookie's wire form: Set-Cookie values for establishing and
// expiring a session, and reading the token back from the Cookie header.
//
// Attributes: HttpOnly always, Path=/, SameSite=Lax (the cookie must survive
// top-level navigations to locale pages), Secure when configured, Max-Age
// from the configured TTL.
// ============================================================================

use axum::http::{HeaderMap, HeaderValue};

use crate::config::{CookieConfig, SECONDS_PER_DAY};
use crate::error::AppResult;

/// Build the Set-Cookie value that stores a fresh session token
pub fn build_session_cookie(config: &CookieConfig, token: &str) -> AppResult<HeaderValue> {
    let max_age = config.ttl_days * SECONDS_PER_DAY;
    let cookie_value = if config.secure {
        format!(
            "{}={}; SameSite=Lax; Secure; HttpOnly; Path=/; Max-Age={}",
            config.name, token, max_age
        )
    } else {
        format!(
            "{}={}; SameSite=Lax; HttpOnly; Path=/; Max-Age={}",
            config.name, token, max_age
        )
    };

    Ok(HeaderValue::from_str(&cookie_value)?)
}

/// Build the Set-Cookie value that expires the session cookie
pub fn build_delete_cookie(config: &CookieConfig) -> AppResult<HeaderValue> {
    let cookie_value = format!(
        "{}=; SameSite=Lax; HttpOnly; Path=/; Max-Age=0",
        config.name
    );

    Ok(HeaderValue::from_str(&cookie_value)?)
}

/// Read the session token from the request's Cookie header
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let cookies = headers.get("cookie").and_then(|v| v.to_str().ok())?;

    for cookie in cookies.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(&format!("{}=", cookie_name)) {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    None
}

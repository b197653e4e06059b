//! Cookie parsing and `Set-Cookie` builders.
//!
//! The API issues two cookies: the session token (`token`, HttpOnly) and
//! the CSRF signature (`csrf_token`, readable by the page so the client
//! can be simple). Both are `SameSite=Strict` and scoped to `/`.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Session-token cookie name.
pub const TOKEN_COOKIE: &str = "token";
/// CSRF-signature cookie name.
pub const CSRF_COOKIE: &str = "csrf_token";

/// Return a named cookie's value from the request headers, if present.
///
/// Handles multiple `Cookie` headers and multiple `name=value` pairs per
/// header. The value is returned as sent; `=` inside a value (JWT
/// padding) is preserved.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value carrying a fresh session token.
pub fn auth_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{TOKEN_COOKIE}={token}; Max-Age={max_age_secs}; Path=/; HttpOnly; SameSite=Strict")
}

/// `Set-Cookie` value that expires the session token immediately.
pub fn clear_auth_cookie() -> String {
    format!("{TOKEN_COOKIE}=; Max-Age=0; Path=/; HttpOnly; SameSite=Strict")
}

/// `Set-Cookie` value carrying the CSRF signature.
///
/// Deliberately not HttpOnly: the double-submit scheme does not rely on
/// hiding the signature from the page's own scripts, only on other
/// origins being unable to read it.
pub fn csrf_cookie(signature: &str) -> String {
    format!("{CSRF_COOKIE}={signature}; Path=/; SameSite=Strict")
}

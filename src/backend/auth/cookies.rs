/**
 * Session Cookies
 *
 * Both tokens are mirrored into `httpOnly` cookies on login and refresh, and
 * removed again on logout. `Secure` follows `COOKIE_SECURE` so the flow also
 * works over plain HTTP during local development.
 */

use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::backend::auth::sessions::TokenPair;

pub const ACCESS_COOKIE: &str = "accessToken";
pub const REFRESH_COOKIE: &str = "refreshToken";

fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .path("/")
        .build()
}

/// Set both token cookies
pub fn with_session(jar: CookieJar, pair: &TokenPair, secure: bool) -> CookieJar {
    jar.add(session_cookie(ACCESS_COOKIE, pair.access_token.clone(), secure))
        .add(session_cookie(REFRESH_COOKIE, pair.refresh_token.clone(), secure))
}

/// Expire both token cookies
///
/// Removal cookies are always emitted, even when the request carried its
/// token in the `Authorization` header instead of a cookie.
pub fn clear_session(jar: CookieJar, secure: bool) -> CookieJar {
    [ACCESS_COOKIE, REFRESH_COOKIE]
        .into_iter()
        .fold(jar, |jar, name| {
            let mut cookie = session_cookie(name, String::new(), secure);
            cookie.make_removal();
            jar.add(cookie)
        })
}

/// Non-empty value of a cookie
pub fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|c| c.value().trim().to_string())
        .filter(|v| !v.is_empty())
}

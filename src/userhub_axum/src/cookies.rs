use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use userhub_adapters::TokenTransport;

use crate::state::AuthConfig;

/// Build the session cookie around a freshly issued token.
pub fn create_session_cookie(cookie_name: &str, token: String) -> Cookie<'static> {
    Cookie::build((cookie_name.to_owned(), token))
        .path("/") // apply cookie to all URLs on the server
        .http_only(true) // prevent JavaScript from accessing the cookie
        .secure(true)
        .same_site(SameSite::Lax) // send cookie with "same-site" requests, and with "cross-site" top-level navigations.
        .build()
}

pub fn create_removal_cookie(cookie_name: &str) -> Cookie<'static> {
    let mut cookie = create_session_cookie(cookie_name, String::new());
    cookie.make_removal();
    cookie
}

/// In cookie mode the token rides along as a Set-Cookie header; in bearer
/// mode the body is the only carrier and the jar is left untouched.
pub fn attach_session_token(auth: &AuthConfig, jar: CookieJar, token: &str) -> CookieJar {
    match auth.transport {
        TokenTransport::Cookie => {
            jar.add(create_session_cookie(&auth.cookie_name, token.to_owned()))
        }
        TokenTransport::Bearer => jar,
    }
}

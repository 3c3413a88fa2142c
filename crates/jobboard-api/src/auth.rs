//! Admin session cookie.
//!
//! Logging in with the admin password sets a marker cookie; every admin
//! route checks for it. There is no user model behind this, it gates a
//! single shared panel.

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::error::ApiError;

pub const ADMIN_COOKIE_NAME: &str = "wts_admin_auth";

const SESSION_HOURS: i64 = 12;

pub fn is_admin(jar: &CookieJar) -> bool {
    jar.get(ADMIN_COOKIE_NAME).map(|c| c.value()) == Some("1")
}

pub fn require_admin(jar: &CookieJar) -> Result<(), ApiError> {
    if is_admin(jar) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("Unauthorized.".to_string()))
    }
}

/// The session cookie set after a successful login.
pub fn session_cookie() -> Cookie<'static> {
    Cookie::build((ADMIN_COOKIE_NAME, "1"))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(SESSION_HOURS))
        .build()
}

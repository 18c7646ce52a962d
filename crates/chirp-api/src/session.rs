//! Cookie-backed login sessions.
//!
//! The session is a signed JWT carried in an HttpOnly cookie. This module is
//! the only place that touches the token mechanics: `establish` sets the
//! cookie, `current` decodes it, `clear` removes it.

use anyhow::Result;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use chirp_db::models::UserRow;
use chirp_types::models::Claims;

pub const SESSION_COOKIE: &str = "chirp_session";

const SESSION_DAYS: i64 = 30;

/// Log the given user in: encode their identity into a fresh session cookie.
pub fn establish(jar: CookieJar, secret: &str, user: &UserRow) -> Result<CookieJar> {
    let sub: Uuid = user.id.parse()?;
    let claims = Claims {
        sub,
        handle: user.user_handle.clone(),
        exp: (chrono::Utc::now() + chrono::Duration::days(SESSION_DAYS)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok(jar.add(cookie))
}

/// The identity of the caller, if the request carries a valid session cookie.
pub fn current(jar: &CookieJar, secret: &str) -> Option<Claims> {
    let token = jar.get(SESSION_COOKIE)?.value().to_owned();

    decode::<Claims>(
        &token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

/// Tear the session down. Succeeds whether or not one exists.
pub fn clear(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build())
}

//! One-shot flash messages, carried across a redirect in a short-lived
//! cookie. The value is base64-encoded so message text never has to be
//! cookie-safe.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;

pub const FLASH_COOKIE: &str = "chirp_flash";

pub fn set(jar: CookieJar, message: &str) -> CookieJar {
    let cookie = Cookie::build((FLASH_COOKIE, B64.encode(message)))
        .path("/")
        .build();
    jar.add(cookie)
}

/// Read and consume the pending flash message, if any.
pub fn take(jar: CookieJar) -> (CookieJar, Option<String>) {
    match jar.get(FLASH_COOKIE) {
        Some(cookie) => {
            let message = B64
                .decode(cookie.value())
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok());
            let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/").build());
            (jar, message)
        }
        None => (jar, None),
    }
}

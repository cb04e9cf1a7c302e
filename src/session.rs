use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::{Cookie, Key};

const SESSION_COOKIE: &str = "session";
const FLASH_COOKIE: &str = "flash";

/// Derives the cookie signing key from the configured secret.
pub fn signing_key(secret: &str) -> anyhow::Result<Key> {
    anyhow::ensure!(
        secret.len() >= 32,
        "secret_key must be at least 32 bytes long"
    );
    Ok(Key::derive_from(secret.as_bytes()))
}

fn persistent(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .build()
}

/// Establishes the session, issuing a signed cookie holding the user id.
pub fn login(jar: SignedCookieJar, user_id: i64) -> SignedCookieJar {
    jar.add(persistent(SESSION_COOKIE, user_id.to_string()))
}

/// Invalidates the current session.
pub fn logout(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build())
}

/// The user id carried by the session cookie, if any. A cookie that fails
/// signature verification is simply absent from the jar.
pub fn user_id(jar: &SignedCookieJar) -> Option<i64> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| cookie.value().parse().ok())
}

/// Queues a one-shot notice shown on the next rendered page.
pub fn flash(jar: SignedCookieJar, message: &str) -> SignedCookieJar {
    jar.add(persistent(FLASH_COOKIE, message.to_string()))
}

/// Consumes the pending flash message, removing it from the jar.
pub fn take_flash(jar: SignedCookieJar) -> (SignedCookieJar, Option<String>) {
    match jar.get(FLASH_COOKIE) {
        Some(cookie) => {
            let message = cookie.value().to_string();
            let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/").build());
            (jar, Some(message))
        }
        None => (jar, None),
    }
}

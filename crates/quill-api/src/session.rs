//! The session is a signed cookie holding the acting user's id: created on
//! login, read on every request, removed on logout. A tampered signature
//! fails verification in the jar, so the session resolves to anonymous.

use axum_extra::extract::cookie::{Cookie, Key, SignedCookieJar};
use sha2::{Digest, Sha512};

const SESSION_COOKIE: &str = "session";

/// Derives the cookie signing key from the configured secret. SHA-512
/// stretches the secret to the 64 bytes the key requires, so short
/// development secrets like `dev` still work.
pub fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// The user id stored in the session, if any.
pub fn user_id(jar: &SignedCookieJar) -> Option<i64> {
    jar.get(SESSION_COOKIE)?.value().parse().ok()
}

/// Binds a new session to `user_id`.
pub fn log_in(jar: SignedCookieJar, user_id: i64) -> SignedCookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, user_id.to_string()))
        .path("/")
        .http_only(true)
        .build();
    jar.add(cookie)
}

/// Clears the session. Idempotent; removing an absent cookie is a no-op.
pub fn log_out(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build())
}

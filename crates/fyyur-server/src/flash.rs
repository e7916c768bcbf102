//! One-shot notification messages carried between requests.
//!
//! Pending messages live in a signed cookie. A write handler pushes a
//! message before redirecting; the next page render takes every pending
//! message and clears the cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "fyyur_flash";

/// Undelivered messages expire after this long.
const FLASH_TTL_MINUTES: i64 = 10;

#[derive(Debug, Serialize, Deserialize)]
struct FlashClaims {
    messages: Vec<String>,
    exp: i64,
}

pub fn encode_messages(
    messages: &[String],
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = FlashClaims {
        messages: messages.to_vec(),
        exp: (Utc::now() + Duration::minutes(FLASH_TTL_MINUTES)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify and unpack a flash token.
pub fn decode_messages(
    token: &str,
    secret: &str,
) -> Result<Vec<String>, jsonwebtoken::errors::Error> {
    let data = decode::<FlashClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims.messages)
}

fn pending(jar: &CookieJar, secret: &str) -> Vec<String> {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return Vec::new();
    };
    match decode_messages(cookie.value(), secret) {
        Ok(messages) => messages,
        Err(e) => {
            tracing::debug!(error = %e, "discarding unreadable flash cookie");
            Vec::new()
        }
    }
}

/// Queue `message` for the next rendered page.
pub fn push(jar: CookieJar, secret: &str, message: impl Into<String>) -> CookieJar {
    let mut messages = pending(&jar, secret);
    messages.push(message.into());
    match encode_messages(&messages, secret) {
        Ok(token) => jar.add(
            Cookie::build((FLASH_COOKIE, token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "failed to sign flash message");
            jar
        }
    }
}

/// Drain every pending message, clearing the cookie.
pub fn take(jar: CookieJar, secret: &str) -> (CookieJar, Vec<String>) {
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, Vec::new());
    }
    let messages = pending(&jar, secret);
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), messages)
}

//! Session token management.
//!
//! ARCHITECTURE
//! ============
//! A session is a capability token: `base64url(claims JSON)` + `.` +
//! `hex(HMAC-SHA256 tag)`, sealed with a server-held key and carried in a
//! single HTTP-only cookie. Verification is local — there is no session
//! store and no backend round-trip on ordinary requests.
//!
//! Any defect (missing, malformed, tampered, expired) reads as "no
//! session"; callers redirect to the login screen rather than erroring.

use std::fmt::Write;

use axum_extra::extract::cookie::{Cookie, SameSite};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use time::{Duration, OffsetDateTime};

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const COOKIE_NAME: &str = "session";

/// Lifetime granted at login.
const ISSUE_TTL: Duration = Duration::days(7);
/// Lifetime granted on each refresh.
const RENEW_TTL: Duration = Duration::days(1);

/// Verified session contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Backend-issued bearer token forwarded on authenticated API calls.
    pub access_token: String,
    /// Expiration instant baked into the sealed token.
    pub expires: OffsetDateTime,
}

#[derive(Serialize, Deserialize)]
struct Claims {
    access_token: String,
    /// Unix timestamp, seconds.
    exp: i64,
}

/// Seals and opens session tokens with a symmetric key.
#[derive(Clone)]
pub struct SessionSigner {
    key: Vec<u8>,
}

impl SessionSigner {
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        Self { key: secret.to_vec() }
    }

    /// Seal a fresh session for `access_token`, valid for seven days.
    /// Returns the token and its expiration for the cookie `Expires` attribute.
    #[must_use]
    pub fn issue(&self, access_token: &str) -> (String, OffsetDateTime) {
        let expires = OffsetDateTime::now_utc() + ISSUE_TTL;
        (self.seal(access_token, expires), expires)
    }

    /// Verify a token and return its contents, or `None` if it is not
    /// trustworthy in any way. Never returns a partially-trusted session.
    #[must_use]
    pub fn open(&self, token: &str) -> Option<Session> {
        let (payload, tag_hex) = token.rsplit_once('.')?;

        let expected = bytes_to_hex(&self.tag(payload.as_bytes()));
        if !constant_time_eq(expected.as_bytes(), tag_hex.as_bytes()) {
            tracing::warn!("session cookie failed signature verification");
            return None;
        }

        let claims_json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let claims: Claims = serde_json::from_slice(&claims_json).ok()?;
        let expires = OffsetDateTime::from_unix_timestamp(claims.exp).ok()?;
        if expires <= OffsetDateTime::now_utc() {
            return None;
        }

        Some(Session { access_token: claims.access_token, expires })
    }

    /// Re-seal a valid token with its expiration pushed one day out.
    /// `None` when there is nothing valid to renew.
    #[must_use]
    pub fn renew(&self, token: &str) -> Option<(String, OffsetDateTime)> {
        let session = self.open(token)?;
        let expires = OffsetDateTime::now_utc() + RENEW_TTL;
        Some((self.seal(&session.access_token, expires), expires))
    }

    fn seal(&self, access_token: &str, expires: OffsetDateTime) -> String {
        let claims = Claims { access_token: access_token.to_owned(), exp: expires.unix_timestamp() };
        let json = serde_json::to_vec(&claims).unwrap_or_default();
        let payload = URL_SAFE_NO_PAD.encode(json);
        let tag = bytes_to_hex(&self.tag(payload.as_bytes()));
        format!("{payload}.{tag}")
    }

    fn tag(&self, message: &[u8]) -> Vec<u8> {
        // HMAC-SHA256 accepts keys of any length, so this cannot fail.
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any size");
        mac.update(message);
        mac.finalize().into_bytes().to_vec()
    }
}

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Constant-time comparison to prevent timing attacks on the tag.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

// =============================================================================
// COOKIE BUILDERS
// =============================================================================

/// Build the session cookie: HttpOnly, Path=/, SameSite=Lax, Expires from
/// the sealed payload.
#[must_use]
pub fn session_cookie(token: String, expires: OffsetDateTime, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .expires(expires)
        .build()
}

/// Build the cookie that deletes the session.
#[must_use]
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

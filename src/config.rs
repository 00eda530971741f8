//! Startup configuration.
//!
//! DESIGN
//! ======
//! The environment is read exactly once, in `Config::from_env` at startup.
//! Everything downstream receives the values through `AppState` — handlers
//! and services never touch `std::env` themselves.

use rand::Rng;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Immutable service configuration, built once in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the commerce backend REST API, no trailing slash.
    pub api_url: String,
    /// Public URL this panel is served from. Drives the cookie `Secure` flag.
    pub public_url: String,
    /// Listen port.
    pub port: u16,
    /// HMAC key for sealing session tokens.
    pub session_secret: Vec<u8>,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// A missing `SESSION_SECRET` yields a random ephemeral key: the panel
    /// still works, but every restart logs all admins out.
    #[must_use]
    pub fn from_env() -> Self {
        let api_url = trimmed_url(&env_string("API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()));
        let public_url = trimmed_url(&env_string("PUBLIC_URL").unwrap_or_default());
        let port = env_parse("PORT", DEFAULT_PORT);

        let session_secret = match env_string("SESSION_SECRET") {
            Some(secret) => secret.into_bytes(),
            None => {
                tracing::warn!("SESSION_SECRET not set - using an ephemeral key, sessions will not survive restarts");
                let bytes: [u8; 32] = rand::rng().random();
                bytes.to_vec()
            }
        };

        let cookie_secure = env_bool("COOKIE_SECURE").unwrap_or_else(|| public_url.starts_with("https://"));

        Self { api_url, public_url, port, session_secret, cookie_secure }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

/// Strip the trailing slash so path joins stay predictable.
pub(crate) fn trimmed_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

//! Authorization for the generation trigger.

use axum::http::HeaderMap;
use tracing::warn;

use crate::config::Config;
use crate::hashing::fingerprint;

/// Header carrying the client address behind a proxy.
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Decides whether a request may run the daily generation.
///
/// Open when invoked by the trusted scheduler or in development mode; otherwise the
/// request must present `Authorization: Bearer <secret>`.
#[derive(Clone)]
pub struct GenerateGate {
    cron_trigger: bool,
    development: bool,
    secret_digest: Option<blake3::Hash>,
}

impl std::fmt::Debug for GenerateGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateGate")
            .field("cron_trigger", &self.cron_trigger)
            .field("development", &self.development)
            .field("has_secret", &self.secret_digest.is_some())
            .finish()
    }
}

impl GenerateGate {
    pub fn new(cron_trigger: bool, development: bool, secret: Option<&str>) -> Self {
        Self {
            cron_trigger,
            development,
            secret_digest: secret
                .filter(|s| !s.is_empty())
                .map(|s| blake3::hash(s.as_bytes())),
        }
    }

    /// Rejects everything except a matching bearer token.
    pub fn secret_only(secret: &str) -> Self {
        Self::new(false, false, Some(secret))
    }

    pub fn is_open(&self) -> bool {
        self.cron_trigger || self.development
    }

    pub fn authorize(&self, headers: &HeaderMap) -> bool {
        if self.is_open() {
            return true;
        }

        let Some(expected) = self.secret_digest else {
            return false;
        };

        // `blake3::Hash` equality is constant-time.
        bearer_token(headers)
            .map(|token| blake3::hash(token.as_bytes()) == expected)
            .unwrap_or(false)
    }

    /// Logs a rejected attempt without recording the raw client address.
    pub fn log_rejection(&self, headers: &HeaderMap) {
        let client = headers
            .get(FORWARDED_FOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        warn!(
            client_hash = %fingerprint(client),
            "Unauthorized daily generation attempt"
        );
    }
}

impl From<&Config> for GenerateGate {
    fn from(config: &Config) -> Self {
        Self::new(
            config.cron_trigger,
            config.development,
            config.cron_secret.as_deref(),
        )
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|val| val.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

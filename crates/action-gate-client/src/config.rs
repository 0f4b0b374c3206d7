// crates/action-gate-client/src/config.rs
// ============================================================================
// Module: Client Configuration
// Description: Validated, immutable configuration for the gate client.
// Purpose: Provide strict, fail-closed construction-time validation.
// Dependencies: serde, thiserror, url
// ============================================================================

//! ## Overview
//! Client configuration is established once before use and never mutated
//! afterwards; every operation borrows the same immutable snapshot, which
//! makes concurrent use safe by construction. Validation fails closed:
//! out-of-range timeouts, malformed base URLs, and oversized or
//! non-header-safe tokens are rejected before any request is sent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default connect timeout in milliseconds.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 1_000;
/// Minimum allowed connect timeout in milliseconds.
pub const MIN_CONNECT_TIMEOUT_MS: u64 = 100;
/// Maximum allowed connect timeout in milliseconds.
pub const MAX_CONNECT_TIMEOUT_MS: u64 = 10_000;
/// Default request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
/// Minimum allowed request timeout in milliseconds.
pub const MIN_REQUEST_TIMEOUT_MS: u64 = 500;
/// Maximum allowed request timeout in milliseconds.
pub const MAX_REQUEST_TIMEOUT_MS: u64 = 30_000;
/// Maximum length of an auth token.
pub const MAX_AUTH_TOKEN_LENGTH: usize = 256;
/// Default user agent for outbound requests.
pub const DEFAULT_USER_AGENT: &str = "action-gate/0.1";
/// Default maximum retry attempts for decision and audit calls.
pub const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;
/// Maximum allowed retry attempts.
pub const MAX_RETRY_MAX_ATTEMPTS: u32 = 10;
/// Default base retry delay in milliseconds.
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 100;
/// Default retry delay ceiling in milliseconds.
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 2_000;
/// Maximum allowed retry delay ceiling in milliseconds.
pub const MAX_RETRY_MAX_DELAY_MS: u64 = 60_000;
/// Maximum response body size accepted from the authority, in bytes.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;
/// Maximum number of actions accepted in one batch submission.
pub const MAX_BATCH_ACTIONS: usize = 64;

// ============================================================================
// SECTION: Retry Policy
// ============================================================================

/// Bounded exponential backoff policy for decision and audit calls.
///
/// # Invariants
/// - Applies only to calls with no side effects on the caller's systems;
///   executor invocations are never governed by this policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first (1 disables retries).
    pub max_attempts: u32,
    /// Base delay before the first retry, in milliseconds.
    pub base_delay_ms: u64,
    /// Ceiling applied to the exponentially growing delay, in milliseconds.
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    /// Returns the delay to sleep after the given 1-based failed attempt.
    ///
    /// The delay doubles per attempt and is truncated at `max_delay_ms`.
    #[must_use]
    pub fn delay_for(&self, failed_attempts: u32) -> Duration {
        let exponent = failed_attempts.saturating_sub(1).min(16);
        let scaled = self.base_delay_ms.saturating_mul(1_u64 << exponent);
        Duration::from_millis(scaled.min(self.max_delay_ms))
    }

    /// Validates the policy bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RetryOutOfRange`] when a field is outside its
    /// allowed range.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 || self.max_attempts > MAX_RETRY_MAX_ATTEMPTS {
            return Err(ConfigError::RetryOutOfRange {
                field: "max_attempts",
            });
        }
        if self.max_delay_ms > MAX_RETRY_MAX_DELAY_MS || self.base_delay_ms > self.max_delay_ms {
            return Err(ConfigError::RetryOutOfRange {
                field: "max_delay_ms",
            });
        }
        Ok(())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            max_delay_ms: DEFAULT_RETRY_MAX_DELAY_MS,
        }
    }
}

// ============================================================================
// SECTION: Client Configuration
// ============================================================================

/// Configuration for [`crate::GateServiceClient`].
///
/// # Invariants
/// - Immutable for the lifetime of the client built from it.
/// - `base_url` must parse as an absolute `http` or `https` URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the decision authority (scheme, host, optional port).
    pub base_url: String,
    /// Optional bearer token attached to every request.
    pub auth_token: Option<String>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// User agent string for outbound requests.
    pub user_agent: String,
    /// Retry policy for decision and audit calls.
    pub retry: RetryPolicy,
}

impl ClientConfig {
    /// Creates a configuration with defaults for everything but the URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    /// Attaches a bearer token.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Validates the configuration and returns the normalized base URL
    /// (scheme checked, trailing slashes trimmed).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any field fails validation.
    pub fn validated_base_url(&self) -> Result<String, ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|err| ConfigError::InvalidBaseUrl(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ConfigError::InvalidBaseUrl(format!("unsupported scheme: {scheme}")));
            }
        }
        if url.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl("host required".to_string()));
        }
        if let Some(token) = &self.auth_token {
            if token.is_empty() || token.len() > MAX_AUTH_TOKEN_LENGTH {
                return Err(ConfigError::InvalidAuthToken("token length out of range".to_string()));
            }
            if !token.chars().all(|ch| ch.is_ascii_graphic()) {
                return Err(ConfigError::InvalidAuthToken(
                    "token must be printable ascii".to_string(),
                ));
            }
        }
        validate_timeout("connect_timeout_ms", self.connect_timeout_ms, MIN_CONNECT_TIMEOUT_MS, MAX_CONNECT_TIMEOUT_MS)?;
        validate_timeout("request_timeout_ms", self.request_timeout_ms, MIN_REQUEST_TIMEOUT_MS, MAX_REQUEST_TIMEOUT_MS)?;
        self.retry.validate()?;
        Ok(self.base_url.trim_end_matches('/').to_string())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration validation failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Base URL is missing, malformed, or uses an unsupported scheme.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    /// Auth token is empty, oversized, or not header-safe.
    #[error("invalid auth token: {0}")]
    InvalidAuthToken(String),
    /// A timeout lies outside its allowed range.
    #[error("{field} must be between {min} and {max} ms (got {value})")]
    TimeoutOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Provided value in milliseconds.
        value: u64,
        /// Minimum allowed value in milliseconds.
        min: u64,
        /// Maximum allowed value in milliseconds.
        max: u64,
    },
    /// A retry policy field lies outside its allowed range.
    #[error("retry policy field {field} out of range")]
    RetryOutOfRange {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The underlying HTTP client could not be constructed.
    #[error("http client build failed: {0}")]
    HttpClient(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Checks a timeout value against its inclusive bounds.
const fn validate_timeout(
    field: &'static str,
    value: u64,
    min: u64,
    max: u64,
) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::TimeoutOutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

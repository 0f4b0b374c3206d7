// crates/action-gate-core/src/core/hashing.rs
// ============================================================================
// Module: Action Gate Canonical Hashing
// Description: RFC 8785 JSON canonicalization and request digest utilities.
// Purpose: Provide deterministic request hashes that bind decisions to requests.
// Dependencies: serde, serde_jcs, sha2, subtle
// ============================================================================

//! ## Overview
//! Action Gate hashes the canonical JSON form of a request using RFC 8785
//! (JCS) so that logically equal requests produce byte-identical digests
//! regardless of mapping key order or host platform. The digest is an
//! integrity binding, not an authentication code; no key material is mixed
//! in, and channel authentication is a transport concern.
//!
//! Digest comparison for verification purposes is constant-time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

// ============================================================================
// SECTION: Hash Algorithm
// ============================================================================

/// Supported hash algorithms for request digests.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// SHA-256 hashing (FIPS-friendly default).
    Sha256,
}

impl HashAlgorithm {
    /// Returns the fixed width of a well-formed hex digest for this algorithm.
    #[must_use]
    pub const fn digest_hex_len(self) -> usize {
        match self {
            Self::Sha256 => 64,
        }
    }
}

/// Default hash algorithm for Action Gate.
pub const DEFAULT_HASH_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha256;

// ============================================================================
// SECTION: Request Hash
// ============================================================================

/// Deterministic request digest encoded as lowercase hex.
///
/// # Invariants
/// - Serializes as a bare string; the wire form is the hex digest itself.
/// - Construction does not validate well-formedness; remote digests are
///   untrusted until checked with [`RequestHash::is_well_formed`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestHash(String);

impl RequestHash {
    /// Creates a request hash from an already-encoded digest string.
    #[must_use]
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Creates a request hash by hex-encoding raw digest bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(hex_encode(bytes))
    }

    /// Returns the digest as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the digest has the fixed width and lowercase hex
    /// alphabet required by `algorithm`.
    #[must_use]
    pub fn is_well_formed(&self, algorithm: HashAlgorithm) -> bool {
        self.0.len() == algorithm.digest_hex_len()
            && self.0.bytes().all(|byte| matches!(byte, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// Compares two digests in constant time.
    ///
    /// Length differences short-circuit to `false`; equal-length inputs are
    /// compared without data-dependent timing.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl fmt::Display for RequestHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for RequestHash {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RequestHash {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when computing canonical request hashes.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum HashError {
    /// JSON canonicalization failed (unsupported or non-deterministic value).
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
}

// ============================================================================
// SECTION: Hashing Helpers
// ============================================================================

/// Returns canonical JSON bytes for a serializable value using RFC 8785.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when the value cannot be
/// represented deterministically (for example non-finite floats).
pub fn canonical_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, HashError> {
    serde_jcs::to_vec(value).map_err(|err| HashError::Canonicalization(err.to_string()))
}

/// Hashes the canonical JSON form of a value using the provided algorithm.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn hash_canonical_json<T: Serialize + ?Sized>(
    algorithm: HashAlgorithm,
    value: &T,
) -> Result<RequestHash, HashError> {
    let bytes = canonical_json_bytes(value)?;
    Ok(hash_bytes(algorithm, &bytes))
}

/// Hashes raw bytes using the provided algorithm.
#[must_use]
pub fn hash_bytes(algorithm: HashAlgorithm, bytes: &[u8]) -> RequestHash {
    match algorithm {
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(bytes);
            let digest = hasher.finalize();
            RequestHash::from_bytes(&digest)
        }
    }
}

// ============================================================================
// SECTION: Hex Encoding
// ============================================================================

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

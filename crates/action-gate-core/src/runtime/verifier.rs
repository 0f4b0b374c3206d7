// crates/action-gate-core/src/runtime/verifier.rs
// ============================================================================
// Module: Decision Verifier
// Description: Integrity verification binding decisions to requests.
// Purpose: Prove the authority evaluated exactly the request being executed.
// Dependencies: crate::core::{decision, hashing}
// ============================================================================

//! ## Overview
//! Verification compares the locally computed request digest against the
//! digest embedded in the authority's decision. A match proves the
//! authority evaluated this exact request rather than a substituted or
//! stale one. Verification fails closed: an empty, malformed, or
//! mismatched digest never authorizes execution, regardless of the
//! decision's outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::Decision;
use crate::core::HashAlgorithm;
use crate::core::HashError;
use crate::core::RequestHash;
use crate::core::hashing::hash_canonical_json;

// ============================================================================
// SECTION: Verification
// ============================================================================

/// Returns true iff both digests are well-formed for `algorithm` and equal.
///
/// Equality is constant-time; well-formedness requires the algorithm's
/// fixed width and a lowercase hex alphabet on both sides.
#[must_use]
pub fn verify_request_hash(
    algorithm: HashAlgorithm,
    local: &RequestHash,
    remote: &RequestHash,
) -> bool {
    if !local.is_well_formed(algorithm) || !remote.is_well_formed(algorithm) {
        return false;
    }
    local.matches(remote)
}

/// Returns true iff the decision's embedded digest matches the local one.
#[must_use]
pub fn verify_decision(algorithm: HashAlgorithm, local: &RequestHash, decision: &Decision) -> bool {
    verify_request_hash(algorithm, local, &decision.request_hash)
}

/// Hashes `payload` and checks the result against an expected digest.
///
/// Standalone pre-verification surface for callers holding a digest from
/// elsewhere (a decision, a log line, another party).
///
/// # Errors
///
/// Returns [`HashError`] when the payload cannot be canonicalized.
pub fn verify_payload_hash<T: Serialize + ?Sized>(
    algorithm: HashAlgorithm,
    payload: &T,
    expected: &RequestHash,
) -> Result<bool, HashError> {
    let local = hash_canonical_json(algorithm, payload)?;
    Ok(verify_request_hash(algorithm, &local, expected))
}

// crates/action-gate-core/tests/verifier.rs
// ============================================================================
// Module: Decision Verifier Tests
// Description: Fail-closed behavior of request hash verification.
// ============================================================================
//! ## Overview
//! Ensures verification only succeeds on well-formed, equal digests and
//! fails closed on empty, truncated, uppercase, or mismatched input.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use action_gate_core::ActionRequest;
use action_gate_core::Decision;
use action_gate_core::HashAlgorithm;
use action_gate_core::Outcome;
use action_gate_core::RequestHash;
use action_gate_core::verify_decision;
use action_gate_core::verify_payload_hash;
use action_gate_core::verify_request_hash;
use serde_json::json;

/// Computes the digest of a representative request.
fn local_hash() -> RequestHash {
    ActionRequest::new("demo-agent", "http", "get", json!({"url": "https://example.com"}))
        .request_hash(HashAlgorithm::Sha256)
        .expect("local hash")
}

#[test]
fn equal_digests_verify() {
    let local = local_hash();
    let remote = RequestHash::new(local.as_str());
    assert!(verify_request_hash(HashAlgorithm::Sha256, &local, &remote));
}

#[test]
fn mismatched_digest_fails() {
    let local = local_hash();
    let mut flipped = local.as_str().to_string();
    let replacement = if flipped.starts_with('0') { "1" } else { "0" };
    flipped.replace_range(0..1, replacement);
    assert!(!verify_request_hash(HashAlgorithm::Sha256, &local, &RequestHash::new(flipped)));
}

#[test]
fn empty_digest_fails() {
    let local = local_hash();
    assert!(!verify_request_hash(HashAlgorithm::Sha256, &local, &RequestHash::new("")));
}

#[test]
fn truncated_digest_fails() {
    let local = local_hash();
    let truncated = RequestHash::new(&local.as_str()[..32]);
    assert!(!verify_request_hash(HashAlgorithm::Sha256, &local, &truncated));
}

#[test]
fn uppercase_digest_fails() {
    let local = local_hash();
    let uppercase = RequestHash::new(local.as_str().to_uppercase());
    assert!(!verify_request_hash(HashAlgorithm::Sha256, &local, &uppercase));
}

#[test]
fn non_hex_digest_of_correct_width_fails() {
    let local = local_hash();
    let bogus = RequestHash::new("z".repeat(HashAlgorithm::Sha256.digest_hex_len()));
    assert!(!verify_request_hash(HashAlgorithm::Sha256, &local, &bogus));
}

#[test]
fn payload_verification_recomputes_the_digest() {
    let payload =
        ActionRequest::new("demo-agent", "http", "get", json!({"url": "https://example.com"}));
    let hash = payload.request_hash(HashAlgorithm::Sha256).expect("payload hash");

    assert!(verify_payload_hash(HashAlgorithm::Sha256, &payload, &hash).expect("verify"));
    assert!(
        !verify_payload_hash(HashAlgorithm::Sha256, &payload, &RequestHash::new("deadbeef"))
            .expect("verify")
    );
}

#[test]
fn decision_digest_is_checked_against_local_digest() {
    let local = local_hash();
    let decision = Decision {
        outcome: Outcome::Execute,
        reason_code: "policy.allow".into(),
        request_hash: RequestHash::new(local.as_str()),
        policy_version: "policy-v1".into(),
        runtime_version: "runtime-v1".into(),
    };
    assert!(verify_decision(HashAlgorithm::Sha256, &local, &decision));

    let stale = Decision {
        request_hash: RequestHash::new("deadbeef"),
        ..decision
    };
    assert!(!verify_decision(HashAlgorithm::Sha256, &local, &stale));
}

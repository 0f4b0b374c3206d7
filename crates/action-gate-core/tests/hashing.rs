// crates/action-gate-core/tests/hashing.rs
// ============================================================================
// Module: Canonical Hashing Tests
// Description: Verifies RFC 8785 canonical request hashing behavior.
// ============================================================================
//! ## Overview
//! Ensures canonical request hashing is deterministic across key ordering
//! and numeric representation, sensitive to every field, and rejects
//! values that have no deterministic form.

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
use action_gate_core::HashAlgorithm;
use action_gate_core::hashing::HashError;
use action_gate_core::hashing::canonical_json_bytes;
use action_gate_core::hashing::hash_bytes;
use action_gate_core::hashing::hash_canonical_json;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

/// Builds the demo request used across determinism tests.
fn demo_request(params: Value) -> ActionRequest {
    ActionRequest::new("demo-agent", "http", "get", params)
        .with_context(json!({"source": "hashing_tests"}))
}

#[test]
fn request_hash_is_order_independent_for_params() {
    let mut forward = Map::new();
    forward.insert("url".to_string(), json!("https://api.example.com/data"));
    forward.insert("method".to_string(), json!("GET"));

    let mut reversed = Map::new();
    reversed.insert("method".to_string(), json!("GET"));
    reversed.insert("url".to_string(), json!("https://api.example.com/data"));

    let hash_a = demo_request(Value::Object(forward))
        .request_hash(HashAlgorithm::Sha256)
        .expect("hash a");
    let hash_b = demo_request(Value::Object(reversed))
        .request_hash(HashAlgorithm::Sha256)
        .expect("hash b");

    assert_eq!(hash_a, hash_b);
}

#[test]
fn request_hash_is_order_independent_for_nested_maps() {
    let hash_a = demo_request(json!({"outer": {"b": 2, "a": 1}, "list": [1, 2]}))
        .request_hash(HashAlgorithm::Sha256)
        .expect("hash a");
    let hash_b = demo_request(json!({"list": [1, 2], "outer": {"a": 1, "b": 2}}))
        .request_hash(HashAlgorithm::Sha256)
        .expect("hash b");

    assert_eq!(hash_a, hash_b);
}

#[test]
fn request_hash_normalizes_numeric_representation() {
    let hash_a = hash_canonical_json(HashAlgorithm::Sha256, &json!(1.0)).expect("hash a");
    let hash_b = hash_canonical_json(HashAlgorithm::Sha256, &json!(1)).expect("hash b");

    assert_eq!(hash_a, hash_b);
}

#[test]
fn request_hash_changes_when_any_field_changes() {
    let base = demo_request(json!({"url": "https://api.example.com/data"}));
    let base_hash = base.request_hash(HashAlgorithm::Sha256).expect("base hash");

    let mut other_agent = base.clone();
    other_agent.agent_id = "other-agent".into();
    let mut other_operation = base.clone();
    other_operation.operation = "post".into();
    let other_params = demo_request(json!({"url": "https://api.example.com/other"}));
    let other_context = base.clone().with_context(json!({"source": "elsewhere"}));

    for changed in [
        other_agent.request_hash(HashAlgorithm::Sha256).expect("agent hash"),
        other_operation.request_hash(HashAlgorithm::Sha256).expect("operation hash"),
        other_params.request_hash(HashAlgorithm::Sha256).expect("params hash"),
        other_context.request_hash(HashAlgorithm::Sha256).expect("context hash"),
    ] {
        assert_ne!(base_hash, changed);
    }
}

#[test]
fn request_hash_has_fixed_width_lowercase_hex_form() {
    let hash = demo_request(json!({"url": "https://api.example.com/data"}))
        .request_hash(HashAlgorithm::Sha256)
        .expect("hash");

    assert!(hash.is_well_formed(HashAlgorithm::Sha256));
    assert_eq!(hash.as_str().len(), HashAlgorithm::Sha256.digest_hex_len());
}

#[test]
fn hash_bytes_matches_known_sha256_vector() {
    let digest = hash_bytes(HashAlgorithm::Sha256, b"");
    assert_eq!(
        digest.as_str(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

/// Wrapper exposing a raw float to the canonicalizer.
#[derive(Serialize)]
struct FloatWrapper {
    /// Float payload under test.
    value: f64,
}

#[test]
fn canonicalization_rejects_nan() {
    let value = FloatWrapper {
        value: f64::NAN,
    };
    let err = hash_canonical_json(HashAlgorithm::Sha256, &value).unwrap_err();
    assert!(matches!(err, HashError::Canonicalization(_)));
}

#[test]
fn canonicalization_rejects_infinity() {
    let value = FloatWrapper {
        value: f64::INFINITY,
    };
    let err = hash_canonical_json(HashAlgorithm::Sha256, &value).unwrap_err();
    assert!(matches!(err, HashError::Canonicalization(_)));
}

#[test]
fn canonical_bytes_sort_keys_lexicographically() {
    let bytes =
        canonical_json_bytes(&json!({"b": 1, "a": {"d": 4, "c": 3}})).expect("canonical bytes");
    assert_eq!(bytes, br#"{"a":{"c":3,"d":4},"b":1}"#);
}

// crates/action-gate-core/tests/proptest_hashing.rs
// ============================================================================
// Module: Canonical Hashing Property Tests
// Description: Property-based determinism and sensitivity checks.
// ============================================================================
//! ## Overview
//! Samples random parameter maps to check that insertion order never
//! affects the request hash and that value changes always do.

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

use std::collections::BTreeMap;

use action_gate_core::ActionRequest;
use action_gate_core::hashing::DEFAULT_HASH_ALGORITHM;
use proptest::collection::btree_map;
use proptest::prelude::any;
use proptest::proptest;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

/// Builds a request whose params hold `entries` inserted in the given order.
fn request_with_entries<'a>(entries: impl Iterator<Item = (&'a String, &'a i64)>) -> ActionRequest {
    let mut params = Map::new();
    for (key, value) in entries {
        params.insert(key.clone(), json!(value));
    }
    ActionRequest::new("prop-agent", "http", "get", Value::Object(params))
}

proptest! {
    #[test]
    fn insertion_order_never_affects_the_hash(
        entries in btree_map(any::<String>(), any::<i64>(), 0..16)
    ) {
        let ascending = request_with_entries(entries.iter());
        let descending = request_with_entries(entries.iter().rev());

        let hash_a = ascending.request_hash(DEFAULT_HASH_ALGORITHM).unwrap();
        let hash_b = descending.request_hash(DEFAULT_HASH_ALGORITHM).unwrap();
        proptest::prop_assert_eq!(hash_a, hash_b);
    }

    #[test]
    fn changing_one_value_always_changes_the_hash(
        entries in btree_map(any::<String>(), any::<i64>(), 1..16),
        delta in 1..1_000i64
    ) {
        let base = request_with_entries(entries.iter());

        let mut changed_entries: BTreeMap<String, i64> = entries.clone();
        if let Some((first_key, first_value)) = entries.iter().next() {
            changed_entries.insert(first_key.clone(), first_value.wrapping_add(delta));
        }
        let changed = request_with_entries(changed_entries.iter());

        let hash_a = base.request_hash(DEFAULT_HASH_ALGORITHM).unwrap();
        let hash_b = changed.request_hash(DEFAULT_HASH_ALGORITHM).unwrap();
        proptest::prop_assert_ne!(hash_a, hash_b);
    }
}

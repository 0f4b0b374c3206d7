// crates/action-gate-client/examples/gated_execution.rs
// ============================================================================
// Module: Gated Execution Example
// Description: End-to-end gate run against a local decision authority.
// Purpose: Demonstrate decide, verify, and conditional execution.
// Dependencies: action-gate-client, action-gate-core, action-gate-executors
// ============================================================================

//! ## Overview
//! Runs actions through the execution gate against an authority listening
//! on 127.0.0.1:8000: an HTTP GET that policy typically allows, a shell
//! command that may be blocked, and a direct pre-check decision for a
//! payment refund. Also verifies the request digest locally before
//! submission. Start a local authority first; without one the decision
//! calls fail with a transport error.

use std::collections::BTreeSet;

use action_gate_client::ClientConfig;
use action_gate_client::GateServiceClient;
use action_gate_core::ActionRequest;
use action_gate_core::ExecutionGate;
use action_gate_core::Outcome;
use action_gate_core::hashing::DEFAULT_HASH_ALGORITHM;
use action_gate_core::verify_payload_hash;
use action_gate_executors::HttpExecutor;
use action_gate_executors::HttpExecutorConfig;
use action_gate_executors::ShellExecutor;
use action_gate_executors::ShellExecutorConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::new("http://127.0.0.1:8000");
    let client = GateServiceClient::new(config)?;
    let gate = ExecutionGate::new(client);

    // Gated HTTP GET; the executor only runs on a verified EXECUTE.
    let http_request = ActionRequest::new(
        "demo-agent",
        "http",
        "get",
        serde_json::json!({"url": "https://api.example.com/data"}),
    )
    .with_context(serde_json::json!({"source": "gated_execution_example"}));
    let http_executor = HttpExecutor::new(HttpExecutorConfig::default())?;
    let outcome = gate.run(&http_request, &http_executor).await?;
    assert_eq!(outcome.executed, outcome.outcome == Outcome::Execute && outcome.hash_verified);

    // Gated shell command; blocked outcomes carry the authority's reason.
    let shell_request = ActionRequest::new(
        "demo-agent",
        "shell",
        "run",
        serde_json::json!({"cmd": ["ls", "-la", "/tmp"]}),
    )
    .with_context(serde_json::json!({"source": "gated_execution_example"}));
    let shell_executor = ShellExecutor::new(ShellExecutorConfig {
        allowed_programs: BTreeSet::from(["ls".to_string()]),
        ..ShellExecutorConfig::default()
    });
    let shell_outcome = gate.run(&shell_request, &shell_executor).await?;
    if !shell_outcome.executed {
        let _ = (&shell_outcome.outcome, &shell_outcome.reason_code);
    }

    // Local digest verification before submission.
    let payload = ActionRequest::new(
        "demo-agent",
        "http",
        "post",
        serde_json::json!({"url": "https://api.example.com/webhook", "data": {"event": "test"}}),
    );
    let local_hash = payload.request_hash(DEFAULT_HASH_ALGORITHM)?;
    let decision = gate.service().decide(&payload).await?;
    let matches = verify_payload_hash(DEFAULT_HASH_ALGORITHM, &payload, &decision.request_hash)?;
    let _ = (local_hash, matches, decision.outcome);

    // Pre-check before committing to a side-effecting operation.
    let refund = ActionRequest::new(
        "demo-agent",
        "stripe",
        "refund",
        serde_json::json!({"amount": 100, "currency": "usd"}),
    );
    let precheck = gate.service().decide(&refund).await?;
    let _ = (precheck.outcome, precheck.reason_code, precheck.policy_version);

    Ok(())
}

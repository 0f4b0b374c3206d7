// crates/action-gate-client/examples/basic_submit.rs
// ============================================================================
// Module: Basic Submit Example
// Description: Minimal audit submission against a local authority.
// Purpose: Demonstrate the non-gating submission surface.
// Dependencies: action-gate-client, action-gate-core
// ============================================================================

//! ## Overview
//! Submits one action to the audit path of an authority listening on
//! 127.0.0.1:8000 and inspects the returned record. Submission is
//! observational only; it never authorizes execution.

use action_gate_client::ClientConfig;
use action_gate_client::GateServiceClient;
use action_gate_core::ActionRequest;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = GateServiceClient::new(ClientConfig::new("http://127.0.0.1:8000"))?;

    let request = ActionRequest::new(
        "example-agent",
        "http",
        "get",
        serde_json::json!({"url": "https://example.com"}),
    );
    let record = client.submit_action(&request).await?;
    let _ = (record.id, record.status, record.risk_level, record.decision);

    Ok(())
}

// crates/action-gate-core/tests/gate.rs
// ============================================================================
// Module: Execution Gate Tests
// Description: Non-bypassability and fail-closed behavior of the gate.
// ============================================================================
//! ## Overview
//! Exercises the gate against scripted in-memory decision services and
//! recording executors: execution happens iff the digest verifies and the
//! outcome is EXECUTE, transport errors propagate without fabricated
//! outcomes, and the audit path never influences gating.

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

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use action_gate_core::ActionRecord;
use action_gate_core::ActionRequest;
use action_gate_core::ActionStatus;
use action_gate_core::Decision;
use action_gate_core::DecisionService;
use action_gate_core::ExecutionError;
use action_gate_core::ExecutionGate;
use action_gate_core::ExecutionResult;
use action_gate_core::ExecutionStatus;
use action_gate_core::Executor;
use action_gate_core::GateError;
use action_gate_core::Outcome;
use action_gate_core::REASON_REQUEST_HASH_MISMATCH;
use action_gate_core::RequestHash;
use action_gate_core::ServiceError;
use action_gate_core::hashing::DEFAULT_HASH_ALGORITHM;
use async_trait::async_trait;
use serde_json::Value;
use serde_json::json;

/// Builds the request used by the concrete gate scenarios.
fn demo_request() -> ActionRequest {
    ActionRequest::new("demo-agent", "http", "get", json!({"url": "https://api.example.com/data"}))
}

/// Builds a decision whose digest matches `request`.
fn matching_decision(request: &ActionRequest, outcome: Outcome) -> Decision {
    Decision {
        outcome,
        reason_code: "policy.evaluated".into(),
        request_hash: request.request_hash(DEFAULT_HASH_ALGORITHM).expect("request hash"),
        policy_version: "policy-v1".into(),
        runtime_version: "runtime-v1".into(),
    }
}

/// Scripted decision service returning a fixed decision and counting calls.
struct ScriptedService {
    /// Decision handed to every `decide` call.
    decision: Decision,
    /// Number of `decide` calls observed.
    decide_calls: AtomicUsize,
    /// Number of `submit_action` calls observed.
    submit_calls: AtomicUsize,
}

impl ScriptedService {
    /// Creates a service that always returns `decision`.
    fn new(decision: Decision) -> Self {
        Self {
            decision,
            decide_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DecisionService for ScriptedService {
    async fn decide(&self, _request: &ActionRequest) -> Result<Decision, ServiceError> {
        self.decide_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.decision.clone())
    }

    async fn submit_action(&self, _request: &ActionRequest) -> Result<ActionRecord, ServiceError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        Ok(ActionRecord {
            id: "act-1".into(),
            status: ActionStatus::Completed,
            risk_level: None,
            decision: None,
            reason: None,
        })
    }
}

/// Decision service whose transport always fails.
struct UnreachableService;

#[async_trait]
impl DecisionService for UnreachableService {
    async fn decide(&self, _request: &ActionRequest) -> Result<Decision, ServiceError> {
        Err(ServiceError::Transport("connection refused".to_string()))
    }

    async fn submit_action(&self, _request: &ActionRequest) -> Result<ActionRecord, ServiceError> {
        Err(ServiceError::Transport("connection refused".to_string()))
    }
}

/// Executor recording invocations and returning a fixed payload.
struct RecordingExecutor {
    /// Number of invocations observed.
    calls: AtomicUsize,
}

impl RecordingExecutor {
    /// Creates an executor with a zeroed call counter.
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Executor for RecordingExecutor {
    async fn invoke(
        &self,
        _tool: &action_gate_core::ToolName,
        _operation: &action_gate_core::OperationName,
        _params: &Value,
        _context: &Value,
    ) -> Result<ExecutionResult, ExecutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ExecutionResult::success(json!({"status_code": 200})))
    }
}

/// Executor that always fails after being invoked.
struct FailingExecutor;

#[async_trait]
impl Executor for FailingExecutor {
    async fn invoke(
        &self,
        _tool: &action_gate_core::ToolName,
        _operation: &action_gate_core::OperationName,
        _params: &Value,
        _context: &Value,
    ) -> Result<ExecutionResult, ExecutionError> {
        Err(ExecutionError::Failed("target unavailable".to_string()))
    }
}

#[tokio::test]
async fn verified_execute_decision_runs_the_executor_once() {
    let request = demo_request();
    let gate = ExecutionGate::new(ScriptedService::new(matching_decision(&request, Outcome::Execute)));
    let executor = RecordingExecutor::new();

    let outcome = gate.run(&request, &executor).await.expect("gate outcome");

    assert_eq!(outcome.outcome, Outcome::Execute);
    assert!(outcome.hash_verified);
    assert!(outcome.executed);
    assert_eq!(executor.calls.load(Ordering::SeqCst), 1);
    let result = outcome.execution_result.expect("execution result");
    assert_eq!(result.status, ExecutionStatus::Success);
}

#[tokio::test]
async fn deny_decision_blocks_without_invoking_the_executor() {
    let request = demo_request();
    let gate = ExecutionGate::new(ScriptedService::new(matching_decision(&request, Outcome::Deny)));
    let executor = RecordingExecutor::new();

    let outcome = gate.run(&request, &executor).await.expect("gate outcome");

    assert_eq!(outcome.outcome, Outcome::Deny);
    assert!(outcome.hash_verified);
    assert!(!outcome.executed);
    assert!(outcome.execution_result.is_none());
    assert_eq!(executor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn halt_and_abstain_block_with_authority_reason_intact() {
    for blocked in [Outcome::Halt, Outcome::Abstain] {
        let request = demo_request();
        let gate = ExecutionGate::new(ScriptedService::new(matching_decision(&request, blocked)));
        let executor = RecordingExecutor::new();

        let outcome = gate.run(&request, &executor).await.expect("gate outcome");

        assert_eq!(outcome.outcome, blocked);
        assert_eq!(outcome.reason_code.as_str(), "policy.evaluated");
        assert!(!outcome.executed);
        assert_eq!(executor.calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn execute_decision_with_mismatched_digest_never_executes() {
    let request = demo_request();
    let mut decision = matching_decision(&request, Outcome::Execute);
    decision.request_hash = RequestHash::new("deadbeef");
    let gate = ExecutionGate::new(ScriptedService::new(decision));
    let executor = RecordingExecutor::new();

    let outcome = gate.run(&request, &executor).await.expect("gate outcome");

    assert!(!outcome.hash_verified);
    assert!(!outcome.executed);
    assert_eq!(outcome.reason_code.as_str(), REASON_REQUEST_HASH_MISMATCH);
    assert_eq!(executor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn transport_failure_propagates_without_fabricated_outcome() {
    let request = demo_request();
    let gate = ExecutionGate::new(UnreachableService);
    let executor = RecordingExecutor::new();

    let err = gate.run(&request, &executor).await.unwrap_err();

    assert!(matches!(err, GateError::Service(ServiceError::Transport(_))));
    assert_eq!(executor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn executor_failure_carries_decision_context() {
    let request = demo_request();
    let decision = matching_decision(&request, Outcome::Execute);
    let gate = ExecutionGate::new(ScriptedService::new(decision.clone()));

    let err = gate.run(&request, &FailingExecutor).await.unwrap_err();

    match err {
        GateError::Execution {
            decision: attributed,
            source,
        } => {
            assert_eq!(attributed, decision);
            assert!(matches!(source, ExecutionError::Failed(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn audit_submission_does_not_influence_gating() {
    let request = demo_request();
    let service = ScriptedService::new(matching_decision(&request, Outcome::Execute));
    let gate = ExecutionGate::new(service);
    let executor = RecordingExecutor::new();

    let record = gate.service().submit_action(&request).await.expect("audit record");
    assert_eq!(record.status, ActionStatus::Completed);

    let outcome = gate.run(&request, &executor).await.expect("gate outcome");

    assert!(outcome.executed);
    assert_eq!(gate.service().submit_calls.load(Ordering::SeqCst), 1);
    assert_eq!(gate.service().decide_calls.load(Ordering::SeqCst), 1);
}

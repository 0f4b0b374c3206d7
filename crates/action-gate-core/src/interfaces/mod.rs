// crates/action-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Action Gate Interfaces
// Description: Backend-agnostic interfaces for decisions and execution.
// Purpose: Define the contract surfaces used by the execution gate.
// Dependencies: crate::core, async-trait
// ============================================================================

//! ## Overview
//! Interfaces define how the gate integrates with the remote decision
//! authority and with caller-supplied executors without embedding
//! backend-specific details. Implementations must fail closed: a transport
//! or protocol failure is an error, never an implicit outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::core::ActionRecord;
use crate::core::ActionRequest;
use crate::core::Decision;
use crate::core::ExecutionError;
use crate::core::ExecutionResult;
use crate::core::OperationName;
use crate::core::ToolName;

// ============================================================================
// SECTION: Decision Service
// ============================================================================

/// Decision authority errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Never conflated with policy-level non-EXECUTE outcomes, which are
///   values carried inside a [`Decision`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was rejected locally before dispatch.
    #[error("request rejected before dispatch: {0}")]
    Request(String),
    /// The authority was unreachable or the connection failed.
    #[error("decision service transport error: {0}")]
    Transport(String),
    /// The authority answered with a non-success HTTP status.
    #[error("decision service returned status {status}: {message}")]
    Status {
        /// HTTP status code returned by the authority.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },
    /// The authority answered with a body the client cannot interpret.
    #[error("decision service returned an invalid response: {0}")]
    InvalidResponse(String),
    /// A polling deadline elapsed before the authority resolved the action.
    #[error("deadline of {timeout_ms} ms elapsed before resolution")]
    DeadlineExceeded {
        /// Deadline that elapsed, in milliseconds.
        timeout_ms: u64,
    },
}

impl ServiceError {
    /// Returns true when a retry of the same call may succeed.
    ///
    /// Only transport failures and server-side (5xx) statuses qualify;
    /// client errors and malformed responses are permanent for the call.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status {
                status, ..
            } => *status >= 500,
            Self::Request(_) | Self::InvalidResponse(_) | Self::DeadlineExceeded { .. } => false,
        }
    }
}

/// Remote decision authority surface used by the execution gate.
///
/// Implementations send the raw request fields, never a pre-computed hash:
/// the authority canonicalizes and hashes independently, which is what
/// makes the returned digest worth verifying.
#[async_trait]
pub trait DecisionService: Send + Sync {
    /// Obtains a decision for the proposed action.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] when the authority cannot be reached or
    /// answers outside the protocol.
    async fn decide(&self, request: &ActionRequest) -> Result<Decision, ServiceError>;

    /// Submits an already-executed or observed action for audit logging.
    ///
    /// This path is observational only; it carries no authority over
    /// execution and must not influence decisions for equivalent requests.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] when the authority cannot be reached or
    /// answers outside the protocol.
    async fn submit_action(&self, request: &ActionRequest) -> Result<ActionRecord, ServiceError>;
}

// ============================================================================
// SECTION: Executor
// ============================================================================

/// Caller-supplied capability that performs the real side-effecting action.
///
/// The gate treats implementations as opaque: it never inspects or branches
/// on which concrete kind an executor is, and it invokes `invoke` at most
/// once per run, only after a verified EXECUTE decision. Retry policy for
/// side-effecting operations belongs to the executor, not the gate.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Performs the action described by the request fields.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] when the action cannot be performed; the
    /// gate surfaces the failure together with the decision context.
    async fn invoke(
        &self,
        tool: &ToolName,
        operation: &OperationName,
        params: &Value,
        context: &Value,
    ) -> Result<ExecutionResult, ExecutionError>;
}

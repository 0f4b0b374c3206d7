// crates/action-gate-core/src/core/execution.rs
// ============================================================================
// Module: Execution Results
// Description: Results and errors produced by executor capabilities.
// Purpose: Provide an opaque result shape the gate passes through unchanged.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Executors return an [`ExecutionResult`] whose `details` payload is
//! executor-specific (HTTP status and body, process exit code and output,
//! and so on). The gate never inspects or branches on the payload; it is
//! folded read-only into the consolidated gate outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Execution Status
// ============================================================================

/// Coarse result status reported by an executor.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// The action ran and the executor considers it successful.
    Success,
    /// The action ran and the executor considers it failed.
    Failure,
}

// ============================================================================
// SECTION: Execution Result
// ============================================================================

/// Outcome of running an authorized action through an executor.
///
/// # Invariants
/// - `details` is executor-specific and opaque to the gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Coarse result status.
    pub status: ExecutionStatus,
    /// Executor-specific payload.
    pub details: Value,
}

impl ExecutionResult {
    /// Creates a successful result with the given payload.
    #[must_use]
    pub const fn success(details: Value) -> Self {
        Self {
            status: ExecutionStatus::Success,
            details,
        }
    }

    /// Creates a failed result with the given payload.
    #[must_use]
    pub const fn failure(details: Value) -> Self {
        Self {
            status: ExecutionStatus::Failure,
            details,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by executor capabilities.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Raised only after a verified EXECUTE decision; the gate reports them
///   together with the decision context.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The executor refused the action before performing it.
    #[error("executor rejected action: {0}")]
    Rejected(String),
    /// The executor attempted the action and failed.
    #[error("executor failed: {0}")]
    Failed(String),
    /// The executor gave up after its configured deadline.
    #[error("executor timed out after {timeout_ms} ms")]
    Timeout {
        /// Deadline that elapsed, in milliseconds.
        timeout_ms: u64,
    },
}

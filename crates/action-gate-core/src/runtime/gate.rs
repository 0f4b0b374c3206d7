// crates/action-gate-core/src/runtime/gate.rs
// ============================================================================
// Module: Execution Gate
// Description: Orchestration of decide, verify, and conditional execution.
// Purpose: Guarantee the executor only runs after a verified EXECUTE decision.
// Dependencies: crate::{core, interfaces, runtime::verifier}
// ============================================================================

//! ## Overview
//! One [`ExecutionGate::run`] call moves through a fixed sequence: build
//! the request hash, obtain a decision, verify the decision's digest, then
//! either invoke the executor exactly once or block. The ordering is
//! strict; the executor can never run before a matching EXECUTE decision
//! is confirmed, and dropping the returned future at any suspension point
//! leaves the action unexecuted.
//!
//! Transport failures abort the run with an error; no gate outcome is
//! fabricated for them. Integrity failures are not errors: they surface as
//! a blocked outcome whose reason code names the digest mismatch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::ActionRequest;
use crate::core::Decision;
use crate::core::ExecutionError;
use crate::core::ExecutionResult;
use crate::core::HashError;
use crate::core::Outcome;
use crate::core::PolicyVersion;
use crate::core::ReasonCode;
use crate::core::RequestHash;
use crate::core::RuntimeVersion;
use crate::core::hashing::DEFAULT_HASH_ALGORITHM;
use crate::core::hashing::HashAlgorithm;
use crate::interfaces::DecisionService;
use crate::interfaces::Executor;
use crate::interfaces::ServiceError;
use crate::runtime::verifier::verify_decision;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Reason code reported when the authority's digest does not match the
/// locally computed one.
pub const REASON_REQUEST_HASH_MISMATCH: &str = "gate.request_hash_mismatch";

// ============================================================================
// SECTION: Gate Outcome
// ============================================================================

/// Consolidated result of one gate run.
///
/// # Invariants
/// - `executed == true` implies `outcome == Execute`, `hash_verified ==
///   true`, and `execution_result` came from exactly one executor call.
/// - `executed == false` implies the gate made no side-effecting call.
/// - On an integrity failure `reason_code` is
///   [`REASON_REQUEST_HASH_MISMATCH`] and `hash_verified` is false, while
///   `outcome` still mirrors what the authority reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateOutcome {
    /// Outcome as reported by the authority.
    pub outcome: Outcome,
    /// Reason code for the consolidated result; overridden on integrity
    /// failure, otherwise the authority's own code.
    pub reason_code: ReasonCode,
    /// Version of the rule set applied.
    pub policy_version: PolicyVersion,
    /// Version of the authority build that produced the decision.
    pub runtime_version: RuntimeVersion,
    /// Locally computed canonical hash of the request.
    pub request_hash: RequestHash,
    /// Whether the authority's digest matched the local one.
    pub hash_verified: bool,
    /// Whether the executor was actually invoked.
    pub executed: bool,
    /// Executor result; present iff `executed` is true.
    pub execution_result: Option<ExecutionResult>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors that abort a gate run.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - No variant is ever converted into a silent execution.
#[derive(Debug, Error)]
pub enum GateError {
    /// The request could not be canonicalized; raised before any network
    /// call.
    #[error(transparent)]
    Canonicalization(#[from] HashError),
    /// The decision authority failed at the transport or protocol level.
    #[error(transparent)]
    Service(#[from] ServiceError),
    /// The executor failed after a verified EXECUTE decision authorized it.
    #[error("execution failed after authorized decision: {source}")]
    Execution {
        /// Decision context retained for attribution and audit.
        decision: Decision,
        /// Underlying executor failure.
        source: ExecutionError,
    },
}

// ============================================================================
// SECTION: Execution Gate
// ============================================================================

/// Orchestrator enforcing decide-then-verify-then-execute ordering.
///
/// # Invariants
/// - The executor is invoked iff the run reaches the executing step, which
///   requires both a verified digest match and an EXECUTE outcome; the two
///   conditions are independent and each alone is insufficient.
/// - Configuration is immutable after construction; concurrent runs share
///   only `&self`.
#[derive(Debug, Clone)]
pub struct ExecutionGate<S> {
    /// Decision authority used for every run.
    service: S,
    /// Algorithm for local request digests.
    algorithm: HashAlgorithm,
}

impl<S> ExecutionGate<S>
where
    S: DecisionService,
{
    /// Creates a gate over the given decision service with the default
    /// hash algorithm.
    #[must_use]
    pub const fn new(service: S) -> Self {
        Self {
            service,
            algorithm: DEFAULT_HASH_ALGORITHM,
        }
    }

    /// Creates a gate with an explicit hash algorithm.
    #[must_use]
    pub const fn with_algorithm(service: S, algorithm: HashAlgorithm) -> Self {
        Self {
            service,
            algorithm,
        }
    }

    /// Returns the underlying decision service.
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Returns the hash algorithm used for local digests.
    pub const fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Runs one action through the gate.
    ///
    /// The request is hashed locally, submitted for a decision, and the
    /// decision's digest verified. The executor is invoked exactly once
    /// when the digest matches and the outcome is EXECUTE; otherwise the
    /// run blocks and returns the authority's outcome unexecuted. The gate
    /// never retries the executor.
    ///
    /// # Errors
    ///
    /// - [`GateError::Canonicalization`] when the request cannot be hashed
    ///   (no network call has been made).
    /// - [`GateError::Service`] when the authority fails; no outcome is
    ///   fabricated.
    /// - [`GateError::Execution`] when the executor fails after a verified
    ///   EXECUTE decision; the decision context is retained.
    pub async fn run(
        &self,
        request: &ActionRequest,
        executor: &dyn Executor,
    ) -> Result<GateOutcome, GateError> {
        let local_hash = request.request_hash(self.algorithm)?;
        let decision = self.service.decide(request).await?;
        let hash_verified = verify_decision(self.algorithm, &local_hash, &decision);

        if hash_verified && decision.outcome.is_execute() {
            let result = executor
                .invoke(&request.tool, &request.operation, &request.params, &request.context)
                .await
                .map_err(|source| GateError::Execution {
                    decision: decision.clone(),
                    source,
                })?;
            return Ok(GateOutcome {
                outcome: decision.outcome,
                reason_code: decision.reason_code,
                policy_version: decision.policy_version,
                runtime_version: decision.runtime_version,
                request_hash: local_hash,
                hash_verified: true,
                executed: true,
                execution_result: Some(result),
            });
        }

        let reason_code = if hash_verified {
            decision.reason_code
        } else {
            ReasonCode::new(REASON_REQUEST_HASH_MISMATCH)
        };
        Ok(GateOutcome {
            outcome: decision.outcome,
            reason_code,
            policy_version: decision.policy_version,
            runtime_version: decision.runtime_version,
            request_hash: local_hash,
            hash_verified,
            executed: false,
            execution_result: None,
        })
    }
}

// crates/action-gate-core/src/core/request.rs
// ============================================================================
// Module: Action Request
// Description: Canonical description of a proposed action.
// Purpose: Provide the sole input to canonicalization, hashing, and decisions.
// Dependencies: crate::core::{hashing, identifiers}, serde, serde_json
// ============================================================================

//! ## Overview
//! An [`ActionRequest`] names the agent, tool, and operation of a proposed
//! action together with its parameters and context. The serialized form of
//! the whole request is the gating payload: the wire fields
//! `agent_id, tool, operation, params, context` are a compatibility surface
//! shared with the remote authority, which canonicalizes and hashes the
//! same shape independently.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::core::hashing::HashAlgorithm;
use crate::core::hashing::HashError;
use crate::core::hashing::RequestHash;
use crate::core::hashing::hash_canonical_json;
use crate::core::identifiers::AgentId;
use crate::core::identifiers::OperationName;
use crate::core::identifiers::ToolName;

// ============================================================================
// SECTION: Action Request
// ============================================================================

/// Canonical description of a proposed action submitted for a decision.
///
/// # Invariants
/// - Immutable once constructed; the hashed request is the executed request.
/// - `params` and `context` are structured JSON values; mapping key order
///   never affects the canonical hash.
/// - Contains no non-deterministic metadata unless the caller puts it there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Agent identifier proposing the action.
    pub agent_id: AgentId,
    /// Tool the action targets.
    pub tool: ToolName,
    /// Operation within the tool.
    pub operation: OperationName,
    /// Operation parameters.
    pub params: Value,
    /// Ambient context for policy evaluation; may be empty.
    pub context: Value,
}

impl ActionRequest {
    /// Creates an action request with an empty context.
    #[must_use]
    pub fn new(
        agent_id: impl Into<AgentId>,
        tool: impl Into<ToolName>,
        operation: impl Into<OperationName>,
        params: Value,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            tool: tool.into(),
            operation: operation.into(),
            params,
            context: Value::Object(Map::new()),
        }
    }

    /// Replaces the request context.
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = context;
        self
    }

    /// Computes the deterministic request hash over the canonical payload.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when a value cannot be canonicalized; this
    /// aborts before any network call.
    pub fn request_hash(&self, algorithm: HashAlgorithm) -> Result<RequestHash, HashError> {
        hash_canonical_json(algorithm, self)
    }
}

// crates/action-gate-core/src/core/decision.rs
// ============================================================================
// Module: Decision Model
// Description: Remote authority verdicts for proposed actions.
// Purpose: Provide the stable decision shape consumed by the execution gate.
// Dependencies: crate::core::{hashing, identifiers}, serde
// ============================================================================

//! ## Overview
//! A [`Decision`] is the remote authority's verdict on one action request.
//! It embeds the authority's own canonical hash of the request it
//! evaluated, which the gate checks against the locally computed hash
//! before honoring the outcome. Decisions are created by the authority,
//! never mutated, and consumed exactly once by the run that requested them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::hashing::RequestHash;
use crate::core::identifiers::PolicyVersion;
use crate::core::identifiers::ReasonCode;
use crate::core::identifiers::RuntimeVersion;

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Decision outcome for a proposed action.
///
/// # Invariants
/// - Closed enumeration; unknown wire values fail deserialization rather
///   than defaulting to any variant.
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// The action may proceed to execution.
    Execute,
    /// The action is stopped by policy.
    Halt,
    /// The authority withholds judgment; the action does not proceed.
    Abstain,
    /// The action is refused.
    Deny,
}

impl Outcome {
    /// Returns true when the outcome authorizes execution.
    #[must_use]
    pub const fn is_execute(self) -> bool {
        matches!(self, Self::Execute)
    }

    /// Returns the stable wire label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Execute => "EXECUTE",
            Self::Halt => "HALT",
            Self::Abstain => "ABSTAIN",
            Self::Deny => "DENY",
        }
    }
}

// ============================================================================
// SECTION: Decision
// ============================================================================

/// Remote authority verdict on an action request.
///
/// # Invariants
/// - `request_hash` is the authority's digest of the request it evaluated;
///   it is untrusted input until verified against the local digest.
/// - Wire field names are a compatibility surface and must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Decision outcome.
    pub outcome: Outcome,
    /// Machine-readable explanation of the outcome.
    pub reason_code: ReasonCode,
    /// Authority-computed canonical hash of the evaluated request.
    pub request_hash: RequestHash,
    /// Version of the rule set applied.
    pub policy_version: PolicyVersion,
    /// Version of the authority build that produced the decision.
    pub runtime_version: RuntimeVersion,
}

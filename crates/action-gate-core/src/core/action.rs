// crates/action-gate-core/src/core/action.rs
// ============================================================================
// Module: Action Records
// Description: Audit-path records for submitted actions.
// Purpose: Provide stable shapes for the non-gating submission surface.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Action records describe submissions made to the authority's audit path.
//! Submission is observational: it never carries authority over execution,
//! and a submitted record has no effect on decisions for equivalent
//! requests. Records move through a small status lifecycle that hosts can
//! poll until a terminal state is reached.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ActionId;

// ============================================================================
// SECTION: Action Status
// ============================================================================

/// Lifecycle status of a submitted action record.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    /// Accepted by the authority, not yet resolved.
    Pending,
    /// Blocked on an approval step.
    AwaitingApproval,
    /// Resolved successfully.
    Completed,
    /// Resolved as denied.
    Denied,
    /// Resolved as failed.
    Failed,
}

impl ActionStatus {
    /// Returns true when the status will no longer change.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Denied | Self::Failed)
    }
}

// ============================================================================
// SECTION: Action Record
// ============================================================================

/// Audit record for one submitted action.
///
/// # Invariants
/// - `id` is issued by the authority and scopes all follow-up lookups.
/// - Optional fields are `None` when the authority omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Authority-issued record identifier.
    pub id: ActionId,
    /// Current lifecycle status.
    pub status: ActionStatus,
    /// Risk classification label when the authority provides one.
    #[serde(default)]
    pub risk_level: Option<String>,
    /// Decision label recorded for the submission when available.
    #[serde(default)]
    pub decision: Option<String>,
    /// Human-readable resolution reason when available.
    #[serde(default)]
    pub reason: Option<String>,
}

// ============================================================================
// SECTION: Batch Submission
// ============================================================================

/// Per-item result of a batch submission.
///
/// # Invariants
/// - Item order matches the order of the submitted requests.
/// - A rejected item never aborts the surrounding batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmitOutcome {
    /// The item was rejected by the authority.
    Rejected {
        /// Authority-reported rejection message.
        error: String,
    },
    /// The item was accepted and recorded.
    Accepted(ActionRecord),
}

// crates/action-gate-client/src/wire.rs
// ============================================================================
// Module: Wire Shapes
// Description: Request and response envelopes for authority endpoints.
// Purpose: Keep wire field names stable and isolated from the public API.
// Dependencies: action-gate-core, serde
// ============================================================================

//! ## Overview
//! [`action_gate_core::ActionRequest`], [`action_gate_core::Decision`], and
//! [`action_gate_core::ActionRecord`] already serialize with the exact wire
//! field names, so the decide and submit paths send and receive core types
//! directly. This module adds the envelopes that have no core counterpart:
//! the batch submission body, its per-item reply, and the error body shape
//! used for non-success statuses.

// ============================================================================
// SECTION: Imports
// ============================================================================

use action_gate_core::ActionRequest;
use action_gate_core::SubmitOutcome;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Batch Submission
// ============================================================================

/// Request body for POST /v1/actions/batch.
#[derive(Debug, Serialize)]
pub(crate) struct BatchSubmitBody<'a> {
    /// Actions submitted in caller order.
    pub actions: &'a [ActionRequest],
}

/// Response body for POST /v1/actions/batch.
#[derive(Debug, Deserialize)]
pub(crate) struct BatchSubmitReply {
    /// Per-item results in submission order.
    pub results: Vec<SubmitOutcome>,
}

// ============================================================================
// SECTION: Error Body
// ============================================================================

/// Error body returned by the authority on non-success statuses.
///
/// Both `detail` and `error` spellings occur in the wild; whichever is
/// present wins, falling back to the bare status line.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorReply {
    /// Primary error message field.
    #[serde(default)]
    pub detail: Option<String>,
    /// Alternate error message field.
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorReply {
    /// Extracts the best available message, defaulting to the status code.
    pub(crate) fn message(self, status: u16) -> String {
        self.detail.or(self.error).unwrap_or_else(|| format!("http status {status}"))
    }
}

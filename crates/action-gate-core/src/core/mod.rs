// crates/action-gate-core/src/core/mod.rs
// ============================================================================
// Module: Action Gate Core Types
// Description: Canonical protocol types for gated action execution.
// Purpose: Provide stable, serializable shapes for requests, decisions, and results.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types define the action request, its canonical hash, the remote
//! authority's decision, and execution results. These types are the
//! canonical source of truth for any derived API surfaces (HTTP or SDKs);
//! wire field names are a compatibility surface and must stay stable.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod action;
pub mod decision;
pub mod execution;
pub mod hashing;
pub mod identifiers;
pub mod request;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use action::ActionRecord;
pub use action::ActionStatus;
pub use action::SubmitOutcome;
pub use decision::Decision;
pub use decision::Outcome;
pub use execution::ExecutionError;
pub use execution::ExecutionResult;
pub use execution::ExecutionStatus;
pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use hashing::HashAlgorithm;
pub use hashing::HashError;
pub use hashing::RequestHash;
pub use identifiers::ActionId;
pub use identifiers::AgentId;
pub use identifiers::OperationName;
pub use identifiers::PolicyVersion;
pub use identifiers::ReasonCode;
pub use identifiers::RuntimeVersion;
pub use identifiers::ToolName;
pub use request::ActionRequest;

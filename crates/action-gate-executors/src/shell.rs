// crates/action-gate-executors/src/shell.rs
// ============================================================================
// Module: Shell Executor
// Description: Executor capability for allowlisted process execution.
// Purpose: Run commands without shell interpretation under strict limits.
// Dependencies: action-gate-core, tokio
// ============================================================================

//! ## Overview
//! The shell executor performs the `shell` tool's `run` operation. Commands
//! are executed as argv vectors without ever involving a shell; a command
//! given as a single string is split on whitespace and rejected outright if
//! it contains shell metacharacters. The program must appear in the
//! configured allowlist, which is empty by default, so an unconfigured
//! executor can run nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::process::Stdio;
use std::time::Duration;

use action_gate_core::ExecutionError;
use action_gate_core::ExecutionResult;
use action_gate_core::Executor;
use action_gate_core::OperationName;
use action_gate_core::ToolName;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use tokio::process::Command;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the shell executor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShellExecutorConfig {
    /// Programs that may be executed; empty allows nothing.
    pub allowed_programs: BTreeSet<String>,
    /// Process deadline in milliseconds.
    pub timeout_ms: u64,
    /// Maximum bytes of stdout and stderr each retained in the result.
    pub max_output_bytes: usize,
}

impl Default for ShellExecutorConfig {
    fn default() -> Self {
        Self {
            allowed_programs: BTreeSet::new(),
            timeout_ms: 5_000,
            max_output_bytes: 64 * 1024,
        }
    }
}

// ============================================================================
// SECTION: Executor Implementation
// ============================================================================

/// Executor capability for allowlisted process execution.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    /// Executor configuration, including the program allowlist.
    config: ShellExecutorConfig,
}

impl ShellExecutor {
    /// Creates a shell executor with the given configuration.
    #[must_use]
    pub const fn new(config: ShellExecutorConfig) -> Self {
        Self {
            config,
        }
    }
}

#[async_trait]
impl Executor for ShellExecutor {
    async fn invoke(
        &self,
        tool: &ToolName,
        operation: &OperationName,
        params: &Value,
        _context: &Value,
    ) -> Result<ExecutionResult, ExecutionError> {
        if tool.as_str() != "shell" {
            return Err(ExecutionError::Rejected(format!("unsupported tool: {tool}")));
        }
        if operation.as_str() != "run" {
            return Err(ExecutionError::Rejected(format!(
                "unsupported shell operation: {operation}"
            )));
        }
        let argv = extract_argv(params)?;
        let Some((program, args)) = argv.split_first() else {
            return Err(ExecutionError::Rejected("empty command".to_string()));
        };
        if !self.config.allowed_programs.contains(program) {
            return Err(ExecutionError::Rejected(format!("program not allowed: {program}")));
        }

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| ExecutionError::Failed(format!("spawn failed: {err}")))?;

        let output = tokio::time::timeout(
            Duration::from_millis(self.config.timeout_ms),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| ExecutionError::Timeout {
            timeout_ms: self.config.timeout_ms,
        })?
        .map_err(|err| ExecutionError::Failed(format!("wait failed: {err}")))?;

        let details = json!({
            "exit_code": output.status.code(),
            "stdout": truncate_lossy(&output.stdout, self.config.max_output_bytes),
            "stderr": truncate_lossy(&output.stderr, self.config.max_output_bytes),
        });
        if output.status.success() {
            Ok(ExecutionResult::success(details))
        } else {
            Ok(ExecutionResult::failure(details))
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Characters that would require shell interpretation; always rejected.
const SHELL_METACHARACTERS: &[char] =
    &['|', '&', ';', '<', '>', '`', '$', '(', ')', '"', '\'', '\\', '\n'];

/// Extracts the argv vector from action parameters.
///
/// Accepts `cmd` as an array of strings or as a single whitespace-separated
/// string with no metacharacters or quoting.
fn extract_argv(params: &Value) -> Result<Vec<String>, ExecutionError> {
    let Value::Object(map) = params else {
        return Err(ExecutionError::Rejected("shell params must be an object".to_string()));
    };
    match map.get("cmd") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(arg) => Ok(arg.clone()),
                _ => Err(ExecutionError::Rejected("cmd array must contain strings".to_string())),
            })
            .collect(),
        Some(Value::String(line)) => {
            if line.contains(SHELL_METACHARACTERS) {
                return Err(ExecutionError::Rejected(
                    "shell metacharacters are not supported; pass cmd as an argv array"
                        .to_string(),
                ));
            }
            Ok(line.split_whitespace().map(str::to_string).collect())
        }
        _ => Err(ExecutionError::Rejected("missing cmd param".to_string())),
    }
}

/// Truncates raw output to the limit and decodes it lossily.
fn truncate_lossy(bytes: &[u8], max_bytes: usize) -> String {
    let end = bytes.len().min(max_bytes);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

//! Out-of-process sandbox execution: the scripting, JS/TS, and symbolic-math
//! sandboxes all shell out to a subprocess under a hard timeout.

mod node;
mod python;
mod sympy;

pub use node::run_js;
pub use python::run_python;
pub use sympy::run_sympy;

use crate::error::{Result, ToolError};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Maximum size of any tool input, regardless of tool.
pub const MAX_INPUT_CHARS: usize = 12_000;

pub(crate) async fn run_piped(program: &str, args: &[&str], stdin_source: &str, timeout: Duration) -> Result<String> {
    if stdin_source.len() > MAX_INPUT_CHARS {
        return Err(ToolError::SandboxError(format!("input exceeds {MAX_INPUT_CHARS} characters")));
    }

 // `kill_on_drop` matters here: a timed-out `wait_with_output()` future is
 // dropped along with the `Child` it owns, and that must kill the process
 // rather than leave it running detached.
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ToolError::SandboxError(format!("failed to spawn {program}: {e}")))?;

    let mut stdin = child.stdin.take().ok_or_else(|| ToolError::SandboxError("missing stdin handle".to_string()))?;
    stdin.write_all(stdin_source.as_bytes()).await.map_err(|e| ToolError::SandboxError(e.to_string()))?;
    drop(stdin);

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|e| ToolError::SandboxError(e.to_string()))?,
        Err(_) => return Err(ToolError::Timeout),
    };

    if !output.status.success() {
        return Err(ToolError::SandboxError(String::from_utf8_lossy(&output.stderr).trim().to_string()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

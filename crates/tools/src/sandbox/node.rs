use super::run_piped;
use crate::denylist;
use crate::error::{Result, ToolError};
use std::time::Duration;

const JS_TIMEOUT: Duration = Duration::from_secs(2);

/// Runs `source` as a Node script piped on stdin, rejecting it first if it
/// trips the `require`/`process`/`child_process` denylist.
pub async fn run_js(source: &str) -> Result<String> {
    if let Some(token) = denylist::scan_js(source) {
        return Err(ToolError::UnsafeCode(token));
    }
    run_piped("node", &[], source, JS_TIMEOUT).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_denylisted_require_before_spawning() {
        let result = run_js("const fs = require('fs')").await;
        assert!(matches!(result, Err(ToolError::UnsafeCode(_))));
    }
}

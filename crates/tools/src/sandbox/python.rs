use super::run_piped;
use crate::denylist;
use crate::error::{Result, ToolError};
use std::time::Duration;

const SCRIPT_TIMEOUT: Duration = Duration::from_secs(12);

/// Runs `source` as a Python script piped on stdin, rejecting it first if it
/// trips the import/builtin denylist.
pub async fn run_python(source: &str) -> Result<String> {
    if let Some(token) = denylist::scan_python(source) {
        return Err(ToolError::UnsafeCode(token));
    }
    run_piped("python3", &[], source, SCRIPT_TIMEOUT).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_denylisted_import_before_spawning() {
        let result = run_python("import os\nprint(os.getcwd())").await;
        assert!(matches!(result, Err(ToolError::UnsafeCode(_))));
    }
}

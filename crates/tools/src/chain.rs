//! Sequential tool chaining: an ordered list of steps runs one at a time,
//! each result appended to a growing context block; a step failing does not
//! abort the chain.

use crate::dispatch::{Run, ToolArgs, ToolContext};
use crate::tool::Tool;

#[derive(Debug, Clone)]
pub struct ChainStep {
    pub tool: Tool,
    pub args: ToolArgs,
}

#[derive(Debug, Clone)]
pub struct ChainStepResult {
    pub tool: Tool,
    pub output: String,
}

/// Runs each step against the growing context and returns every step's
/// result. Failing steps record their error string as the step's output
/// instead of returning early.
pub async fn run_chain(steps: Vec<ChainStep>, ctx: &ToolContext) -> Vec<ChainStepResult> {
    let mut results = Vec::with_capacity(steps.len());

    for step in steps {
        let output = match step.tool.run(step.args, ctx).await {
            Ok(output) => output,
            Err(error) => format!("error: {error}"),
        };
        results.push(ChainStepResult { tool: step.tool, output });
    }

    results
}

/// Joins step outputs into one context block for the final LM pass.
pub fn render_chain_context(results: &[ChainStepResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("Step {} ({:?}):\n{}", i + 1, r.tool, r.output))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SqlStore;
    use std::sync::Arc;

    fn empty_ctx() -> ToolContext {
        ToolContext {
            sql_store: Arc::new(SqlStore::new()),
            project_root: std::env::temp_dir(),
            search_engines: vec![],
            http_client: reqwest::Client::new(),
            generator: None,
        }
    }

    #[tokio::test]
    async fn later_step_runs_after_earlier_step_fails() {
        let ctx = empty_ctx();
        let steps = vec![
            ChainStep { tool: Tool::Python, args: ToolArgs::Script { source: "import os".to_string() } },
            ChainStep { tool: Tool::Sympy, args: ToolArgs::Script { source: "1+1".to_string() } },
        ];
        let results = run_chain(steps, &ctx).await;
        assert_eq!(results.len(), 2);
        assert!(results[0].output.starts_with("error:"));
    }

    #[test]
    fn renders_steps_in_order() {
        let results = vec![
            ChainStepResult { tool: Tool::Python, output: "4".to_string() },
            ChainStepResult { tool: Tool::Sql, output: "error: boom".to_string() },
        ];
        let rendered = render_chain_context(&results);
        assert!(rendered.find("Step 1").unwrap() < rendered.find("Step 2").unwrap());
    }
}

//! Tagged `Tool` variant replacing name-string dispatch.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Python,
    Js,
    Ts,
    Sql,
    SqlSchema,
    Sympy,
    Visualize,
    Ingest,
    Search,
    Fetch,
    Summarize,
    Analyze,
}

impl Tool {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "python" => Some(Tool::Python),
            "js" | "javascript" => Some(Tool::Js),
            "ts" | "typescript" => Some(Tool::Ts),
            "sql" => Some(Tool::Sql),
            "sql_schema" | "schema" => Some(Tool::SqlSchema),
            "sympy" => Some(Tool::Sympy),
            "visualize" => Some(Tool::Visualize),
            "ingest" => Some(Tool::Ingest),
            "search" => Some(Tool::Search),
            "fetch" | "url" => Some(Tool::Fetch),
            "summarize" => Some(Tool::Summarize),
            "analyze" | "code_analysis" => Some(Tool::Analyze),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExplicitInvocation {
    pub tool: Tool,
    pub args: String,
}

/// Parses a prompt starting with `/<tool>` or `<tool>:`, which bypasses the
/// LM and runs the tool directly.
pub fn parse_explicit(prompt: &str) -> Option<ExplicitInvocation> {
    let trimmed = prompt.trim();

    if let Some(rest) = trimmed.strip_prefix('/') {
        let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        return Tool::from_name(name).map(|tool| ExplicitInvocation { tool, args: args.trim().to_string() });
    }

    if let Some((name, args)) = trimmed.split_once(':') {
        if !name.contains(char::is_whitespace) {
            return Tool::from_name(name.trim()).map(|tool| ExplicitInvocation { tool, args: args.trim().to_string() });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slash_prefixed_invocation() {
        let invocation = parse_explicit("/python print(1+1)").unwrap();
        assert_eq!(invocation.tool, Tool::Python);
        assert_eq!(invocation.args, "print(1+1)");
    }

    #[test]
    fn parses_colon_prefixed_invocation() {
        let invocation = parse_explicit("sql: SELECT 1").unwrap();
        assert_eq!(invocation.tool, Tool::Sql);
        assert_eq!(invocation.args, "SELECT 1");
    }

    #[test]
    fn ignores_ordinary_prompt_with_a_colon() {
        assert!(parse_explicit("note: remember to buy milk").is_none());
    }

    #[test]
    fn ignores_unknown_tool_name() {
        assert!(parse_explicit("/frobnicate x").is_none());
    }
}

//! Code self-check: execute the first fenced code block in a sandboxed
//! language, and regenerate once with the error prepended on failure
//!. Silent success leaves the answer untouched, mirroring
//! the supervisor's "retry once, then terminal" shape.

use crate::error::Result;
use context::Envelope;
use generation::BackendClient;
use log::debug;
use tools::Run;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckedLanguage {
    Python,
    Javascript,
    Typescript,
}

impl CheckedLanguage {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Some(Self::Python),
            "javascript" | "js" => Some(Self::Javascript),
            "typescript" | "ts" => Some(Self::Typescript),
            _ => None,
        }
    }
}

struct FencedBlock {
    language: CheckedLanguage,
    source: String,
}

/// Finds the first fenced code block whose language tag is python,
/// javascript, or typescript.
fn first_checked_block(text: &str) -> Option<FencedBlock> {
    let mut lines = text.lines();
    while let Some(line) = lines.next() {
        let Some(tag) = line.trim_start().strip_prefix("```") else { continue };
        let Some(language) = CheckedLanguage::from_tag(tag) else { continue };

        let mut source_lines = Vec::new();
        for body_line in lines.by_ref() {
            if body_line.trim_start().starts_with("```") {
                return Some(FencedBlock { language, source: source_lines.join("\n") });
            }
            source_lines.push(body_line);
        }
        return None;
    }
    None
}

/// Runs the first checked code block against its sandbox. On failure,
/// regenerates the whole answer once with the sandbox error prepended to the
/// original prompt; on success, leaves `envelope` untouched either way.
pub async fn verify(prompt: &str, envelope: &Envelope, model: &str, backend: &BackendClient) -> Result<Option<Envelope>> {
    let Some(block) = first_checked_block(&envelope.result) else { return Ok(None) };

    let outcome = match block.language {
        CheckedLanguage::Python => tools::Tool::Python.run(tools::ToolArgs::Script { source: block.source }, &sandbox_only_context()).await,
        CheckedLanguage::Javascript | CheckedLanguage::Typescript => {
            tools::Tool::Js.run(tools::ToolArgs::Script { source: block.source }, &sandbox_only_context()).await
        }
    };

    let Err(error) = outcome else { return Ok(None) };
    debug!("code self-check failed, regenerating once: {error}");

    let retry_prompt = format!("{prompt}\n\nThe previous answer's code failed to run:\n{error}\n\nRegenerate a corrected answer.");
    let regenerated = backend.generate(model, &retry_prompt).await?;
    Ok(Envelope::parse(&regenerated).or_else(|| Some(Envelope::omitted(regenerated))))
}

fn sandbox_only_context() -> tools::ToolContext {
    tools::ToolContext {
        sql_store: std::sync::Arc::new(tools::SqlStore::new()),
        project_root: std::env::temp_dir(),
        search_engines: vec![],
        http_client: reqwest::Client::new(),
        generator: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_python_block() {
        let text = "intro\n```python\nprint(1)\n```\nmore text";
        let block = first_checked_block(text).unwrap();
        assert_eq!(block.language, CheckedLanguage::Python);
        assert_eq!(block.source, "print(1)");
    }

    #[test]
    fn skips_unchecked_languages() {
        let text = "```bash\necho hi\n```\n```javascript\nconsole.log(1)\n```";
        let block = first_checked_block(text).unwrap();
        assert_eq!(block.language, CheckedLanguage::Javascript);
    }

    #[test]
    fn no_fenced_block_returns_none() {
        assert!(first_checked_block("just prose, no code here").is_none());
    }
}

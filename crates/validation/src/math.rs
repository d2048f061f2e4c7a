//! Math verification: extract the last arithmetic expression from the
//! prompt, evaluate it in the scripting sandbox rather than trusting the
//! model's arithmetic, and replace the answer if they disagree.

use crate::error::Result;
use context::Envelope;
use solvers::extract_last_expression;
use tools::Run;

/// Maximum relative/absolute drift between the sandbox-evaluated expression
/// and the last number in the model's result before it is considered wrong.
const TOLERANCE: f64 = 1e-6;

/// Re-checks `envelope` against `prompt`'s last arithmetic expression. `None`
/// means no expression was found, or the sandbox's answer and the model's
/// agree; either way the envelope is left untouched.
pub async fn verify(prompt: &str, envelope: &Envelope) -> Result<Option<Envelope>> {
    let Some(expression) = extract_last_expression(prompt) else { return Ok(None) };
    let Some(last_number) = last_number_in(&envelope.result) else { return Ok(None) };

    let sandbox_value = match evaluate_in_sandbox(&expression).await {
        Ok(value) => value,
        Err(_) => return Ok(None),
    };

    if (sandbox_value - last_number).abs() <= TOLERANCE {
        return Ok(None);
    }

    let corrected = format!("{expression} = {}", format_number(sandbox_value));
    Ok(Some(Envelope::omitted(corrected)))
}

async fn evaluate_in_sandbox(expression: &str) -> Result<f64> {
    let script = format!("print({expression})");
    let output = tools::Tool::Python.run(
        tools::ToolArgs::Script { source: script },
        &sandbox_only_context(),
    )
    .await?;
    output.trim().parse::<f64>().map_err(|_| crate::error::ValidationError::Sandbox(format!("non-numeric sandbox output: {output}")))
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

fn last_number_in(text: &str) -> Option<f64> {
    let mut best: Option<f64> = None;
    let chars: Vec<char> = text.chars().collect();
    let is_num_char = |c: char| c.is_ascii_digit() || c == '.' || c == '-';

    let mut i = 0;
    while i < chars.len() {
        if is_num_char(chars[i]) && (chars[i] != '-' || chars.get(i + 1).is_some_and(|c| c.is_ascii_digit())) {
            let start = i;
            while i < chars.len() && is_num_char(chars[i]) {
                i += 1;
            }
            let candidate: String = chars[start..i].iter().collect();
            if let Ok(value) = candidate.parse::<f64>() {
                best = Some(value);
            }
        } else {
            i += 1;
        }
    }
    best
}

fn format_number(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 { format!("{}", value.round() as i64) } else { format!("{value:.4}") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn leaves_envelope_untouched_when_answer_is_correct() {
        let envelope = Envelope::omitted("28 - 4 + 2 = 26");
        let result = verify("what is 28 - 4 + 2?", &envelope).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn replaces_envelope_when_answer_is_wrong() {
        let envelope = Envelope::omitted("28 - 4 + 2 = 99");
        let result = verify("what is 28 - 4 + 2?", &envelope).await.unwrap();
        assert_eq!(result.unwrap().result, "28 - 4 + 2 = 26");
    }

    #[tokio::test]
    async fn no_expression_in_prompt_leaves_envelope_untouched() {
        let envelope = Envelope::omitted("a story about a robot");
        let result = verify("write me a short story", &envelope).await.unwrap();
        assert!(result.is_none());
    }
}

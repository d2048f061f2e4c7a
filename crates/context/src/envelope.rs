//! The mandatory Thinking/Result envelope.

/// A finished answer in the canonical two-section format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// `None` renders as the literal `(omitted by request)`.
    pub thinking: Option<String>,
    pub result: String,
}

impl Envelope {
    pub fn omitted(result: impl Into<String>) -> Self {
        Self {
            thinking: None,
            result: result.into(),
        }
    }

    pub fn with_thinking(thinking: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            thinking: Some(thinking.into()),
            result: result.into(),
        }
    }

    /// Render to the exact two-section text format every answer MUST produce.
    pub fn render(&self) -> String {
        let thinking = self.thinking.as_deref().unwrap_or("(omitted by request)");
        format!("Thinking\n- {thinking}\n\nResult\n- {}", self.result)
    }

    /// Parse a rendered envelope back into its two sections, if well-formed.
    /// Used by post-validation, which needs to inspect and replace the `Result` line.
    pub fn parse(text: &str) -> Option<Envelope> {
        let (thinking_block, result_block) = text.split_once("\n\nResult\n")?;
        let thinking_block = thinking_block.strip_prefix("Thinking\n")?;
        let thinking = thinking_block.strip_prefix("- ").unwrap_or(thinking_block);
        let result = result_block.strip_prefix("- ").unwrap_or(result_block);

        let thinking = if thinking == "(omitted by request)" {
            None
        } else {
            Some(thinking.to_string())
        };

        Some(Envelope {
            thinking,
            result: result.trim_end().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_omitted_thinking() {
        let env = Envelope::omitted("28-4+2 = 26");
        assert_eq!(env.render(), "Thinking\n- (omitted by request)\n\nResult\n- 28-4+2 = 26");
    }

    #[test]
    fn round_trips_through_parse() {
        let env = Envelope::with_thinking("step by step", "42");
        let rendered = env.render();
        let parsed = Envelope::parse(&rendered).unwrap();
        assert_eq!(parsed, env);
    }

    #[test]
    fn parse_rejects_malformed_text() {
        assert!(Envelope::parse("just some text").is_none());
    }
}

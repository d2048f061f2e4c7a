//! Risk review: a single reviewer-model pass for intents where a wrong
//! answer carries outsized cost.

use crate::error::Result;
use context::{Envelope, Intent};
use generation::BackendClient;

const REVIEWER_MODEL: &str = "reasoning";

pub fn applies_to(intent: Intent) -> bool {
    matches!(intent, Intent::SystemDesign | Intent::DecisionMaking)
}

/// Asks the reviewer model to correct `envelope`'s result for `prompt`.
/// Always produces a replacement envelope when it applies; callers should
/// only invoke this when [`applies_to`] is true.
pub async fn review(prompt: &str, envelope: &Envelope, backend: &BackendClient) -> Result<Envelope> {
    let review_prompt = format!(
        "Review the following answer for factual and structural soundness, and produce a corrected final version.\n\nOriginal prompt: {prompt}\n\nAnswer to review:\n{}",
        envelope.result
    );
    let reviewed = backend.generate(REVIEWER_MODEL, &review_prompt).await?;
    Ok(Envelope::parse(&reviewed).unwrap_or_else(|| Envelope::omitted(reviewed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_to_system_design_and_decision_making_only() {
        assert!(applies_to(Intent::SystemDesign));
        assert!(applies_to(Intent::DecisionMaking));
        assert!(!applies_to(Intent::SimpleQa));
        assert!(!applies_to(Intent::MathReasoning));
    }
}

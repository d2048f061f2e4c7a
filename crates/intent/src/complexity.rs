//! Complexity estimation, independent of intent score.

use context::ComplexityTier;

const COMPLEXITY_KEYWORDS: &[&str] =
    &["architecture", "distributed", "concurrency", "optimize", "trade-off", "edge case", "scalable", "algorithm"];
const BOOLEAN_OPERATORS: &[&str] = &["and", "or", "not", "&&", "||"];

fn bracket_depth(prompt: &str) -> u32 {
    let mut depth = 0u32;
    let mut max_depth = 0u32;
    for c in prompt.chars() {
        match c {
            '(' | '[' | '{' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max_depth
}

fn code_fence_count(prompt: &str) -> usize {
    prompt.matches("```").count() / 2
}

fn keyword_hits(lowercased: &str) -> usize {
    COMPLEXITY_KEYWORDS.iter().filter(|kw| lowercased.contains(*kw)).count()
}

fn boolean_operator_count(lowercased: &str) -> usize {
    BOOLEAN_OPERATORS.iter().map(|op| lowercased.matches(op).count()).sum()
}

/// Scores length, nesting, boolean operators, code fences and keyword hits
/// into one of four complexity tiers.
pub fn estimate(prompt: &str) -> ComplexityTier {
    let lowercased = prompt.to_ascii_lowercase();
    let word_count = prompt.split_whitespace().count();

    let mut score = 0i32;
    score += match word_count {
        0..=15 => 0,
        16..=40 => 1,
        41..=100 => 2,
        _ => 3,
    };
    score += bracket_depth(prompt) as i32;
    score += boolean_operator_count(&lowercased) as i32;
    score += code_fence_count(&lowercased) as i32 * 2;
    score += keyword_hits(&lowercased) as i32 * 2;

    match score {
        0..=1 => ComplexityTier::Low,
        2..=3 => ComplexityTier::Medium,
        4..=6 => ComplexityTier::High,
        _ => ComplexityTier::VeryHigh,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_plain_prompt_is_low() {
        assert_eq!(estimate("hi there"), ComplexityTier::Low);
    }

    #[test]
    fn long_prompt_with_keywords_and_code_is_very_high() {
        let prompt = "design a distributed, scalable architecture with concurrency trade-off analysis and include a ```rust``` snippet plus a ```python``` snippet covering every edge case in this fairly long request that goes on for a while to push the word count up past the threshold for the highest complexity tier";
        assert_eq!(estimate(prompt), ComplexityTier::VeryHigh);
    }
}

//! Rule-based intent classifier.
//!
//! `classify` is a pure, total function of the prompt: same input, same
//! `IntentVerdict`, every time. It never touches the network or the
//! filesystem and never panics on malformed input.

mod catalog;
mod complexity;

use catalog::CATALOG;
use context::{ClassifierContext, ConfidenceTier, Intent, IntentVerdict};
use regex::Regex;
use std::sync::LazyLock;

static QUESTION_MARK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\?").unwrap());
static CODE_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```|\bfn\s+\w+\(|\bdef\s+\w+\(").unwrap());
static SQL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bselect\b.*\bfrom\b|\binsert\s+into\b|\bupdate\b.*\bset\b").unwrap());
static HTML_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[a-zA-Z][^>]*>").unwrap());
static FORMULA_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)=[A-Z]+\(").unwrap());
static MATH_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]\s*[-+*/×÷=]\s*[0-9]").unwrap());
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").unwrap());

/// Counts occurrences of `pattern` in `lowercased`, capped at 2.
fn pattern_score(lowercased: &str, pattern: &str) -> i32 {
    lowercased.matches(pattern).count().min(2) as i32
}

/// Runs the fixed-order scorer over the closed catalog and derives a
/// confidence tier from the top score and the margin to the runner-up.
pub fn classify(prompt: &str, ctx: &ClassifierContext) -> IntentVerdict {
    let lowercased = prompt.to_ascii_lowercase();
    let has_digit = DIGIT.is_match(&lowercased);

    let mut scores: Vec<(Intent, i32)> = Vec::with_capacity(CATALOG.len());

    for profile in CATALOG {
        let mut score: i32 = profile.patterns.iter().map(|p| pattern_score(&lowercased, p)).sum();

        if profile.intent == Intent::MathReasoning
            && has_digit
            && (lowercased.contains("how many") || lowercased.contains("how much"))
        {
            score += 2;
        }

        if let Some(check) = profile.advanced_check {
            if check(prompt) {
                score += 5;
            }
        }

        if ctx.previous_intent == Some(profile.intent) {
            score += 1;
        }
        if ctx.user_preference == Some(profile.intent) {
            score += 2;
        }
        if ctx.excluded.contains(&profile.intent) {
            score -= 5;
        }
        score = score.max(0);

        scores.push((profile.intent, score));
    }

    scores.sort_by(|a, b| b.1.cmp(&a.1));

    let (top_intent, top_score) = scores[0];
    let second_score = scores.get(1).map(|(_, s)| *s).unwrap_or(0);
    let margin = top_score - second_score;
    let ratio = if second_score > 0 { top_score as f64 / second_score as f64 } else { f64::INFINITY };

    let confidence = if top_score >= 5 && margin >= 3 {
        ConfidenceTier::VeryHigh
    } else if top_score >= 4 && margin >= 2 {
        ConfidenceTier::High
    } else if top_score >= 2 && ratio > 1.5 {
        ConfidenceTier::High
    } else if top_score >= 2 && margin >= 1 {
        ConfidenceTier::Medium
    } else if top_score >= 1 {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::Low
    };

    let profile = CATALOG.iter().find(|p| p.intent == top_intent).expect("catalog covers every Intent variant");
    let complexity = complexity::estimate(prompt);

    IntentVerdict {
        intent: top_intent,
        confidence,
        score: top_score,
        requires_web: profile.requires_web,
        preferred_model: profile.preferred_model.to_string(),
        primary_tools: profile.primary_tools.iter().map(|t| t.to_string()).collect(),
        flexible_tools: profile.flexible_tools,
        complexity,
        alternatives: scores.into_iter().skip(1).take(3).collect(),
        has_question_mark: QUESTION_MARK.is_match(prompt),
        has_code: CODE_SHAPE.is_match(prompt),
        has_sql: SQL_SHAPE.is_match(prompt),
        has_html: HTML_SHAPE.is_match(prompt),
        has_formula: FORMULA_SHAPE.is_match(prompt),
        has_math: MATH_SHAPE.is_match(prompt),
        word_count: prompt.split_whitespace().count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_a_simple_question() {
        let verdict = classify("what is the capital of france?", &ClassifierContext::default());
        assert_eq!(verdict.intent, Intent::SimpleQa);
        assert!(verdict.has_question_mark);
    }

    #[test]
    fn classifies_a_code_task_with_high_confidence() {
        let verdict =
            classify("please implement a function to reverse a linked list, write code for it", &ClassifierContext::default());
        assert_eq!(verdict.intent, Intent::CodeTask);
    }

    #[test]
    fn classifies_an_arithmetic_expression_as_math_reasoning() {
        let verdict = classify("how much is 12 * 4", &ClassifierContext::default());
        assert_eq!(verdict.intent, Intent::MathReasoning);
        assert!(verdict.has_math);
    }

    #[test]
    fn unmatched_prompt_falls_back_to_low_confidence() {
        let verdict = classify("zzz qqq flibbertigibbet", &ClassifierContext::default());
        assert_eq!(verdict.confidence, ConfidenceTier::Low);
    }

    #[test]
    fn every_catalog_intent_is_reachable() {
        for intent in Intent::ALL {
            assert!(CATALOG.iter().any(|p| p.intent == intent), "{intent:?} missing from catalog");
        }
    }

    #[test]
    fn previous_intent_tips_an_otherwise_unmatched_prompt() {
        let ctx = ClassifierContext { previous_intent: Some(Intent::Learning), ..Default::default() };
        let verdict = classify("zzz qqq flibbertigibbet", &ctx);
        assert_eq!(verdict.intent, Intent::Learning);
    }

    #[test]
    fn user_preference_outweighs_previous_intent() {
        let ctx = ClassifierContext {
            previous_intent: Some(Intent::Learning),
            user_preference: Some(Intent::Riddle),
            ..Default::default()
        };
        let verdict = classify("zzz qqq flibbertigibbet", &ctx);
        assert_eq!(verdict.intent, Intent::Riddle);
    }

    #[test]
    fn excluded_intent_is_suppressed_even_when_otherwise_winning() {
        let ctx = ClassifierContext { excluded: vec![Intent::CodeTask], ..Default::default() };
        let verdict =
            classify("please implement a function to reverse a linked list, write code for it", &ctx);
        assert_ne!(verdict.intent, Intent::CodeTask);
    }

    #[test]
    fn score_never_goes_negative_after_exclusion() {
        let ctx = ClassifierContext { excluded: vec![Intent::SimpleQa], ..Default::default() };
        let verdict = classify("zzz qqq flibbertigibbet", &ctx);
        assert!(verdict.alternatives.iter().all(|(_, score)| *score >= 0));
        assert!(verdict.score >= 0);
    }
}

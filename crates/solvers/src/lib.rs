//! Local fast-path solvers.
//!
//! Each solver is pure and total over its input: given the same prompt it
//! always returns the same `Option`, never panics, and never performs I/O.
//! `try_solve` runs them in a fixed order and returns the first hit, so two
//! solvers can never race to answer the same prompt.

mod arithmetic;
mod conversation;
mod dates;
mod formulas;
mod geometry;
mod linear_equation;
mod percent;
mod regex_literal;
mod riddles;
mod set_ops;
mod sort_filter;
mod stats;
mod strings;
mod units;

use context::Envelope;
use jiff::civil::Date;

/// Runs the fixed-order solver chain against a normalized prompt and, on the
/// first non-`None` result, wraps it in the mandatory envelope with thinking
/// omitted (local solvers do not narrate their steps).
///
/// Order: greeting/small-talk, riddles, arithmetic, percent, units, dates,
/// linear equation, stats, set ops, sort/filter, strings, regex literal,
/// geometry, formulas. Arithmetic is tried before the word-problem styled
/// solvers so a bare expression never falls through to a slower path.
pub fn try_solve(prompt: &str, today: Date) -> Option<Envelope> {
    if let Some(answer) = conversation::solve(prompt) {
        return Some(Envelope::omitted(answer));
    }

    if let Some(answer) = riddles::solve(prompt) {
        return Some(Envelope::omitted(answer));
    }

    if let Some(value) = arithmetic::evaluate(prompt) {
        return Some(Envelope::omitted(format_arithmetic(prompt, value)));
    }

    if let Some(answer) = percent::solve(prompt) {
        return Some(Envelope::omitted(answer));
    }

    if let Some(answer) = units::solve(prompt) {
        return Some(Envelope::omitted(answer));
    }

    if let Some(answer) = dates::solve(prompt, today) {
        return Some(Envelope::omitted(answer));
    }

    if let Some(answer) = linear_equation::solve(prompt) {
        return Some(Envelope::omitted(answer));
    }

    if let Some(answer) = stats::solve(prompt) {
        return Some(Envelope::omitted(answer));
    }

    if let Some(answer) = set_ops::solve(prompt) {
        return Some(Envelope::omitted(answer));
    }

    if let Some(answer) = sort_filter::solve(prompt) {
        return Some(Envelope::omitted(answer));
    }

    if let Some(answer) = strings::solve(prompt) {
        return Some(Envelope::omitted(answer));
    }

    if let Some(answer) = regex_literal::solve(prompt) {
        return Some(Envelope::omitted(answer));
    }

    if let Some(answer) = geometry::solve(prompt) {
        return Some(Envelope::omitted(answer));
    }

    if let Some(answer) = formulas::solve(prompt) {
        return Some(Envelope::omitted(answer));
    }

    None
}

fn format_arithmetic(prompt: &str, value: f64) -> String {
    let expr = arithmetic::extract_last_expression(prompt).unwrap_or_else(|| prompt.trim().to_string());
    if (value - value.round()).abs() < 1e-9 {
        format!("{expr} = {}", value.round() as i64)
    } else {
        format!("{expr} = {value:.4}")
    }
}

pub use arithmetic::extract_last_expression;

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> Date {
        Date::constant(2026, 7, 28)
    }

    #[test]
    fn prefers_greeting_over_arithmetic_lookalikes() {
        assert_eq!(
            try_solve("hello!", today()).unwrap().result,
            "Hello! How can I help you today?"
        );
    }

    #[test]
    fn solves_a_bare_arithmetic_expression() {
        let env = try_solve("2 + 2", today()).unwrap();
        assert_eq!(env.result, "2 + 2 = 4");
        assert!(env.thinking.is_none());
    }

    #[test]
    fn falls_through_to_none_for_open_ended_prompts() {
        assert_eq!(try_solve("write me a short story about a robot", today()), None);
    }
}

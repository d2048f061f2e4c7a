//! Evaluates a literal regex against a quoted sample: `does /ab+c/ match "abbc"`.

use regex::Regex;
use std::sync::LazyLock;

static PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)does\s*/(.+)/\s*match\s+"([^"]*)""#).unwrap());

/// Returns `None` if the quoted pattern itself fails to compile, so an
/// invalid regex never gets reported as a non-match.
pub fn solve(prompt: &str) -> Option<String> {
    let c = PATTERN.captures(prompt)?;
    let pattern = Regex::new(&c[1]).ok()?;
    Some(format!("{}", pattern.is_match(&c[2])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_a_literal_regex() {
        assert_eq!(solve(r#"does /ab+c/ match "abbc""#), Some("true".to_string()));
    }

    #[test]
    fn reports_non_match() {
        assert_eq!(solve(r#"does /^\d+$/ match "abc""#), Some("false".to_string()));
    }

    #[test]
    fn returns_none_for_invalid_regex() {
        assert_eq!(solve(r#"does /[/ match "abc""#), None);
    }
}

//! Spreadsheet-style formula shortcuts: `=SUBSTITUTE`, `=TRIM`, `=UPPER`, `=LOWER`.

use regex::Regex;
use std::sync::LazyLock;

static SUBSTITUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)=SUBSTITUTE\("([^"]*)",\s*"([^"]*)",\s*"([^"]*)"\)"#).unwrap()
});
static TRIM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(?i)=TRIM\("([^"]*)"\)"#).unwrap());
static UPPER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(?i)=UPPER\("([^"]*)"\)"#).unwrap());
static LOWER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(?i)=LOWER\("([^"]*)"\)"#).unwrap());

pub fn solve(prompt: &str) -> Option<String> {
    if let Some(c) = SUBSTITUTE.captures(prompt) {
        return Some(c[1].replace(&c[2], &c[3]));
    }

    if let Some(c) = TRIM.captures(prompt) {
        return Some(c[1].split_whitespace().collect::<Vec<_>>().join(" "));
    }

    if let Some(c) = UPPER.captures(prompt) {
        return Some(c[1].to_uppercase());
    }

    if let Some(c) = LOWER.captures(prompt) {
        return Some(c[1].to_lowercase());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_text() {
        assert_eq!(
            solve(r#"=SUBSTITUTE("hello world", "world", "rust")"#),
            Some("hello rust".to_string())
        );
    }

    #[test]
    fn trims_excess_whitespace() {
        assert_eq!(solve(r#"=TRIM("  a   b  ")"#), Some("a b".to_string()));
    }

    #[test]
    fn uppercases_text() {
        assert_eq!(solve(r#"=UPPER("abc")"#), Some("ABC".to_string()));
    }

    #[test]
    fn lowercases_text() {
        assert_eq!(solve(r#"=LOWER("ABC")"#), Some("abc".to_string()));
    }
}

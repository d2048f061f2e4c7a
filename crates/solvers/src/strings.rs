//! String utility shortcuts: length, reverse, case, email/URL validity.

use regex::Regex;
use std::sync::LazyLock;

static LENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)length\s+of\s+"([^"]*)""#).unwrap());
static REVERSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)reverse\s+"([^"]*)""#).unwrap());
static IS_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)is\s+"([^"]*)"\s+a\s+valid\s+email"#).unwrap());
static IS_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)is\s+"([^"]*)"\s+a\s+valid\s+url"#).unwrap());
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static URL_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://[^\s]+\.[^\s]+$").unwrap());

pub fn solve(prompt: &str) -> Option<String> {
    if let Some(c) = LENGTH.captures(prompt) {
        return Some(format!("length = {}", c[1].chars().count()));
    }

    if let Some(c) = REVERSE.captures(prompt) {
        let reversed: String = c[1].chars().rev().collect();
        return Some(reversed);
    }

    if let Some(c) = IS_EMAIL.captures(prompt) {
        return Some(format!("{}", EMAIL_SHAPE.is_match(&c[1])));
    }

    if let Some(c) = IS_URL.captures(prompt) {
        return Some(format!("{}", URL_SHAPE.is_match(&c[1])));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_length() {
        assert_eq!(solve("length of \"hello\""), Some("length = 5".to_string()));
    }

    #[test]
    fn reverses_a_string() {
        assert_eq!(solve("reverse \"abc\""), Some("cba".to_string()));
    }

    #[test]
    fn validates_email_shape() {
        assert_eq!(solve("is \"a@b.com\" a valid email"), Some("true".to_string()));
        assert_eq!(solve("is \"not-an-email\" a valid email"), Some("false".to_string()));
    }

    #[test]
    fn validates_url_shape() {
        assert_eq!(solve("is \"https://example.com\" a valid url"), Some("true".to_string()));
    }
}

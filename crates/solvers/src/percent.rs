//! "What is N% of M", "N is what percent of M", "percent change" shortcuts.

use regex::Regex;
use std::sync::LazyLock;

static OF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)what\s+is\s+([0-9.]+)\s*%\s+of\s+([0-9.]+)").unwrap());
static WHAT_PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9.]+)\s+is\s+what\s+percent(?:age)?\s+of\s+([0-9.]+)").unwrap());
static CHANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)percent(?:age)?\s+change\s+from\s+([0-9.]+)\s+to\s+([0-9.]+)").unwrap()
});

pub fn solve(prompt: &str) -> Option<String> {
    if let Some(c) = OF.captures(prompt) {
        let pct: f64 = c[1].parse().ok()?;
        let base: f64 = c[2].parse().ok()?;
        let value = pct / 100.0 * base;
        return Some(format!("{pct}% of {base} = {}", trim_num(value)));
    }

    if let Some(c) = WHAT_PERCENT.captures(prompt) {
        let part: f64 = c[1].parse().ok()?;
        let base: f64 = c[2].parse().ok()?;
        if base == 0.0 {
            return None;
        }
        let pct = part / base * 100.0;
        return Some(format!("{part} is {}% of {base}", trim_num(pct)));
    }

    if let Some(c) = CHANGE.captures(prompt) {
        let from: f64 = c[1].parse().ok()?;
        let to: f64 = c[2].parse().ok()?;
        if from == 0.0 {
            return None;
        }
        let pct = (to - from) / from * 100.0;
        return Some(format!("change from {from} to {to} = {}%", trim_num(pct)));
    }

    None
}

fn trim_num(n: f64) -> String {
    if (n - n.round()).abs() < 1e-9 {
        format!("{}", n.round() as i64)
    } else {
        format!("{n:.4}").trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_percent_of() {
        assert_eq!(solve("what is 20% of 50"), Some("20% of 50 = 10".to_string()));
    }

    #[test]
    fn solves_what_percent() {
        assert_eq!(solve("10 is what percent of 50"), Some("10 is 20% of 50".to_string()));
    }

    #[test]
    fn solves_percent_change() {
        assert_eq!(
            solve("percent change from 50 to 75"),
            Some("change from 50 to 75 = 50%".to_string())
        );
    }

    #[test]
    fn returns_none_for_unrelated_prompt() {
        assert_eq!(solve("what is the capital of france"), None);
    }
}

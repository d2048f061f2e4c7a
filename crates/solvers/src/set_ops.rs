//! Set operations over two inline bracketed lists: union, intersection, difference.

use regex::Regex;
use std::sync::LazyLock;

static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(union|intersection|difference)\s+of\s*\[([^\]]*)\]\s+and\s*\[([^\]]*)\]").unwrap()
});

fn parse_items(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
}

pub fn solve(prompt: &str) -> Option<String> {
    let c = PATTERN.captures(prompt)?;
    let op = c[1].to_ascii_lowercase();
    let a = parse_items(&c[2]);
    let b = parse_items(&c[3]);

    let mut result: Vec<String> = match op.as_str() {
        "union" => {
            let mut out = a.clone();
            for item in &b {
                if !out.contains(item) {
                    out.push(item.clone());
                }
            }
            out
        }
        "intersection" => a.iter().filter(|item| b.contains(item)).cloned().collect(),
        "difference" => a.iter().filter(|item| !b.contains(item)).cloned().collect(),
        _ => return None,
    };

    result.dedup();
    Some(format!("{op} = [{}]", result.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_union() {
        assert_eq!(
            solve("union of [1, 2, 3] and [3, 4]"),
            Some("union = [1, 2, 3, 4]".to_string())
        );
    }

    #[test]
    fn computes_intersection() {
        assert_eq!(
            solve("intersection of [1, 2, 3] and [2, 3, 4]"),
            Some("intersection = [2, 3]".to_string())
        );
    }

    #[test]
    fn computes_difference() {
        assert_eq!(
            solve("difference of [1, 2, 3] and [2]"),
            Some("difference = [1, 3]".to_string())
        );
    }
}

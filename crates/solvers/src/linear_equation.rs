//! Single-variable linear equations of the form `ax + b = c` or `c = ax + b`.

use regex::Regex;
use std::sync::LazyLock;

static FORWARD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(-?[0-9.]*)\s*x\s*([+-]\s*[0-9.]+)?\s*=\s*(-?[0-9.]+)\s*$").unwrap()
});
static MIRROR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(-?[0-9.]+)\s*=\s*(-?[0-9.]*)\s*x\s*([+-]\s*[0-9.]+)?\s*$").unwrap()
});

fn coefficient(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "-" {
        if trimmed == "-" { -1.0 } else { 1.0 }
    } else {
        trimmed.parse().unwrap_or(1.0)
    }
}

fn offset(text: Option<&str>) -> f64 {
    match text {
        None => 0.0,
        Some(raw) => raw.replace(' ', "").parse().unwrap_or(0.0),
    }
}

/// Solves `ax + b = c` for `x`. Returns `None` when `a` is zero (no unique
/// solution) rather than dividing by zero.
pub fn solve(prompt: &str) -> Option<String> {
    if let Some(c) = FORWARD.captures(prompt) {
        let a = coefficient(&c[1]);
        let b = offset(c.get(2).map(|m| m.as_str()));
        let rhs: f64 = c[3].parse().ok()?;
        if a == 0.0 {
            return None;
        }
        let x = (rhs - b) / a;
        return Some(format!("x = {}", trim_num(x)));
    }

    if let Some(c) = MIRROR.captures(prompt) {
        let lhs: f64 = c[1].parse().ok()?;
        let a = coefficient(&c[2]);
        let b = offset(c.get(3).map(|m| m.as_str()));
        if a == 0.0 {
            return None;
        }
        let x = (lhs - b) / a;
        return Some(format!("x = {}", trim_num(x)));
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
    fn solves_forward_form() {
        assert_eq!(solve("2x + 3 = 11"), Some("x = 4".to_string()));
    }

    #[test]
    fn solves_mirror_form() {
        assert_eq!(solve("11 = 2x + 3"), Some("x = 4".to_string()));
    }

    #[test]
    fn solves_bare_x() {
        assert_eq!(solve("x - 5 = 0"), Some("x = 5".to_string()));
    }

    #[test]
    fn returns_none_when_coefficient_is_zero() {
        assert_eq!(solve("0x + 3 = 11"), None);
    }
}

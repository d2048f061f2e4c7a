//! Simple date math: days between two ISO dates, age from a birth year.

use jiff::civil::Date;
use regex::Regex;
use std::sync::LazyLock;

static DAYS_BETWEEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)days?\s+between\s+(\d{4}-\d{2}-\d{2})\s+and\s+(\d{4}-\d{2}-\d{2})").unwrap()
});
static AGE_FROM_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)how\s+old\s+(?:is\s+someone|am\s+i)\s+(?:if\s+)?born\s+in\s+(\d{4})").unwrap()
});

pub fn solve(prompt: &str, today: Date) -> Option<String> {
    if let Some(c) = DAYS_BETWEEN.captures(prompt) {
        let a: Date = c[1].parse().ok()?;
        let b: Date = c[2].parse().ok()?;
        let days = a.until(b).ok()?.get_days().abs();
        return Some(format!("{days} days between {a} and {b}"));
    }

    if let Some(c) = AGE_FROM_YEAR.captures(prompt) {
        let year: i16 = c[1].parse().ok()?;
        let age = today.year() - year;
        if age < 0 {
            return None;
        }
        return Some(format!("approximately {age} years old"));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_days_between_dates() {
        let today = Date::constant(2026, 7, 28);
        assert_eq!(
            solve("how many days between 2026-01-01 and 2026-01-11", today),
            Some("10 days between 2026-01-01 and 2026-01-11".to_string())
        );
    }

    #[test]
    fn computes_age_from_birth_year() {
        let today = Date::constant(2026, 7, 28);
        assert_eq!(
            solve("how old am i if born in 1990", today),
            Some("approximately 36 years old".to_string())
        );
    }

    #[test]
    fn returns_none_for_unrelated_prompt() {
        let today = Date::constant(2026, 7, 28);
        assert_eq!(solve("what time is it", today), None);
    }
}

//! Sort or filter an inline bracketed number list by a single comparison.

use regex::Regex;
use std::sync::LazyLock;

static SORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)sort\s*\[([^\]]*)\]\s*(asc|ascending|desc|descending)?").unwrap());
static FILTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)filter\s*\[([^\]]*)\]\s*(>|<|>=|<=|==)\s*(-?[0-9.]+)").unwrap()
});

fn parse_numbers(raw: &str) -> Option<Vec<f64>> {
    raw.split(',').map(|n| n.trim().parse().ok()).collect()
}

pub fn solve(prompt: &str) -> Option<String> {
    if let Some(c) = FILTER.captures(prompt) {
        let values = parse_numbers(&c[1])?;
        let op = &c[2];
        let threshold: f64 = c[3].parse().ok()?;
        let filtered: Vec<f64> = values
            .into_iter()
            .filter(|v| match op {
                ">" => *v > threshold,
                "<" => *v < threshold,
                ">=" => *v >= threshold,
                "<=" => *v <= threshold,
                "==" => (*v - threshold).abs() < 1e-9,
                _ => false,
            })
            .collect();
        return Some(format!("[{}]", render(&filtered)));
    }

    if let Some(c) = SORT.captures(prompt) {
        let mut values = parse_numbers(&c[1])?;
        let descending = c.get(2).map(|m| m.as_str().to_ascii_lowercase().starts_with("desc")).unwrap_or(false);
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        if descending {
            values.reverse();
        }
        return Some(format!("[{}]", render(&values)));
    }

    None
}

fn render(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| if (v - v.round()).abs() < 1e-9 { format!("{}", *v as i64) } else { format!("{v}") })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_ascending_by_default() {
        assert_eq!(solve("sort [3, 1, 2]"), Some("[1, 2, 3]".to_string()));
    }

    #[test]
    fn sorts_descending() {
        assert_eq!(solve("sort [3, 1, 2] desc"), Some("[3, 2, 1]".to_string()));
    }

    #[test]
    fn filters_greater_than() {
        assert_eq!(solve("filter [1, 5, 10, 2] > 3"), Some("[5, 10]".to_string()));
    }
}

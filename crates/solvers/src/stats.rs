//! Basic descriptive statistics over an inline bracketed number list,
//! e.g. "mean of [2, 4, 6, 8]".

use regex::Regex;
use std::sync::LazyLock;

static LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(mean|average|median|mode|min|max|sum|stdev|std\s*dev)\s+of\s*\[([^\]]+)\]").unwrap()
});

fn parse_numbers(raw: &str) -> Option<Vec<f64>> {
    let numbers: Option<Vec<f64>> = raw.split(',').map(|n| n.trim().parse().ok()).collect();
    let numbers = numbers?;
    if numbers.is_empty() { None } else { Some(numbers) }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn mode(values: &[f64]) -> f64 {
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for &v in values {
        match counts.iter_mut().find(|(c, _)| *c == v) {
            Some((_, n)) => *n += 1,
            None => counts.push((v, 1)),
        }
    }
    counts.into_iter().max_by_key(|(_, n)| *n).map(|(v, _)| v).unwrap_or(0.0)
}

fn stdev(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

pub fn solve(prompt: &str) -> Option<String> {
    let c = LIST.captures(prompt)?;
    let op = c[1].to_ascii_lowercase().replace(' ', "");
    let values = parse_numbers(&c[2])?;

    let result = match op.as_str() {
        "mean" | "average" => mean(&values),
        "median" => median(&values),
        "mode" => mode(&values),
        "min" => values.iter().cloned().fold(f64::INFINITY, f64::min),
        "max" => values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        "sum" => values.iter().sum(),
        "stdev" | "stddev" => stdev(&values),
        _ => return None,
    };

    Some(format!("{op} = {}", trim_num(result)))
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
    fn computes_mean() {
        assert_eq!(solve("mean of [2, 4, 6, 8]"), Some("mean = 5".to_string()));
    }

    #[test]
    fn computes_median_of_even_count() {
        assert_eq!(solve("median of [1, 2, 3, 4]"), Some("median = 2.5".to_string()));
    }

    #[test]
    fn computes_max() {
        assert_eq!(solve("max of [5, 1, 9, 3]"), Some("max = 9".to_string()));
    }

    #[test]
    fn returns_none_for_empty_list() {
        assert_eq!(solve("mean of []"), None);
    }
}

//! Unit conversion shortcuts over a small fixed table of common units.

use regex::Regex;
use std::sync::LazyLock;

static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)convert\s+([0-9.]+)\s*([a-zA-Z°]+)\s+to\s+([a-zA-Z°]+)").unwrap()
});

/// `(from, to) -> factor`, value_to * factor = value_from, except temperature.
fn linear_factor(from: &str, to: &str) -> Option<f64> {
    let table: &[(&str, &str, f64)] = &[
        ("km", "mi", 0.621_371),
        ("mi", "km", 1.609_34),
        ("m", "ft", 3.280_84),
        ("ft", "m", 0.3048),
        ("kg", "lb", 2.204_62),
        ("lb", "kg", 0.453_592),
        ("l", "gal", 0.264_172),
        ("gal", "l", 3.785_41),
        ("cm", "in", 0.393_701),
        ("in", "cm", 2.54),
    ];

    table
        .iter()
        .find(|(f, t, _)| f.eq_ignore_ascii_case(from) && t.eq_ignore_ascii_case(to))
        .map(|(_, _, factor)| *factor)
}

fn convert_temperature(value: f64, from: &str, to: &str) -> Option<f64> {
    let from = from.to_ascii_lowercase();
    let to = to.to_ascii_lowercase();
    let is_f = |u: &str| matches!(u, "f" | "fahrenheit" | "°f");
    let is_c = |u: &str| matches!(u, "c" | "celsius" | "°c");

    match (is_c(&from), is_f(&to)) {
        (true, true) => return Some(value * 9.0 / 5.0 + 32.0),
        _ => {}
    }
    if is_f(&from) && is_c(&to) {
        return Some((value - 32.0) * 5.0 / 9.0);
    }

    None
}

pub fn solve(prompt: &str) -> Option<String> {
    let c = PATTERN.captures(prompt)?;
    let value: f64 = c[1].parse().ok()?;
    let from = &c[2];
    let to = &c[3];

    if let Some(converted) = convert_temperature(value, from, to) {
        return Some(format!("{value}{from} = {:.2}{to}", converted));
    }

    let factor = linear_factor(from, to)?;
    let converted = value * factor;
    Some(format!("{value}{from} = {converted:.4}{to}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_distance() {
        let result = solve("convert 10 km to mi").unwrap();
        assert!(result.contains("6.2137"), "{result}");
    }

    #[test]
    fn converts_temperature() {
        assert_eq!(solve("convert 100 c to f"), Some("100c = 212.00f".to_string()));
    }

    #[test]
    fn returns_none_for_unknown_units() {
        assert_eq!(solve("convert 10 parsecs to furlongs"), None);
    }
}

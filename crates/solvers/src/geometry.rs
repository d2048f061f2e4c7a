//! Rectangle, triangle and circle area/perimeter shortcuts.

use regex::Regex;
use std::f64::consts::PI;
use std::sync::LazyLock;

static RECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(area|perimeter)\s+of\s+(?:a\s+)?rectangle\s+([0-9.]+)\s*(?:x|by)\s*([0-9.]+)").unwrap()
});
static TRIANGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)area\s+of\s+(?:a\s+)?triangle\s+(?:with\s+)?base\s+([0-9.]+)\s+(?:and\s+)?height\s+([0-9.]+)")
        .unwrap()
});
static CIRCLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(area|circumference)\s+of\s+(?:a\s+)?circle\s+(?:with\s+)?radius\s+([0-9.]+)").unwrap()
});

pub fn solve(prompt: &str) -> Option<String> {
    if let Some(c) = RECT.captures(prompt) {
        let w: f64 = c[2].parse().ok()?;
        let h: f64 = c[3].parse().ok()?;
        let value = if c[1].eq_ignore_ascii_case("area") { w * h } else { 2.0 * (w + h) };
        return Some(format!("{} = {}", c[1].to_ascii_lowercase(), trim_num(value)));
    }

    if let Some(c) = TRIANGLE.captures(prompt) {
        let base: f64 = c[1].parse().ok()?;
        let height: f64 = c[2].parse().ok()?;
        return Some(format!("area = {}", trim_num(0.5 * base * height)));
    }

    if let Some(c) = CIRCLE.captures(prompt) {
        let r: f64 = c[2].parse().ok()?;
        let value = if c[1].eq_ignore_ascii_case("area") { PI * r * r } else { 2.0 * PI * r };
        return Some(format!("{} = {}", c[1].to_ascii_lowercase(), trim_num(value)));
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
    fn computes_rectangle_area() {
        assert_eq!(solve("area of rectangle 3x4"), Some("area = 12".to_string()));
    }

    #[test]
    fn computes_triangle_area() {
        assert_eq!(
            solve("area of a triangle with base 6 and height 4"),
            Some("area = 12".to_string())
        );
    }

    #[test]
    fn computes_circle_circumference() {
        let result = solve("circumference of a circle with radius 2").unwrap();
        assert!(result.starts_with("circumference = 12.56"), "{result}");
    }
}

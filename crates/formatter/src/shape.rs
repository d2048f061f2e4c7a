//! Rule-based response shape detection over raw answer text. A pure function: same text always yields the same shape, no I/O.

use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Text,
    Table,
    List,
    Ranking,
    Chart,
}

const CHART_MARKER: &str = "CHART_JSON:";

static PIPE_ROW_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"(?m)^\s*\|.*\|\s*$").unwrap());
static NUMBERED_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"(?m)^\s*\d+[.)]\s").unwrap());
static BULLETED_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"(?m)^\s*[-*•]\s").unwrap());
static NUMBERED_WITH_VALUE_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?mi)^\s*\d+[.)]\s+\S.*(?:[-:–]\s*\d|\[\d+\])").unwrap());
static PIPE_RANK_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"(?m)^\s*\d+\s*\|").unwrap());

/// Detects the shape of `text` by the fixed rule order: an explicit
/// `CHART_JSON:` marker beats everything; pipe rows mean a table; numbered
/// lines pairing a name with a value (or a pipe-ranked list) mean a ranking;
/// plain numbered or bulleted lines mean a list; anything else is text.
pub fn detect(text: &str) -> ResponseShape {
    if text.contains(CHART_MARKER) {
        return ResponseShape::Chart;
    }
    if PIPE_ROW_PATTERN.is_match(text) && !PIPE_RANK_PATTERN.is_match(text) {
        return ResponseShape::Table;
    }
    if NUMBERED_WITH_VALUE_PATTERN.is_match(text) || PIPE_RANK_PATTERN.is_match(text) {
        return ResponseShape::Ranking;
    }
    if NUMBERED_PATTERN.is_match(text) || BULLETED_PATTERN.is_match(text) {
        return ResponseShape::List;
    }
    ResponseShape::Text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_explicit_chart_marker_first() {
        assert_eq!(detect("CHART_JSON: {\"type\":\"bar\"}"), ResponseShape::Chart);
    }

    #[test]
    fn detects_pipe_table() {
        let text = "| Name | Score |\n| Alpha | 1 |\n| Beta | 2 |";
        assert_eq!(detect(text), ResponseShape::Table);
    }

    #[test]
    fn detects_ranking_from_numbered_name_value_lines() {
        let text = "1. Alpha - 95 [1]\n2. Beta - 80 [2]";
        assert_eq!(detect(text), ResponseShape::Ranking);
    }

    #[test]
    fn detects_ranking_from_pipe_rank_lines() {
        let text = "1 | Alpha | 95\n2 | Beta | 80";
        assert_eq!(detect(text), ResponseShape::Ranking);
    }

    #[test]
    fn detects_plain_numbered_list() {
        let text = "1. Buy milk\n2. Walk the dog";
        assert_eq!(detect(text), ResponseShape::List);
    }

    #[test]
    fn detects_bulleted_list() {
        let text = "- first\n- second";
        assert_eq!(detect(text), ResponseShape::List);
    }

    #[test]
    fn falls_through_to_text() {
        assert_eq!(detect("just a sentence about dogs"), ResponseShape::Text);
    }
}

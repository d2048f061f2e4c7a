//! HTML rendering for each detected shape. Escaping is mandatory: every
//! fragment of raw answer text passes through [`escape`] before it reaches
//! the rendered markup.

use crate::shape::ResponseShape;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders `text` as the HTML fragment for `shape`. Table/list/ranking
/// shapes render one row/item per line; text and chart shapes render as a
/// single escaped block (chart payloads are opaque JSON, left to the
/// client's chart renderer rather than turned into markup here).
pub fn render(shape: ResponseShape, text: &str) -> String {
    match shape {
        ResponseShape::Text => format!("<p>{}</p>", escape(text)),
        ResponseShape::Chart => format!("<pre>{}</pre>", escape(text)),
        ResponseShape::Table => render_table(text),
        ResponseShape::List => render_list(text),
        ResponseShape::Ranking => render_ranking(text),
    }
}

fn render_table(text: &str) -> String {
    let mut rows = String::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if !trimmed.starts_with('|') {
            continue;
        }
        let cells: Vec<&str> = trimmed.trim_matches('|').split('|').map(str::trim).collect();
        let cells_html: String = cells.iter().map(|c| format!("<td>{}</td>", escape(c))).collect();
        rows.push_str(&format!("<tr>{cells_html}</tr>"));
    }
    format!("<table>{rows}</table>")
}

fn render_list(text: &str) -> String {
    let items: String = text
        .lines()
        .filter_map(strip_list_marker)
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect();
    format!("<ul>{items}</ul>")
}

fn render_ranking(text: &str) -> String {
    let items: String = text
        .lines()
        .filter_map(strip_list_marker)
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect();
    format!("<ol>{items}</ol>")
}

fn strip_list_marker(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let without_number = trimmed.trim_start_matches(|c: char| c.is_ascii_digit()).strip_prefix(['.', ')']).map(str::trim_start);
    let without_bullet = trimmed.strip_prefix(['-', '*', '•']).map(str::trim_start);
    without_number.or(without_bullet).or(Some(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_mandated_characters() {
        assert_eq!(escape("<script>&\"'</script>"), "&lt;script&gt;&amp;&quot;&#39;&lt;/script&gt;");
    }

    #[test]
    fn renders_table_rows_with_escaping() {
        let html = render_table("| Name | Note |\n| <b>Alpha</b> | ok |");
        assert!(html.contains("<td>&lt;b&gt;Alpha&lt;/b&gt;</td>"));
    }

    #[test]
    fn renders_list_items_stripping_markers() {
        let html = render_list("1. Buy milk\n2. Walk the dog");
        assert_eq!(html, "<ul><li>Buy milk</li><li>Walk the dog</li></ul>");
    }

    #[test]
    fn renders_ranking_as_ordered_list() {
        let html = render_ranking("1. Alpha - 95 [1]\n2. Beta - 80 [2]");
        assert!(html.starts_with("<ol><li>Alpha"));
    }
}

use crate::search_engine::SearchResult;

/// Formats search hits as a citation-friendly `[n] Title — URL` listing.
pub fn format_citations(results: &[SearchResult]) -> String {
    results.iter().enumerate().map(|(i, r)| format!("[{}] {} — {}", i + 1, r.title, r.url)).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_citations_from_one() {
        let results =
            vec![SearchResult { title: "A".to_string(), url: "https://a".to_string(), snippet: String::new() }];
        assert_eq!(format_citations(&results), "[1] A — https://a");
    }

    #[test]
    fn empty_results_yields_empty_string() {
        assert_eq!(format_citations(&[]), "");
    }
}

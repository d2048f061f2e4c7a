//! Fetches a single URL present in the prompt and extracts its readable text
//!. Mirrors the text-extraction pass of a conventional
//! web-scrape tool, plus a private-network guard before the request is sent.

use crate::error::{Result, WebError};
use scraper::{Html, Selector};
use std::net::{IpAddr, ToSocketAddrs};
use url::Url;

/// Page text is truncated the same as auto-selected file context.
pub const MAX_PAGE_CHARS: usize = 120_000;

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub title: Option<String>,
    pub text: String,
}

/// Fetches `url_str`, rejecting anything that resolves to a private,
/// loopback, or link-local address so prompt-supplied URLs can't be used to
/// probe internal services.
pub async fn fetch_page(client: &reqwest::Client, url_str: &str) -> Result<FetchedPage> {
    let url = Url::parse(url_str).map_err(|e| WebError::InvalidUrl(e.to_string()))?;
    guard_against_private_targets(&url)?;

    let response = client.get(url.as_str()).send().await.map_err(|e| WebError::Fetch(e.to_string()))?;
    if !response.status().is_success() {
        return Err(WebError::Fetch(format!("http status {}", response.status())));
    }

    let html = response.text().await.map_err(|e| WebError::Fetch(e.to_string()))?;
    let document = Html::parse_document(&html);

    let title = extract_title(&document);
    let mut text = extract_text(&document);
    if text.len() > MAX_PAGE_CHARS {
        text.truncate(MAX_PAGE_CHARS);
    }

    Ok(FetchedPage { url: url_str.to_string(), title, text })
}

fn guard_against_private_targets(url: &Url) -> Result<()> {
    let scheme_ok = matches!(url.scheme(), "http" | "https");
    if !scheme_ok {
        return Err(WebError::Blocked(format!("unsupported scheme: {}", url.scheme())));
    }

    let Some(host) = url.host_str() else { return Err(WebError::Blocked("missing host".to_string())) };
    if host.eq_ignore_ascii_case("localhost") {
        return Err(WebError::Blocked(host.to_string()));
    }

    let port = url.port_or_known_default().unwrap_or(443);
    if let Ok(addrs) = (host, port).to_socket_addrs() {
        for addr in addrs {
            if is_private_ip(&addr.ip()) {
                return Err(WebError::Blocked(host.to_string()));
            }
        }
    }

    Ok(())
}

fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback() || v4.is_link_local() || v4.is_unspecified() || v4.is_broadcast(),
        IpAddr::V6(v6) => v6.is_loopback() || v6.is_unspecified() || v6.is_multicast(),
    }
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document.select(&selector).next().map(|el| el.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Prefers a main-content container, falling back to the full `<body>`.
fn extract_text(document: &Html) -> String {
    for selector_str in ["article", "main", "#content", ".content", "body"] {
        let Ok(selector) = Selector::parse(selector_str) else { continue };
        if let Some(element) = document.select(&selector).next() {
            let text = visible_text(&element);
            if !text.trim().is_empty() {
                return text;
            }
        }
    }
    String::new()
}

/// Walks `element`'s subtree, collecting text nodes while skipping the
/// subtrees of non-content tags.
fn visible_text(element: &scraper::ElementRef<'_>) -> String {
    use ego_tree::iter::Edge;

    let mut chunks: Vec<&str> = Vec::new();
    let mut skip_depth = 0usize;

    for edge in element.traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                scraper::Node::Element(el) if matches!(el.name(), "script" | "style" | "noscript") => skip_depth += 1,
                scraper::Node::Text(text) if skip_depth == 0 => chunks.push(text),
                _ => {}
            },
            Edge::Close(node) => {
                if let scraper::Node::Element(el) = node.value() {
                    if matches!(el.name(), "script" | "style" | "noscript") && skip_depth > 0 {
                        skip_depth -= 1;
                    }
                }
            }
        }
    }

    chunks.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_text_prefers_article_tag() {
        let html = "<html><body><article>Article body.</article><p>footer</p></body></html>";
        let document = Html::parse_document(html);
        assert_eq!(extract_text(&document), "Article body.");
    }

    #[test]
    fn extract_title_collapses_whitespace() {
        let html = "<html><head><title>  Hello   World  </title></head><body></body></html>";
        let document = Html::parse_document(html);
        assert_eq!(extract_title(&document), Some("Hello World".to_string()));
    }

    #[test]
    fn guard_blocks_localhost() {
        let url = Url::parse("http://localhost:8080/admin").unwrap();
        assert!(guard_against_private_targets(&url).is_err());
    }

    #[test]
    fn guard_blocks_non_http_scheme() {
        let url = Url::parse("file:///etc/passwd").unwrap();
        assert!(guard_against_private_targets(&url).is_err());
    }

    #[test]
    fn guard_allows_public_https() {
        let url = Url::parse("https://example.com/page").unwrap();
        assert!(guard_against_private_targets(&url).is_ok());
    }
}

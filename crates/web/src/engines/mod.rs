mod duckduckgo;
mod searxng;
mod serpapi;

pub use duckduckgo::DuckDuckGoEngine;
pub use searxng::SearxngEngine;
pub use serpapi::SerpApiEngine;

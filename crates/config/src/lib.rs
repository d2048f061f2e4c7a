//! `relay.toml` configuration structures and loader.

#![deny(missing_docs)]

mod backend;
mod data;
mod loader;
mod media;
mod search;
mod server;
mod tools;

pub use backend::BackendConfig;
pub use data::DataConfig;
pub use media::MediaConfig;
pub use search::{SearchApi, SearchConfig};
pub use server::ServerConfig;
pub use tools::ToolsConfig;

use serde::Deserialize;
use std::path::Path;

/// Top-level configuration, one section per concern.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server listen settings.
    pub server: ServerConfig,
    /// LM backend connection settings.
    pub backend: BackendConfig,
    /// Web search fallback chain settings.
    pub search: SearchConfig,
    /// Image/video generation backend settings.
    pub media: MediaConfig,
    /// Tool dispatcher settings.
    pub tools: ToolsConfig,
    /// Persisted-state directory layout.
    pub data: DataConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`, expanding
    /// `{{ env.VAR }}` placeholders and rejecting unknown keys.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
        loader::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_debug_snapshot;

    #[test]
    fn defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_debug_snapshot!(&config, @r#"
        Config {
            server: ServerConfig {
                port: 8080,
                base_url: "http://localhost:8080",
            },
            backend: BackendConfig {
                url: "http://localhost:11434",
                headers_timeout_ms: 10000,
                body_timeout_ms: 120000,
                keep_alive: "5m",
            },
            search: SearchConfig {
                search_api: None,
                search_api_key: None,
                searxng_url: None,
            },
            media: MediaConfig {
                a1111_url: None,
                ffmpeg_path: "ffmpeg",
            },
            tools: ToolsConfig {
                enabled: true,
                safe_mode: true,
            },
            data: DataConfig {
                data_dir: "./data",
            },
        }
        "#);
    }
}

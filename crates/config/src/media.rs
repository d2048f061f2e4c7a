//! Image/video generation backends.

use serde::Deserialize;

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaConfig {
    /// Base URL of an AUTOMATIC1111-compatible image generation API.
    pub a1111_url: Option<String>,
    /// Path to the `ffmpeg` binary used to assemble generated video.
    pub ffmpeg_path: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self { a1111_url: None, ffmpeg_path: default_ffmpeg_path() }
    }
}

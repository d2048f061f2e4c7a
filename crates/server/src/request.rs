//! Builds the shared [`context::Request`] identically for HTTP and WS
//! ingress.

use context::{Flags, Options, Request, ResponseSpec};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Common misspellings corrected before classification sees the prompt, so a
/// typo doesn't tip the rule-based scorer toward the wrong intent.
static SPELLING_TABLE: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("teh", "the"),
        ("recieve", "receive"),
        ("seperate", "separate"),
        ("definately", "definitely"),
        ("occured", "occurred"),
        ("wich", "which"),
        ("becuase", "because"),
        ("acheive", "achieve"),
        ("untill", "until"),
        ("wether", "whether"),
        ("thier", "their"),
        ("calender", "calendar"),
        ("neccessary", "necessary"),
        ("embarass", "embarrass"),
        ("arguement", "argument"),
    ])
});

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoRequestBody {
    pub prompt: String,
    pub task: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub fast: bool,
    #[serde(default)]
    pub auto_files: bool,
    #[serde(default)]
    pub auto_web: bool,
    #[serde(default)]
    pub file_paths: Vec<String>,
    pub image_description: Option<String>,
    pub user_id: Option<String>,
    pub team_id: Option<String>,
    #[serde(default)]
    pub team_mode: bool,
    #[serde(default)]
    pub use_doc_index: bool,
    #[serde(default)]
    pub use_embeddings: bool,
    #[serde(default)]
    pub force_memory: bool,
    pub language: Option<String>,
    pub response_spec: Option<ResponseSpec>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Trims the raw prompt and corrects words found verbatim (case-sensitively)
/// in [`SPELLING_TABLE`], leaving everything else untouched.
fn normalize(raw: &str) -> String {
    raw.trim()
        .split(' ')
        .map(|word| *SPELLING_TABLE.get(word).unwrap_or(&word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds a [`Request`] from an inbound body, overriding `task_override` when
/// `task` is supplied (used both by `/api/auto` and by the route aliases,
/// which pre-fill `task` before calling this).
pub fn build_request(body: &AutoRequestBody, request_id: String) -> Request {
    let normalized_prompt = normalize(&body.prompt);

    Request {
        request_id,
        user_id: body.user_id.clone().unwrap_or_else(|| "anonymous".to_string()),
        team_id: body.team_id.clone(),
        raw_prompt: body.prompt.clone(),
        normalized_prompt,
        language: body.language.clone(),
        task_override: body.task.clone(),
        model_override: body.model.clone(),
        options: Options { temperature: body.temperature, max_tokens: body.max_tokens },
        flags: Flags {
            fast: body.fast,
            auto_web: body.auto_web,
            auto_files: body.auto_files,
            use_doc_index: body.use_doc_index,
            use_embeddings: body.use_embeddings,
            team_mode: body.team_mode,
            force_memory: body.force_memory,
        },
        file_paths: body.file_paths.clone(),
        image_description: body.image_description.clone(),
        response_spec: body.response_spec.clone(),
    }
}

/// Prompts at or under this length skip heavy context-assembly sections
/// unless they also lack a `?`, in which case
/// a shorter threshold applies.
pub fn bypass_heavy(prompt: &str) -> bool {
    let len = prompt.chars().count();
    len <= 80 || (len <= 140 && !prompt.contains('?'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrects_known_misspellings_word_for_word() {
        assert_eq!(normalize("  i wil definately recieve teh package  "), "i wil definitely receive the package");
    }

    #[test]
    fn leaves_unrecognized_words_untouched() {
        assert_eq!(normalize("this sentence has no typos"), "this sentence has no typos");
    }
}

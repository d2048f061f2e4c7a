//! Context assembly: composes the prompt sent to the backend from whichever
//! context sections are non-empty, in a fixed order.

use crate::request::bypass_heavy;
use crate::state::{AppState, EMBEDDING_MODEL};
use context::{Intent, IntentVerdict, Request, Route};
use memory::extract_keywords;

const MAX_AUTO_FILES: usize = 4;
const MAX_CANDIDATE_FILES: usize = 120;
const MAX_FILE_CHARS: usize = 120_000;

#[derive(Debug, Default, Clone)]
pub struct Assembled {
    pub composed_prompt: String,
    pub files_used: Vec<String>,
    pub memory_hits: usize,
    pub web_used: bool,
    pub has_sources: bool,
    pub rag_sources: usize,
}

pub async fn assemble(
    state: &AppState,
    request: &Request,
    verdict: &IntentVerdict,
    route: &Route,
    followup_turn: Option<&str>,
) -> Assembled {
    let mut sections: Vec<String> = Vec::new();
    let mut files_used = Vec::new();
    let mut memory_hits = 0;
    let mut web_used = false;
    let mut has_sources = false;
    let mut rag_sources = 0;

    sections.push(request.normalized_prompt.clone());

    if let Some(previous_turn) = followup_turn {
        sections.push(format!("Previous turn (reopened as grounded context for this follow-up):\n{previous_turn}"));
    }

    if verdict.intent == Intent::RankingQuery && !has_category_token(&request.normalized_prompt) {
        sections.push("No specific category was named; ask for one before ranking if it would change the answer.".to_string());
    }

    let light = bypass_heavy(&request.normalized_prompt);

    if let Some((text, paths)) = file_context(state, request).await {
        sections.push(text);
        files_used = paths;
    }

    if !light && (request.flags.use_doc_index || request.flags.use_embeddings) {
        if let Some((text, count)) = rag_context(state, request).await {
            sections.push(text);
            rag_sources = count;
        }
    }

    if !light && followup_turn.is_none() && (verdict.requires_web || request.flags.auto_web) {
        if let Some((text, used)) = web_context(state, request).await {
            sections.push(text);
            web_used = used;
            has_sources = used;
        }
    }

    let (memory_text, hits) = memory_context(state, request).await;
    if let Some(text) = memory_text {
        sections.push(text);
        memory_hits = hits;
    }

    if verdict.intent == Intent::SqlQuery {
        if let Some(text) = sql_schema_context(state).await {
            sections.push(text);
        }
    }

    if verdict.intent == Intent::MultiStep {
        if let Some(text) = planner_preamble(state, &request.normalized_prompt).await {
            sections.push(text);
        }
    }

    if let Some(header) = crate::system_prompts::header_for(&route.system_prompt_id) {
        sections.push(header.to_string());
    }

    Assembled { composed_prompt: sections.join("\n\n"), files_used, memory_hits, web_used, has_sources, rag_sources }
}

fn has_category_token(prompt: &str) -> bool {
    let lowered = prompt.to_ascii_lowercase();
    ["language", "framework", "movie", "restaurant", "book", "city", "country", "player", "team"]
        .iter()
        .any(|token| lowered.contains(token))
}

async fn file_context(state: &AppState, request: &Request) -> Option<(String, Vec<String>)> {
    let candidates: Vec<String> = if !request.file_paths.is_empty() {
        request.file_paths.iter().take(MAX_AUTO_FILES).cloned().collect()
    } else if request.flags.auto_files {
        auto_select_files(state, &request.normalized_prompt).await
    } else {
        Vec::new()
    };

    if candidates.is_empty() {
        return None;
    }

    let mut blocks = Vec::new();
    let mut used = Vec::new();
    for path in candidates {
        let Ok(resolved) = tools::resolve_under_root(&state.data_dir, &path) else { continue };
        let Ok(mut text) = tokio::fs::read_to_string(&resolved).await else { continue };
        if text.len() > MAX_FILE_CHARS {
            text.truncate(MAX_FILE_CHARS);
        }
        blocks.push(format!("--- {path} ---\n{text}"));
        used.push(path);
    }

    if blocks.is_empty() { None } else { Some((blocks.join("\n\n"), used)) }
}

/// Scans up to [`MAX_CANDIDATE_FILES`] files under the project root and
/// picks the top [`MAX_AUTO_FILES`] by keyword overlap with the prompt.
async fn auto_select_files(state: &AppState, prompt: &str) -> Vec<String> {
    let query_keywords = extract_keywords(prompt);
    if query_keywords.is_empty() {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    let mut stack = vec![state.data_dir.clone()];
    while let Some(dir) = stack.pop() {
        if candidates.len() >= MAX_CANDIDATE_FILES {
            break;
        }
        let Ok(mut entries) = tokio::fs::read_dir(&dir).await else { continue };
        while let Ok(Some(entry)) = entries.next_entry().await {
            if candidates.len() >= MAX_CANDIDATE_FILES {
                break;
            }
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else {
                candidates.push(path);
            }
        }
    }

    let mut scored: Vec<(String, usize)> = Vec::new();
    for path in candidates {
        let Ok(text) = tokio::fs::read_to_string(&path).await else { continue };
        let file_keywords = extract_keywords(&text);
        let score = query_keywords.iter().filter(|k| file_keywords.contains(k)).count();
        if score == 0 {
            continue;
        }
        let Ok(relative) = path.strip_prefix(&state.data_dir) else { continue };
        scored.push((relative.to_string_lossy().to_string(), score));
    }

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().take(MAX_AUTO_FILES).map(|(path, _)| path).collect()
}

async fn rag_context(state: &AppState, request: &Request) -> Option<(String, usize)> {
    let query_keywords = extract_keywords(&request.normalized_prompt);
    let query_embedding = if request.flags.use_embeddings {
        state.backend.embed(EMBEDDING_MODEL, &request.normalized_prompt).await.ok()
    } else {
        None
    };

    let hits = retrieval::hybrid_search(
        &state.keyword_index,
        &state.embedding_index,
        &request.normalized_prompt,
        &query_keywords,
        query_embedding.as_deref(),
        5,
        None,
    )
    .await;

    if hits.is_empty() {
        return None;
    }

    let text = hits.iter().map(|h| format!("[{}] {}: {}", h.id, h.path, h.text)).collect::<Vec<_>>().join("\n");
    Some((text, hits.len()))
}

/// URLs present in the prompt are fetched directly; otherwise the configured
/// search engine chain runs. Returns the section text
/// plus whether any source was actually used.
async fn web_context(state: &AppState, request: &Request) -> Option<(String, bool)> {
    let urls = extract_urls(&request.normalized_prompt);

    if !urls.is_empty() {
        let mut pages = Vec::new();
        for url in urls.into_iter().take(2) {
            if let Ok(page) = web::fetch_page(&state.http_client, &url).await {
                pages.push(format!("{} — {}\n{}", page.title.unwrap_or_default(), page.url, page.text));
            }
        }
        return if pages.is_empty() { None } else { Some((pages.join("\n\n"), true)) };
    }

    let engines: Vec<&dyn web::SearchEngine> = state.search_engines.iter().map(|e| e.as_ref()).collect();
    match web::search(&engines, &request.normalized_prompt, 5).await {
        Ok(results) if !results.is_empty() => Some((web::format_citations(&results), true)),
        _ => None,
    }
}

fn extract_urls(prompt: &str) -> Vec<String> {
    prompt.split_whitespace().filter(|token| token.starts_with("http://") || token.starts_with("https://")).map(String::from).collect()
}

async fn memory_context(state: &AppState, request: &Request) -> (Option<String>, usize) {
    let query_keywords = extract_keywords(&request.normalized_prompt);
    let team_id = request.flags.team_mode.then_some(request.team_id.as_deref()).flatten();

    let hits = state.memory.recall(&request.user_id, team_id, &query_keywords, None, 4).await;
    if hits.is_empty() {
        return (None, 0);
    }

    let text = hits.iter().map(|h| format!("- {}", h.summary)).collect::<Vec<_>>().join("\n");
    (Some(format!("Relevant prior context:\n{text}")), hits.len())
}

/// Table schema for the local relational store, when one has been created at
/// the conventional path under the data directory.
async fn sql_schema_context(state: &AppState) -> Option<String> {
    let db_path = state.data_dir.join("relay.db");
    if tokio::fs::try_exists(&db_path).await.unwrap_or(false) {
        let path = db_path.to_string_lossy().to_string();
        let result = state.sql_store.schema(&path).ok()?;
        let text = result.rows.iter().map(|row| row.join(": ")).collect::<Vec<_>>().join("\n");
        if text.is_empty() { None } else { Some(format!("SQL schema:\n{text}")) }
    } else {
        None
    }
}

/// A short numbered plan for a multi-step prompt, produced by a cheap model
/// ahead of the main generation call.
async fn planner_preamble(state: &AppState, prompt: &str) -> Option<String> {
    let planner_prompt = format!("In a few numbered steps, outline a plan to address this request. Do not answer it yet:\n\n{prompt}");
    state.backend.generate("fast", &planner_prompt).await.ok().map(|plan| format!("Plan:\n{plan}"))
}

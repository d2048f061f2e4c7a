//! The shared request pipeline: classify → local-solve/cache → assemble →
//! route → generate → validate → cache-write → memory-write.
//!
//! [`run`] emits [`PipelineEvent`]s as it goes so the same logic drives both
//! the blocking `/api/auto` handler (which just collects `Token`s) and the
//! WebSocket handler (which forwards each event as a JSON message).

use crate::assembly::{self, Assembled};
use crate::state::AppState;
use cache::CacheEntry;
use context::{ClassifierContext, ConversationMessage, Envelope, Intent, IntentVerdict, RelayError, Request, Role, Route};
use generation::{Phase, RetryReason, SupervisorEvent};
use futures_util::StreamExt;
use jiff::Zoned;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub enum PipelineEvent {
    IntentClassification(IntentVerdict),
    ReasoningPhase(Phase),
    WebSearchResults { used: bool },
    Token(String),
    ModelFallback { reason: &'static str },
    ModelRetryStart { reason: &'static str },
    ModelRetryDone,
    ModelRetryFailed { message: String },
    Done(Box<DoneInfo>),
    Error(RelayError),
}

#[derive(Debug, Clone)]
pub struct DoneInfo {
    pub model: String,
    pub route: Route,
    pub envelope: Envelope,
    pub assembled: Assembled,
    pub cache_hit: bool,
}

fn retry_reason_str(reason: RetryReason) -> &'static str {
    match reason {
        RetryReason::InsufficientMemory => "insufficient_memory",
        RetryReason::Timeout => "timeout",
    }
}

/// Runs the full pipeline for `request`, invoking `on_event` for every event
/// in write order, with exactly one of `Done`/`Error` last.
pub async fn run(
    state: &AppState,
    request: &Request,
    cancel: CancellationToken,
    mut on_event: impl FnMut(PipelineEvent),
) {
    if let Some(invocation) = tools::parse_explicit(&request.raw_prompt) {
        if !state.config.tools.enabled {
            on_event(PipelineEvent::Error(RelayError::ToolsDisabled));
            return;
        }
        match run_explicit_tool(state, &invocation).await {
            Ok(envelope) => {
                let route = Route { task: context::RouteTask::Fast, model: "tool".to_string(), system_prompt_id: "tool".to_string(), rationale: "explicit tool invocation".to_string() };
                emit_done(&mut on_event, route.model.clone(), route, envelope, Assembled::default(), false);
            }
            Err(e) => on_event(PipelineEvent::Error(e)),
        }
        return;
    }

    let history = state.conversations.history(&request.user_id);
    let classifier_ctx = classifier_context(&history);

    let today = Zoned::now().date();
    if let Some(envelope) = solvers::try_solve(&request.normalized_prompt, today) {
        let verdict = intent::classify(&request.normalized_prompt, &classifier_ctx);
        on_event(PipelineEvent::IntentClassification(verdict.clone()));
        let model = local_model_tag(&envelope, verdict.intent);
        let route = Route { task: context::RouteTask::Fast, model: model.clone(), system_prompt_id: "fast".to_string(), rationale: "solved locally".to_string() };
        stream_envelope_tokens(&mut on_event, &envelope);
        emit_done(&mut on_event, model, route, envelope, Assembled::default(), false);
        write_memory(state, request, verdict.intent, None).await;
        return;
    }

    let raw_verdict = intent::classify(&request.normalized_prompt, &classifier_ctx);
    on_event(PipelineEvent::IntentClassification(raw_verdict.clone()));

    let previous_user_turn = previous_user_turn(&history);
    let is_followup = memory::is_followup(&request.normalized_prompt, history.last().map(|m| m.content.as_str()));

    let verdict = if is_followup {
        match previous_user_turn {
            Some(previous) => {
                let expanded = format!("{} {}", previous.content, request.normalized_prompt);
                intent::classify(&expanded, &classifier_ctx)
            }
            None => raw_verdict.clone(),
        }
    } else {
        raw_verdict.clone()
    };

    let cache_key = cache::intent_hash36(verdict.intent, &request.normalized_prompt);
    if let Some(hit) = state.cache.get_exact(&cache_key) {
        let envelope = Envelope::parse(&hit.response).unwrap_or_else(|| Envelope::omitted(hit.response.clone()));
        stream_envelope_tokens(&mut on_event, &envelope);
        let route = Route { task: context::RouteTask::Chat, model: "cache".to_string(), system_prompt_id: "chat".to_string(), rationale: "exact cache hit".to_string() };
        emit_done(&mut on_event, "cache".to_string(), route, envelope, Assembled::default(), true);
        return;
    }

    let route = routing::select(request, &verdict);
    let followup_turn = is_followup.then_some(previous_user_turn).flatten().map(|m| m.content.as_str());
    let assembled = assembly::assemble(state, request, &verdict, &route, followup_turn).await;
    on_event(PipelineEvent::WebSearchResults { used: assembled.web_used });

    let mut stream = state.supervisor.run(
        assembled.composed_prompt.clone(),
        route.model.clone(),
        verdict.intent,
        verdict.complexity,
        verdict.requires_web,
        cancel,
    );

    let mut tokens = String::new();
    let mut final_model = route.model.clone();
    let mut retried = false;

    while let Some(event) = stream.next().await {
        match event {
            SupervisorEvent::Phase(phase) => on_event(PipelineEvent::ReasoningPhase(phase)),
            SupervisorEvent::Token(token) => {
                tokens.push_str(&token);
                on_event(PipelineEvent::Token(token));
            }
            SupervisorEvent::ModelRetryStart { reason } => {
                tokens.clear();
                retried = true;
                let reason = retry_reason_str(reason);
                on_event(PipelineEvent::ModelFallback { reason });
                on_event(PipelineEvent::ModelRetryStart { reason });
            }
            SupervisorEvent::Done { model } => {
                final_model = model;
                if retried {
                    on_event(PipelineEvent::ModelRetryDone);
                }
            }
            SupervisorEvent::Failed { message } => {
                if retried {
                    on_event(PipelineEvent::ModelRetryFailed { message: message.clone() });
                }
                on_event(PipelineEvent::Error(RelayError::BackendError(message)));
                return;
            }
            SupervisorEvent::Cancelled => {
                on_event(PipelineEvent::Error(RelayError::Cancelled));
                return;
            }
        }
    }

    let envelope = Envelope::parse(&tokens).unwrap_or_else(|| Envelope::omitted(tokens.trim().to_string()));

    let validation_ctx = validation::ValidationContext { model: &final_model, has_sources: assembled.has_sources };
    let validated = match validation::validate(&request.normalized_prompt, verdict.intent, envelope, &validation_ctx, &state.backend).await {
        Ok(v) => v,
        Err(e) => {
            on_event(PipelineEvent::Error(e.into()));
            return;
        }
    };

    if validated.cacheable {
        let embedding = if request.flags.use_embeddings {
            state.backend.embed(crate::state::EMBEDDING_MODEL, &request.normalized_prompt).await.ok()
        } else {
            None
        };
        let is_fast_route = route.task == context::RouteTask::Fast;
        state.cache.insert(CacheEntry::new(cache_key, validated.envelope.render(), verdict.intent, embedding, is_fast_route));
    }

    write_memory(state, request, verdict.intent, Some(&validated.envelope)).await;

    emit_done(&mut on_event, final_model, route, validated.envelope, assembled, false);
}

fn emit_done(
    on_event: &mut impl FnMut(PipelineEvent),
    model: String,
    route: Route,
    envelope: Envelope,
    assembled: Assembled,
    cache_hit: bool,
) {
    on_event(PipelineEvent::Done(Box::new(DoneInfo { model, route, envelope, assembled, cache_hit })));
}

fn stream_envelope_tokens(on_event: &mut impl FnMut(PipelineEvent), envelope: &Envelope) {
    for word in envelope.result.split_inclusive(' ') {
        on_event(PipelineEvent::Token(word.to_string()));
    }
}

async fn run_explicit_tool(state: &AppState, invocation: &tools::ExplicitInvocation) -> Result<Envelope, RelayError> {
    use tools::{Run, Tool, ToolArgs};

    let args = match invocation.tool {
        Tool::Python | Tool::Js | Tool::Ts | Tool::Sympy => ToolArgs::Script { source: invocation.args.clone() },
        Tool::Sql | Tool::SqlSchema => ToolArgs::Sql {
            db_path: state.data_dir.join("relay.db").to_string_lossy().to_string(),
            query: invocation.args.clone(),
            allow_write: false,
        },
        Tool::Ingest => ToolArgs::Ingest { path: invocation.args.clone() },
        Tool::Search | Tool::Fetch | Tool::Summarize | Tool::Analyze | Tool::Visualize => {
            ToolArgs::Text { input: invocation.args.clone() }
        }
    };

    let ctx = state.tool_context();
    let output = invocation.tool.run(args, &ctx).await.map_err(RelayError::from)?;
    Ok(Envelope::omitted(output))
}

/// Picks a model tag for a locally-solved answer. Arithmetic/word-problem
/// math answers are tagged `local-math`; everything else is `local`.
///
/// Note: a word-problem prompt the arithmetic solver cannot parse (it has no
/// explicit operators) falls through to the backend under
/// `MathReasoning`'s complexity-downgrade routing rather than being solved
/// here, since no word-problem solver exists; this tag only fires for
/// prompts the bare arithmetic evaluator actually solves.
fn local_model_tag(_envelope: &Envelope, intent: Intent) -> String {
    if intent == Intent::MathReasoning { "local-math".to_string() } else { "local".to_string() }
}

/// Phrase that, when present in the prompt, triggers a durable
/// `MemoryEntry` save regardless of `flags.force_memory`.
const MEMORY_SAVE_TRIGGER: &str = "save to memory";

fn wants_memory_save(request: &Request) -> bool {
    request.flags.force_memory || request.normalized_prompt.to_ascii_lowercase().contains(MEMORY_SAVE_TRIGGER)
}

/// Builds the previous-turn/preference hints the classifier scores against,
/// from the most recent turns this user has had.
fn classifier_context(history: &[ConversationMessage]) -> ClassifierContext {
    ClassifierContext { previous_intent: previous_user_turn(history).and_then(|m| m.intent), ..Default::default() }
}

fn previous_user_turn(history: &[ConversationMessage]) -> Option<&ConversationMessage> {
    history.iter().rev().find(|m| m.role == Role::User)
}

async fn write_memory(state: &AppState, request: &Request, verdict_intent: Intent, envelope: Option<&Envelope>) {
    let now = jiff::Timestamp::now();

    let due_for_summary = state.conversations.push(
        &request.user_id,
        ConversationMessage {
            role: Role::User,
            content: request.raw_prompt.clone(),
            timestamp: now,
            intent: Some(verdict_intent),
            quality_score: None,
            code_language: None,
        },
    );

    if due_for_summary {
        emit_conversation_summary(state, request).await;
    }

    let Some(envelope) = envelope else { return };

    state.conversations.push(
        &request.user_id,
        ConversationMessage {
            role: Role::Assistant,
            content: envelope.result.clone(),
            timestamp: now,
            intent: None,
            quality_score: None,
            code_language: None,
        },
    );

    if !wants_memory_save(request) {
        return;
    }

    let entry = memory::MemoryEntry::new(
        uuid::Uuid::new_v4().to_string(),
        &request.raw_prompt,
        envelope.result.clone(),
        request.user_id.clone(),
        request.team_id.clone(),
        "conversation".to_string(),
        None,
        now,
    );
    let _ = state.memory.save_entry(entry).await;
}

/// Fires every N user turns, signaled by the conversation tracker's push: a
/// short recap of recent conversation, saved as a `summary`-typed
/// `MemoryEntry` so later recalls see the gist instead of the full ring
/// buffer.
async fn emit_conversation_summary(state: &AppState, request: &Request) {
    let history = state.conversations.history(&request.user_id);
    let transcript = history.iter().map(|m| format!("{:?}: {}", m.role, m.content)).collect::<Vec<_>>().join("\n");
    let prompt = format!("Summarize this conversation in two or three sentences:\n\n{transcript}");

    let Ok(summary) = state.backend.generate("fast", &prompt).await else { return };

    let now = jiff::Timestamp::now();
    let entry = memory::MemoryEntry::new(
        uuid::Uuid::new_v4().to_string(),
        &request.raw_prompt,
        summary,
        request.user_id.clone(),
        request.team_id.clone(),
        "summary".to_string(),
        None,
        now,
    );
    let _ = state.memory.save_entry(entry).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::extract::State as AxumState;
    use axum::routing::post;
    use axum::{Json, Router};
    use config::Config;
    use context::{Flags, Options, Request as CtxRequest};
    use serde_json::{Value, json};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;
    use web::{SearchEngine, SearchResult};

    struct FakeSearchEngine {
        results: Vec<SearchResult>,
    }

    #[async_trait]
    impl SearchEngine for FakeSearchEngine {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn search(&self, _query: &str, _limit: usize) -> web::Result<Vec<SearchResult>> {
            Ok(self.results.clone())
        }
    }

    #[derive(Clone)]
    struct MockState {
        calls: Arc<AtomicUsize>,
        /// Whether the very first `/api/generate` call should fail with the
        /// backend's memory-pressure sentinel, to exercise the supervisor's
        /// fallback path.
        fail_first: bool,
    }

    async fn mock_generate(AxumState(state): AxumState<MockState>, Json(body): Json<Value>) -> String {
        let n = state.calls.fetch_add(1, Ordering::SeqCst);
        let stream = body["stream"].as_bool().unwrap_or(false);

        if n == 0 && state.fail_first {
            return "{\"response\":\"\",\"done\":true,\"error\":\"not enough memory to load model\"}\n".to_string();
        }

        if stream {
            "{\"response\":\"The \",\"done\":false}\n{\"response\":\"answer is 42.\",\"done\":true}\n".to_string()
        } else {
            json!({ "response": "The answer is 42.", "done": true }).to_string()
        }
    }

    async fn mock_embed() -> Json<Value> {
        Json(json!({ "embedding": [0.1_f32; 8] }))
    }

    async fn spawn_mock_backend(fail_first: bool) -> SocketAddr {
        let state = MockState { calls: Arc::new(AtomicUsize::new(0)), fail_first };
        let app = Router::new()
            .route("/api/generate", post(mock_generate))
            .route("/api/embeddings", post(mock_embed))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        addr
    }

    async fn build_test_state(backend_addr: SocketAddr, search_results: Vec<SearchResult>) -> (AppState, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.data.data_dir = dir.path().to_string_lossy().to_string();
        config.backend.url = format!("http://{backend_addr}");

        let mut state = AppState::load(config).await.unwrap();
        state.search_engines = vec![Arc::new(FakeSearchEngine { results: search_results })];
        (state, dir)
    }

    fn make_request(prompt: &str) -> CtxRequest {
        CtxRequest {
            request_id: "test-request".to_string(),
            user_id: "test-user".to_string(),
            team_id: None,
            raw_prompt: prompt.to_string(),
            normalized_prompt: prompt.trim().to_string(),
            language: None,
            task_override: None,
            model_override: None,
            options: Options::default(),
            flags: Flags::default(),
            file_paths: Vec::new(),
            image_description: None,
            response_spec: None,
        }
    }

    async fn run_collecting(state: &AppState, request: &CtxRequest) -> (Vec<PipelineEvent>, Option<DoneInfo>) {
        let mut events = Vec::new();
        let mut done = None;
        pipeline_run_collect(state, request, CancellationToken::new(), &mut events, &mut done).await;
        (events, done)
    }

    async fn pipeline_run_collect(
        state: &AppState,
        request: &CtxRequest,
        cancel: CancellationToken,
        events: &mut Vec<PipelineEvent>,
        done: &mut Option<DoneInfo>,
    ) {
        run(state, request, cancel, |event| {
            if let PipelineEvent::Done(info) = &event {
                *done = Some((**info).clone());
            }
            events.push(event);
        })
        .await;
    }

    /// S1: pure arithmetic is solved locally, without ever touching the backend.
    #[tokio::test]
    async fn pure_arithmetic_is_solved_locally() {
        let backend_addr = spawn_mock_backend(false).await;
        let (state, _dir) = build_test_state(backend_addr, Vec::new()).await;
        let request = make_request("28 - 4 + 2");

        let (_, done) = run_collecting(&state, &request).await;
        let done = done.expect("pipeline must emit Done");

        assert!(done.envelope.result.contains("26"));
        assert_eq!(done.model, "local-math");
    }

    /// S2: an instant-conversation prompt is solved locally too.
    #[tokio::test]
    async fn greeting_is_solved_locally() {
        let backend_addr = spawn_mock_backend(false).await;
        let (state, _dir) = build_test_state(backend_addr, Vec::new()).await;
        let request = make_request("hi");

        let (_, done) = run_collecting(&state, &request).await;
        let done = done.expect("pipeline must emit Done");

        assert!(done.envelope.result.to_ascii_lowercase().contains("hello"));
    }

    /// S4: a ranking query with no usable sources gets the stock refusal and
    /// is never written to the cache.
    #[tokio::test]
    async fn ungrounded_ranking_is_refused_and_not_cached() {
        let backend_addr = spawn_mock_backend(false).await;
        let (state, _dir) = build_test_state(backend_addr, Vec::new()).await;
        let request = make_request("What are the best programming languages for systems work?");

        let verdict = intent::classify(&request.normalized_prompt, &ClassifierContext::default());
        assert_eq!(verdict.intent, Intent::RankingQuery);

        let (_, done) = run_collecting(&state, &request).await;
        let done = done.expect("pipeline must emit Done, not Error, for an ungrounded ranking");

        assert!(done.envelope.result.contains("can't produce a grounded ranking"));

        let cache_key = cache::intent_hash36(Intent::RankingQuery, &request.normalized_prompt);
        assert!(state.cache.get_exact(&cache_key).is_none());
    }

    /// S5: the same ranking query, with search results available, produces a
    /// grounded answer instead of the refusal.
    #[tokio::test]
    async fn grounded_ranking_with_sources_is_not_refused() {
        let backend_addr = spawn_mock_backend(false).await;
        let sources = vec![
            SearchResult { title: "Rust".to_string(), url: "https://example.com/rust".to_string(), snippet: "Systems language".to_string() },
            SearchResult { title: "C++".to_string(), url: "https://example.com/cpp".to_string(), snippet: "Systems language".to_string() },
            SearchResult { title: "Zig".to_string(), url: "https://example.com/zig".to_string(), snippet: "Systems language".to_string() },
        ];
        let (state, _dir) = build_test_state(backend_addr, sources).await;
        let request = make_request("What are the best programming languages for systems work?");

        let (_, done) = run_collecting(&state, &request).await;
        let done = done.expect("pipeline must emit Done");

        assert!(!done.envelope.result.contains("can't produce a grounded ranking"));
        assert!(done.assembled.has_sources);
    }

    /// S6: the backend's first attempt fails with the memory-pressure
    /// sentinel; the supervisor falls back to a second model and the request
    /// still completes successfully.
    #[tokio::test]
    async fn falls_back_to_a_smaller_model_on_memory_pressure() {
        let backend_addr = spawn_mock_backend(true).await;
        let (state, _dir) = build_test_state(backend_addr, Vec::new()).await;
        let request = make_request("Write a short poem about the sea, in the style of a sailor's shanty please.");

        let (events, done) = run_collecting(&state, &request).await;
        let done = done.expect("pipeline must still complete after one fallback");

        assert!(done.envelope.result.contains("42"));

        let saw_fallback = events.iter().any(|e| matches!(e, PipelineEvent::ModelFallback { .. }));
        let saw_retry_done = events.iter().any(|e| matches!(e, PipelineEvent::ModelRetryDone));
        assert!(saw_fallback);
        assert!(saw_retry_done);
    }

    /// S7: cancelling before the supervisor ever starts streaming surfaces a
    /// `Cancelled` error and no `Done` event.
    #[tokio::test]
    async fn cancellation_before_generation_yields_no_done() {
        let backend_addr = spawn_mock_backend(false).await;
        let (state, _dir) = build_test_state(backend_addr, Vec::new()).await;
        let request = make_request("Explain the halting problem in detail, with examples.");

        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut events = Vec::new();
        let mut done = None;
        pipeline_run_collect(&state, &request, cancel, &mut events, &mut done).await;

        assert!(done.is_none());
        assert!(events.iter().any(|e| matches!(e, PipelineEvent::Error(RelayError::Cancelled))));
    }
}

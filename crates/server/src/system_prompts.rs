//! Short instruction headers keyed by `Route::system_prompt_id`.

/// Returns the instruction header for `system_prompt_id`, or `None` for the
/// plain `chat` id, which needs no extra framing.
pub fn header_for(system_prompt_id: &str) -> Option<&'static str> {
    match system_prompt_id {
        "chat" => None,
        "reasoning" => Some(
            "Think through the problem carefully before answering. Always reply using the Thinking/Result envelope.",
        ),
        "code" => Some("Write correct, idiomatic code. Explain nothing outside the envelope's Result section."),
        "sql" => Some("Write a single SQL statement unless asked for more. Reference the schema block if present."),
        "debug" => Some("Diagnose the root cause from the log or trace given, then propose a concrete fix."),
        "chart" => Some("Respond with a `CHART_JSON:` line followed by chart-ready JSON data, nothing else."),
        "vision" => Some("Describe and reason about the image description provided as if you could see the image."),
        "research" => Some("Ground every claim in the provided web context; cite sources as `[n]`."),
        "report" => Some("Produce a structured report with a short executive summary and supporting detail."),
        "dashboard" => Some("Produce a complete dashboard implementation using the requested framework."),
        "dashboard_vanilla" => Some("Produce a complete dashboard implementation using only vanilla HTML/CSS/JS."),
        "image_prompt" => Some("Write a single descriptive image-generation prompt, nothing else."),
        "video_prompt" => Some("Write a single descriptive video-generation prompt, nothing else."),
        "fast" => Some("Answer as concisely as correctness allows."),
        "grammar" => Some("Correct grammar and spelling only; do not change meaning or style."),
        "personal" => Some("Answer using the user's own prior conversation and memory context, verbatim where possible."),
        "ranking" => Some(
            "Produce a numbered ranking (`1.`, `2.`, ...) grounded only in the provided sources, with a `[n]` \
             citation on every item. If no sources were provided, say so instead of guessing.",
        ),
        _ => None,
    }
}

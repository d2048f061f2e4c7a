//! Route and model selection.
//!
//! `select` is a pure function of the intent verdict, the request flags, and
//! any explicit overrides. It never queries the backend or the filesystem.

mod priority;

use context::{ComplexityTier, ConfidenceTier, Intent, IntentVerdict, Request, ResponseSpec, Route, RouteTask};
use priority::TABLE;

/// Prompts at or under this length skip straight to the `fast` route.
const TINY_PROMPT_CHARS: usize = 40;

const REASONING_INTENTS: &[Intent] = &[
    Intent::MathReasoning,
    Intent::ProofSolving,
    Intent::SystemDesign,
    Intent::MultiStep,
    Intent::AnalysisReport,
    Intent::DataAnalysis,
];

fn task_from_override(raw: &str) -> Option<(RouteTask, &'static str, &'static str)> {
    match raw {
        "chat" => Some((RouteTask::Chat, "chat", "chat")),
        "reason" | "reasoning" => Some((RouteTask::Reason, "reasoning", "reasoning")),
        "code" => Some((RouteTask::Code, "coder", "code")),
        "sql" => Some((RouteTask::Sql, "coder", "sql")),
        "debug" => Some((RouteTask::Debug, "coder", "debug")),
        "chart" => Some((RouteTask::Chart, "coder", "chart")),
        "vision" => Some((RouteTask::Vision, "vision", "vision")),
        "research" => Some((RouteTask::Research, "chat", "research")),
        "report" => Some((RouteTask::Report, "reasoning", "report")),
        "dashboard" => Some((RouteTask::Dashboard, "coder", "dashboard")),
        "dashboard_vanilla" => Some((RouteTask::DashboardVanilla, "coder", "dashboard_vanilla")),
        "image_prompt" => Some((RouteTask::ImagePrompt, "chat", "image_prompt")),
        "video_prompt" => Some((RouteTask::VideoPrompt, "chat", "video_prompt")),
        "fast" => Some((RouteTask::Fast, "fast", "fast")),
        "grammar" => Some((RouteTask::Grammar, "small", "grammar")),
        "personal" => Some((RouteTask::Personal, "fast", "personal")),
        _ => None,
    }
}

fn is_reasoning_intent(intent: Intent) -> bool {
    REASONING_INTENTS.contains(&intent)
}

/// Selects a `Route` for the given request and intent verdict. Decision order:
/// explicit override, image present, priority pattern tables, fast-path
/// shortcut, default chat, followed by a confidence/complexity escalation or
/// downgrade pass.
pub fn select(request: &Request, verdict: &IntentVerdict) -> Route {
    let (mut task, mut model, mut system_prompt_id, mut rationale) =
        base_selection(request, verdict);

    escalate(verdict, &mut task, &mut model, &mut rationale);

    if matches!(verdict.intent, Intent::RankingQuery)
        && request.task_override.is_none()
        && !matches!(request.response_spec, Some(ResponseSpec::Table) | Some(ResponseSpec::Chart))
    {
        system_prompt_id = "ranking".to_string();
    }

    Route {
        task,
        model: model.to_string(),
        system_prompt_id,
        rationale,
    }
}

fn base_selection(request: &Request, verdict: &IntentVerdict) -> (RouteTask, &'static str, String, String) {
    if let Some(raw) = request.task_override.as_deref() {
        if let Some((task, model, prompt_id)) = task_from_override(raw) {
            return (task, model, prompt_id.to_string(), "explicit task override".to_string());
        }
    }

    if request.image_description.is_some() {
        return (RouteTask::Vision, "vision", "vision".to_string(), "image description present".to_string());
    }

    let lowercased = request.normalized_prompt.to_ascii_lowercase();
    for entry in TABLE {
        if entry.patterns.iter().any(|p| lowercased.contains(p)) {
            return (
                entry.task,
                entry.model,
                entry.system_prompt_id.to_string(),
                format!("matched priority pattern table for {:?}", entry.task),
            );
        }
    }

    if request.flags.fast || request.normalized_prompt.chars().count() <= TINY_PROMPT_CHARS {
        return (RouteTask::Fast, "fast", "fast".to_string(), "preferFast or short prompt".to_string());
    }

    let _ = verdict;
    (RouteTask::Chat, "chat", "chat".to_string(), "default".to_string())
}

fn escalate(verdict: &IntentVerdict, task: &mut RouteTask, model: &mut &'static str, rationale: &mut String) {
    let should_escalate = verdict.confidence == ConfidenceTier::Low
        || (verdict.confidence == ConfidenceTier::Medium && verdict.complexity >= ComplexityTier::High);

    if should_escalate {
        *model = match task {
            RouteTask::Code => "coder",
            RouteTask::Grammar => "small",
            _ if is_reasoning_intent(verdict.intent) => "reasoning",
            _ => "chat",
        };
        rationale.push_str("; escalated on low confidence or medium/high-complexity combo");
    }

    if verdict.intent == Intent::MathReasoning && verdict.complexity <= ComplexityTier::Medium {
        *model = "small";
        *task = RouteTask::Fast;
        rationale.push_str("; downgraded trivial/simple math to the smallest model");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use context::{Flags, Options};

    fn request(prompt: &str) -> Request {
        Request {
            request_id: "r1".into(),
            user_id: "u1".into(),
            team_id: None,
            raw_prompt: prompt.into(),
            normalized_prompt: prompt.into(),
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

    fn verdict(intent: Intent, confidence: ConfidenceTier, complexity: ComplexityTier) -> IntentVerdict {
        IntentVerdict {
            intent,
            confidence,
            score: 5,
            requires_web: false,
            preferred_model: "chat".into(),
            primary_tools: Vec::new(),
            flexible_tools: false,
            complexity,
            alternatives: Vec::new(),
            has_question_mark: false,
            has_code: false,
            has_sql: false,
            has_html: false,
            has_formula: false,
            has_math: false,
            word_count: 2,
        }
    }

    #[test]
    fn explicit_override_wins_over_everything_else() {
        let mut req = request("write a function to sort a list");
        req.task_override = Some("chat".to_string());
        let route = select(&req, &verdict(Intent::CodeTask, ConfidenceTier::High, ComplexityTier::Low));
        assert_eq!(route.task, RouteTask::Chat);
    }

    #[test]
    fn image_description_forces_vision() {
        let mut req = request("what is in this picture");
        req.image_description = Some("a cat on a couch".to_string());
        let route = select(&req, &verdict(Intent::SimpleQa, ConfidenceTier::Medium, ComplexityTier::Low));
        assert_eq!(route.task, RouteTask::Vision);
    }

    #[test]
    fn matches_priority_pattern_table_for_sql() {
        let req = request("please write a sql query against the users table");
        let route = select(&req, &verdict(Intent::SqlQuery, ConfidenceTier::High, ComplexityTier::Low));
        assert_eq!(route.task, RouteTask::Sql);
    }

    #[test]
    fn short_prompt_takes_fast_path() {
        let req = request("hi there");
        let route = select(&req, &verdict(Intent::SimpleQa, ConfidenceTier::Medium, ComplexityTier::Low));
        assert_eq!(route.task, RouteTask::Fast);
    }

    #[test]
    fn low_confidence_escalates_code_to_coder_model() {
        let req = request("write a function to merge two sorted arrays of arbitrary length efficiently please");
        let route = select(&req, &verdict(Intent::CodeTask, ConfidenceTier::Low, ComplexityTier::Medium));
        assert_eq!(route.model, "coder");
    }

    #[test]
    fn trivial_math_downgrades_to_smallest_model() {
        let req = request("what does 12 divided by 4 equal in total for this problem");
        let route = select(&req, &verdict(Intent::MathReasoning, ConfidenceTier::High, ComplexityTier::Low));
        assert_eq!(route.model, "small");
        assert_eq!(route.task, RouteTask::Fast);
    }

    #[test]
    fn ranking_intent_forces_ranking_prompt() {
        let req = request("what are the top 10 programming languages to learn in 2026 for backend development");
        let route = select(&req, &verdict(Intent::RankingQuery, ConfidenceTier::High, ComplexityTier::Medium));
        assert_eq!(route.system_prompt_id, "ranking");
    }

    #[test]
    fn ranking_intent_does_not_clobber_an_explicit_task_override() {
        let mut req = request("what are the top 10 programming languages to learn in 2026 for backend development");
        req.task_override = Some("report".to_string());
        let route = select(&req, &verdict(Intent::RankingQuery, ConfidenceTier::High, ComplexityTier::Medium));
        assert_eq!(route.system_prompt_id, "report");
    }
}

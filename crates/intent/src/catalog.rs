//! The closed intent catalog: for each `Intent`, a pattern list, an optional
//! shape predicate, and the routing metadata the classifier attaches to its
//! verdict.

use context::Intent;
use regex::Regex;
use std::sync::LazyLock;

pub struct Profile {
    pub intent: Intent,
    pub patterns: &'static [&'static str],
    pub advanced_check: Option<fn(&str) -> bool>,
    pub requires_web: bool,
    pub preferred_model: &'static str,
    pub primary_tools: &'static [&'static str],
    pub flexible_tools: bool,
}

static ARITHMETIC_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]\s*[-+*/×÷]\s*[0-9]").unwrap());
static FORMULA_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)=[A-Z]+\(").unwrap());
static SQL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(select|insert|update|delete)\b.*\bfrom\b|\bfrom\b.*\bwhere\b").unwrap());
static CODE_FENCE_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```").unwrap());

fn is_arithmetic_shape(prompt: &str) -> bool {
    ARITHMETIC_SHAPE.is_match(prompt)
}

fn is_formula_shape(prompt: &str) -> bool {
    FORMULA_SHAPE.is_match(prompt)
}

fn is_sql_shape(prompt: &str) -> bool {
    SQL_SHAPE.is_match(prompt)
}

fn is_code_fence_shape(prompt: &str) -> bool {
    CODE_FENCE_SHAPE.is_match(prompt)
}

pub static CATALOG: &[Profile] = &[
    Profile {
        intent: Intent::SimpleQa,
        patterns: &["what is", "who is", "when is", "where is", "define", "what's the"],
        advanced_check: None,
        requires_web: false,
        preferred_model: "fast",
        primary_tools: &[],
        flexible_tools: false,
    },
    Profile {
        intent: Intent::GrammarCorrection,
        patterns: &["fix grammar", "correct this", "proofread", "fix the spelling", "grammar check"],
        advanced_check: None,
        requires_web: false,
        preferred_model: "small",
        primary_tools: &[],
        flexible_tools: false,
    },
    Profile {
        intent: Intent::WorldKnowledge,
        patterns: &["latest", "current", "news", "today", "recent", "this year", "as of"],
        advanced_check: None,
        requires_web: true,
        preferred_model: "chat",
        primary_tools: &["web_search"],
        flexible_tools: true,
    },
    Profile {
        intent: Intent::RankingQuery,
        patterns: &["top 10", "top ten", "best", "rank", "compare", "vs", "which is better"],
        advanced_check: None,
        requires_web: true,
        preferred_model: "chat",
        primary_tools: &["web_search"],
        flexible_tools: true,
    },
    Profile {
        intent: Intent::CodeTask,
        patterns: &["write a function", "implement", "refactor", "write code", "fix this bug", "write a program"],
        advanced_check: Some(is_code_fence_shape),
        requires_web: false,
        preferred_model: "coder",
        primary_tools: &["python_sandbox"],
        flexible_tools: true,
    },
    Profile {
        intent: Intent::MathReasoning,
        patterns: &["solve", "calculate", "how many", "how much", "equation", "derivative", "integral"],
        advanced_check: Some(is_arithmetic_shape),
        requires_web: false,
        preferred_model: "reasoning",
        primary_tools: &[],
        flexible_tools: false,
    },
    Profile {
        intent: Intent::SqlQuery,
        patterns: &["sql query", "select statement", "write a query", "join table"],
        advanced_check: Some(is_sql_shape),
        requires_web: false,
        preferred_model: "coder",
        primary_tools: &["sql_store"],
        flexible_tools: false,
    },
    Profile {
        intent: Intent::DataAnalysis,
        patterns: &["analyze this data", "dataset", "csv", "summarize the numbers", "statistics on"],
        advanced_check: None,
        requires_web: false,
        preferred_model: "reasoning",
        primary_tools: &["python_sandbox"],
        flexible_tools: true,
    },
    Profile {
        intent: Intent::Creative,
        patterns: &["write a story", "write a poem", "brainstorm", "imagine", "creative writing"],
        advanced_check: None,
        requires_web: false,
        preferred_model: "chat",
        primary_tools: &[],
        flexible_tools: false,
    },
    Profile {
        intent: Intent::DecisionMaking,
        patterns: &["should i", "help me decide", "pros and cons", "which option"],
        advanced_check: None,
        requires_web: false,
        preferred_model: "chat",
        primary_tools: &[],
        flexible_tools: false,
    },
    Profile {
        intent: Intent::Learning,
        patterns: &["explain", "teach me", "how does", "help me understand", "tutorial"],
        advanced_check: None,
        requires_web: false,
        preferred_model: "chat",
        primary_tools: &[],
        flexible_tools: false,
    },
    Profile {
        intent: Intent::Memory,
        patterns: &["remember that", "what did i say", "recall", "my previous", "do you remember"],
        advanced_check: None,
        requires_web: false,
        preferred_model: "fast",
        primary_tools: &["memory_recall"],
        flexible_tools: false,
    },
    Profile {
        intent: Intent::MultiStep,
        patterns: &["first do", "then do", "step by step", "multiple steps", "and then"],
        advanced_check: None,
        requires_web: false,
        preferred_model: "reasoning",
        primary_tools: &[],
        flexible_tools: true,
    },
    Profile {
        intent: Intent::DebugLog,
        patterns: &["stack trace", "exception", "traceback", "error message", "why is this failing", "debug this"],
        advanced_check: None,
        requires_web: false,
        preferred_model: "coder",
        primary_tools: &["python_sandbox"],
        flexible_tools: true,
    },
    Profile {
        intent: Intent::HtmlMarkup,
        patterns: &["html page", "write html", "landing page", "webpage layout"],
        advanced_check: None,
        requires_web: false,
        preferred_model: "coder",
        primary_tools: &[],
        flexible_tools: false,
    },
    Profile {
        intent: Intent::AnalysisReport,
        patterns: &["write a report", "summarize findings", "executive summary", "analysis report"],
        advanced_check: None,
        requires_web: true,
        preferred_model: "reasoning",
        primary_tools: &["web_search"],
        flexible_tools: true,
    },
    Profile {
        intent: Intent::Visualization,
        patterns: &["make a chart", "plot this", "graph this", "visualize", "dashboard"],
        advanced_check: None,
        requires_web: false,
        preferred_model: "coder",
        primary_tools: &["python_sandbox"],
        flexible_tools: false,
    },
    Profile {
        intent: Intent::ProofSolving,
        patterns: &["prove that", "proof of", "show that", "demonstrate that"],
        advanced_check: None,
        requires_web: false,
        preferred_model: "reasoning",
        primary_tools: &[],
        flexible_tools: false,
    },
    Profile {
        intent: Intent::SystemDesign,
        patterns: &["design a system", "system architecture", "scalable design", "design patterns for"],
        advanced_check: None,
        requires_web: false,
        preferred_model: "reasoning",
        primary_tools: &[],
        flexible_tools: false,
    },
    Profile {
        intent: Intent::FormulaGeneration,
        patterns: &["excel formula", "spreadsheet formula", "write a formula"],
        advanced_check: Some(is_formula_shape),
        requires_web: false,
        preferred_model: "small",
        primary_tools: &[],
        flexible_tools: false,
    },
    Profile {
        intent: Intent::Riddle,
        patterns: &["riddle", "brain teaser", "what am i", "guess what"],
        advanced_check: None,
        requires_web: false,
        preferred_model: "fast",
        primary_tools: &[],
        flexible_tools: false,
    },
];

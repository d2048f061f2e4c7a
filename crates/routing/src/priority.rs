//! Priority pattern tables for route selection.
//!
//! Checked in this fixed order; the first table with a matching pattern wins.

use context::RouteTask;

pub struct PriorityEntry {
    pub task: RouteTask,
    pub patterns: &'static [&'static str],
    pub model: &'static str,
    pub system_prompt_id: &'static str,
}

pub static TABLE: &[PriorityEntry] = &[
    PriorityEntry {
        task: RouteTask::Grammar,
        patterns: &["fix grammar", "correct this", "proofread", "fix the spelling"],
        model: "small",
        system_prompt_id: "grammar",
    },
    PriorityEntry {
        task: RouteTask::Personal,
        patterns: &["remember that", "what did i say", "recall", "my previous", "do you remember"],
        model: "fast",
        system_prompt_id: "personal",
    },
    PriorityEntry {
        task: RouteTask::ImagePrompt,
        patterns: &["image prompt", "generate an image", "draw a", "picture of"],
        model: "chat",
        system_prompt_id: "image_prompt",
    },
    PriorityEntry {
        task: RouteTask::VideoPrompt,
        patterns: &["video prompt", "generate a video", "animate a"],
        model: "chat",
        system_prompt_id: "video_prompt",
    },
    PriorityEntry {
        task: RouteTask::Dashboard,
        patterns: &["dashboard"],
        model: "coder",
        system_prompt_id: "dashboard",
    },
    PriorityEntry {
        task: RouteTask::Chart,
        patterns: &["make a chart", "plot this", "graph this", "visualize"],
        model: "coder",
        system_prompt_id: "chart",
    },
    PriorityEntry {
        task: RouteTask::Report,
        patterns: &["write a report", "summarize findings", "executive summary"],
        model: "reasoning",
        system_prompt_id: "report",
    },
    PriorityEntry {
        task: RouteTask::Research,
        patterns: &["research", "latest", "current", "news", "as of"],
        model: "chat",
        system_prompt_id: "research",
    },
    PriorityEntry {
        task: RouteTask::Debug,
        patterns: &["stack trace", "exception", "traceback", "error message", "debug this"],
        model: "coder",
        system_prompt_id: "debug",
    },
    PriorityEntry {
        task: RouteTask::Sql,
        patterns: &["sql query", "select statement", "write a query", "join table"],
        model: "coder",
        system_prompt_id: "sql",
    },
    PriorityEntry {
        task: RouteTask::Code,
        patterns: &["write a function", "implement", "refactor", "write code", "write a program"],
        model: "coder",
        system_prompt_id: "code",
    },
];

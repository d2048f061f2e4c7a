//! Shared domain types for the request pipeline.
//!
//! Every stage of the pipeline (ingress, classification, routing, generation,
//! validation, egress) passes the same `Request` and builds up typed verdicts
//! (`IntentVerdict`, `Route`) around it. Keeping these types in one crate with
//! no behavior of their own is what lets `intent`, `routing`, `generation` and
//! `tools` depend on a shared vocabulary without depending on each other.

mod conversation;
mod envelope;
mod intent;
mod request;
mod route;

pub use conversation::{ConversationMessage, Role};
pub use envelope::Envelope;
pub use intent::{ClassifierContext, ComplexityTier, ConfidenceTier, Intent, IntentVerdict};
pub use request::{Flags, Options, Request, ResponseSpec};
pub use route::{Route, RouteTask};

/// Error kinds surfaced at the system boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RelayError {
    /// Missing required field or unsupported enum value.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// A tool endpoint was called but the tool subsystem is disabled.
    #[error("tools are disabled")]
    ToolsDisabled,
    /// Sandbox static analysis rejected the code before it ran.
    #[error("unsafe code rejected: {0}")]
    UnsafeCode(String),
    /// A sandboxed process exceeded its hard timeout and was killed.
    #[error("sandbox timed out")]
    SandboxTimeout,
    /// A sandboxed process failed for a reason other than a timeout.
    #[error("sandbox error: {0}")]
    SandboxError(String),
    /// The LM backend returned a non-2xx response; body is echoed.
    #[error("backend error: {0}")]
    BackendError(String),
    /// Per-attempt deadline elapsed.
    #[error("timeout")]
    Timeout,
    /// The client canceled the request or closed the connection.
    #[error("cancelled")]
    Cancelled,
    /// Requested id (report, memory entry, cancel target) does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Web search/fetch produced nothing and the intent requires grounding.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    /// Anything else, already rendered to a safe message.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// Machine-readable error tag used in the HTTP error body.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::ToolsDisabled => "tools_disabled",
            Self::UnsafeCode(_) => "unsafe_code",
            Self::SandboxTimeout => "sandbox_timeout",
            Self::SandboxError(_) => "sandbox_error",
            Self::BackendError(_) => "backend_error",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
            Self::NotFound(_) => "not_found",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, RelayError>;

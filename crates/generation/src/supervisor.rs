//! Fallback state machine and phase emitter.
//!
//! Models the supervisor as `ATTEMPT(model) -> {DONE, RETRY(model, reason),
//! FAILED}`. A second failure in the same request is always terminal.

use crate::backend::{BackendClient, GenerateChunk};
use crate::error::GenerationError;
use crate::phases::{Phase, sequence_for};
use context::{ComplexityTier, Intent};
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    InsufficientMemory,
    Timeout,
}

#[derive(Debug, Clone)]
pub enum SupervisorEvent {
    Phase(Phase),
    Token(String),
    /// Previously streamed tokens for this request are superseded; clients
    /// MUST reset their buffer on receipt.
    ModelRetryStart { reason: RetryReason },
    Done { model: String },
    Failed { message: String },
    Cancelled,
}

/// Per-attempt deadline; the reasoning model has none.
fn attempt_deadline(model: &str) -> Option<Duration> {
    if model == "reasoning" { None } else { Some(Duration::from_secs(45)) }
}

/// Deterministic fallback model, chosen from intent and (for math)
/// complexity rather than from the failed model itself.
fn fallback_model(intent: Intent, complexity: ComplexityTier, current_model: &str) -> String {
    match intent {
        Intent::MathReasoning if complexity <= ComplexityTier::Medium => "small".to_string(),
        Intent::CodeTask | Intent::DebugLog => "coder".to_string(),
        _ if current_model == "reasoning" => "chat".to_string(),
        _ => "fast".to_string(),
    }
}

#[derive(Clone)]
pub struct Supervisor {
    backend: BackendClient,
}

impl Supervisor {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    /// Drives one request end to end. Always terminates with exactly one of
    /// `Done`, `Failed`, or `Cancelled`, and that event is always last.
    pub fn run(
        &self,
        prompt: String,
        model: String,
        intent: Intent,
        complexity: ComplexityTier,
        requires_web: bool,
        cancel: CancellationToken,
    ) -> impl Stream<Item = SupervisorEvent> + use<> {
        let backend = self.backend.clone();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            for phase in sequence_for(intent, complexity, requires_web) {
                if tx.send(SupervisorEvent::Phase(phase)).is_err() {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }

            let mut current_model = model;
            let mut already_retried = false;

            loop {
                match attempt(&backend, &prompt, &current_model, &tx, &cancel).await {
                    AttemptOutcome::Done => {
                        let _ = tx.send(SupervisorEvent::Done { model: current_model });
                        return;
                    }
                    AttemptOutcome::Cancelled => {
                        let _ = tx.send(SupervisorEvent::Cancelled);
                        return;
                    }
                    AttemptOutcome::Unrecoverable(message) => {
                        let _ = tx.send(SupervisorEvent::Failed { message });
                        return;
                    }
                    AttemptOutcome::Recoverable(reason) => {
                        if already_retried {
                            let _ = tx.send(SupervisorEvent::Failed {
                                message: format!("retry failed: {reason:?}"),
                            });
                            return;
                        }
                        already_retried = true;
                        current_model = fallback_model(intent, complexity, &current_model);
                        if tx.send(SupervisorEvent::ModelRetryStart { reason }).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        EventStream { inner: rx }
    }
}

enum AttemptOutcome {
    Done,
    Cancelled,
    Recoverable(RetryReason),
    Unrecoverable(String),
}

async fn attempt(
    backend: &BackendClient,
    prompt: &str,
    model: &str,
    tx: &mpsc::UnboundedSender<SupervisorEvent>,
    cancel: &CancellationToken,
) -> AttemptOutcome {
    let mut stream = match backend.generate_stream(model, prompt).await {
        Ok(stream) => stream,
        Err(err) => return classify(err),
    };

    let deadline = attempt_deadline(model);

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => return AttemptOutcome::Cancelled,
            next = next_with_deadline(&mut stream, deadline) => next,
        };

        match next {
            Some(Ok(GenerateChunk { token, done })) => {
                if !token.is_empty() && tx.send(SupervisorEvent::Token(token)).is_err() {
                    return AttemptOutcome::Cancelled;
                }
                if done {
                    return AttemptOutcome::Done;
                }
            }
            Some(Err(err)) => return classify(err),
            None => return AttemptOutcome::Done,
        }
    }
}

async fn next_with_deadline<S>(
    stream: &mut S,
    deadline: Option<Duration>,
) -> Option<Result<GenerateChunk, GenerationError>>
where
    S: Stream<Item = Result<GenerateChunk, GenerationError>> + Unpin,
{
    match deadline {
        Some(d) => match tokio::time::timeout(d, stream.next()).await {
            Ok(next) => next,
            Err(_) => Some(Err(GenerationError::Timeout)),
        },
        None => stream.next().await,
    }
}

fn classify(err: GenerationError) -> AttemptOutcome {
    if err.is_memory_pressure() {
        AttemptOutcome::Recoverable(RetryReason::InsufficientMemory)
    } else if matches!(err, GenerationError::Timeout) {
        AttemptOutcome::Recoverable(RetryReason::Timeout)
    } else {
        AttemptOutcome::Unrecoverable(err.to_string())
    }
}

struct EventStream {
    inner: mpsc::UnboundedReceiver<SupervisorEvent>,
}

impl Stream for EventStream {
    type Item = SupervisorEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasoning_model_has_no_deadline() {
        assert_eq!(attempt_deadline("reasoning"), None);
        assert!(attempt_deadline("chat").is_some());
    }

    #[test]
    fn fallback_for_trivial_math_is_the_smallest_model() {
        assert_eq!(fallback_model(Intent::MathReasoning, ComplexityTier::Low, "reasoning"), "small");
    }

    #[test]
    fn fallback_for_code_task_is_the_coder_model() {
        assert_eq!(fallback_model(Intent::CodeTask, ComplexityTier::High, "coder"), "coder");
    }
}

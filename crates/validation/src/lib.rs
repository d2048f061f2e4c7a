//! Post-generation validation: math re-check, code self-check, risk review,
//! and ranking validation, plus the cache-write policy that follows from
//! their outcome.

mod cache_policy;
mod code_check;
mod error;
mod math;
mod ranking;
mod risk_review;

pub use cache_policy::should_cache;
pub use error::{Result, ValidationError};
pub use formatter::ResponseShape;

use context::{Envelope, Intent};
use generation::BackendClient;

/// Inputs the validation pass needs beyond the prompt and generated
/// envelope: which model answered (for the single-retry code self-check),
/// and whether any sources were available to ground a ranking.
pub struct ValidationContext<'a> {
    pub model: &'a str,
    pub has_sources: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    pub envelope: Envelope,
    pub shape: ResponseShape,
    pub cacheable: bool,
}

/// Runs every applicable check against `envelope` and returns the final
/// answer along with its detected shape and whether it may be cached.
/// Checks run in order (math, code self-check, risk review, ranking), each
/// operating on the previous check's output so corrections compose.
pub async fn validate(
    prompt: &str,
    intent: Intent,
    mut envelope: Envelope,
    ctx: &ValidationContext<'_>,
    backend: &BackendClient,
) -> Result<Validated> {
    if let Some(corrected) = math::verify(prompt, &envelope).await? {
        envelope = corrected;
    }

    if let Some(corrected) = code_check::verify(prompt, &envelope, ctx.model, backend).await? {
        envelope = corrected;
    }

    if risk_review::applies_to(intent) {
        envelope = risk_review::review(prompt, &envelope, backend).await?;
    }

    let shape = formatter::detect(&envelope.result);
    if shape == ResponseShape::Ranking {
        envelope = ranking::validate(prompt, &envelope, ctx.has_sources);
    }

    let cacheable = should_cache(shape);
    Ok(Validated { envelope, shape, cacheable })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_ranking_shape_is_cacheable() {
        assert!(should_cache(ResponseShape::Text));
    }

    #[test]
    fn ranking_shape_is_not_cacheable() {
        assert!(!should_cache(ResponseShape::Ranking));
    }
}

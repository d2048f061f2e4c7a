//! Cache-write rule: non-ranking answers are cached (exact, plus semantic
//! when an embedding is available); ranking answers never are.

use formatter::ResponseShape;

pub fn should_cache(shape: ResponseShape) -> bool {
    !matches!(shape, ResponseShape::Ranking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_answers_are_never_cached() {
        assert!(!should_cache(ResponseShape::Ranking));
    }

    #[test]
    fn other_shapes_are_cached() {
        assert!(should_cache(ResponseShape::Text));
        assert!(should_cache(ResponseShape::Table));
        assert!(should_cache(ResponseShape::List));
        assert!(should_cache(ResponseShape::Chart));
    }
}

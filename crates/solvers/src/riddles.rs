//! Canonical riddle/common-sense lookup table, matched on normalized prompt text.

const ENTRIES: &[(&str, &str)] = &[
    (
        "what is heavier a pound of feathers or a pound of bricks",
        "they weigh the same, both are one pound",
    ),
    (
        "what weighs more a pound of feathers or a pound of bricks",
        "they weigh the same, both are one pound",
    ),
    (
        "what has keys but no locks",
        "a piano",
    ),
    (
        "what has a face and two hands but no arms or legs",
        "a clock",
    ),
    (
        "what gets wetter the more it dries",
        "a towel",
    ),
    (
        "what can travel around the world while staying in a corner",
        "a stamp",
    ),
    (
        "how many months have 28 days",
        "all twelve months have at least 28 days",
    ),
];

fn normalize(prompt: &str) -> String {
    prompt
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn solve(prompt: &str) -> Option<String> {
    let normalized = normalize(prompt);
    ENTRIES
        .iter()
        .find(|(key, _)| *key == normalized)
        .map(|(_, answer)| answer.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_a_known_riddle() {
        assert_eq!(solve("What has keys but no locks?"), Some("a piano".to_string()));
    }

    #[test]
    fn is_punctuation_insensitive() {
        assert_eq!(
            solve("What  gets wetter, the more it dries?"),
            Some("a towel".to_string())
        );
    }

    #[test]
    fn returns_none_for_unknown_riddle() {
        assert_eq!(solve("why is the sky blue"), None);
    }
}

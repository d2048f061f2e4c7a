//! Greeting and small-talk shortcuts used at the normalization stage, ahead of
//! and separate from the numbered solver chain.

const GREETINGS: &[&str] = &["hi", "hello", "hey", "yo", "good morning", "good evening", "good afternoon"];
const THANKS: &[&str] = &["thanks", "thank you", "thx", "ty"];
const FAREWELLS: &[&str] = &["bye", "goodbye", "see you", "see ya"];

fn normalize(prompt: &str) -> String {
    prompt
        .trim()
        .trim_end_matches(|c: char| c == '!' || c == '.' || c == '?')
        .to_ascii_lowercase()
}

pub fn solve(prompt: &str) -> Option<String> {
    let normalized = normalize(prompt);

    if GREETINGS.contains(&normalized.as_str()) {
        return Some("Hello! How can I help you today?".to_string());
    }

    if THANKS.contains(&normalized.as_str()) {
        return Some("You're welcome!".to_string());
    }

    if FAREWELLS.contains(&normalized.as_str()) {
        return Some("Goodbye!".to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_a_greeting() {
        assert_eq!(solve("Hello!"), Some("Hello! How can I help you today?".to_string()));
    }

    #[test]
    fn answers_thanks() {
        assert_eq!(solve("thanks"), Some("You're welcome!".to_string()));
    }

    #[test]
    fn answers_a_farewell() {
        assert_eq!(solve("bye"), Some("Goodbye!".to_string()));
    }

    #[test]
    fn returns_none_for_a_real_question() {
        assert_eq!(solve("hello, what is the capital of france?"), None);
    }
}

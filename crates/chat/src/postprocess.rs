//! Answer post-processing.
//!
//! Applied to every completion, in order: trim, URL redaction, off-topic
//! refusal. The refusal replaces the whole answer, so it wins over redaction.

use regex::Regex;
use std::sync::LazyLock;

/// Replacement for every redacted URL.
pub const REDACTED_URL: &str = "unsafe url hidden";

/// Answer returned when the model talks about itself instead of the documents.
pub const OFF_TOPIC_REFUSAL: &str =
    "My apologies, I cannot answer your question because it is not related to the document you uploaded.";

/// Lowercase phrases that mark an answer as off-topic.
const OFF_TOPIC_PHRASES: [&str; 3] = ["ai model", "language model", "ai assistant"];

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid regex"));

/// Replace every `http://` or `https://` URL with [`REDACTED_URL`].
pub fn redact_urls(text: &str) -> String {
    URL_RE.replace_all(text, REDACTED_URL).into_owned()
}

/// Whether the answer mentions one of the off-topic phrases.
pub fn is_off_topic(text: &str) -> bool {
    let lowered = text.to_lowercase();
    OFF_TOPIC_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}

/// Turn raw completion text into the final answer.
pub fn postprocess(raw: &str) -> String {
    let answer = redact_urls(raw.trim());

    if is_off_topic(&answer) {
        tracing::info!("Replaced off-topic answer with refusal");
        return OFF_TOPIC_REFUSAL.to_string();
    }

    answer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_redacted() {
        let answer = postprocess("See https://example.com/secret for details");
        assert_eq!(answer, "See unsafe url hidden for details");
        assert!(!answer.contains("https://example.com/secret"));
    }

    #[test]
    fn test_every_url_is_redacted() {
        let answer = redact_urls("http://a.example and https://b.example/x?y=1.");
        assert_eq!(answer, "unsafe url hidden and unsafe url hidden");
    }

    #[test]
    fn test_bare_domains_are_kept() {
        assert_eq!(redact_urls("visit example.com"), "visit example.com");
    }

    #[test]
    fn test_off_topic_answer_is_refused() {
        assert_eq!(postprocess("I am just a language model"), OFF_TOPIC_REFUSAL);
        assert_eq!(postprocess("As an AI Assistant, I can't"), OFF_TOPIC_REFUSAL);
        assert_eq!(postprocess("This AI MODEL says hi"), OFF_TOPIC_REFUSAL);
    }

    #[test]
    fn test_refusal_wins_over_redaction() {
        assert_eq!(
            postprocess("I am a language model, see https://example.com"),
            OFF_TOPIC_REFUSAL
        );
    }

    #[test]
    fn test_answer_is_trimmed() {
        assert_eq!(postprocess("\n  Jane has 7 years of Rust.  \n"), "Jane has 7 years of Rust.");
    }

    #[test]
    fn test_plain_answer_is_unchanged() {
        assert_eq!(postprocess("Hello! How can I help?"), "Hello! How can I help?");
    }
}

//! Relevance gating for crawled pages
//!
//! The crawl engine only ever asks a [`RelevanceGate`] one yes/no question per
//! page. The policy behind it is a [`RelevanceClassifier`], so a stronger
//! classifier (embedding similarity, a hosted model, ...) can replace the
//! keyword heuristic without touching the engine.

use std::fmt;
use std::sync::Arc;

/// Decides whether extracted page text is relevant to user instructions
///
/// Implementations must be pure: the same text and instructions always
/// produce the same answer, and no state is mutated.
pub trait RelevanceClassifier: Send + Sync {
    fn is_relevant(&self, text: &str, instructions: &str) -> bool;
}

/// Naive keyword-overlap classifier
///
/// Splits the instructions into lowercase whitespace-delimited words and counts
/// how many of them occur as substrings of the lowercased text. The page is
/// relevant when at least half of the instruction words occur.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordOverlap;

impl RelevanceClassifier for KeywordOverlap {
    fn is_relevant(&self, text: &str, instructions: &str) -> bool {
        let words: Vec<String> = instructions
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        if words.is_empty() {
            return true;
        }

        let haystack = text.to_lowercase();
        let matches = words
            .iter()
            .filter(|word| haystack.contains(word.as_str()))
            .count();

        // matches >= words / 2, without the float
        matches * 2 >= words.len()
    }
}

/// Binds a classifier to the instructions of one crawl
///
/// A gate with empty instructions admits every page without consulting the
/// classifier.
#[derive(Clone)]
pub struct RelevanceGate {
    classifier: Arc<dyn RelevanceClassifier>,
    instructions: String,
}

impl RelevanceGate {
    /// Creates a gate using the [`KeywordOverlap`] policy
    pub fn new(instructions: impl Into<String>) -> Self {
        Self::with_classifier(Arc::new(KeywordOverlap), instructions)
    }

    /// Creates a gate backed by a custom classifier
    pub fn with_classifier(
        classifier: Arc<dyn RelevanceClassifier>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            classifier,
            instructions: instructions.into(),
        }
    }

    /// Returns false when the gate admits everything
    pub fn is_active(&self) -> bool {
        !self.instructions.trim().is_empty()
    }

    /// Returns true if a page with this text should be kept
    pub fn admits(&self, text: &str) -> bool {
        if !self.is_active() {
            return true;
        }
        self.classifier.is_relevant(text, &self.instructions)
    }
}

impl fmt::Debug for RelevanceGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelevanceGate")
            .field("instructions", &self.instructions)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Checks relevance with the default keyword policy
///
/// # Examples
///
/// ```
/// use rufus::relevance::is_relevant;
///
/// let text = "Our product features are listed below, followed by customer FAQs.";
/// assert!(is_relevant(text, "product features customer FAQs"));
/// assert!(!is_relevant(text, "nonexistent keyword"));
/// assert!(is_relevant(text, ""));
/// ```
pub fn is_relevant(text: &str, instructions: &str) -> bool {
    RelevanceGate::new(instructions).admits(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PAGE: &str = "This page contains product features and customer FAQs for testing purposes.";

    #[test]
    fn test_all_words_present_is_relevant() {
        assert!(is_relevant(PAGE, "product features customer FAQs"));
    }

    #[test]
    fn test_no_words_present_is_irrelevant() {
        assert!(!is_relevant(PAGE, "nonexistent keyword"));
    }

    #[test]
    fn test_empty_instructions_always_relevant() {
        assert!(is_relevant("", ""));
        assert!(is_relevant(PAGE, ""));
        assert!(is_relevant(PAGE, "   \t\n"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert!(is_relevant("PRICING and Shipping", "pricing shipping"));
        assert!(is_relevant("pricing and shipping", "PRICING SHIPPING"));
    }

    #[test]
    fn test_words_match_as_substrings() {
        // "feature" occurs inside "features"
        assert!(is_relevant("all the features", "feature"));
    }

    #[test]
    fn test_half_threshold() {
        // 2 of 4 words is exactly half
        assert!(is_relevant("alpha beta", "alpha beta gamma delta"));
        // 1 of 4 is not enough
        assert!(!is_relevant("alpha", "alpha beta gamma delta"));
        // 1 of 3 is below half, 2 of 3 is above
        assert!(!is_relevant("alpha", "alpha beta gamma"));
        assert!(is_relevant("alpha beta", "alpha beta gamma"));
        // 1 of 2 is exactly half
        assert!(is_relevant("alpha", "alpha omega"));
    }

    struct CountingClassifier {
        calls: AtomicUsize,
        answer: bool,
    }

    impl RelevanceClassifier for CountingClassifier {
        fn is_relevant(&self, _text: &str, _instructions: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer
        }
    }

    #[test]
    fn test_gate_delegates_to_classifier() {
        let classifier = Arc::new(CountingClassifier {
            calls: AtomicUsize::new(0),
            answer: false,
        });
        let gate = RelevanceGate::with_classifier(classifier.clone(), "anything at all");

        assert!(gate.is_active());
        assert!(!gate.admits(PAGE));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_inactive_gate_skips_classifier() {
        let classifier = Arc::new(CountingClassifier {
            calls: AtomicUsize::new(0),
            answer: false,
        });
        let gate = RelevanceGate::with_classifier(classifier.clone(), "");

        assert!(!gate.is_active());
        assert!(gate.admits(PAGE));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }
}

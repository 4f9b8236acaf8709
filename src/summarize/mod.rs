//! Summarization of aggregated crawl text
//!
//! The crawl hands its aggregated text to a [`Summarizer`]. The built-in
//! [`ExtractiveSummarizer`] keeps the leading sentences of each word chunk,
//! which needs no model and is fully deterministic.

use crate::config::SummarizerConfig;

/// Condenses text into a shorter summary
pub trait Summarizer: Send + Sync {
    fn synthesize(&self, text: &str) -> String;
}

/// Leading-sentence extractive summarizer
///
/// Text is split into chunks of `chunk_size` words. Each chunk is condensed
/// to its first sentences, at least `min_length` words where the chunk has
/// them and never more than `max_length` words. Chunk summaries are joined
/// with a space; if there was more than one chunk the joined text is
/// condensed once more.
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer {
    chunk_size: usize,
    min_length: usize,
    max_length: usize,
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        Self::from_config(&SummarizerConfig::default())
    }
}

impl ExtractiveSummarizer {
    pub fn new(chunk_size: usize, min_length: usize, max_length: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            min_length,
            max_length: max_length.max(1),
        }
    }

    pub fn from_config(config: &SummarizerConfig) -> Self {
        Self::new(config.chunk_size, config.min_length, config.max_length)
    }

    fn condense(&self, text: &str) -> String {
        let mut kept: Vec<&str> = Vec::new();

        for sentence in split_sentences(text) {
            if !kept.is_empty() && kept.len() >= self.min_length {
                break;
            }
            kept.extend(sentence.split_whitespace());
        }

        kept.truncate(self.max_length);
        kept.join(" ")
    }
}

impl Summarizer for ExtractiveSummarizer {
    fn synthesize(&self, text: &str) -> String {
        let chunks = chunk_text(text, self.chunk_size);

        let summaries: Vec<String> = chunks
            .iter()
            .map(|chunk| self.condense(chunk))
            .filter(|summary| !summary.is_empty())
            .collect();

        let combined = summaries.join(" ");
        if summaries.len() > 1 {
            self.condense(&combined)
        } else {
            combined
        }
    }
}

/// Splits text into chunks of at most `max_words` whitespace-separated words
///
/// # Examples
///
/// ```
/// use rufus::summarize::chunk_text;
///
/// assert_eq!(chunk_text("a b c d e", 2), ["a b", "c d", "e"]);
/// assert!(chunk_text("   ", 2).is_empty());
/// ```
pub fn chunk_text(text: &str, max_words: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(max_words.max(1))
        .map(|chunk| chunk.join(" "))
        .collect()
}

/// Splits text after `.`, `!` or `?` when followed by whitespace
///
/// Returned sentences are trimmed and never empty. Text without a final
/// terminator yields its tail as the last sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let at_boundary = chars
            .peek()
            .map_or(true, |(_, next)| next.is_whitespace());
        if at_boundary {
            let end = i + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

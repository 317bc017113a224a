use crate::tokenizer::{SimpleTokenizer, Tokenizer};
use ragkit_provider::Splitter;
use std::sync::Arc;

const DEFAULT_CHUNK_SIZE: usize = 500;
const DEFAULT_CHUNK_OVERLAP: usize = 50;

/// Packs whitespace-delimited words into chunks bounded by token count
/// rather than character count (spec.md §4.3.3).
pub struct TokenSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    tokenizer: Arc<dyn Tokenizer>,
}

impl TokenSplitter {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            tokenizer: Arc::new(SimpleTokenizer),
        }
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: i64) -> Self {
        if chunk_size > 0 {
            self.chunk_size = chunk_size as usize;
        }
        self
    }

    #[must_use]
    pub fn with_chunk_overlap(mut self, chunk_overlap: i64) -> Self {
        if chunk_overlap >= 0 {
            self.chunk_overlap = chunk_overlap as usize;
        }
        self
    }

    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }
}

impl Default for TokenSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Splitter for TokenSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        let counts: Vec<usize> = words.iter().map(|w| self.tokenizer.count(w)).collect();
        let mut chunks = Vec::new();
        let mut start = 0usize;

        while start < words.len() {
            let mut end = start;
            let mut total = 0usize;
            while end < words.len() {
                let next_total = total + counts[end];
                if end > start && next_total > self.chunk_size {
                    break;
                }
                total = next_total;
                end += 1;
            }

            chunks.push(words[start..end].join(" "));

            if end >= words.len() {
                break;
            }

            if self.chunk_overlap > 0 {
                let mut back = end;
                let mut overlap_total = 0usize;
                while back > start {
                    let candidate = overlap_total + counts[back - 1];
                    if candidate > self.chunk_overlap {
                        break;
                    }
                    overlap_total = candidate;
                    back -= 1;
                }
                start = back.max(start + 1).min(end);
            } else {
                start = end;
            }
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_returns_no_chunks() {
        assert!(TokenSplitter::new().split("").is_empty());
    }

    #[test]
    fn chunks_respect_token_budget() {
        let splitter = TokenSplitter::new().with_chunk_size(3).with_chunk_overlap(0);
        let chunks = splitter.split("one two three four five six");
        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            let count = SimpleTokenizer.count(chunk);
            assert!(count <= 3 || chunk.split_whitespace().count() == 1);
        }
    }

    #[test]
    fn every_word_appears_exactly_once_without_overlap() {
        let splitter = TokenSplitter::new().with_chunk_size(3).with_chunk_overlap(0);
        let input = "one two three four five six";
        let chunks = splitter.split(input);
        let rejoined: Vec<&str> = chunks.iter().flat_map(|c| c.split_whitespace()).collect();
        assert_eq!(rejoined, input.split_whitespace().collect::<Vec<_>>());
    }

    #[test]
    fn single_oversized_word_becomes_its_own_chunk() {
        let splitter = TokenSplitter::new().with_chunk_size(1).with_chunk_overlap(0);
        let huge_word = "a".repeat(40);
        let chunks = splitter.split(&huge_word);
        assert_eq!(chunks, vec![huge_word]);
    }

    #[test]
    fn overlap_repeats_trailing_words_in_next_chunk() {
        let splitter = TokenSplitter::new().with_chunk_size(2).with_chunk_overlap(1);
        let chunks = splitter.split("aa bb cc dd");
        assert!(chunks.len() >= 2);
        let first_words: Vec<&str> = chunks[0].split_whitespace().collect();
        let second_words: Vec<&str> = chunks[1].split_whitespace().collect();
        assert_eq!(first_words.last(), second_words.first());
    }
}

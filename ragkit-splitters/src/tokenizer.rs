/// Counts how many tokens a piece of text would cost a particular model or
/// provider, without needing a full vocabulary/BPE implementation. Pluggable
/// per spec.md §4.3.3 so callers can substitute a provider's real tokenizer.
pub trait Tokenizer: Send + Sync {
    fn count(&self, text: &str) -> usize;
}

/// The reference tokenizer: approximates 4 characters per token. Good enough
/// for chunk-size budgeting when no provider-specific tokenizer is wired in.
pub struct SimpleTokenizer;

impl Tokenizer for SimpleTokenizer {
    fn count(&self, text: &str) -> usize {
        let chars = text.chars().count();
        if chars == 0 {
            0
        } else {
            chars.div_ceil(4).max(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_costs_zero_tokens() {
        assert_eq!(SimpleTokenizer.count(""), 0);
    }

    #[test]
    fn short_word_costs_at_least_one_token() {
        assert_eq!(SimpleTokenizer.count("hi"), 1);
    }

    #[test]
    fn counts_scale_with_length() {
        assert_eq!(SimpleTokenizer.count("a".repeat(8).as_str()), 2);
    }
}

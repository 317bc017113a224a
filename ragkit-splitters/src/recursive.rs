use ragkit_provider::Splitter;

const DEFAULT_CHUNK_SIZE: usize = 1000;
const DEFAULT_CHUNK_OVERLAP: usize = 200;

fn default_separators() -> Vec<String> {
    vec!["\n\n".to_string(), "\n".to_string(), " ".to_string(), String::new()]
}

/// Splits text by progressively finer separators, greedily packing splits
/// into chunks no larger than `chunk_size` code units, with trailing overlap
/// carried into the next chunk (spec.md §4.3.1).
///
/// "Code units" is read here as Unicode scalar values (`char`s): every
/// length and slice operation below counts and indexes by char, not byte,
/// so multi-byte UTF-8 text is never split mid-character.
pub struct RecursiveSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl RecursiveSplitter {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            separators: default_separators(),
        }
    }

    /// Values `<= 0` are ignored and the default is retained.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: i64) -> Self {
        if chunk_size > 0 {
            self.chunk_size = chunk_size as usize;
        }
        self
    }

    /// Negative values are ignored; `0` explicitly disables overlap.
    #[must_use]
    pub fn with_chunk_overlap(mut self, chunk_overlap: i64) -> Self {
        if chunk_overlap >= 0 {
            self.chunk_overlap = chunk_overlap as usize;
        }
        self
    }

    /// An empty list is ignored and the default separators are retained.
    #[must_use]
    pub fn with_separators(mut self, separators: Vec<String>) -> Self {
        if !separators.is_empty() {
            self.separators = separators;
        }
        self
    }
}

impl Default for RecursiveSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Splitter for RecursiveSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        split_recursive(text, self.chunk_size, self.chunk_overlap, &self.separators)
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn trailing_overlap(flushed: &str, chunk_overlap: usize) -> String {
    if chunk_overlap == 0 {
        return String::new();
    }
    let chars: Vec<char> = flushed.chars().collect();
    if chars.len() <= chunk_overlap {
        return String::new();
    }
    chars[chars.len() - chunk_overlap..].iter().collect()
}

fn chunk_by_chars(text: &str, chunk_size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chunk_size == 0 {
        return vec![text.to_string()];
    }
    chars
        .chunks(chunk_size)
        .map(|c| c.iter().collect::<String>())
        .collect()
}

pub(crate) fn split_recursive(
    text: &str,
    chunk_size: usize,
    chunk_overlap: usize,
    separators: &[String],
) -> Vec<String> {
    if char_len(text) <= chunk_size {
        let trimmed = text.trim();
        return if trimmed.is_empty() { Vec::new() } else { vec![trimmed.to_string()] };
    }

    let chosen_index = separators
        .iter()
        .position(|sep| sep.is_empty() || text.contains(sep.as_str()))
        .unwrap_or(separators.len().saturating_sub(1));
    let separator = separators.get(chosen_index).map(String::as_str).unwrap_or("");
    let remaining_separators = if chosen_index + 1 < separators.len() {
        &separators[chosen_index + 1..]
    } else {
        &[]
    };

    let splits: Vec<String> = if separator.is_empty() {
        chunk_by_chars(text, chunk_size)
    } else {
        text.split(separator).map(str::to_string).collect()
    };

    let mut output = Vec::new();
    let mut buffer = String::new();

    for split in splits {
        if split.is_empty() {
            continue;
        }

        let candidate_len = if buffer.is_empty() {
            char_len(&split)
        } else {
            char_len(&buffer) + char_len(separator) + char_len(&split)
        };

        if candidate_len <= chunk_size {
            if !buffer.is_empty() {
                buffer.push_str(separator);
            }
            buffer.push_str(&split);
            continue;
        }

        let flushed = std::mem::take(&mut buffer);
        let trimmed_flushed = flushed.trim();
        if !trimmed_flushed.is_empty() {
            output.push(trimmed_flushed.to_string());
        }
        let seed = trailing_overlap(&flushed, chunk_overlap);

        if char_len(&split) > chunk_size {
            let prefixed = if seed.is_empty() { split } else { format!("{seed}{separator}{split}") };
            let fallback = [String::new()];
            let next_separators = if remaining_separators.is_empty() { &fallback[..] } else { remaining_separators };
            output.extend(split_recursive(&prefixed, chunk_size, chunk_overlap, next_separators));
            buffer = String::new();
        } else {
            let seeded_len = if seed.is_empty() {
                char_len(&split)
            } else {
                char_len(&seed) + char_len(separator) + char_len(&split)
            };
            if seeded_len <= chunk_size {
                buffer = seed;
                if !buffer.is_empty() {
                    buffer.push_str(separator);
                }
                buffer.push_str(&split);
            } else {
                // The overlap seed plus this split would itself exceed
                // chunk_size; dropping the seed here keeps every emitted
                // chunk within bound, at the cost of this one boundary
                // losing its overlap.
                buffer = split;
            }
        }
    }

    let trimmed_remainder = buffer.trim();
    if !trimmed_remainder.is_empty() {
        output.push(trimmed_remainder.to_string());
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_returns_single_trimmed_chunk() {
        let splitter = RecursiveSplitter::new();
        assert_eq!(splitter.split("  hello  "), vec!["hello".to_string()]);
    }

    #[test]
    fn empty_text_returns_no_chunks() {
        let splitter = RecursiveSplitter::new();
        assert!(splitter.split("   ").is_empty());
    }

    #[test]
    fn long_text_splits_into_bounded_chunks() {
        let words: String = std::iter::repeat("word ").take(20).collect();
        let text = format!("{words}\n\n{words}");
        let splitter = RecursiveSplitter::new().with_chunk_size(110).with_chunk_overlap(0);
        let chunks = splitter.split(&text);
        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 110, "chunk too long: {chunk:?}");
        }
    }

    #[test]
    fn consecutive_chunks_overlap_when_configured() {
        let text = "a".repeat(50) + &"b".repeat(50) + &"c".repeat(50);
        let splitter = RecursiveSplitter::new()
            .with_chunk_size(60)
            .with_chunk_overlap(10)
            .with_separators(vec![String::new()]);
        let chunks = splitter.split(&text);
        assert!(chunks.len() >= 2);
        let suffix: String = chunks[0].chars().rev().take(10).collect::<Vec<_>>().into_iter().rev().collect();
        assert!(chunks[1].starts_with(&suffix));
    }

    #[test]
    fn zero_or_negative_config_falls_back_to_defaults() {
        let splitter = RecursiveSplitter::new().with_chunk_size(-5).with_chunk_overlap(-1);
        assert_eq!(splitter.split("short"), vec!["short".to_string()]);
    }
}

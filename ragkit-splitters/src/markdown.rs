use crate::recursive::RecursiveSplitter;
use ragkit_provider::Splitter;

const DEFAULT_CHUNK_SIZE: usize = 1000;
const DEFAULT_CHUNK_OVERLAP: usize = 200;

struct Section {
    level: usize,
    heading: Option<String>,
    content: String,
}

/// Splits Markdown by ATX headings (`#` through `######`), optionally
/// prefixing each chunk with its ancestor headings, and falls back to the
/// recursive character splitter for any section that still exceeds
/// `chunk_size` (spec.md §4.3.2).
pub struct MarkdownSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    preserve_headers: bool,
}

impl MarkdownSplitter {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            preserve_headers: true,
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
    pub fn with_preserve_headers(mut self, preserve_headers: bool) -> Self {
        self.preserve_headers = preserve_headers;
        self
    }
}

impl Default for MarkdownSplitter {
    fn default() -> Self {
        Self::new()
    }
}

/// `1-6` `#` characters followed by end-of-line or a space.
fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if rest.is_empty() || rest.starts_with(' ') {
        Some(hashes)
    } else {
        None
    }
}

fn parse_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section { level: 0, heading: None, content: String::new() };

    for line in text.lines() {
        if let Some(level) = heading_level(line) {
            sections.push(current);
            current = Section { level, heading: Some(line.trim().to_string()), content: String::new() };
        } else {
            current.content.push_str(line);
            current.content.push('\n');
        }
    }
    sections.push(current);
    sections
}

impl Splitter for MarkdownSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let sections = parse_sections(text);
        let mut ancestors: Vec<Option<String>> = vec![None; 7];
        let mut output = Vec::new();

        for section in sections {
            if let Some(heading) = &section.heading {
                ancestors[section.level] = Some(heading.clone());
                for level in (section.level + 1)..ancestors.len() {
                    ancestors[level] = None;
                }
            }

            let body = section.content.trim();

            let built = if self.preserve_headers {
                let mut lines: Vec<String> = Vec::new();
                if section.heading.is_some() {
                    for level in 1..section.level {
                        if let Some(h) = &ancestors[level] {
                            lines.push(h.clone());
                        }
                    }
                    lines.push(section.heading.clone().unwrap());
                    lines.push(String::new());
                }
                lines.push(body.to_string());
                lines.join("\n")
            } else {
                match &section.heading {
                    Some(heading) => format!("{heading}\n\n{body}"),
                    None => body.to_string(),
                }
            };

            let trimmed = built.trim();
            if trimmed.is_empty() {
                continue;
            }

            if trimmed.chars().count() > self.chunk_size {
                let recursive = RecursiveSplitter::new()
                    .with_chunk_size(self.chunk_size as i64)
                    .with_chunk_overlap(self.chunk_overlap as i64);
                output.extend(recursive.split(trimmed));
            } else {
                output.push(trimmed.to_string());
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_ancestor_headings() {
        let text = "# Title\n\nIntro.\n\n## Section A\n\nContent.";
        let splitter = MarkdownSplitter::new();
        let chunks = splitter.split(text);
        assert!(chunks.iter().any(|c| c.contains("# Title") && c.contains("## Section A")));
    }

    #[test]
    fn heading_only_section_emits_structural_chunk() {
        let text = "# Title\n\n## Empty Section\n\n## Next\n\nbody";
        let splitter = MarkdownSplitter::new();
        let chunks = splitter.split(text);
        assert!(chunks.iter().any(|c| c.trim() == "# Title\n## Empty Section"));
    }

    #[test]
    fn without_preserve_headers_omits_ancestors() {
        let text = "# Title\n\n## Section A\n\nContent.";
        let splitter = MarkdownSplitter::new().with_preserve_headers(false);
        let chunks = splitter.split(text);
        assert!(chunks.iter().any(|c| c.contains("## Section A") && !c.contains("# Title")));
    }

    #[test]
    fn oversized_section_falls_back_to_recursive_splitter() {
        let big_content = "word ".repeat(100);
        let text = format!("# Title\n\n{big_content}");
        let splitter = MarkdownSplitter::new().with_chunk_size(50).with_chunk_overlap(0);
        let chunks = splitter.split(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 50);
        }
    }
}

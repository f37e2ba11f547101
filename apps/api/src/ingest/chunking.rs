//! Resume chunking via the `text-splitter` crate.
//!
//! Chunks are measured in characters (the crate's default sizer) and split at the
//! highest semantic level that fits: paragraphs, then lines, sentences, words,
//! graphemes. Neighbouring chunks overlap by up to `chunk_overlap` characters.

use text_splitter::{ChunkConfig, ChunkConfigError};

pub const CHUNK_SIZE: usize = 800;
pub const CHUNK_OVERLAP: usize = 120;

#[derive(Debug, Clone, Copy)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self::new(CHUNK_SIZE, CHUNK_OVERLAP)
    }
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Returns trimmed, non-empty chunks in document order.
    ///
    /// Fails when the overlap is not smaller than the chunk size.
    pub fn split(&self, text: &str) -> Result<Vec<String>, ChunkConfigError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let config = ChunkConfig::new(self.chunk_size)
            .with_overlap(self.chunk_overlap)?
            .with_trim(true);
        let splitter = text_splitter::TextSplitter::new(config);

        Ok(splitter
            .chunks(text)
            .filter(|chunk| !chunk.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = TextSplitter::default()
            .split("  Jane Doe\nSenior Engineer  ")
            .unwrap();
        assert_eq!(chunks, vec!["Jane Doe\nSenior Engineer"]);
    }

    #[test]
    fn test_blank_text_has_no_chunks() {
        assert!(TextSplitter::default().split("").unwrap().is_empty());
        assert!(TextSplitter::default().split(" \n\n \n").unwrap().is_empty());
    }

    #[test]
    fn test_chunks_never_exceed_size() {
        let paragraph =
            "Built OCR pipelines with Tesseract and OpenCV for invoice processing. ".repeat(30);
        let text = format!("{paragraph}\n\n{paragraph}\nShort line\n\n{}", "x".repeat(2000));
        let chunks = TextSplitter::default().split(&text).unwrap();

        assert!(chunks.len() > 3);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= CHUNK_SIZE, "chunk of {}", chunk.len());
            assert!(!chunk.trim().is_empty());
        }
        assert!(chunks.iter().any(|c| c.contains("Short line")));
    }

    #[test]
    fn test_sizes_are_counted_in_characters() {
        let chunks = TextSplitter::new(100, 10).split(&"é".repeat(250)).unwrap();
        assert!(chunks.len() >= 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= 100));
    }

    #[test]
    fn test_paragraphs_stay_together_when_they_fit() {
        let text = "Education\nMSc Computer Science\n\nExperience\nAcme Corp, 2019-2024";
        let chunks = TextSplitter::new(40, 0).split(text).unwrap();
        assert_eq!(
            chunks,
            vec!["Education\nMSc Computer Science", "Experience\nAcme Corp, 2019-2024"]
        );
    }

    #[test]
    fn test_neighbouring_chunks_overlap() {
        let text = (1..=60)
            .map(|i| format!("skill{i:02}"))
            .collect::<Vec<_>>()
            .join(" ");
        let chunks = TextSplitter::new(100, 30).split(&text).unwrap();

        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let last_word = pair[0].split(' ').last().unwrap();
            assert!(pair[1].contains(last_word), "{:?} / {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_overlap_not_below_size_is_rejected() {
        assert!(TextSplitter::new(10, 50).split("word ".repeat(40).as_str()).is_err());
    }
}

//! Test harness for end-to-end snippet tests.
//!
//! Builds an in-memory document from lines or from a fixture file and runs the
//! full pipeline against a cursor, with no host editor involved.

use doxydoc_core::source::TextBuffer;
use doxydoc_core::types::{Analysis, DocConfig};
use doxydoc_core::{analyze, snippet::placeholder_indices};

pub struct Harness {
    pub buffer: TextBuffer,
    pub config: DocConfig,
}

impl Harness {
    pub fn from_lines(lines: &[&str]) -> Self {
        Self { buffer: TextBuffer::from_lines(lines), config: DocConfig::default() }
    }

    /// Load `tests/fixtures/<name>`.
    pub fn from_fixture(name: &str) -> Self {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
        let text = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Fixture '{name}' not readable at {}: {e}", path.display()));
        Self { buffer: TextBuffer::new(text), config: DocConfig::default() }
    }

    pub fn with_config(mut self, config: DocConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the pipeline with the cursor at the end of the 0-based `line`.
    pub fn at_line(&self, line: usize) -> Analysis {
        let cursor = self.buffer.offset_of(line, usize::MAX).expect("line exists");
        analyze(&self.buffer, cursor, &self.config)
    }

    /// Snippet for the cursor at the start of the document.
    pub fn snippet(&self) -> String {
        analyze(&self.buffer, 0, &self.config).snippet
    }

    /// 0-based index of the n-th (0-based) line that contains `/**`.
    pub fn opener_line(&self, nth: usize) -> usize {
        self.buffer
            .text()
            .lines()
            .enumerate()
            .filter(|(_, l)| l.contains("/**"))
            .nth(nth)
            .map(|(i, _)| i)
            .expect("opener exists")
    }
}

/// Assert that tab-stop indices run 1, 2, 3, ... in order of appearance.
pub fn assert_sequential_placeholders(snippet: &str) {
    let indices = placeholder_indices(snippet);
    let expected: Vec<usize> = (1..=indices.len()).collect();
    assert_eq!(indices, expected, "non-sequential placeholders in {snippet:?}");
}

/// Position of `needle` in `haystack`, panicking with context when absent.
pub fn position(haystack: &str, needle: &str) -> usize {
    haystack.find(needle).unwrap_or_else(|| panic!("{needle:?} not found in {haystack:?}"))
}

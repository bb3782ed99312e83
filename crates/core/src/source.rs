//! Line access for the classifier.
//!
//! The pipeline only ever asks one question of the host document: "what is the
//! full line covering this byte offset?" [`LineSource`] captures that, and
//! [`TextBuffer`] answers it for an in-memory document.

/// One physical line of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// Literal line text, without the trailing `\n` or `\r\n`.
    pub text: &'a str,
    /// Byte offset of the first character of the line.
    pub start: usize,
    /// Byte offset where the following line begins.
    pub next: usize,
}

impl<'a> SourceLine<'a> {
    pub fn next_offset(&self) -> usize {
        self.next
    }
}

/// Host-provided read access to a document.
pub trait LineSource {
    /// Return the line covering `offset`, or `None` when `offset` is at or past
    /// the end of the document.
    fn read_line(&self, offset: usize) -> Option<SourceLine<'_>>;
}

/// An owned in-memory document with precomputed line starts.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    line_starts: Vec<usize>,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' && i + 1 < text.len() {
                line_starts.push(i + 1);
            }
        }
        Self { text, line_starts }
    }

    /// Build a document from individual lines joined with `\n`.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let joined: Vec<&str> = lines.iter().map(|l| l.as_ref()).collect();
        Self::new(joined.join("\n"))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        if self.text.is_empty() {
            0
        } else {
            self.line_starts.len()
        }
    }

    /// Byte offset for a 0-based `(line, column)` pair. The column is clamped to
    /// the line length; `None` when the line does not exist.
    pub fn offset_of(&self, line: usize, column: usize) -> Option<usize> {
        if line >= self.line_count() {
            return None;
        }
        let start = self.line_starts[line];
        let text = self.line_text(line, start);
        Some(start + column.min(text.len()))
    }

    fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        }
    }

    fn line_end(&self, idx: usize) -> usize {
        self.line_starts.get(idx + 1).copied().unwrap_or(self.text.len())
    }

    fn line_text(&self, idx: usize, start: usize) -> &str {
        let raw = &self.text[start..self.line_end(idx)];
        let raw = raw.strip_suffix('\n').unwrap_or(raw);
        raw.strip_suffix('\r').unwrap_or(raw)
    }
}

impl LineSource for TextBuffer {
    fn read_line(&self, offset: usize) -> Option<SourceLine<'_>> {
        if offset >= self.text.len() {
            return None;
        }
        let idx = self.line_index(offset);
        let start = self.line_starts[idx];
        Some(SourceLine { text: self.line_text(idx, start), start, next: self.line_end(idx) })
    }
}

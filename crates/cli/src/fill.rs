//! Batch expansion of bare `/**` openers in whole files.

use std::path::Path;

use doxydoc_core::analyze;
use doxydoc_core::snippet::render_plain;
use doxydoc_core::source::{LineSource, TextBuffer};
use doxydoc_core::types::{DocConfig, Outcome};

pub struct FillReport {
    pub text: String,
    pub filled: usize,
}

/// Expand every line that is exactly `/**` (ignoring indentation) and precedes a
/// recognized declaration. Inserted lines inherit the opener's indentation and
/// line ending; everything else is copied through untouched.
pub fn fill_text(text: &str, config: &DocConfig) -> FillReport {
    let doc = TextBuffer::new(text);
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut filled = 0;
    let mut offset = 0;

    while let Some(line) = doc.read_line(offset) {
        let terminator = &doc.text()[line.start + line.text.len()..line.next_offset()];
        out.push_str(line.text);

        if line.text.trim() == "/**" {
            let analysis = analyze(&doc, line.start, config);
            if matches!(analysis.outcome, Outcome::Declaration { .. }) {
                let indent = &line.text[..line.text.len() - line.text.trim_start().len()];
                let eol = if terminator.is_empty() { "\n" } else { terminator };
                for piece in render_plain(&analysis.snippet).split('\n').skip(1) {
                    out.push_str(eol);
                    out.push_str(indent);
                    out.push_str(piece.trim_end());
                }
                filled += 1;
            }
        }

        out.push_str(terminator);
        offset = line.next_offset();
    }

    FillReport { text: out, filled }
}

/// Fill one file, writing it back when `in_place` is set.
pub fn fill_file(path: &Path, config: &DocConfig, in_place: bool) -> Result<FillReport, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("could not read: {e}"))?;
    let report = fill_text(&text, config);
    if in_place && report.filled > 0 {
        std::fs::write(path, &report.text).map_err(|e| format!("could not write: {e}"))?;
    }
    Ok(report)
}

//! DoxyDoc — Doxygen comment skeletons for C++ declarations.
//!
//! Given a document and a cursor sitting on a freshly opened `/**`, DoxyDoc
//! reads the following lines, recognizes a class, function, constructor or
//! destructor (optionally behind a `template<...>` header), and produces a
//! comment body with numbered tab-stops for `brief`, `details`, `param`,
//! `tparam` and `return` fields.
//!
//! # Modules
//!
//! - [`source`] — Line access contract and an in-memory document
//! - [`normalize`] — Noise stripping for template and function parameter lists
//! - [`classify`] — Ordered matchers and lookahead over the lines after the cursor
//! - [`snippet`] — Comment body construction and tab-stop utilities
//! - [`types`] — Configuration value, declaration model, analysis result

pub mod classify;
pub mod normalize;
pub mod snippet;
pub mod source;
pub mod types;

use std::path::Path;

use tracing::{debug, warn};

use source::LineSource;
use types::*;

/// Name of the per-project configuration file.
pub const CONFIG_FILE_NAME: &str = ".doxydoc.toml";

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Inspect the document around `cursor` and build the snippet to insert.
///
/// Always succeeds: anything that cannot be recognized yields the minimal
/// fallback snippet. The `enabled` flag is not consulted here.
pub fn analyze(source: &dyn LineSource, cursor: usize, config: &DocConfig) -> Analysis {
    let outcome = classify::inspect(source, cursor, config.max_lookahead_lines);
    let snippet = snippet::snippet_for(&outcome, config.tag_prefix);
    Analysis { outcome, snippet }
}

/// Produce the snippet for `cursor`, or `None` when generation is disabled.
pub fn generate_snippet(
    source: &dyn LineSource,
    cursor: usize,
    config: &DocConfig,
) -> Option<String> {
    if !config.enabled {
        debug!("Snippet generation disabled");
        return None;
    }
    let snippet = analyze(source, cursor, config).snippet;
    if snippet.is_empty() {
        None
    } else {
        Some(snippet)
    }
}

// ---------------------------------------------------------------------------
// .doxydoc.toml config loading
// ---------------------------------------------------------------------------

/// Known keys in `.doxydoc.toml` for config validation.
const KNOWN_CONFIG_KEYS: &[&str] = &["enabled", "javadoc", "max_lookahead_lines"];

/// Simple Levenshtein edit distance for typo suggestions.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Load configuration from `.doxydoc.toml` in `project_root`.
///
/// Missing file, parse failures, unknown keys and mistyped values all fall back
/// to defaults with a warning.
pub fn load_doxydoc_config(project_root: &Path) -> DocConfig {
    let config_path = project_root.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return DocConfig::default();
    }

    debug!(path = %config_path.display(), "Loading .doxydoc.toml");
    match std::fs::read_to_string(&config_path) {
        Ok(content) => parse_doxydoc_config(&content),
        Err(e) => {
            warn!(path = %config_path.display(), error = %e, "Could not read .doxydoc.toml");
            DocConfig::default()
        }
    }
}

/// Parse the contents of a `.doxydoc.toml` file over the defaults.
pub fn parse_doxydoc_config(content: &str) -> DocConfig {
    let mut config = DocConfig::default();

    let table = match content.parse::<toml::Table>() {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "Failed to parse .doxydoc.toml");
            return config;
        }
    };

    // Validate keys — warn on unknown
    for key in table.keys() {
        if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
            continue;
        }
        let suggestion = KNOWN_CONFIG_KEYS
            .iter()
            .min_by_key(|k| edit_distance(key, k))
            .filter(|k| edit_distance(key, k) <= 3);
        match suggestion {
            Some(suggestion) => warn!(
                key = key.as_str(),
                suggestion = *suggestion,
                "Unknown key in .doxydoc.toml — did you mean '{suggestion}'?"
            ),
            None => warn!(
                key = key.as_str(),
                "Unknown key in .doxydoc.toml (known keys: {})",
                KNOWN_CONFIG_KEYS.join(", ")
            ),
        }
    }

    if let Some(value) = table.get("enabled") {
        match value.as_bool() {
            Some(enabled) => config.enabled = enabled,
            None => warn!(key = "enabled", "Expected a boolean in .doxydoc.toml"),
        }
    }

    if let Some(value) = table.get("javadoc") {
        match value.as_bool() {
            Some(javadoc) => config.tag_prefix = TagPrefix::from_javadoc(javadoc),
            None => warn!(key = "javadoc", "Expected a boolean in .doxydoc.toml"),
        }
    }

    if let Some(value) = table.get("max_lookahead_lines") {
        match value.as_integer().and_then(|n| usize::try_from(n).ok()) {
            Some(lines) => config.max_lookahead_lines = lines,
            None => warn!(
                key = "max_lookahead_lines",
                "Expected a non-negative integer in .doxydoc.toml"
            ),
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TextBuffer;

    #[test]
    fn edit_distance_basics() {
        assert_eq!(edit_distance("javadoc", "javadoc"), 0);
        assert_eq!(edit_distance("javadco", "javadoc"), 2);
        assert_eq!(edit_distance("", "abc"), 3);
    }

    #[test]
    fn parse_overrides_defaults() {
        let config = parse_doxydoc_config("enabled = false\njavadoc = false\nmax_lookahead_lines = 2\n");
        assert!(!config.enabled);
        assert_eq!(config.tag_prefix, TagPrefix::Backslash);
        assert_eq!(config.max_lookahead_lines, 2);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let config = parse_doxydoc_config("javadoc = \"yes\"\nmax_lookahead_lines = -1\nenabeld = true\n");
        assert_eq!(config, DocConfig::default());
        assert_eq!(parse_doxydoc_config("not toml ["), DocConfig::default());
    }

    #[test]
    fn disabled_config_generates_nothing() {
        let source = TextBuffer::from_lines(&["/**", "int f(int a);"]);
        let config = DocConfig { enabled: false, ..DocConfig::default() };
        assert_eq!(generate_snippet(&source, 0, &config), None);
        assert!(generate_snippet(&source, 0, &DocConfig::default()).is_some());
    }
}

//! Snippet building: turn a classified declaration into a comment body with
//! numbered tab-stops (`${n}` / `${n:hint}`).
//!
//! Field order is fixed: `relates` (friends only), `brief`, `details`, a blank
//! line, then `param` / `tparam` / `return` fields. Indices start at 1 and each
//! emitted field takes the next one.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{ClassifiedDeclaration, DeclarationKind, Outcome, TagPrefix};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\d+)(?::([^}]*))?\}").unwrap());

const HINT_BRIEF: &str = "[brief description]";
const HINT_DETAILS: &str = "[long description]";
const HINT_FIELD: &str = "[description]";
const HINT_RELATES: &str = "[class name]";

/// Inserted when nothing better can be produced: an empty body and the final cursor stop.
pub fn fallback_snippet() -> String {
    "\n * ${0}\n */".to_string()
}

/// Inserted when the comment body already exists.
pub fn continuation_snippet() -> String {
    "\n * ".to_string()
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

struct SnippetWriter {
    prefix: TagPrefix,
    next_index: usize,
    out: String,
}

impl SnippetWriter {
    fn new(prefix: TagPrefix) -> Self {
        Self { prefix, next_index: 1, out: String::new() }
    }

    fn field(&mut self, tag: &str, label: Option<&str>, hint: &str) {
        self.out.push_str("\n * ");
        self.out.push(self.prefix.as_char());
        self.out.push_str(tag);
        self.out.push(' ');
        if let Some(label) = label {
            self.out.push_str(label);
            self.out.push(' ');
        }
        self.out.push_str(&format!("${{{}:{}}}", self.next_index, hint));
        self.next_index += 1;
    }

    /// `relates` (when a friend), `brief`, `details`, then the separating blank line.
    fn header(&mut self, is_friend: bool) {
        if is_friend {
            self.field("relates", None, HINT_RELATES);
        }
        self.field("brief", None, HINT_BRIEF);
        self.field("details", None, HINT_DETAILS);
        self.out.push_str("\n * ");
    }

    fn finish(mut self) -> String {
        self.out.push_str("\n */");
        self.out
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn class_snippet(prefix: TagPrefix) -> String {
    let mut w = SnippetWriter::new(prefix);
    w.header(false);
    w.finish()
}

fn template_class_snippet(decl: &ClassifiedDeclaration, prefix: TagPrefix) -> String {
    let mut w = SnippetWriter::new(prefix);
    w.header(false);
    for arg in &decl.template_args {
        w.field("tparam", Some(arg), HINT_FIELD);
    }
    w.finish()
}

fn function_snippet(decl: &ClassifiedDeclaration, prefix: TagPrefix) -> String {
    let mut w = SnippetWriter::new(prefix);
    w.header(decl.is_friend);
    if !decl.has_no_parameters() {
        for param in &decl.parameters {
            w.field("param", Some(&param.name), HINT_FIELD);
        }
    }
    if decl.returns_value() {
        w.field("return", None, HINT_FIELD);
    }
    w.finish()
}

/// Like [`function_snippet`], but template parameters used directly as a
/// parameter type are considered documented by that `@param` and get no `@tparam`.
fn template_function_snippet(decl: &ClassifiedDeclaration, prefix: TagPrefix) -> String {
    let mut w = SnippetWriter::new(prefix);
    w.header(decl.is_friend);

    let mut remaining: Vec<&str> = decl.template_args.iter().map(String::as_str).collect();
    if !decl.has_no_parameters() {
        for param in &decl.parameters {
            if let Some(pos) = remaining.iter().position(|t| *t == param.declared_type) {
                remaining.remove(pos);
            }
            w.field("param", Some(&param.name), HINT_FIELD);
        }
    }
    for arg in remaining {
        w.field("tparam", Some(arg), HINT_FIELD);
    }
    if decl.returns_value() {
        w.field("return", None, HINT_FIELD);
    }
    w.finish()
}

/// Build the comment body for a classified declaration.
pub fn build_snippet(decl: &ClassifiedDeclaration, prefix: TagPrefix) -> String {
    match decl.kind {
        DeclarationKind::PlainClass => class_snippet(prefix),
        DeclarationKind::TemplatedClass => template_class_snippet(decl, prefix),
        DeclarationKind::PlainFunction | DeclarationKind::PlainConstructorOrDestructor => {
            function_snippet(decl, prefix)
        }
        DeclarationKind::TemplatedFunction
        | DeclarationKind::TemplatedConstructorOrDestructor => {
            template_function_snippet(decl, prefix)
        }
        // `classify` never yields this kind; a hand-built value still gets a usable body.
        DeclarationKind::Unrecognized => fallback_snippet(),
    }
}

/// The text to insert for an inspection outcome.
pub fn snippet_for(outcome: &Outcome, prefix: TagPrefix) -> String {
    match outcome {
        Outcome::Fallback { .. } => fallback_snippet(),
        Outcome::Continuation => continuation_snippet(),
        Outcome::Declaration { declaration } => build_snippet(declaration, prefix),
    }
}

// ---------------------------------------------------------------------------
// Placeholder utilities
// ---------------------------------------------------------------------------

/// Tab-stop indices in order of appearance.
pub fn placeholder_indices(snippet: &str) -> Vec<usize> {
    PLACEHOLDER
        .captures_iter(snippet)
        .filter_map(|caps| caps[1].parse().ok())
        .collect()
}

/// Replace every tab-stop with its hint text (or nothing), for hosts without
/// snippet support.
pub fn render_plain(snippet: &str) -> String {
    PLACEHOLDER
        .replace_all(snippet, |caps: &regex::Captures| {
            caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default()
        })
        .into_owned()
}

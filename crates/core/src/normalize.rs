//! Lexical normalization of captured declaration fragments.
//!
//! Reduces a raw `template<...>` parameter list or a function parameter list to
//! bare names (and types) by stripping the noise a doc comment does not need:
//! defaults, sigils, cv-qualifiers, scopes, nested template arguments, array
//! bounds, variadic markers and `decltype(...)`.

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

use crate::types::FunctionParameter;

static DECLTYPE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"decltype\s*\(").unwrap());
static TRAILING_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S\s+([A-Za-z_]\w*)$").unwrap());
static CV_QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:const|volatile)\b\s*").unwrap());
static SCOPE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:[A-Za-z_]\w*)?::").unwrap());
static INNER_TEMPLATE_ARGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*<[^<>]*>").unwrap());
static INNER_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]*)\)").unwrap());
static ARRAY_BOUND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());
static TYPE_AND_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z_]\w*)\s+([A-Za-z_]\w*)").unwrap());

// ---------------------------------------------------------------------------
// Template parameter lists
// ---------------------------------------------------------------------------

/// Reduce the inside of `template<...>` to the ordered parameter names.
///
/// `"typename T = int, typename U"` becomes `["T", "U"]`. Parameters without a
/// name (`typename = void`, `int`) are dropped.
pub fn normalize_template_args(raw: &str) -> Vec<String> {
    let stripped = strip_decltype(raw);

    let mut names = Vec::new();
    for segment in split_top_level(&stripped) {
        let without_default = match find_top_level(segment, '=') {
            Some(pos) => &segment[..pos],
            None => segment,
        };
        let cleaned = without_default.replace("...", " ");
        let cleaned = cleaned.trim();
        match TRAILING_NAME.captures(cleaned) {
            Some(caps) => names.push(caps[1].to_string()),
            None => trace!(segment = cleaned, "Dropping anonymous template parameter"),
        }
    }

    trace!(raw, ?names, "Normalized template arguments");
    names
}

/// Drop the expression of every `decltype(...)` span, nested parentheses
/// included. The keyword stays so a following parameter name is kept.
fn strip_decltype(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(m) = DECLTYPE_OPEN.find(rest) {
        out.push_str(&rest[..m.start()]);
        out.push_str("decltype");
        let mut depth = 1usize;
        let mut end = rest.len();
        for (i, ch) in rest[m.end()..].char_indices() {
            match ch {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        end = m.end() + i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }
        rest = &rest[end..];
    }
    out.push_str(rest);
    out
}

/// Split on commas that are not nested inside `<>`, `()`, `[]` or `{}`.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        match ch {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth = (depth - 1).max(0),
            ',' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn find_top_level(text: &str, needle: char) -> Option<usize> {
    let mut depth: i32 = 0;
    for (i, ch) in text.char_indices() {
        match ch {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth = (depth - 1).max(0),
            c if c == needle && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Function parameter lists
// ---------------------------------------------------------------------------

/// Reduce a function parameter list to ordered `(type, name)` pairs.
///
/// An empty list or a lone token (`void`) yields the single sentinel pair
/// `("void", "")`. Segments that do not look like `Type name` are skipped.
pub fn normalize_function_args(raw: &str) -> Vec<FunctionParameter> {
    let text = simplify_function_args(until_closing_paren(raw));
    trace!(before = raw, after = text.as_str(), "Simplified function arguments");

    if !text.contains(',') {
        if !text.contains(char::is_whitespace) {
            return vec![FunctionParameter::void_sentinel()];
        }
        return extract_parameter(&text).into_iter().collect();
    }

    text.split(',')
        .filter_map(|segment| {
            let param = extract_parameter(segment);
            if param.is_none() {
                trace!(segment, "Skipping malformed parameter segment");
            }
            param
        })
        .collect()
}

/// Cut at the `)` closing the parameter list. A greedy capture can run on into a
/// constructor's member-initializer list (`int x) : x_(x), y_(y`).
fn until_closing_paren(raw: &str) -> &str {
    let mut depth = 0usize;
    for (i, ch) in raw.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => return &raw[..i],
            ')' => depth -= 1,
            _ => {}
        }
    }
    raw
}

fn simplify_function_args(raw: &str) -> String {
    let mut text = raw.replace(['&', '*'], "");
    text = text.replace("...", "");
    text = CV_QUALIFIER.replace_all(&text, "").into_owned();
    text = SCOPE_PREFIX.replace_all(&text, "").into_owned();
    text = replace_until_stable(&INNER_TEMPLATE_ARGS, &text, "");
    text = replace_until_stable(&INNER_PARENS, &text, " $1 ");
    text = ARRAY_BOUND.replace_all(&text, "").into_owned();
    text.trim().to_string()
}

/// Apply `re` repeatedly so nested constructs collapse from the inside out.
fn replace_until_stable(re: &Regex, text: &str, replacement: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = re.replace_all(&current, replacement).into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

fn extract_parameter(segment: &str) -> Option<FunctionParameter> {
    TYPE_AND_NAME.captures(segment).map(|caps| FunctionParameter::new(&caps[1], &caps[2]))
}

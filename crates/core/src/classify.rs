//! Declaration classification: decide what follows a freshly opened `/**`.
//!
//! Classification is regex-driven. Three matchers are tried in the fixed order
//! of [`MATCH_PRIORITY`]; the first hit wins. Constructors go before generic
//! functions so a class name is never captured as a return type, and class
//! headers go last and only ever see a single physical line.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;

use crate::normalize::{normalize_function_args, normalize_template_args};
use crate::source::LineSource;
use crate::types::{ClassifiedDeclaration, DeclarationKind, FallbackReason, Outcome};

/// Marker the cursor line must contain for a full snippet.
pub const COMMENT_OPENER: &str = "/**";

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// Storage/linkage keywords and attributes that may precede a function.
const SPECIFIERS: &str =
    r"\s*(?:(?:inline|static|constexpr|friend|virtual|explicit|\[\[.+\]\])\s+)*";
/// Characters allowed inside a captured argument list.
const ARG_CHARS: &str = r"[:<>\[\]\(\),.*&\w\s]";

static TEMPLATE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*template\s*<(.+)>\s*").unwrap());
static COMMENT_BODY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\*").unwrap());
static CONSTRUCTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{SPECIFIERS}~?(?P<name>[a-zA-Z_]\w*)(?:::[a-zA-Z_]\w*)?\((?P<args>{ARG_CHARS}*)\).+"
    ))
    .unwrap()
});
static FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{SPECIFIERS}(?P<return>(?:typename\s*)?[\w:<>]+)?\s*(?P<subname>[A-Za-z_]\w*::)?(?P<name>operator\s*\S{{1,2}}|[A-Za-z_:]\w*)\s*\((?P<args>{ARG_CHARS}*)\).+"
    ))
    .unwrap()
});
static CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:class|struct)\s*(?P<name>[a-zA-Z_]\w*)\s*\{?").unwrap());

// ---------------------------------------------------------------------------
// Matchers
// ---------------------------------------------------------------------------

/// Which text a matcher is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchScope {
    /// The first line plus its lookahead lines, concatenated.
    Candidate,
    /// The first declaration line only.
    FirstLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Matcher {
    ConstructorOrDestructor,
    Function,
    Class,
}

/// Matchers in the order they are tried.
pub const MATCH_PRIORITY: [Matcher; 3] =
    [Matcher::ConstructorOrDestructor, Matcher::Function, Matcher::Class];

/// Captures pulled out of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationMatch {
    pub matcher: Matcher,
    pub text: String,
    pub name: Option<String>,
    pub return_type: Option<String>,
    pub args: Option<String>,
    /// `friend` appears in the declaration text up to the end of the match.
    pub is_friend: bool,
}

impl Matcher {
    pub fn name(self) -> &'static str {
        match self {
            Matcher::ConstructorOrDestructor => "constructor",
            Matcher::Function => "function",
            Matcher::Class => "class",
        }
    }

    pub fn scope(self) -> MatchScope {
        match self {
            Matcher::Class => MatchScope::FirstLine,
            _ => MatchScope::Candidate,
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            Matcher::ConstructorOrDestructor => &CONSTRUCTOR,
            Matcher::Function => &FUNCTION,
            Matcher::Class => &CLASS,
        }
    }

    pub fn kind(self, templated: bool) -> DeclarationKind {
        match (self, templated) {
            (Matcher::ConstructorOrDestructor, true) => {
                DeclarationKind::TemplatedConstructorOrDestructor
            }
            (Matcher::ConstructorOrDestructor, false) => {
                DeclarationKind::PlainConstructorOrDestructor
            }
            (Matcher::Function, true) => DeclarationKind::TemplatedFunction,
            (Matcher::Function, false) => DeclarationKind::PlainFunction,
            (Matcher::Class, true) => DeclarationKind::TemplatedClass,
            (Matcher::Class, false) => DeclarationKind::PlainClass,
        }
    }

    pub fn try_match(self, text: &str) -> Option<DeclarationMatch> {
        let caps = self.regex().captures(text)?;
        let group = |name: &str| {
            caps.name(name).map(|m| m.as_str().to_string()).filter(|s| !s.is_empty())
        };
        let whole = caps.get(0)?;
        Some(DeclarationMatch {
            matcher: self,
            text: whole.as_str().to_string(),
            is_friend: text[..whole.end()].contains("friend "),
            name: group("name"),
            return_type: group("return"),
            args: caps.name("args").map(|m| m.as_str().to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Candidate collection
// ---------------------------------------------------------------------------

/// The text window considered for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationCandidate {
    /// The first physical line, used for class detection.
    pub first_line: String,
    /// The first line followed by up to `max_lookahead + 1` lines, joined without
    /// separators.
    pub text: String,
}

impl DeclarationCandidate {
    /// Read the line at `offset` and its lookahead. `None` if `offset` is past the end.
    pub fn collect(source: &dyn LineSource, offset: usize, max_lookahead: usize) -> Option<Self> {
        let first = source.read_line(offset)?;
        let mut text = first.text.to_string();
        let mut point = first.next_offset();
        for _ in 0..=max_lookahead {
            let Some(line) = source.read_line(point) else {
                break;
            };
            text.push_str(line.text);
            point = line.next_offset();
        }
        Some(Self { first_line: first.text.to_string(), text })
    }

    pub fn scoped(&self, scope: MatchScope) -> &str {
        match scope {
            MatchScope::Candidate => &self.text,
            MatchScope::FirstLine => &self.first_line,
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Run the matchers over `candidate` in priority order. `template_args` is
/// `Some` when a `template<...>` header preceded the candidate.
pub fn classify(
    candidate: &DeclarationCandidate,
    template_args: Option<&[String]>,
) -> Option<ClassifiedDeclaration> {
    let (matched, kind) = MATCH_PRIORITY.iter().find_map(|matcher| {
        let m = matcher.try_match(candidate.scoped(matcher.scope()))?;
        Some((m, matcher.kind(template_args.is_some())))
    })?;

    debug!(matcher = matched.matcher.name(), kind = kind.label(), "Declaration recognized");

    let parameters = match (&matched.args, kind.is_class()) {
        (Some(args), false) => normalize_function_args(args),
        _ => Vec::new(),
    };

    Some(ClassifiedDeclaration {
        kind,
        return_type: matched.return_type,
        parameters,
        template_args: template_args.map(<[String]>::to_vec).unwrap_or_default(),
        is_friend: matched.is_friend,
        raw_match_text: matched.text,
    })
}

/// Inspect the lines after the cursor and decide what kind of comment to produce.
///
/// The cursor line must contain `/**`. A following line that already starts with
/// `*` means the comment body exists. Otherwise a `template<...>` header is tried
/// first, then the plain matchers, starting at the line after the opener.
pub fn inspect(source: &dyn LineSource, cursor: usize, max_lookahead: usize) -> Outcome {
    let current = match source.read_line(cursor) {
        Some(line) if line.text.contains(COMMENT_OPENER) => line,
        _ => {
            debug!(cursor, "Cursor line has no comment opener");
            return Outcome::Fallback { reason: FallbackReason::NoOpener };
        }
    };

    let Some(next) = source.read_line(current.next_offset()) else {
        debug!("Comment opener is the last line");
        return Outcome::Fallback { reason: FallbackReason::EndOfDocument };
    };

    if COMMENT_BODY.is_match(next.text) {
        return Outcome::Continuation;
    }

    if let Some(caps) = TEMPLATE_HEADER.captures(next.text) {
        let template_args = normalize_template_args(&caps[1]);
        let templated = DeclarationCandidate::collect(source, next.next_offset(), max_lookahead)
            .and_then(|candidate| classify(&candidate, Some(&template_args)));
        if let Some(declaration) = templated {
            return Outcome::Declaration { declaration };
        }
        debug!(header = next.text, "Template header without a recognizable body");
    }

    let plain = DeclarationCandidate::collect(source, next.start, max_lookahead)
        .and_then(|candidate| classify(&candidate, None));
    match plain {
        Some(declaration) => Outcome::Declaration { declaration },
        None => {
            debug!(line = next.text, "No matcher recognized the declaration");
            Outcome::Fallback { reason: FallbackReason::Unrecognized }
        }
    }
}

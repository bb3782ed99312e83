//! Core types shared across DoxyDoc: the per-invocation configuration value,
//! declaration kinds, classified declarations, and the analysis result handed
//! back to the host.

use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Default number of continuation lines concatenated when a declaration spans lines.
pub const DEFAULT_MAX_LOOKAHEAD_LINES: usize = 5;

/// Leading character of every emitted field tag (`@brief` vs `\brief`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagPrefix {
    #[default]
    At,
    Backslash,
}

impl TagPrefix {
    pub fn as_char(self) -> char {
        match self {
            TagPrefix::At => '@',
            TagPrefix::Backslash => '\\',
        }
    }

    /// Javadoc style uses `@`, Qt style uses `\`.
    pub fn from_javadoc(javadoc: bool) -> Self {
        if javadoc {
            TagPrefix::At
        } else {
            TagPrefix::Backslash
        }
    }
}

impl fmt::Display for TagPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Runtime configuration for one invocation. Loaded from `.doxydoc.toml` or defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocConfig {
    /// When false, snippet generation is a no-op.
    pub enabled: bool,
    pub tag_prefix: TagPrefix,
    /// Continuation lines pulled in after the first declaration line.
    pub max_lookahead_lines: usize,
}

impl DocConfig {
    pub fn new() -> Self {
        Self {
            enabled: true,
            tag_prefix: TagPrefix::At,
            max_lookahead_lines: DEFAULT_MAX_LOOKAHEAD_LINES,
        }
    }

    pub fn with_javadoc(mut self, javadoc: bool) -> Self {
        self.tag_prefix = TagPrefix::from_javadoc(javadoc);
        self
    }

    pub fn with_max_lookahead_lines(mut self, lines: usize) -> Self {
        self.max_lookahead_lines = lines;
        self
    }
}

impl Default for DocConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

/// What a declaration candidate was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    TemplatedClass,
    TemplatedFunction,
    TemplatedConstructorOrDestructor,
    PlainClass,
    PlainFunction,
    PlainConstructorOrDestructor,
    Unrecognized,
}

impl DeclarationKind {
    pub fn is_templated(self) -> bool {
        matches!(
            self,
            DeclarationKind::TemplatedClass
                | DeclarationKind::TemplatedFunction
                | DeclarationKind::TemplatedConstructorOrDestructor
        )
    }

    pub fn is_class(self) -> bool {
        matches!(self, DeclarationKind::TemplatedClass | DeclarationKind::PlainClass)
    }

    pub fn label(self) -> &'static str {
        match self {
            DeclarationKind::TemplatedClass => "template class",
            DeclarationKind::TemplatedFunction => "template function",
            DeclarationKind::TemplatedConstructorOrDestructor => "template constructor",
            DeclarationKind::PlainClass => "class",
            DeclarationKind::PlainFunction => "function",
            DeclarationKind::PlainConstructorOrDestructor => "constructor",
            DeclarationKind::Unrecognized => "unrecognized",
        }
    }
}

/// A single function parameter. `name` is empty when no identifier could be isolated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionParameter {
    #[serde(rename = "type")]
    pub declared_type: String,
    pub name: String,
}

impl FunctionParameter {
    pub fn new(declared_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self { declared_type: declared_type.into(), name: name.into() }
    }

    /// The `("void", "")` pair standing for an explicitly empty parameter list.
    pub fn void_sentinel() -> Self {
        Self::new("void", "")
    }

    pub fn is_void_sentinel(&self) -> bool {
        self.declared_type == "void" && self.name.is_empty()
    }
}

/// Everything the snippet builder needs to know about a recognized declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedDeclaration {
    pub kind: DeclarationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    pub parameters: Vec<FunctionParameter>,
    pub template_args: Vec<String>,
    pub is_friend: bool,
    pub raw_match_text: String,
}

impl ClassifiedDeclaration {
    /// True when the parameter list produces no `@param` fields.
    pub fn has_no_parameters(&self) -> bool {
        self.parameters.is_empty()
            || (self.parameters.len() == 1 && self.parameters[0].is_void_sentinel())
    }

    /// True when a `@return` field is due: a return type exists and is not `void`.
    pub fn returns_value(&self) -> bool {
        matches!(self.return_type.as_deref(), Some(ret) if !ret.is_empty() && ret != "void")
    }
}

// ---------------------------------------------------------------------------
// Analysis result
// ---------------------------------------------------------------------------

/// Why the minimal fallback snippet was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The cursor line is missing or does not contain `/**`.
    NoOpener,
    /// Nothing follows the opener line.
    EndOfDocument,
    /// No matcher recognized the following lines.
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    Fallback { reason: FallbackReason },
    Continuation,
    Declaration { declaration: ClassifiedDeclaration },
}

/// The result of one invocation: how the cursor context was read, and the snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub outcome: Outcome,
    pub snippet: String,
}

impl Analysis {
    pub fn declaration(&self) -> Option<&ClassifiedDeclaration> {
        match &self.outcome {
            Outcome::Declaration { declaration } => Some(declaration),
            _ => None,
        }
    }
}

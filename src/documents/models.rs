// src/documents/models.rs
use serde::Serialize;
use std::fmt;

/// Published 2024 "A" qualifying standards.
pub const DEFAULT_A_STANDARDS_URL: &str = "https://assets.contentstack.io/v3/assets/blteb7d012fc7ebef7f/bltb4577197252782a8/65e75351ed46610094787c44/2024_A_Standards_Updated.pdf";
/// Published 2024 "B" qualifying standards.
pub const DEFAULT_B_STANDARDS_URL: &str = "https://assets.contentstack.io/v3/assets/blteb7d012fc7ebef7f/bltff0fa4e0e845cbfa/65e753516f950cfb558c6787/2024_B_Standards_Updated.pdf";

/// Which of the two qualifying standards a document holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardKind {
    A,
    B,
}

impl StandardKind {
    /// Short lowercase label, used for file names and leaf field names
    pub fn label(&self) -> &'static str {
        match self {
            StandardKind::A => "a",
            StandardKind::B => "b",
        }
    }
}

impl fmt::Display for StandardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StandardKind::A => write!(f, "A standards"),
            StandardKind::B => write!(f, "B standards"),
        }
    }
}

/// A remote PDF holding one standards table
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSource {
    pub kind: StandardKind,
    pub url: String,
}

impl DocumentSource {
    pub fn new(kind: StandardKind, url: impl Into<String>) -> Self {
        Self { kind, url: url.into() }
    }

    /// Base name for debug dumps of this document, e.g. `a_standards`
    pub fn debug_name(&self) -> String {
        format!("{}_standards", self.kind.label())
    }
}

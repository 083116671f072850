//! Extension-based routing of files to handlers.

use std::fmt;
use std::path::Path;

/// Source languages understood by the code handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    Rust,
    JavaScript,
    TypeScript,
    Go,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Rust => "rust",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Go => "go",
        }
    }
}

/// The closed set of file handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// Vocabulary, sentence fragments and topics.
    Text,
    /// JSON key/value extraction.
    Structured,
    /// Function and class name extraction.
    Code(Language),
}

impl HandlerKind {
    /// Short label used in logs and metrics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Structured => "structured",
            Self::Code(_) => "code",
        }
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(lang) => write!(f, "code ({})", lang.as_str()),
            other => f.write_str(other.label()),
        }
    }
}

/// Document extensions with a dedicated handler.
const DOCUMENT_EXTENSIONS: &[(&str, HandlerKind)] = &[
    ("txt", HandlerKind::Text),
    ("md", HandlerKind::Text),
    ("csv", HandlerKind::Text),
    ("json", HandlerKind::Structured),
];

/// Source code extensions and their languages.
const SOURCE_EXTENSIONS: &[(&str, Language)] = &[
    ("py", Language::Python),
    ("pyi", Language::Python),
    ("rs", Language::Rust),
    ("js", Language::JavaScript),
    ("jsx", Language::JavaScript),
    ("mjs", Language::JavaScript),
    ("ts", Language::TypeScript),
    ("tsx", Language::TypeScript),
    ("go", Language::Go),
];

/// Maps paths to handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFilter;

impl FileFilter {
    /// Pick the handler for a path. Unknown or missing extensions fall back to text.
    #[must_use]
    pub fn handler_for(path: &Path) -> HandlerKind {
        let Some(ext) = Self::extension(path) else {
            return HandlerKind::Text;
        };

        if let Some(language) = Self::language_for_extension(&ext) {
            return HandlerKind::Code(language);
        }

        DOCUMENT_EXTENSIONS
            .iter()
            .find(|(e, _)| *e == ext)
            .map_or(HandlerKind::Text, |(_, kind)| *kind)
    }

    fn language_for_extension(ext: &str) -> Option<Language> {
        SOURCE_EXTENSIONS
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|(_, lang)| *lang)
    }

    fn extension(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
    }
}

//! Lightweight text and source analysis used by the handlers.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::filter::Language;
use crate::knowledge::{CodePatterns, Topic};

/// Minimum fragment length, in characters, exclusive.
const MIN_FRAGMENT_CHARS: usize = 10;

/// Fixed topic taxonomy: a topic is detected when any keyword is a
/// substring of the lowercased text.
pub const TOPIC_TAXONOMY: &[(Topic, &[&str])] = &[
    (
        Topic::Technology,
        &["python", "code", "program", "computer", "ai", "machine"],
    ),
    (
        Topic::Business,
        &["company", "business", "market", "money", "profit"],
    ),
    (
        Topic::Science,
        &["research", "study", "data", "analysis", "experiment"],
    ),
    (
        Topic::Creative,
        &["art", "design", "create", "story", "character"],
    ),
];

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z]{3,}\b").unwrap());

static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

struct SymbolPatterns {
    functions: Regex,
    classes: Regex,
}

impl SymbolPatterns {
    fn new(functions: &str, classes: &str) -> Self {
        Self {
            functions: Regex::new(functions).unwrap(),
            classes: Regex::new(classes).unwrap(),
        }
    }
}

static PYTHON_SYMBOLS: Lazy<SymbolPatterns> =
    Lazy::new(|| SymbolPatterns::new(r"\bdef\s+(\w+)", r"\bclass\s+(\w+)"));

static RUST_SYMBOLS: Lazy<SymbolPatterns> =
    Lazy::new(|| SymbolPatterns::new(r"\bfn\s+(\w+)", r"\b(?:struct|enum|trait)\s+(\w+)"));

static SCRIPT_SYMBOLS: Lazy<SymbolPatterns> =
    Lazy::new(|| SymbolPatterns::new(r"\bfunction\*?\s+(\w+)", r"\bclass\s+(\w+)"));

static GO_SYMBOLS: Lazy<SymbolPatterns> = Lazy::new(|| {
    SymbolPatterns::new(
        r"\bfunc\s+(?:\([^)]*\)\s*)?(\w+)",
        r"\btype\s+(\w+)\s+struct\b",
    )
});

/// Lowercase alphabetic tokens of at least three letters.
#[must_use]
pub fn vocabulary(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Trimmed sentence fragments longer than ten characters, in order.
#[must_use]
pub fn sentence_fragments(text: &str) -> Vec<String> {
    SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_FRAGMENT_CHARS)
        .map(String::from)
        .collect()
}

/// Every topic with at least one keyword occurring anywhere in the text.
#[must_use]
pub fn detect_topics(text: &str) -> BTreeSet<Topic> {
    let lower = text.to_lowercase();
    TOPIC_TAXONOMY
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(topic, _)| *topic)
        .collect()
}

/// Function and class names declared in `source`.
#[must_use]
pub fn code_symbols(source: &str, language: Language) -> CodePatterns {
    let patterns: &SymbolPatterns = match language {
        Language::Python => &PYTHON_SYMBOLS,
        Language::Rust => &RUST_SYMBOLS,
        Language::JavaScript | Language::TypeScript => &SCRIPT_SYMBOLS,
        Language::Go => &GO_SYMBOLS,
    };

    CodePatterns {
        functions: captures(&patterns.functions, source),
        classes: captures(&patterns.classes, source),
    }
}

fn captures(re: &Regex, source: &str) -> Vec<String> {
    re.captures_iter(source)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

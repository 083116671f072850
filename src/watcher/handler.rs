//! Per-type file handlers and bounded dispatch.

use std::time::Duration;

use serde_json::{Map, Value};

use super::analysis;
use super::filter::{HandlerKind, Language};
use super::fingerprint::WatchedFile;
use crate::error::IngestError;
use crate::knowledge::KnowledgeDelta;

/// Minimum structured value length, in characters, exclusive.
const MIN_STRUCTURED_VALUE_CHARS: usize = 5;

impl HandlerKind {
    /// Turn file content into a knowledge delta.
    ///
    /// Pure: nothing is merged here, so a handler abandoned on timeout
    /// leaves no partial state behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not UTF-8 (text and code) or is
    /// not valid JSON (structured).
    pub fn ingest(self, content: &[u8]) -> Result<KnowledgeDelta, IngestError> {
        match self {
            Self::Text => decode(content).map(ingest_text),
            Self::Structured => ingest_structured(content),
            Self::Code(language) => decode(content).map(|code| ingest_code(code, language)),
        }
    }
}

/// Run the handler for `file` on the blocking pool, bounded by `timeout`.
///
/// On timeout the blocking task is detached and its result discarded.
///
/// # Errors
///
/// Returns the read error, the handler error, `TimedOut` or `Panicked`.
pub async fn dispatch(file: WatchedFile, timeout: Duration) -> Result<KnowledgeDelta, IngestError> {
    let kind = file.kind;
    let content = file.into_content()?;

    let task = tokio::task::spawn_blocking(move || kind.ingest(&content));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(IngestError::Panicked(join_err.to_string())),
        Err(_) => Err(IngestError::TimedOut(timeout)),
    }
}

fn decode(content: &[u8]) -> Result<&str, IngestError> {
    std::str::from_utf8(content).map_err(|e| IngestError::Decode(e.to_string()))
}

fn ingest_text(text: &str) -> KnowledgeDelta {
    KnowledgeDelta {
        vocabulary: analysis::vocabulary(text),
        topics: analysis::detect_topics(text),
        fragments: analysis::sentence_fragments(text),
        ..Default::default()
    }
}

fn ingest_structured(content: &[u8]) -> Result<KnowledgeDelta, IngestError> {
    let value: Value =
        serde_json::from_slice(content).map_err(|e| IngestError::Malformed(e.to_string()))?;

    let mut structured = Vec::new();
    match value {
        Value::Object(map) => collect_strings(&map, &mut structured),
        Value::Array(items) => {
            for item in &items {
                if let Value::Object(map) = item {
                    collect_strings(map, &mut structured);
                }
            }
        }
        _ => {}
    }

    Ok(KnowledgeDelta {
        structured,
        ..Default::default()
    })
}

fn collect_strings(map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, value) in map {
        if let Value::String(s) = value {
            if s.chars().count() > MIN_STRUCTURED_VALUE_CHARS {
                out.push((key.clone(), s.clone()));
            }
        }
    }
}

fn ingest_code(code: &str, language: Language) -> KnowledgeDelta {
    KnowledgeDelta {
        code: Some(analysis::code_symbols(code, language)),
        ..Default::default()
    }
}

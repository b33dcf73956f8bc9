//! Error types for resolution and schema loading.

use std::path::PathBuf;
use thiserror::Error;

use crate::ir::RecordId;

/// Failures of the dependency-closure resolver.
///
/// Unknown field kinds and cyclic references are never errors; they degrade
/// to `Unknown` and named references respectively.
#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    /// Two distinct records normalize to the same output name.
    #[error("records '{first}' and '{second}' both resolve to type name '{name}'")]
    NameCollision {
        name: String,
        first: RecordId,
        second: RecordId,
    },

    /// A root identity is not present in the registry.
    #[error("unknown root record '{0}'")]
    UnknownRoot(RecordId),
}

/// Failures while reading schema documents into a registry.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed document; `message` carries the JSON path.
    #[error("failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("record '{0}' is defined more than once")]
    DuplicateRecord(RecordId),

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("glob error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("glob pattern matched no files: {0}")]
    NoMatches(String),
}

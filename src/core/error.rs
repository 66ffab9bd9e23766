use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the download source engine.
/// Every fallible operation returns `Result<T, SourceError>`.
#[derive(Debug, Error)]
pub enum SourceError {
    // ── Input ───────────────────────────────────────────
    #[error("Invalid Maven coordinate: {0}")]
    InvalidMavenCoordinate(String),

    #[error("Unknown template type: {0}")]
    UnknownTemplate(String),

    // ── Registry / configuration ────────────────────────
    #[error("Download source not found: {0}")]
    UnknownSource(String),

    #[error("Invalid download source: {0}")]
    InvalidSource(String),

    #[error("Key belongs to a built-in download source: {0}")]
    BuiltinSource(String),

    // ── Headers ─────────────────────────────────────────
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type SourceResult<T> = Result<T, SourceError>;

impl From<std::io::Error> for SourceError {
    fn from(source: std::io::Error) -> Self {
        SourceError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

// Frontends that ship errors over IPC only need the message.
impl serde::Serialize for SourceError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

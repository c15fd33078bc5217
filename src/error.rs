// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagTreeError {
    #[error("Malformed compound identifier '{id}': {reason}")]
    MalformedIdentifier { id: String, reason: String },

    #[error("Identifier collision on '{id}': already a {existing} node")]
    IdentifierCollision { id: String, existing: String },

    #[error("Segment '{segment}' repeats inside '{id}'")]
    DuplicateSegment { id: String, segment: String },

    #[error("Redirect target '{id}' was never materialized")]
    MissingTarget { id: String },

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Generic error: {0}")]
    Other(String),
}

impl TagTreeError {
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// True for errors that only invalidate one compound identifier.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MalformedIdentifier { .. }
                | Self::IdentifierCollision { .. }
                | Self::DuplicateSegment { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TagTreeError>;

// Allow `?` on std::io::Error by converting to TagTreeError::Io with unknown path.
impl From<std::io::Error> for TagTreeError {
    fn from(source: std::io::Error) -> Self {
        TagTreeError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

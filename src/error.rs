//! Error types for Svar.

use thiserror::Error;
use uuid::Uuid;

/// Library-level error type for Svar operations.
#[derive(Error, Debug)]
pub enum SvarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Document contains no extractable text")]
    EmptyDocument,

    #[error("Embedding provider unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Generation interrupted: {0}")]
    GenerationInterrupted(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for Svar operations.
pub type Result<T> = std::result::Result<T, SvarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_detail() {
        let err = SvarError::DimensionMismatch {
            expected: 1536,
            actual: 384,
        };
        assert_eq!(
            err.to_string(),
            "Embedding dimension mismatch: expected 1536, got 384"
        );

        let id = Uuid::new_v4();
        let err = SvarError::SessionNotFound(id);
        assert!(err.to_string().contains(&id.to_string()));

        let err = SvarError::ExtractionFailed("truncated page stream".to_string());
        assert!(err.to_string().contains("truncated page stream"));
    }
}

//! Error types for the engine crate.

use thiserror::Error;

/// Errors that can occur while talking to a text generator.
///
/// None of these reach the planner's callers: the planner logs them and
/// falls back to the deterministic allocators.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The generation call itself failed (network, HTTP status, timeout).
    #[error("generation failed: {0}")]
    Generation(String),

    /// The generator returned text that is not valid JSON.
    #[error("failed to parse response: {0}")]
    ResponseParse(String),

    /// The JSON parsed but does not have the expected shape.
    #[error("invalid response shape: {0}")]
    InvalidShape(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::InvalidShape("missing days".into());
        assert_eq!(err.to_string(), "invalid response shape: missing days");

        let err = EngineError::Generation("timeout".into());
        assert_eq!(err.to_string(), "generation failed: timeout");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: EngineError = json_err.into();
        assert!(matches!(err, EngineError::Serialization(_)));
    }
}

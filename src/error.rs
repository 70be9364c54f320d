/// Error types for Tab Sweeper
use thiserror::Error;

/// Result type alias for Tab Sweeper operations
pub type Result<T> = std::result::Result<T, TabError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TabError {
    /// Search requested with a blank pattern
    #[error("Please enter a URL pattern to search.")]
    NoPatternSupplied,

    #[error("Invalid pattern syntax: {reason} (pattern: {pattern})")]
    PatternSyntax { pattern: String, reason: String },

    #[error("Unsupported grouping mode: {0}")]
    InvalidGroupingMode(String),

    #[error("No tabs to close.")]
    NothingToClose,

    #[error("Browser API error: {0}")]
    Host(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for TabError {
    fn from(err: serde_json::Error) -> Self {
        TabError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            TabError::NoPatternSupplied.to_string(),
            "Please enter a URL pattern to search."
        );
        assert_eq!(TabError::NothingToClose.to_string(), "No tabs to close.");
        assert_eq!(
            TabError::InvalidGroupingMode("bogus".to_string()).to_string(),
            "Unsupported grouping mode: bogus"
        );
    }

    #[test]
    fn test_pattern_syntax_carries_pattern_and_reason() {
        let err = TabError::PatternSyntax {
            pattern: "*://(".to_string(),
            reason: "unclosed group".to_string(),
        };
        let message = err.to_string();
        assert!(message.starts_with("Invalid pattern syntax: unclosed group"));
        assert!(message.contains("*://("));
    }
}

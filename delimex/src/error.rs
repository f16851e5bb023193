//! Error types for pattern handling
//!
//! This module provides error handling using the `thiserror` crate.
//! Errors are categorized by their source: splitting a pattern literal,
//! compiling it with the engine, or running a set of replacement pairs.

use thiserror::Error;

/// Errors reported for a delimited pattern literal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Nothing but whitespace was given
    #[error("empty regular expression")]
    Empty,

    /// The opening delimiter is alphanumeric, a backslash, or NUL
    #[error("delimiter must not be alphanumeric, backslash, or NUL")]
    InvalidDelimiter(char),

    /// A plain delimiter was never closed
    #[error("no ending delimiter '{0}' found")]
    NoEndingDelimiter(char),

    /// A bracket-style delimiter was never closed by its partner
    #[error("no ending matching delimiter '{0}' found")]
    NoEndingMatchingDelimiter(char),

    /// A modifier letter the engine does not understand
    #[error("unknown modifier '{0}'")]
    UnknownModifier(char),

    /// A modifier letter that is known but cannot be honored by the engine
    #[error("unsupported modifier '{0}'")]
    UnsupportedModifier(char),

    /// The engine rejected the pattern body; carries its diagnostic verbatim
    #[error("compilation failed: {0}")]
    Compile(String),
}

impl From<regex::Error> for PatternError {
    fn from(err: regex::Error) -> Self {
        PatternError::Compile(err.to_string())
    }
}

/// Errors that can occur while running replacement pairs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplaceError {
    /// One of the patterns failed to compile; nothing was replaced
    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        /// The offending pattern literal
        pattern: String,
        /// Why it was rejected
        source: PatternError,
    },
}

/// Result type alias for pattern operations
pub type Result<T> = std::result::Result<T, PatternError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_error_display() {
        assert_eq!(
            PatternError::NoEndingDelimiter('/').to_string(),
            "no ending delimiter '/' found"
        );
        assert_eq!(
            PatternError::NoEndingMatchingDelimiter('}').to_string(),
            "no ending matching delimiter '}' found"
        );
    }

    #[test]
    fn test_unknown_modifier_display() {
        let err = PatternError::UnknownModifier('q');
        assert_eq!(err.to_string(), "unknown modifier 'q'");
        let err = PatternError::UnsupportedModifier('n');
        assert_eq!(err.to_string(), "unsupported modifier 'n'");
    }

    #[test]
    fn test_compile_error_from_engine() {
        let engine_err = regex::Regex::new("(").unwrap_err();
        let text = engine_err.to_string();
        let err: PatternError = engine_err.into();
        assert_eq!(err, PatternError::Compile(text.clone()));
        assert_eq!(err.to_string(), format!("compilation failed: {}", text));
    }

    #[test]
    fn test_replace_error_names_pattern() {
        let err = ReplaceError::Pattern {
            pattern: "/a".to_string(),
            source: PatternError::NoEndingDelimiter('/'),
        };
        assert_eq!(
            err.to_string(),
            "invalid pattern `/a`: no ending delimiter '/' found"
        );
    }
}

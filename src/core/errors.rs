//! Shared error types for analysis operations

use thiserror::Error;

/// Error result of one analysis invocation.
///
/// Only two failure kinds exist for a parseable-language input: the
/// source did not parse, or the analysis itself failed. Unsupported
/// languages are rejected before any parsing happens. All three render
/// to stable, user-facing messages; the CLI serializes them as
/// `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    /// The input did not parse as valid source for the declared language
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// Any other failure while computing metrics, patterns, or suggestions
    #[error("Analysis failed: {0}")]
    Analysis(String),

    /// The declared language is not supported
    #[error("Advanced analysis currently only supports Python")]
    UnsupportedLanguage,
}

impl AnalyzeError {
    /// Create a syntax error carrying the parser diagnostic
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }

    /// Create an analysis error with a message
    pub fn analysis(message: impl Into<String>) -> Self {
        Self::Analysis(message.into())
    }
}

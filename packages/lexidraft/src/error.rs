//! Error types for LexiDraft.
//!
//! Completion failures are usually collapsed into a single sentinel string
//! before they reach the caller (see [`crate::completion`]). The typed
//! variants below are what sits underneath that sentinel, and what strict
//! mode returns directly.

use thiserror::Error;

/// Main error type for the LexiDraft library.
#[derive(Debug, Error)]
pub enum LexidraftError {
    /// Missing or malformed configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure talking to the completion service.
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Completion service answered with a non-success status.
    #[error("completion API error (status {status}): {message}")]
    ApiStatus { status: u16, message: String },

    /// Response body did not have the expected shape.
    #[error("failed to parse completion response: {0}")]
    ResponseParse(String),

    /// Response parsed, but held no candidate text.
    #[error("completion service returned no candidates")]
    EmptyResponse,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to read or write the document archive.
    #[error("document archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Document XML could not be parsed.
    #[error("document XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Archive is readable but is not a word-processing document.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// Export filename is not a plain file name.
    #[error("invalid export filename: '{0}'. Expected a plain file name such as case_brief.docx")]
    InvalidFilename(String),

    /// Unknown feature identifier.
    #[error("unknown feature '{0}'. Expected one of: draft, research, case-brief, statute-citation, citation-format")]
    UnknownFeature(String),
}

impl LexidraftError {
    /// Whether this error came from the completion path rather than export.
    #[must_use]
    pub fn is_completion_failure(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::ApiStatus { .. } | Self::ResponseParse(_) | Self::EmptyResponse
        )
    }
}

/// Result type alias for LexiDraft operations.
pub type Result<T> = std::result::Result<T, LexidraftError>;

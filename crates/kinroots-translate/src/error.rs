//! Translation error types

use thiserror::Error;

/// Result type alias for translation operations
pub type TranslateResult<T> = std::result::Result<T, TranslateError>;

/// Translation-specific error types
///
/// None of these ever reach a caller of the translator itself; they exist
/// so classifier implementations can report precisely what failed before
/// the translator degrades to its sentinel.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Classifier API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed classifier response: {0}")]
    MalformedResponse(String),

    #[error("Missing API key")]
    MissingApiKey,
}

use thiserror::Error;

use crate::traits::ProviderError;

/// Errors from the OMDb API client.
#[derive(Debug, Error)]
pub enum OmdbError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    /// `Response: "False"` with the provider's `Error` text.
    #[error("{0}")]
    Provider(String),

    #[error("OMDb API key not set (expected in {})", super::API_KEY_ENV)]
    MissingApiKey,
}

impl ProviderError for OmdbError {
    fn provider_message(&self) -> Option<&str> {
        match self {
            Self::Provider(message) => Some(message),
            _ => None,
        }
    }
}

use marquee_api::ProviderError;
use thiserror::Error;

/// Message shown for any transport-level failure. The cause is only logged.
pub const FETCH_FAILED_MESSAGE: &str = "An error occurred. Please try again later.";

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turn a provider error into the text a view should display.
///
/// Logical errors are surfaced verbatim; anything else collapses to
/// [`FETCH_FAILED_MESSAGE`] and the cause goes to the log.
pub(crate) fn user_message<E: ProviderError>(operation: &str, err: &E) -> String {
    match err.provider_message() {
        Some(message) => message.to_string(),
        None => {
            tracing::warn!(operation, error = %err, "Provider request failed");
            FETCH_FAILED_MESSAGE.to_string()
        }
    }
}

//! Error types for evdash

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid insight payload: {0}")]
    InvalidPayload(String),

    #[error("No generation service credential configured")]
    MissingCredential,

    #[error("Generation service unreachable: {0}")]
    ServiceUnavailable(String),

    #[error("Generation service error: {0}")]
    ServiceError(String),
}

impl Error {
    /// User-facing fallback text for insight failures.
    ///
    /// The dashboard shows this string in place of generated text; the
    /// precise cause stays in the `error` field and the server logs.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "No chart data provided.",
            Error::InvalidPayload(_) => "The selected chart data is incomplete.",
            Error::MissingCredential => {
                "Insights are not configured on this server. Contact the operator."
            }
            Error::ServiceUnavailable(_) => {
                "Unable to reach the insight service. Please check your connection and try again."
            }
            _ => "Error generating insights. Please try again later.",
        }
    }

    /// Whether retrying the same request may succeed without operator action.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::MissingCredential)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

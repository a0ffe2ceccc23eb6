use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while fetching or interpreting a geocoding response.
///
/// The API's own `status` field (`OK`, `ZERO_RESULTS`, ...) is never turned
/// into an error here; callers switch on [`crate::domain::Status`] themselves.
#[derive(Debug, Error)]
pub enum Error {
    /// Network, TLS or timeout failure from the HTTP client
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success HTTP status
    #[error("geocoding API returned HTTP status {status}")]
    HttpStatus { status: u16 },

    /// Body declared as JSON could not be parsed
    #[error("failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Body declared as XML could not be parsed
    #[error("failed to parse XML response: {message}")]
    Xml { message: String },

    /// The value handed to the normalizer is not a geocoding response
    #[error("invalid geocoding response: {reason}")]
    InvalidInput { reason: String },

    /// The first result carries no `address_components` list
    #[error("no address components found for this address")]
    NoComponents,
}

impl Error {
    pub fn xml(message: impl ToString) -> Self {
        Self::Xml {
            message: message.to_string(),
        }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

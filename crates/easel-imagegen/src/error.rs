use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImageGenError>;

/// Image generation errors surfaced to callers
///
/// Failures of individual transports are absorbed while another transport
/// remains; only the outcome of the last one is reported
#[derive(Debug, Error)]
pub enum ImageGenError {
    /// Parameters cannot be turned into a request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Endpoint or path configuration is missing
    #[error("Configuration error: {0}")]
    Config(String),

    /// Every transport failed; carries the last HTTP status (0 when no response arrived)
    #[error("API request failed with status code {status}: {body}")]
    Api {
        status: u16,
        body: String,
        /// One line per failed transport, in attempt order
        attempts: Vec<String>,
    },

    /// The response matched none of the known envelope shapes
    #[error("Invalid response format: {0}")]
    ResponseFormat(String),
}

impl ImageGenError {
    /// Message that is safe to show to the user
    ///
    /// Response structure details are only logged, never shown
    pub fn client_message(&self) -> String {
        match self {
            Self::ResponseFormat(_) => "The image service returned an unexpected response.".to_string(),
            _ => self.to_string(),
        }
    }
}

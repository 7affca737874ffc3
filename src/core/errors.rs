use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Signing error: {0}")]
    SigningError(String),

    #[error("Authentication required but no credentials configured")]
    AuthenticationRequired,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error: {code} - {message}")]
    ApiError { code: u16, message: String },

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),
}

impl ExchangeError {
    /// Caller-input errors raised before any request is built.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::InvalidSymbol(_))
    }

    /// Network failures and non-2xx responses. These are never retried here.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpError(_) | Self::NetworkError(_) | Self::ApiError { .. }
        )
    }

    /// The response arrived but was not the JSON we expected.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::JsonError(_) | Self::DeserializationError(_))
    }
}

//! # Payment Error Types
//!
//! Typed error handling for the checkout flow.
//! All provider operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The payment provider answered with an error.
    ///
    /// `status` carries the provider's HTTP status when one was received.
    #[error("Provider error [{provider}]: {message}")]
    ProviderError {
        provider: String,
        status: Option<u16>,
        message: String,
    },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Page template failed to render
    #[error("Template error: {0}")]
    Template(String),
}

impl PaymentError {
    /// Returns the HTTP status code appropriate for this error.
    ///
    /// Provider errors pass the provider's own status through, so a declined
    /// card (402) reaches the caller as 402.
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::ProviderError { status, .. } => match status {
                Some(code) if (400..600).contains(code) => *code,
                _ => 500,
            },
            PaymentError::NetworkError(_) => 500,
            PaymentError::Serialization(_) => 500,
            PaymentError::Template(_) => 500,
        }
    }

    /// Message suitable for the `error` field of a JSON error body
    pub fn client_message(&self) -> String {
        match self {
            PaymentError::ProviderError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

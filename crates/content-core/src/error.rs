//! Error types for the content-share control layer

use thiserror::Error;

/// Result type for content-share operations
pub type Result<T> = std::result::Result<T, ContentShareError>;

/// Errors that can occur while driving a content-share session
#[derive(Debug, Error)]
pub enum ContentShareError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// TURN credential negotiation failed
    #[error("Credential negotiation failed: {message}")]
    CredentialNegotiation { message: String },

    /// HTTP error from the credential exchange
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A URL in the configuration or credential response was malformed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport error
    #[error("Transport error: {message}")]
    Transport { message: String },
}

impl ContentShareError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a credential negotiation error
    pub fn credential(message: impl Into<String>) -> Self {
        Self::CredentialNegotiation {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Failures constructing the shared HTTP client, before any request exists.
#[derive(Debug, ThisError)]
pub enum TransportError {
    #[error("HTTP Client Build Error: {message} {location}")]
    Build {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid Proxy '{proxy}': {message} {location}")]
    Proxy {
        proxy: String,
        message: String,
        location: ErrorLocation,
    },
}

impl TransportError {
    #[track_caller]
    pub fn build(message: impl Into<String>) -> Self {
        TransportError::Build {
            message: message.into(),
            location: ErrorLocation::capture(),
        }
    }

    #[track_caller]
    pub fn proxy(proxy: impl Into<String>, message: impl Into<String>) -> Self {
        TransportError::Proxy {
            proxy: proxy.into(),
            message: message.into(),
            location: ErrorLocation::capture(),
        }
    }
}

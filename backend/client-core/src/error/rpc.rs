use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum RpcError {
    /// A call was attempted before the session reached `Ready`. Raised
    /// before any request is constructed.
    #[error("Missing auth credentials (cookies, xsrf-token) {location}")]
    NotAuthenticated { location: ErrorLocation },

    #[error("RPC Transport Error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },

    #[error("RPC Protocol Error: {message} {location}")]
    Protocol {
        message: String,
        location: ErrorLocation,
    },
}

impl RpcError {
    #[track_caller]
    pub fn not_authenticated() -> Self {
        RpcError::NotAuthenticated {
            location: ErrorLocation::capture(),
        }
    }

    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        RpcError::Transport {
            message: message.into(),
            location: ErrorLocation::capture(),
        }
    }

    #[track_caller]
    pub fn protocol(message: impl Into<String>) -> Self {
        RpcError::Protocol {
            message: message.into(),
            location: ErrorLocation::capture(),
        }
    }
}

impl From<reqwest::Error> for RpcError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        RpcError::Transport {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

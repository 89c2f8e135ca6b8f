//! Error taxonomy for the session protocol.
//!
//! Any failure leaves the session in its last successfully-reached state;
//! callers wanting a clean slate reset explicitly.

use crate::error::rpc::RpcError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SessionError {
    /// The backend login endpoint rejected the identity token outright.
    #[error("Invalid identity token: backend answered HTTP {status} {location}")]
    InvalidToken {
        status: HttpStatusCode,
        location: ErrorLocation,
    },

    #[error("Session Transport Error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },

    /// A response arrived but violates the expected shape.
    #[error("Session Protocol Error: {message} {location}")]
    Protocol {
        message: String,
        location: ErrorLocation,
    },

    /// An operation was attempted in a state that does not admit it.
    #[error("Illegal session state: {reason} {location}")]
    IllegalState {
        reason: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Rpc(#[from] RpcError),
}

impl SessionError {
    #[track_caller]
    pub fn invalid_token(status: HttpStatusCode) -> Self {
        SessionError::InvalidToken {
            status,
            location: ErrorLocation::capture(),
        }
    }

    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        SessionError::Transport {
            message: message.into(),
            location: ErrorLocation::capture(),
        }
    }

    #[track_caller]
    pub fn protocol(message: impl Into<String>) -> Self {
        SessionError::Protocol {
            message: message.into(),
            location: ErrorLocation::capture(),
        }
    }

    #[track_caller]
    pub fn illegal_state(reason: impl Into<String>) -> Self {
        SessionError::IllegalState {
            reason: reason.into(),
            location: ErrorLocation::capture(),
        }
    }
}

impl From<reqwest::Error> for SessionError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        SessionError::Transport {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

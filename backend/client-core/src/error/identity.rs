//! Error taxonomy for the identity exchange.
//!
//! `InvalidCredentials` is raised before any network activity; the other
//! variants each correspond to one observable failure of the exchange
//! itself. Nothing is retried and nothing is downgraded here.

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum IdentityError {
    #[error("Auth failed: invalid login/password {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("Auth failed: provider rejected credentials {location}")]
    AuthFailed { location: ErrorLocation },

    #[error("Identity Transport Error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity Protocol Error: {message} {location}")]
    Protocol {
        message: String,
        location: ErrorLocation,
    },
}

impl IdentityError {
    #[track_caller]
    pub fn invalid_credentials() -> Self {
        IdentityError::InvalidCredentials {
            location: ErrorLocation::capture(),
        }
    }

    #[track_caller]
    pub fn auth_failed() -> Self {
        IdentityError::AuthFailed {
            location: ErrorLocation::capture(),
        }
    }

    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        IdentityError::Transport {
            message: message.into(),
            location: ErrorLocation::capture(),
        }
    }

    #[track_caller]
    pub fn protocol(message: impl Into<String>) -> Self {
        IdentityError::Protocol {
            message: message.into(),
            location: ErrorLocation::capture(),
        }
    }
}

impl From<reqwest::Error> for IdentityError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        IdentityError::Transport {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

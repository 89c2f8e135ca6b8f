use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("Environment Read Error: {path}: {source} {location}")]
    Read {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Environment Parse Error: {path}: {reason} {location}")]
    Parse {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Environment Error: no configuration for device '{device_id}' {location}")]
    UnknownDevice {
        location: ErrorLocation,
        device_id: String,
    },
}

impl EnvError {
    #[track_caller]
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EnvError::Read {
            location: ErrorLocation::capture(),
            path: path.into(),
            source,
        }
    }

    #[track_caller]
    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        EnvError::Parse {
            location: ErrorLocation::capture(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    #[track_caller]
    pub fn unknown_device(device_id: impl Into<String>) -> Self {
        EnvError::UnknownDevice {
            location: ErrorLocation::capture(),
            device_id: device_id.into(),
        }
    }
}

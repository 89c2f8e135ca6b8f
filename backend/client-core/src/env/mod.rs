//! Device environment source.
//!
//! Build-prop style parameters for the emulated handset, loaded once from a
//! JSON file keyed by device id. The identity client and session protocol
//! read these at call time; a missing key is `None`, never a default.

use crate::error::env::EnvError;

use std::collections::HashMap;
use std::path::Path;

use log::info;
use serde_json::Value;

pub const PARAM_PRODUCT_DEVICE: &str = "ro.product.device";
pub const PARAM_BUILD_ID: &str = "ro.build.id";
pub const PARAM_BUILD_VERSION_RELEASE: &str = "ro.build.version.release";
pub const PARAM_SDK_VERSION: &str = "ro.build.version.sdk";
pub const PARAM_LOCALE_LANGUAGE: &str = "ro.product.locale.language";
pub const PARAM_ANDROID_ID: &str = "device.androidId";
pub const PARAM_DEVICE_COUNTRY: &str = "device.country";
pub const PARAM_OPERATOR_COUNTRY: &str = "operator.country";
pub const PARAM_CLIENT_SIGN: &str = "client.sign";
pub const PARAM_GAME_APP: &str = "game.app";
pub const PARAM_GAME_SOFTWARE_VERSION: &str = "game.softwareVersion";

/// Read-only parameter set for one device profile.
#[derive(Debug, Clone)]
pub struct DeviceEnv {
    device_id: String,
    params: HashMap<String, Value>,
}

impl DeviceEnv {
    /// Load the parameter map for `device_id` from a JSON file of the shape
    /// `{ "<device_id>": { "<param>": <value>, ... }, ... }`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError`] if the file cannot be read or parsed, or if it
    /// has no section for `device_id`.
    pub fn load(config_path: &Path, device_id: &str) -> Result<Self, EnvError> {
        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| EnvError::read(config_path, e))?;

        let mut devices: HashMap<String, HashMap<String, Value>> =
            serde_json::from_str(&contents)
                .map_err(|e| EnvError::parse(config_path, e.to_string()))?;

        let params = devices
            .remove(device_id)
            .ok_or_else(|| EnvError::unknown_device(device_id))?;

        info!(
            "Loaded environment for device '{}' from {} ({} parameters)",
            device_id,
            config_path.display(),
            params.len()
        );

        Ok(Self {
            device_id: device_id.to_string(),
            params,
        })
    }

    /// Build directly from an in-memory parameter map.
    pub fn from_params(device_id: impl Into<String>, params: HashMap<String, Value>) -> Self {
        Self {
            device_id: device_id.into(),
            params,
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Look up a parameter by key. Numbers and booleans are rendered to
    /// their string form; structured values have no string rendering.
    pub fn param(&self, name: &str) -> Option<String> {
        match self.params.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Look up an integer parameter, accepting numeric strings.
    pub fn param_i64(&self, name: &str) -> Option<i64> {
        match self.params.get(name)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

// Unit tests for the device environment source

use crate::env::{self, DeviceEnv};
use crate::error::env::EnvError;

use std::collections::HashMap;
use std::io::Write;

use serde_json::json;
use tempfile::NamedTempFile;

fn write_env_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write env file");
    file
}

const DEVICE_FILE: &str = r#"{
    "nexus_one": {
        "ro.product.device": "passion",
        "ro.build.id": "GRI40",
        "ro.build.version.sdk": 10,
        "device.androidId": "androidid123"
    },
    "other": {
        "ro.product.device": "crespo"
    }
}"#;

#[test]
fn given_device_file_when_load_then_params_readable() {
    let file = write_env_file(DEVICE_FILE);

    let device = DeviceEnv::load(file.path(), "nexus_one").expect("load should succeed");

    assert_eq!(device.device_id(), "nexus_one");
    assert_eq!(
        device.param(env::PARAM_PRODUCT_DEVICE),
        Some("passion".to_string())
    );
    assert_eq!(device.param(env::PARAM_BUILD_ID), Some("GRI40".to_string()));
}

#[test]
fn given_missing_key_when_param_then_returns_none() {
    let file = write_env_file(DEVICE_FILE);
    let device = DeviceEnv::load(file.path(), "nexus_one").expect("load should succeed");

    assert_eq!(device.param("no.such.param"), None);
    assert_eq!(device.param_i64("no.such.param"), None);
}

#[test]
fn given_numeric_param_when_read_then_both_renderings_work() {
    let file = write_env_file(DEVICE_FILE);
    let device = DeviceEnv::load(file.path(), "nexus_one").expect("load should succeed");

    assert_eq!(device.param_i64(env::PARAM_SDK_VERSION), Some(10));
    assert_eq!(device.param(env::PARAM_SDK_VERSION), Some("10".to_string()));
}

#[test]
fn given_numeric_string_param_when_param_i64_then_parses() {
    let params: HashMap<String, serde_json::Value> =
        [(env::PARAM_SDK_VERSION.to_string(), json!("15"))].into();
    let device = DeviceEnv::from_params("inline", params);

    assert_eq!(device.param_i64(env::PARAM_SDK_VERSION), Some(15));
}

#[test]
fn given_unknown_device_when_load_then_fails() {
    let file = write_env_file(DEVICE_FILE);

    let result = DeviceEnv::load(file.path(), "no_such_device");

    assert!(matches!(result, Err(EnvError::UnknownDevice { .. })));
}

#[test]
fn given_invalid_json_when_load_then_parse_error() {
    let file = write_env_file("not json at all");

    let result = DeviceEnv::load(file.path(), "nexus_one");

    assert!(matches!(result, Err(EnvError::Parse { .. })));
}

#[test]
fn given_missing_file_when_load_then_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");

    let result = DeviceEnv::load(&dir.path().join("devices.json"), "nexus_one");

    assert!(matches!(result, Err(EnvError::Read { .. })));
}

//! Test helpers for the wire-level integration tests.
//!
//! Every test runs against a local wiremock server standing in for both
//! the identity provider and the game backend; the helpers here build a
//! device environment, point an [`ApiConfig`] at the mock, and mount the
//! canned login/handshake exchanges shared across tests.

use client_core::env::DeviceEnv;
use client_core::session::GameClient;
use client_core::transport::ApiConfig;

use std::collections::HashMap;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_IDENTITY_TOKEN: &str = "ident-token-123";
pub const TEST_XSRF_TOKEN: &str = "xsrf1";
pub const TEST_COOKIE: &str = "SACSID=session-1";

pub fn test_env() -> DeviceEnv {
    let params: HashMap<String, Value> = [
        ("ro.product.device", json!("passion")),
        ("ro.build.id", json!("GRI40")),
        ("ro.build.version.release", json!("2.3.5")),
        ("ro.build.version.sdk", json!(10)),
        ("ro.product.locale.language", json!("en")),
        ("device.androidId", json!("androidid123")),
        ("device.country", json!("us")),
        ("operator.country", json!("us")),
        ("client.sign", json!("client-sig-blob")),
        ("game.app", json!("com.example.game")),
        ("game.softwareVersion", json!("2014-12-11T00:00:00Z deadbeef")),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect();

    DeviceEnv::from_params("test_device", params)
}

/// Config with both upstreams pointed at the mock server.
pub fn mock_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        identity_base_url: server.uri(),
        game_base_url: server.uri(),
        accept_invalid_certs: false,
        ..ApiConfig::default()
    }
}

pub fn game_client(server: &MockServer) -> GameClient {
    GameClient::new(test_env(), &mock_config(server)).expect("client should build")
}

/// Mount the standard successful login GET: a redirect carrying one
/// session cookie.
pub async fn mount_login_endpoint(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/_ah/login"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", "http://localhost/")
                .insert_header("Set-Cookie", format!("{TEST_COOKIE}; Path=/; HttpOnly").as_str()),
        )
        .mount(server)
        .await;
}

/// Mount the standard successful handshake: junk-prefixed JSON carrying
/// the XSRF token.
pub async fn mount_handshake_endpoint(server: &MockServer) {
    let body = format!("//anti-ajax-junk\n{{\"result\":{{\"xsrfToken\":\"{TEST_XSRF_TOKEN}\"}}}}");
    Mock::given(method("POST"))
        .and(path("/handshake"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Build a client and drive it through the full login sequence.
pub async fn ready_client(server: &MockServer) -> GameClient {
    mount_login_endpoint(server).await;
    mount_handshake_endpoint(server).await;

    let mut client = game_client(server);
    client
        .login(TEST_IDENTITY_TOKEN)
        .await
        .expect("login should succeed");
    assert!(client.is_ready());
    client
}

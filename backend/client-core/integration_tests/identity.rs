//! Wire-level tests for the identity exchange.

use crate::helpers::{mock_config, test_env};

use client_core::error::IdentityError;
use client_core::identity::{Credential, IdentityClient};

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn identity_client(server: &MockServer) -> IdentityClient {
    IdentityClient::new(test_env(), &mock_config(server)).expect("client should build")
}

#[tokio::test]
async fn given_valid_credentials_when_authenticate_then_yields_token_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .and(header("User-Agent", "GoogleLoginService/1.3 (passion GRI40)"))
        .and(body_string_contains("accountType=HOSTED_OR_GOOGLE"))
        .and(body_string_contains("Email=user%40example.com"))
        .and(body_string_contains("androidId=androidid123"))
        .and(body_string_contains("sdk_version=10"))
        .respond_with(ResponseTemplate::new(200).set_body_string("SID=sid1\nLSID=lsid1\nAuth=tok123"))
        .expect(1)
        .mount(&server)
        .await;

    let client = identity_client(&server);
    let credential = Credential::new("user@example.com", "hunter2");

    let tokens = client
        .authenticate(&credential)
        .await
        .expect("authenticate should succeed");

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens.auth_token(), Some("tok123"));
    assert_eq!(tokens.get("SID"), Some("sid1"));
}

/// Blank credentials never reach the network.
#[tokio::test]
async fn given_blank_credentials_when_authenticate_then_fails_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = identity_client(&server);

    for (email, password) in [("", "pw"), ("user@example.com", ""), ("  ", "pw"), ("user@example.com", "   ")] {
        let result = client.authenticate(&Credential::new(email, password)).await;
        assert!(
            matches!(result, Err(IdentityError::InvalidCredentials { .. })),
            "({email:?}, {password:?}) should fail as invalid credentials"
        );
    }
}

/// A response without the primary token key is a rejection, whatever the
/// status code says.
#[tokio::test]
async fn given_response_without_auth_key_when_authenticate_then_auth_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Error=BadAuthentication"))
        .mount(&server)
        .await;

    let client = identity_client(&server);
    let result = client
        .authenticate(&Credential::new("user@example.com", "wrong"))
        .await;

    assert!(matches!(result, Err(IdentityError::AuthFailed { .. })));
}

#[tokio::test]
async fn given_malformed_token_line_when_authenticate_then_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Auth=tok123\nbroken line"))
        .mount(&server)
        .await;

    let client = identity_client(&server);
    let result = client
        .authenticate(&Credential::new("user@example.com", "hunter2"))
        .await;

    assert!(matches!(result, Err(IdentityError::Protocol { .. })));
}

#[tokio::test]
async fn given_unreachable_provider_when_authenticate_then_transport_error() {
    let server = MockServer::start().await;
    let config = mock_config(&server);
    drop(server);

    let client = IdentityClient::new(test_env(), &config).expect("client should build");
    let result = client
        .authenticate(&Credential::new("user@example.com", "hunter2"))
        .await;

    assert!(matches!(result, Err(IdentityError::Transport { .. })));
}

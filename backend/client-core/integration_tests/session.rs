//! Wire-level tests for the session protocol state machine.

use crate::helpers::{
    TEST_COOKIE, TEST_IDENTITY_TOKEN, TEST_XSRF_TOKEN, game_client, mount_handshake_endpoint,
    mount_login_endpoint, ready_client,
};

use client_core::error::{RpcError, SessionError};

use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_login_redirect_with_cookies_when_acquire_cookies_then_jar_built() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_ah/login"))
        .and(query_param("continue", "http://localhost/"))
        .and(query_param("auth", TEST_IDENTITY_TOKEN))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Set-Cookie", "A=1; Path=/")
                .append_header("Set-Cookie", "B=2; Path=/")
                .append_header("Set-Cookie", "A=1; Path=/"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut client = game_client(&server);
    client
        .acquire_cookies(TEST_IDENTITY_TOKEN)
        .await
        .expect("cookie acquisition should succeed");

    assert_eq!(client.session().cookie_jar(), Some("A=1; B=2"));
    assert!(!client.is_ready());
}

/// A 5xx from the login endpoint means the identity token was rejected.
#[tokio::test]
async fn given_server_error_when_acquire_cookies_then_invalid_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_ah/login"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut client = game_client(&server);
    let result = client.acquire_cookies(TEST_IDENTITY_TOKEN).await;

    assert!(matches!(result, Err(SessionError::InvalidToken { .. })));
    assert!(!client.is_ready());
    assert_eq!(client.session().cookie_jar(), None);
}

#[tokio::test]
async fn given_response_without_cookies_when_acquire_cookies_then_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_ah/login"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "http://localhost/"))
        .mount(&server)
        .await;

    let mut client = game_client(&server);
    let result = client.acquire_cookies(TEST_IDENTITY_TOKEN).await;

    assert!(matches!(result, Err(SessionError::Protocol { .. })));
    assert!(!client.is_ready());
}

#[tokio::test]
async fn given_junk_prefixed_handshake_when_performed_then_session_ready() {
    let server = MockServer::start().await;
    mount_login_endpoint(&server).await;
    Mock::given(method("POST"))
        .and(path("/handshake"))
        .and(header("Content-Type", "application/json;charset=UTF-8"))
        .and(header("Cookie", TEST_COOKIE))
        .and(body_string_contains("%22reason%22%3A%22LOGIN%22"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "//anti-ajax-junk\n{\"result\":{\"xsrfToken\":\"xsrf1\",\"serverVersion\":\"v1\"}}",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = game_client(&server);
    client
        .acquire_cookies(TEST_IDENTITY_TOKEN)
        .await
        .expect("cookie acquisition should succeed");
    client
        .perform_handshake()
        .await
        .expect("handshake should succeed");

    assert!(client.is_ready());
    assert_eq!(client.session().xsrf_token(), Some(TEST_XSRF_TOKEN));
    let handshake = client.session().handshake_result().expect("payload stored");
    assert_eq!(handshake["result"]["serverVersion"], "v1");
}

#[tokio::test]
async fn given_handshake_body_without_brace_when_performed_then_protocol_error() {
    let server = MockServer::start().await;
    mount_login_endpoint(&server).await;
    Mock::given(method("POST"))
        .and(path("/handshake"))
        .respond_with(ResponseTemplate::new(200).set_body_string("nothing json-like here"))
        .mount(&server)
        .await;

    let mut client = game_client(&server);
    client
        .acquire_cookies(TEST_IDENTITY_TOKEN)
        .await
        .expect("cookie acquisition should succeed");
    let result = client.perform_handshake().await;

    assert!(matches!(
        result,
        Err(SessionError::Rpc(RpcError::Protocol { .. }))
    ));
    // The failed step leaves the previous state intact.
    assert!(!client.is_ready());
    assert_eq!(client.session().cookie_jar(), Some(TEST_COOKIE));
}

#[tokio::test]
async fn given_handshake_without_xsrf_key_when_performed_then_protocol_error() {
    let server = MockServer::start().await;
    mount_login_endpoint(&server).await;
    Mock::given(method("POST"))
        .and(path("/handshake"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"result\":{}}"))
        .mount(&server)
        .await;

    let mut client = game_client(&server);
    client
        .acquire_cookies(TEST_IDENTITY_TOKEN)
        .await
        .expect("cookie acquisition should succeed");
    let result = client.perform_handshake().await;

    assert!(matches!(result, Err(SessionError::Protocol { .. })));
    assert!(!client.is_ready());
}

/// Repeating the handshake without a reset is rejected before any network
/// activity; a reset arms it again.
#[tokio::test]
async fn given_ready_session_when_handshake_repeated_then_illegal_state_until_reset() {
    let server = MockServer::start().await;
    let mut client = ready_client(&server).await;

    let result = client.perform_handshake().await;
    assert!(matches!(result, Err(SessionError::IllegalState { .. })));
    assert!(client.is_ready());

    client.reset();
    assert!(!client.is_ready());
    client
        .perform_handshake()
        .await
        .expect("handshake after reset should succeed");
}

#[tokio::test]
async fn given_full_login_sequence_when_login_then_ready() {
    let server = MockServer::start().await;
    let client = ready_client(&server).await;

    assert!(client.is_ready());
    assert_eq!(client.session().cookie_jar(), Some(TEST_COOKIE));
    assert_eq!(client.session().xsrf_token(), Some(TEST_XSRF_TOKEN));
}

#[tokio::test]
async fn given_ready_session_when_logout_then_cleared() {
    let server = MockServer::start().await;
    let mut client = ready_client(&server).await;

    client.logout();

    assert!(!client.is_ready());
    assert_eq!(client.session().cookie_jar(), None);
    assert_eq!(client.session().xsrf_token(), None);
}

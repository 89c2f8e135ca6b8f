//! Wire-level tests for the RPC channel and the game wrappers.

use crate::helpers::{TEST_COOKIE, TEST_XSRF_TOKEN, game_client, ready_client};

use client_core::error::RpcError;

use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A call on a session that never authenticated fails before any request
/// is constructed.
#[tokio::test]
async fn given_unauthenticated_session_when_call_then_fails_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = game_client(&server);
    let result = client.send_player("getGameScore", &json!([]), true).await;

    assert!(matches!(result, Err(RpcError::NotAuthenticated { .. })));
}

#[tokio::test]
async fn given_ready_session_when_send_player_then_framed_and_decoded() {
    let server = MockServer::start().await;
    let client = ready_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/rpc/playerUndecorated/getGameScore"))
        .and(header("Cookie", TEST_COOKIE))
        .and(header("X-XsrfToken", TEST_XSRF_TOKEN))
        .and(header("Content-Encoding", "gzip"))
        .and(header("User-Agent", "Nemesis (gzip)"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "result": { "enlightened": 1, "resistance": 2 } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let decoded = client.get_game_score().await.expect("call should succeed");

    assert_eq!(decoded["result"]["enlightened"], 1);
}

/// Uncompressed calls send the framed JSON as plain text.
#[tokio::test]
async fn given_gzip_disabled_when_send_rpc_then_plain_json_body() {
    let server = MockServer::start().await;
    let client = ready_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/rpc/gameplay/getInventory"))
        .and(body_string(r#"{"params":{"lastQueryTimestamp":0}}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let decoded = client
        .send_gameplay("getInventory", &json!({ "lastQueryTimestamp": 0 }), false)
        .await
        .expect("call should succeed");

    assert_eq!(decoded["result"], json!([]));
}

#[tokio::test]
async fn given_gzip_enabled_when_send_rpc_then_body_decompresses_to_frame() {
    let server = MockServer::start().await;
    let client = ready_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/rpc/playerUndecorated/putBulkPlayerStorage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .put_bulk_player_storage(&json!({ "slot": "a" }))
        .await
        .expect("call should succeed");

    let requests = server.received_requests().await.expect("requests recorded");
    let request = requests
        .iter()
        .find(|r| r.url.path().ends_with("putBulkPlayerStorage"))
        .expect("storage request recorded");

    let mut decoder = flate2::read::GzDecoder::new(request.body.as_slice());
    let mut body = String::new();
    std::io::Read::read_to_string(&mut decoder, &mut body).expect("gunzip should succeed");
    assert_eq!(body, r#"{"params":{"slot":"a"}}"#);
}

#[tokio::test]
async fn given_error_status_when_send_rpc_then_transport_error_with_diagnostic() {
    let server = MockServer::start().await;
    let client = ready_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/rpc/playerUndecorated/getNewsOfTheDay"))
        .respond_with(ResponseTemplate::new(503).set_body_string("over capacity"))
        .mount(&server)
        .await;

    let result = client.get_news_of_the_day().await;

    match result {
        Err(RpcError::Transport { message, .. }) => {
            assert!(message.contains("503"));
            assert!(message.contains("over capacity"));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_non_json_response_when_send_rpc_then_protocol_error() {
    let server = MockServer::start().await;
    let client = ready_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/rpc/playerUndecorated/getInviteInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = client.get_invite_info().await;

    assert!(matches!(result, Err(RpcError::Protocol { .. })));
}

// Unit tests for RPC body framing and response unwrapping

use crate::rpc::CallMode;
use crate::rpc::framing::{PARAMS_KEY, encode_body, extract_json_body, gzip_compress};

use std::io::Read;

use serde_json::{Value, json};

/// **VALUE**: Round-trip property for normal-mode framing: encoding
/// `{"params": P}` and decoding yields `P` back at the params key.
///
/// **WHY THIS MATTERS**: Every authenticated call goes through this wrap;
/// a framing change silently corrupts every request body at once.
#[test]
fn given_params_value_when_encode_body_normal_then_round_trips_under_params_key() {
    let params = json!({
        "knobSyncTimestamp": 0,
        "flags": ["a", "b"],
        "nested": { "x": 1.5, "y": null },
    });

    let encoded = encode_body(&params, CallMode::Normal);
    let decoded: Value = serde_json::from_str(&encoded).expect("body should be valid JSON");

    assert_eq!(decoded[PARAMS_KEY], params);
}

#[test]
fn given_empty_array_params_when_encode_body_normal_then_wraps_verbatim() {
    assert_eq!(encode_body(&json!([]), CallMode::Normal), r#"{"params":[]}"#);
}

/// **VALUE**: Handshake-mode bodies are the bare JSON percent-encoded as a
/// form value, not the `{"params": …}` wrap.
///
/// **WHY THIS MATTERS**: This asymmetry is a backend requirement; framing
/// the handshake like a normal call fails the whole login sequence.
#[test]
fn given_params_value_when_encode_body_handshake_then_percent_encodes_bare_json() {
    let params = json!({ "reason": "LOGIN" });

    let encoded = encode_body(&params, CallMode::Handshake);

    assert_eq!(encoded, "%7B%22reason%22%3A%22LOGIN%22%7D");
}

#[test]
fn given_value_with_spaces_when_encode_body_handshake_then_spaces_become_plus() {
    let encoded = encode_body(&json!("a b"), CallMode::Handshake);

    assert_eq!(encoded, "%22a+b%22");
}

#[test]
fn given_junk_prefixed_body_when_extract_json_body_then_strips_to_first_brace() {
    let raw = "//anti-ajax-junk\n{\"result\":{\"xsrfToken\":\"xsrf1\"}}";

    assert_eq!(
        extract_json_body(raw),
        Some("{\"result\":{\"xsrfToken\":\"xsrf1\"}}")
    );
}

#[test]
fn given_clean_json_body_when_extract_json_body_then_returns_it_unchanged() {
    assert_eq!(extract_json_body("{\"a\":1}"), Some("{\"a\":1}"));
}

#[test]
fn given_body_without_brace_when_extract_json_body_then_returns_none() {
    assert_eq!(extract_json_body("no json here at all"), None);
}

/// Compressed bodies must decompress back to the exact framed text.
#[test]
fn given_body_text_when_gzip_compress_then_decompresses_to_original() {
    let body = encode_body(&json!({ "big": "x".repeat(4096) }), CallMode::Normal);

    let compressed = gzip_compress(body.as_bytes()).expect("gzip should succeed");
    assert!(compressed.len() < body.len());

    let mut decoder = flate2::read::GzDecoder::new(compressed.as_slice());
    let mut decompressed = String::new();
    decoder
        .read_to_string(&mut decompressed)
        .expect("gunzip should succeed");

    assert_eq!(decompressed, body);
}

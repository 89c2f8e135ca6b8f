// Unit tests for the session state machine

use crate::session::Session;

use serde_json::{Map, Value, json};

fn handshake_payload() -> Map<String, Value> {
    let Value::Object(map) = json!({ "result": { "xsrfToken": "xsrf1" } }) else {
        unreachable!()
    };
    map
}

#[test]
fn given_new_session_when_queried_then_empty_and_not_ready() {
    let session = Session::new();

    assert!(!session.is_ready());
    assert_eq!(session.cookie_jar(), None);
    assert_eq!(session.xsrf_token(), None);
    assert!(session.handshake_result().is_none());
}

#[test]
fn given_cookie_jar_set_when_queried_then_cookies_present_but_not_ready() {
    let mut session = Session::new();

    session.set_cookie_jar("A=1; B=2".to_string());

    assert_eq!(session.cookie_jar(), Some("A=1; B=2"));
    assert!(!session.is_ready());
    assert_eq!(session.xsrf_token(), None);
}

/// **VALUE**: The Ready transition stores token and payload in one step;
/// afterwards all three pieces are observable together.
///
/// **WHY THIS MATTERS**: A session that exposes a token without its
/// handshake payload (or vice versa) was partially mutated mid-step,
/// which the protocol forbids.
#[test]
fn given_cookies_then_handshake_when_completed_then_session_ready() {
    let mut session = Session::new();
    session.set_cookie_jar("A=1".to_string());

    session.complete_handshake("xsrf1".to_string(), handshake_payload());

    assert!(session.is_ready());
    assert_eq!(session.cookie_jar(), Some("A=1"));
    assert_eq!(session.xsrf_token(), Some("xsrf1"));
    assert!(session.handshake_result().is_some());
}

/// A handshake without prior cookie acquisition completes but never
/// satisfies the readiness predicate.
#[test]
fn given_no_cookies_when_handshake_completed_then_still_not_ready() {
    let mut session = Session::new();

    session.complete_handshake("xsrf1".to_string(), handshake_payload());

    assert!(!session.is_ready());
    assert_eq!(session.cookie_jar(), None);
    assert_eq!(session.xsrf_token(), Some("xsrf1"));
}

#[test]
fn given_ready_session_when_reset_then_everything_cleared() {
    let mut session = Session::new();
    session.set_cookie_jar("A=1".to_string());
    session.complete_handshake("xsrf1".to_string(), handshake_payload());

    session.reset();

    assert!(!session.is_ready());
    assert_eq!(session.cookie_jar(), None);
    assert_eq!(session.xsrf_token(), None);

    // Idempotent
    session.reset();
    assert!(!session.is_ready());
}

/// A fresh cookie jar discards any previous handshake state: new cookies
/// always demand a new handshake.
#[test]
fn given_ready_session_when_cookies_reinstalled_then_handshake_state_dropped() {
    let mut session = Session::new();
    session.set_cookie_jar("A=1".to_string());
    session.complete_handshake("xsrf1".to_string(), handshake_payload());

    session.set_cookie_jar("C=3".to_string());

    assert!(!session.is_ready());
    assert_eq!(session.cookie_jar(), Some("C=3"));
    assert_eq!(session.xsrf_token(), None);
}

// Unit tests for the identity token-line parser

use crate::error::identity::IdentityError;
use crate::identity::tokens::parse_token_lines;

/// **VALUE**: Verifies the documented happy path: a newline-delimited
/// `Name=Value` body becomes a token set with both entries reachable.
///
/// **WHY THIS MATTERS**: The session protocol blindly consumes the `Auth`
/// entry of this set; a parser regression here breaks every login.
///
/// **BUG THIS CATCHES**: Split-on-wrong-character or missing trim would
/// corrupt token names/values and make the backend reject the token.
#[test]
fn given_identity_response_when_parse_token_lines_then_yields_named_tokens() {
    let tokens = parse_token_lines("Auth=tok123\nSID=abc\n").expect("parse should succeed");

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens.get("Auth"), Some("tok123"));
    assert_eq!(tokens.get("SID"), Some("abc"));
    assert_eq!(tokens.auth_token(), Some("tok123"));
}

/// **VALUE**: Verifies a line with no `=` fails the whole parse.
///
/// **WHY THIS MATTERS**: Guessing at partial parses would hand the session
/// protocol a half-usable token set and move the failure somewhere
/// unrelated and much harder to diagnose.
#[test]
fn given_line_without_separator_when_parse_token_lines_then_fails_protocol() {
    let result = parse_token_lines("Auth=tok123\ngarbage-line\nSID=abc");

    assert!(matches!(result, Err(IdentityError::Protocol { .. })));
}

#[test]
fn given_value_containing_equals_when_parse_token_lines_then_splits_on_first_only() {
    let tokens = parse_token_lines("Auth=abc=def==\n").expect("parse should succeed");

    assert_eq!(tokens.get("Auth"), Some("abc=def=="));
}

#[test]
fn given_padded_lines_when_parse_token_lines_then_trims_names_and_values() {
    let tokens = parse_token_lines(" Auth = tok123 \r\nSID=abc\r\n").expect("parse should succeed");

    assert_eq!(tokens.get("Auth"), Some("tok123"));
    assert_eq!(tokens.get("SID"), Some("abc"));
}

#[test]
fn given_repeated_name_when_parse_token_lines_then_last_value_wins() {
    let tokens = parse_token_lines("Auth=first\nAuth=second").expect("parse should succeed");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens.auth_token(), Some("second"));
}

#[test]
fn given_unknown_name_when_get_then_returns_none() {
    let tokens = parse_token_lines("Auth=tok123").expect("parse should succeed");

    assert_eq!(tokens.get("LSID"), None);
    assert!(!tokens.is_empty());
}

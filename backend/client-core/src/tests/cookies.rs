// Unit tests for the raw-text cookie scraping helpers

use crate::session::cookies::{extract_cookies, isolate_header_block, to_cookie_jar};

/// **VALUE**: Verifies dedup-by-value with first-occurrence order over a
/// header block carrying a repeated cookie.
///
/// **WHY THIS MATTERS**: The jar string is sent verbatim on every
/// authenticated call; duplicated or reordered cookies are exactly the
/// kind of wire difference a backend silently rejects.
///
/// **BUG THIS CATCHES**: A set-based dedup losing order, or a dedup keyed
/// on cookie name instead of the full pair.
#[test]
fn given_duplicate_cookies_when_extract_cookies_then_dedups_preserving_order() {
    let header_block = "Set-Cookie: A=1; Set-Cookie: B=2; Set-Cookie: A=1;";

    let cookies = extract_cookies(header_block);

    assert_eq!(cookies, vec!["A=1".to_string(), "B=2".to_string()]);
    assert_eq!(to_cookie_jar(&cookies), "A=1; B=2");
}

#[test]
fn given_cookie_with_attributes_when_extract_cookies_then_takes_pair_only() {
    let header_block =
        "set-cookie: SACSID=AJKiYcE; expires=Mon, 01-Jan-2030 00:00:00 GMT; path=/; HttpOnly";

    assert_eq!(extract_cookies(header_block), vec!["SACSID=AJKiYcE".to_string()]);
}

#[test]
fn given_no_set_cookie_lines_when_extract_cookies_then_returns_empty() {
    let header_block = "HTTP/1.1 302 Found\r\nLocation: http://localhost/\r\nContent-Length: 0";

    assert!(extract_cookies(header_block).is_empty());
}

/// A bare pair with no terminating `;` is not taken; the scrape requires
/// attributes to follow, matching the wire format the backend emits.
#[test]
fn given_unterminated_cookie_when_extract_cookies_then_ignores_it() {
    assert!(extract_cookies("Set-Cookie: A=1").is_empty());
}

/// **VALUE**: Verifies the header block is the next-to-last
/// `\r\n\r\n`-delimited segment of the raw response text.
///
/// **WHY THIS MATTERS**: Cookies live in the headers, not the body; taking
/// the wrong segment would scrape body text or miss the cookies entirely.
#[test]
fn given_raw_response_when_isolate_header_block_then_returns_next_to_last_segment() {
    let raw = "HTTP/1.1 302 Found\r\nSet-Cookie: A=1; path=/\r\n\r\n<html>redirect</html>";

    assert_eq!(
        isolate_header_block(raw),
        Some("HTTP/1.1 302 Found\r\nSet-Cookie: A=1; path=/")
    );
}

#[test]
fn given_chained_responses_when_isolate_header_block_then_takes_final_headers() {
    let raw = "HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 302 Found\r\nSet-Cookie: B=2; path=/\r\n\r\nbody";

    let block = isolate_header_block(raw).expect("block should exist");

    assert!(block.contains("B=2"));
    assert!(!block.contains("100 Continue"));
}

#[test]
fn given_text_without_delimiter_when_isolate_header_block_then_returns_none() {
    assert_eq!(isolate_header_block("no delimiter here"), None);
}

#[test]
fn given_empty_body_when_isolate_header_block_then_headers_still_found() {
    let raw = "HTTP/1.1 200 OK\r\nSet-Cookie: C=3; path=/\r\n\r\n";

    assert_eq!(
        isolate_header_block(raw),
        Some("HTTP/1.1 200 OK\r\nSet-Cookie: C=3; path=/")
    );
}

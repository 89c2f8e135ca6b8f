//! Raw-text cookie scraping for the backend login response.
//!
//! The login endpoint is specified against raw response text, so the
//! scraping stays in pure functions over strings and the caller rebuilds
//! the raw text from whatever its HTTP layer hands it.

use std::sync::OnceLock;

use regex::Regex;

// A cookie is only taken when terminated by ';', i.e. when attributes
// follow the pair. The backend always sends at least a path attribute.
const SET_COOKIE_PATTERN: &str = r"(?i)Set-Cookie:\s*([^;\r\n]+);";

static SET_COOKIE_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn get_set_cookie_regex() -> &'static Regex {
    SET_COOKIE_REGEX.get_or_init(|| Regex::new(SET_COOKIE_PATTERN).expect("valid regex pattern"))
}

/// Isolate the header block of a raw HTTP response: the next-to-last
/// `\r\n\r\n`-delimited segment. The last segment is the body; anything
/// earlier belongs to intermediate responses.
pub(crate) fn isolate_header_block(raw_response: &str) -> Option<&str> {
    let segments: Vec<&str> = raw_response.split("\r\n\r\n").collect();
    match segments.len() {
        0 | 1 => None,
        n => Some(segments[n - 2]),
    }
}

/// Extract every `Set-Cookie: value;` occurrence from a header block,
/// deduplicated by value with first-occurrence order preserved.
pub(crate) fn extract_cookies(header_text: &str) -> Vec<String> {
    let mut cookies: Vec<String> = Vec::new();
    for caps in get_set_cookie_regex().captures_iter(header_text) {
        let value = caps[1].trim().to_string();
        if !cookies.contains(&value) {
            cookies.push(value);
        }
    }
    cookies
}

/// Join scraped cookies into the `Cookie` request header value.
pub(crate) fn to_cookie_jar(cookies: &[String]) -> String {
    cookies.join("; ")
}

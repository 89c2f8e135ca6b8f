//! Pure body framing and unwrapping helpers.
//!
//! Kept free of I/O so the quirky parts (the percent-encoded handshake
//! body, the anti-scraping prefix) can be tested in isolation.

use crate::rpc::CallMode;

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use serde_json::{Value, json};
use url::form_urlencoded;

/// Key wrapping every normal-mode parameter value.
pub(crate) const PARAMS_KEY: &str = "params";

/// Encode the outbound body for the given mode.
///
/// Normal calls wrap the value as `{"params": …}`. The handshake endpoint
/// instead takes the bare value JSON-encoded and then percent-encoded the
/// way a form value is; the two framings are not interchangeable.
pub(crate) fn encode_body(params: &Value, mode: CallMode) -> String {
    match mode {
        CallMode::Normal => json!({ PARAMS_KEY: params }).to_string(),
        CallMode::Handshake => {
            form_urlencoded::byte_serialize(params.to_string().as_bytes()).collect()
        }
    }
}

/// Gzip-compress an outbound body.
pub(crate) fn gzip_compress(body: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body)?;
    encoder.finish()
}

/// Strip the anti-scraping junk prefixed to handshake responses: keep
/// everything from the first `{` on. `None` when no `{` exists at all.
pub(crate) fn extract_json_body(raw: &str) -> Option<&str> {
    raw.find('{').map(|start| &raw[start..])
}

//! RPC channel: frame, send and decode one remote call.
//!
//! Every call is a fresh, independent exchange; retries and caching are a
//! caller concern. The handshake runs through the same channel in a
//! bootstrap mode with its own body framing and header set.

pub mod framing;

use crate::error::rpc::RpcError;
use crate::error::transport::TransportError;
use crate::session::Session;
use crate::transport::{self, ApiConfig};

use log::trace;
use reqwest::Client;
use reqwest::header;
use serde_json::Value;

pub const GAME_USER_AGENT: &str = "Nemesis (gzip)";
pub const GAMEPLAY_RPC_PREFIX: &str = "/rpc/gameplay/";
pub const PLAYER_RPC_PREFIX: &str = "/rpc/playerUndecorated/";

const CONTENT_TYPE_JSON: &str = "application/json;charset=UTF-8";
const XSRF_TOKEN_HEADER: &str = "X-XsrfToken";

/// How a call frames its body and headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallMode {
    /// `{"params": …}` JSON body, XSRF header attached; requires a ready
    /// session.
    Normal,
    /// Percent-encoded body, no XSRF header, anti-scraping prefix stripped
    /// from the response. Session bootstrap only.
    Handshake,
}

pub struct RpcChannel {
    base_url: String,
    client: Client,
}

impl RpcChannel {
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        Ok(Self {
            base_url: config.game_base_url.trim_end_matches('/').to_string(),
            client: transport::build_http_client(config)?,
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Frame, send and decode one call against `path`.
    ///
    /// # Errors
    ///
    /// - [`RpcError::NotAuthenticated`] when a normal-mode call is
    ///   attempted before the session is ready; nothing is sent
    /// - [`RpcError::Transport`] for non-2xx statuses, connection errors
    ///   and timeouts
    /// - [`RpcError::Protocol`] when the response body cannot be decoded
    pub async fn call(
        &self,
        session: &Session,
        path: &str,
        params: &Value,
        use_gzip: bool,
        mode: CallMode,
    ) -> Result<Value, RpcError> {
        if mode == CallMode::Normal && !session.is_ready() {
            return Err(RpcError::not_authenticated());
        }

        let body_text = framing::encode_body(params, mode);
        let body = if use_gzip {
            framing::gzip_compress(body_text.as_bytes())
                .map_err(|e| RpcError::transport(format!("failed to gzip request body: {e}")))?
        } else {
            body_text.into_bytes()
        };

        let mut request = self
            .client
            .post(format!("{}{path}", self.base_url))
            .header(header::USER_AGENT, GAME_USER_AGENT)
            .header(header::CONTENT_TYPE, CONTENT_TYPE_JSON);

        if use_gzip {
            request = request.header(header::CONTENT_ENCODING, "gzip");
        }
        if let Some(jar) = session.cookie_jar() {
            request = request.header(header::COOKIE, jar);
        }
        if mode == CallMode::Normal
            && let Some(token) = session.xsrf_token()
        {
            request = request.header(XSRF_TOKEN_HEADER, token);
        }

        trace!(
            "POST {}{path} ({} byte body, gzip: {use_gzip})",
            self.base_url,
            body.len()
        );

        let response = request.body(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(RpcError::transport(format!(
                "HTTP {} - {text}",
                status.as_u16()
            )));
        }

        match mode {
            CallMode::Normal => serde_json::from_str(&text)
                .map_err(|e| RpcError::protocol(format!("response is not valid JSON: {e}"))),
            CallMode::Handshake => {
                let json_text = framing::extract_json_body(&text)
                    .ok_or_else(|| RpcError::protocol("handshake response has no JSON body"))?;
                serde_json::from_str(json_text).map_err(|e| {
                    RpcError::protocol(format!("handshake response is not valid JSON: {e}"))
                })
            }
        }
    }
}

//! Backend session protocol.
//!
//! Drives the two handshake steps that turn an identity token into a ready
//! session: cookie acquisition against the login endpoint, then the
//! XSRF-establishing handshake through the RPC channel in bootstrap mode.
//! `Empty → CookiesAcquired → Ready`, with reset the only way back.

pub mod cookies;
pub mod state;

pub use state::{Session, SessionState};

use crate::env::{self, DeviceEnv};
use crate::error::session::SessionError;
use crate::error::transport::TransportError;
use crate::rpc::{CallMode, RpcChannel};
use crate::transport::ApiConfig;

use common::HttpStatusCode;

use log::{debug, info};
use reqwest::header::{self, HeaderMap};
use reqwest::{StatusCode, Version};
use serde_json::{Value, json};

const LOGIN_ENDPOINT: &str = "/_ah/login";
const LOGIN_CONTINUE_URL: &str = "http://localhost/";
const HANDSHAKE_ENDPOINT: &str = "/handshake";
const HANDSHAKE_REASON: &str = "LOGIN";

// The login endpoint sees the stock handset browser, not the game client.
const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; U; Android 2.3.5; en-us; HTC Vision Build/GRI40) AppleWebKit/533.1 (KHTML, like Gecko) Version/4.0 Mobile Safari/533.1";

const HANDSHAKE_RESULT_KEY: &str = "result";
const XSRF_TOKEN_KEY: &str = "xsrfToken";

/// One logical connection to the game backend: the session protocol plus
/// the RPC channel it bootstraps. Not designed for concurrent sharing;
/// hold one `GameClient` per account.
pub struct GameClient {
    env: DeviceEnv,
    channel: RpcChannel,
    session: Session,
}

impl GameClient {
    pub fn new(env: DeviceEnv, config: &ApiConfig) -> Result<Self, TransportError> {
        Ok(Self {
            env,
            channel: RpcChannel::new(config)?,
            session: Session::new(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn channel(&self) -> &RpcChannel {
        &self.channel
    }

    /// True iff the session can carry authenticated RPC calls.
    pub fn is_ready(&self) -> bool {
        self.session.is_ready()
    }

    /// Clear all session state unconditionally. Idempotent.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Alias for [`reset`](Self::reset); always succeeds.
    pub fn logout(&mut self) {
        self.reset();
    }

    /// Full login sequence: reset, cookie acquisition, handshake, in that
    /// strict order. A failing step aborts and leaves the session in the
    /// last successfully-reached state.
    pub async fn login(&mut self, identity_token: &str) -> Result<(), SessionError> {
        self.session.reset();
        self.acquire_cookies(identity_token).await?;
        self.perform_handshake().await?;
        Ok(())
    }

    /// Trade the identity token for session cookies: `Empty → CookiesAcquired`.
    ///
    /// # Errors
    ///
    /// - [`SessionError::InvalidToken`] when the backend answers 5xx
    /// - [`SessionError::Transport`] for any other transport failure
    /// - [`SessionError::Protocol`] when the response carries no cookies
    pub async fn acquire_cookies(&mut self, identity_token: &str) -> Result<(), SessionError> {
        debug!("Acquiring session cookies from {}", self.channel.base_url());

        let response = self
            .channel
            .http()
            .get(format!("{}{LOGIN_ENDPOINT}", self.channel.base_url()))
            .query(&[("continue", LOGIN_CONTINUE_URL), ("auth", identity_token)])
            .header(header::USER_AGENT, MOBILE_USER_AGENT)
            .send()
            .await?;

        let status = HttpStatusCode(response.status().as_u16());
        if status.is_server_error() {
            return Err(SessionError::invalid_token(status));
        }

        let version = response.version();
        let status_code = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        let raw = rebuild_raw_response(version, status_code, &headers, &body);
        let header_block = cookies::isolate_header_block(&raw).unwrap_or("");
        let scraped = cookies::extract_cookies(header_block);
        if scraped.is_empty() {
            return Err(SessionError::protocol("no cookies in response"));
        }

        info!("Acquired {} session cookie(s)", scraped.len());
        self.session.set_cookie_jar(cookies::to_cookie_jar(&scraped));
        Ok(())
    }

    /// Establish the anti-forgery token: `CookiesAcquired → Ready`.
    ///
    /// The token and the full decoded payload are stored together, so a
    /// partially-populated session is never observable.
    ///
    /// # Errors
    ///
    /// - [`SessionError::IllegalState`] when the handshake already ran
    ///   without an intervening reset; a stale session must be reset, not
    ///   silently reused
    /// - [`SessionError::Protocol`] when `result.xsrfToken` is absent
    /// - [`SessionError::Rpc`] for channel-level failures
    pub async fn perform_handshake(&mut self) -> Result<(), SessionError> {
        if self.session.handshake_done() {
            return Err(SessionError::illegal_state(
                "handshake already performed; reset the session first",
            ));
        }

        let params = json!({
            "nemesisSoftwareVersion": self
                .env
                .param(env::PARAM_GAME_SOFTWARE_VERSION)
                .unwrap_or_default(),
            "clientSignature": self.env.param(env::PARAM_CLIENT_SIGN).unwrap_or_default(),
            "deviceSoftwareVersion": self
                .env
                .param(env::PARAM_BUILD_VERSION_RELEASE)
                .unwrap_or_default(),
            "reason": HANDSHAKE_REASON,
        });

        debug!("Performing handshake against {}", self.channel.base_url());
        let decoded = self
            .channel
            .call(
                &self.session,
                HANDSHAKE_ENDPOINT,
                &params,
                false,
                CallMode::Handshake,
            )
            .await?;

        let Value::Object(handshake) = decoded else {
            return Err(SessionError::protocol(
                "handshake response is not a JSON object",
            ));
        };

        let xsrf_token = handshake
            .get(HANDSHAKE_RESULT_KEY)
            .and_then(|result| result.get(XSRF_TOKEN_KEY))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                SessionError::protocol(format!(
                    "handshake response missing {HANDSHAKE_RESULT_KEY}.{XSRF_TOKEN_KEY}"
                ))
            })?
            .to_string();

        self.session.complete_handshake(xsrf_token, handshake);
        info!("Handshake complete; session ready");
        Ok(())
    }
}

/// Rebuild the raw response text the cookie scraper is defined over. The
/// HTTP layer hands headers and body to us already separated; the scraper
/// wants one `\r\n\r\n`-delimited string.
fn rebuild_raw_response(
    version: Version,
    status: StatusCode,
    headers: &HeaderMap,
    body: &str,
) -> String {
    let mut raw = format!("{version:?} {status}\r\n");
    for (name, value) in headers {
        raw.push_str(name.as_str());
        raw.push_str(": ");
        raw.push_str(&String::from_utf8_lossy(value.as_bytes()));
        raw.push_str("\r\n");
    }
    raw.push_str("\r\n");
    raw.push_str(body);
    raw
}

//! Shared HTTP transport plumbing.
//!
//! Both upstream clients are built from the same [`ApiConfig`]: two
//! independent timeouts, an optional upstream HTTP proxy shared verbatim,
//! and the TLS peer-verification opt-out the game backend traffic runs
//! with. Redirects are never followed; the session protocol reads cookies
//! off the redirect response itself.

use crate::error::transport::TransportError;
use crate::{GAME_API_BASE_URL, IDENTITY_BASE_URL};

use std::time::Duration;

use reqwest::redirect;
use reqwest::{Client, Proxy};

pub const CONNECTION_TIMEOUT: Duration = Duration::from_secs(60);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Immutable construction-time configuration for the identity client and
/// the RPC channel.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub identity_base_url: String,
    pub game_base_url: String,
    /// Connection-establishment timeout.
    pub connect_timeout: Duration,
    /// Total-request timeout; the only cancellation primitives are these
    /// two durations.
    pub request_timeout: Duration,
    /// Upstream HTTP proxy such as `http://192.168.0.1:8080`; `None` means
    /// a direct connection.
    pub proxy: Option<String>,
    pub accept_invalid_certs: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            identity_base_url: IDENTITY_BASE_URL.to_string(),
            game_base_url: GAME_API_BASE_URL.to_string(),
            connect_timeout: CONNECTION_TIMEOUT,
            request_timeout: REQUEST_TIMEOUT,
            proxy: None,
            accept_invalid_certs: true,
        }
    }
}

impl ApiConfig {
    /// Default configuration routed through an upstream proxy.
    pub fn with_proxy(proxy_url: impl Into<String>) -> Self {
        Self {
            proxy: Some(proxy_url.into()),
            ..Self::default()
        }
    }
}

pub(crate) fn build_http_client(config: &ApiConfig) -> Result<Client, TransportError> {
    let mut builder = Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .redirect(redirect::Policy::none())
        .danger_accept_invalid_certs(config.accept_invalid_certs);

    if let Some(proxy_url) = &config.proxy {
        let proxy =
            Proxy::all(proxy_url).map_err(|e| TransportError::proxy(proxy_url, e.to_string()))?;
        builder = builder.proxy(proxy);
    }

    builder.build().map_err(|e| TransportError::build(e.to_string()))
}

//! Identity provider exchange.
//!
//! One POST converts (email, password) into a set of named opaque tokens.
//! The provider is picky about framing: the user-agent interpolates two
//! device parameters, and no `Accept` header may be sent at all. Success
//! is judged by the presence of the primary token key in the body, not by
//! the HTTP status.

pub mod tokens;

pub use tokens::{AUTH_TOKEN_KEY, IdentityTokenSet};

use crate::env::{self, DeviceEnv};
use crate::error::identity::IdentityError;
use crate::error::transport::TransportError;
use crate::transport::{self, ApiConfig};

use common::RedactedSecret;

use log::{debug, info};
use reqwest::Client;
use reqwest::header;

const LOGIN_ENDPOINT: &str = "/auth";
const USER_AGENT_PREFIX: &str = "GoogleLoginService/1.3";
const AUTH_TOKEN_MARKER: &str = const_format::concatcp!(tokens::AUTH_TOKEN_KEY, "=");

const ACCOUNT_TYPE: &str = "HOSTED_OR_GOOGLE";
const SERVICE: &str = "ah";
const SOURCE: &str = "android";

/// Transient login credential. Used once per [`IdentityClient::authenticate`]
/// call, never persisted; the password is zeroized on drop.
#[derive(Debug, Clone)]
pub struct Credential {
    pub email: String,
    pub password: RedactedSecret,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: RedactedSecret::new(password.into()),
        }
    }

    /// Either half empty or whitespace-only.
    pub(crate) fn is_blank(&self) -> bool {
        self.email.trim().is_empty() || self.password.is_blank()
    }
}

pub struct IdentityClient {
    base_url: String,
    client: Client,
    env: DeviceEnv,
}

impl IdentityClient {
    pub fn new(env: DeviceEnv, config: &ApiConfig) -> Result<Self, TransportError> {
        Ok(Self {
            base_url: config.identity_base_url.trim_end_matches('/').to_string(),
            client: transport::build_http_client(config)?,
            env,
        })
    }

    fn user_agent(&self) -> String {
        format!(
            "{USER_AGENT_PREFIX} ({} {})",
            self.env.param(env::PARAM_PRODUCT_DEVICE).unwrap_or_default(),
            self.env.param(env::PARAM_BUILD_ID).unwrap_or_default()
        )
    }

    /// Exchange a credential for an [`IdentityTokenSet`].
    ///
    /// # Errors
    ///
    /// - [`IdentityError::InvalidCredentials`] for a blank email or
    ///   password, before any network call
    /// - [`IdentityError::Transport`] when the exchange itself fails
    /// - [`IdentityError::AuthFailed`] when the provider answers without
    ///   the primary token key
    /// - [`IdentityError::Protocol`] when a token line cannot be parsed
    pub async fn authenticate(
        &self,
        credential: &Credential,
    ) -> Result<IdentityTokenSet, IdentityError> {
        if credential.is_blank() {
            return Err(IdentityError::invalid_credentials());
        }

        let form: Vec<(&str, String)> = vec![
            ("accountType", ACCOUNT_TYPE.to_string()),
            ("Email", credential.email.clone()),
            ("Passwd", credential.password.expose().to_string()),
            ("has_permission", "1".to_string()),
            ("service", SERVICE.to_string()),
            ("source", SOURCE.to_string()),
            (
                "androidId",
                self.env.param(env::PARAM_ANDROID_ID).unwrap_or_default(),
            ),
            ("app", self.env.param(env::PARAM_GAME_APP).unwrap_or_default()),
            (
                "client_sig",
                self.env.param(env::PARAM_CLIENT_SIGN).unwrap_or_default(),
            ),
            (
                "device_country",
                self.env.param(env::PARAM_DEVICE_COUNTRY).unwrap_or_default(),
            ),
            (
                "operatorCountry",
                self.env
                    .param(env::PARAM_OPERATOR_COUNTRY)
                    .unwrap_or_default(),
            ),
            (
                "lang",
                self.env
                    .param(env::PARAM_LOCALE_LANGUAGE)
                    .unwrap_or_default(),
            ),
            (
                "sdk_version",
                self.env
                    .param_i64(env::PARAM_SDK_VERSION)
                    .unwrap_or_default()
                    .to_string(),
            ),
        ];

        debug!(
            "Authenticating '{}' against {}",
            credential.email, self.base_url
        );

        let response = self
            .client
            .post(format!("{}{LOGIN_ENDPOINT}", self.base_url))
            .header(header::USER_AGENT, self.user_agent())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let body = body.trim();

        if !body.contains(AUTH_TOKEN_MARKER) {
            info!(
                "Identity provider rejected credentials for '{}' (HTTP {})",
                credential.email,
                status.as_u16()
            );
            return Err(IdentityError::auth_failed());
        }

        let token_set = tokens::parse_token_lines(body)?;
        info!(
            "Identity exchange succeeded for '{}' ({} tokens)",
            credential.email,
            token_set.len()
        );
        Ok(token_set)
    }
}

//! Session authentication state.
//!
//! Tagged state instead of a bag of clearable fields: each variant carries
//! exactly the data valid for it, so reading a token before the handshake
//! completed is impossible rather than merely checked.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Empty,
    CookiesAcquired {
        cookie_jar: String,
    },
    Ready {
        // Empty when the handshake ran without prior cookie acquisition;
        // such a session never satisfies `is_ready`.
        cookie_jar: String,
        xsrf_token: String,
        handshake: Map<String, Value>,
    },
}

/// Mutable authentication state of one logical connection.
///
/// Single-owner; populated cookies-first, then token and handshake payload
/// together in one step. Reset clears everything unconditionally.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff the session can carry authenticated RPC calls: cookies,
    /// token and handshake payload all present.
    pub fn is_ready(&self) -> bool {
        matches!(&self.state, SessionState::Ready { cookie_jar, .. } if !cookie_jar.is_empty())
    }

    /// The `; `-joined cookie string, present from cookie acquisition on.
    pub fn cookie_jar(&self) -> Option<&str> {
        match &self.state {
            SessionState::Empty => None,
            SessionState::CookiesAcquired { cookie_jar }
            | SessionState::Ready { cookie_jar, .. } => {
                (!cookie_jar.is_empty()).then_some(cookie_jar.as_str())
            }
        }
    }

    /// The anti-forgery token, present only once the handshake completed.
    pub fn xsrf_token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Ready { xsrf_token, .. } => Some(xsrf_token),
            _ => None,
        }
    }

    /// The decoded handshake payload, present only once the handshake
    /// completed.
    pub fn handshake_result(&self) -> Option<&Map<String, Value>> {
        match &self.state {
            SessionState::Ready { handshake, .. } => Some(handshake),
            _ => None,
        }
    }

    /// True once the handshake completed, regardless of cookie state.
    pub(crate) fn handshake_done(&self) -> bool {
        matches!(self.state, SessionState::Ready { .. })
    }

    /// Unconditional full clear. Idempotent.
    pub fn reset(&mut self) {
        self.state = SessionState::Empty;
    }

    /// Install a fresh cookie jar. Any previous handshake state is
    /// discarded: a fresh jar implies a fresh handshake is required.
    pub(crate) fn set_cookie_jar(&mut self, cookie_jar: String) {
        self.state = SessionState::CookiesAcquired { cookie_jar };
    }

    /// Complete the handshake: store the token and the decoded payload in
    /// one step, keeping whatever cookie jar exists. No-op when the
    /// handshake already completed; callers reject that case up front.
    pub(crate) fn complete_handshake(&mut self, xsrf_token: String, handshake: Map<String, Value>) {
        let state = std::mem::take(&mut self.state);
        self.state = match state {
            SessionState::Empty => SessionState::Ready {
                cookie_jar: String::new(),
                xsrf_token,
                handshake,
            },
            SessionState::CookiesAcquired { cookie_jar } => SessionState::Ready {
                cookie_jar,
                xsrf_token,
                handshake,
            },
            ready @ SessionState::Ready { .. } => ready,
        };
    }
}

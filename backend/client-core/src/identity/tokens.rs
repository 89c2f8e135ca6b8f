//! Token set returned by the identity exchange.

use crate::error::identity::IdentityError;

/// Name of the primary token the backend login consumes.
pub const AUTH_TOKEN_KEY: &str = "Auth";

/// Named opaque tokens from one successful identity exchange. Insertion
/// order is kept; a repeated name overwrites its earlier value.
#[derive(Debug, Clone, Default)]
pub struct IdentityTokenSet {
    tokens: Vec<(String, String)>,
}

impl IdentityTokenSet {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.tokens
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The primary token consumed by the backend login step.
    pub fn auth_token(&self) -> Option<&str> {
        self.get(AUTH_TOKEN_KEY)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|(n, _)| n.as_str())
    }

    fn insert(&mut self, name: String, value: String) {
        if let Some(entry) = self.tokens.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.tokens.push((name, value));
        }
    }
}

/// Parse a newline-delimited `Name=Value` body into a token set.
///
/// Each line is split once on its first `=` and both halves trimmed. A
/// line with no `=` at all fails the whole parse; guessing at partial
/// responses would hand a half-usable token set to the session protocol.
#[track_caller]
pub(crate) fn parse_token_lines(body: &str) -> Result<IdentityTokenSet, IdentityError> {
    let mut tokens = IdentityTokenSet::default();

    for line in body.trim().split('\n') {
        let line = line.trim();
        let Some((name, value)) = line.split_once('=') else {
            return Err(IdentityError::protocol(format!(
                "malformed token line: '{line}'"
            )));
        };
        tokens.insert(name.trim().to_string(), value.trim().to_string());
    }

    Ok(tokens)
}

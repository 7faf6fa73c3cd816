//! Authentication for the Pluvo API.
//!
//! Pluvo supports two mutually exclusive authentication schemes:
//!
//! - a `client_id`/`client_secret` pair, sent as request headers
//! - a single `token`, sent as a query parameter
//!
//! Unauthenticated access is allowed for a few public endpoints (for
//! example the API version).

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::{Error, Result};

/// Credentials used to authenticate requests.
///
/// Secrets are wrapped in [`SecretString`] so they never leak through
/// `Debug` output or logs.
#[derive(Clone)]
pub enum Credentials {
    /// No authentication. Only public endpoints will be accessible.
    Anonymous,
    /// Token authentication; the token travels as a `token` query parameter.
    Token(SecretString),
    /// Client pair authentication; both values travel as request headers.
    ClientPair {
        /// The client identifier.
        client_id: String,
        /// The client secret.
        client_secret: SecretString,
    },
}

impl Credentials {
    /// Create token credentials.
    pub fn token(token: impl Into<String>) -> Self {
        Credentials::Token(SecretString::from(token.into()))
    }

    /// Create client pair credentials.
    pub fn client_pair(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Credentials::ClientPair {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
        }
    }

    /// Insert authentication headers for this credential set.
    pub(crate) fn apply_headers(&self, headers: &mut HeaderMap) -> Result<()> {
        if let Credentials::ClientPair {
            client_id,
            client_secret,
        } = self
        {
            headers.insert(
                "client_id",
                HeaderValue::from_str(client_id)
                    .map_err(|_| Error::Config("Invalid client_id format".to_string()))?,
            );
            let mut secret = HeaderValue::from_str(client_secret.expose_secret())
                .map_err(|_| Error::Config("Invalid client_secret format".to_string()))?;
            secret.set_sensitive(true);
            headers.insert("client_secret", secret);
        }
        Ok(())
    }

    /// The `token` query parameter value, if token authentication is in use.
    pub(crate) fn token_param(&self) -> Option<String> {
        match self {
            Credentials::Token(token) => Some(token.expose_secret().to_string()),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Anonymous => write!(f, "Credentials::Anonymous"),
            Credentials::Token(_) => write!(f, "Credentials::Token([REDACTED])"),
            Credentials::ClientPair { client_id, .. } => f
                .debug_struct("Credentials::ClientPair")
                .field("client_id", client_id)
                .field("client_secret", &"[REDACTED]")
                .finish(),
        }
    }
}

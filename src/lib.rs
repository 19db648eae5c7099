//! # vault-auth
//!
//! Pluggable authentication for HashiCorp Vault.
//!
//! This crate negotiates a short-lived Vault token from whatever credentials
//! are available locally: explicit configuration, environment variables, or
//! well-known files. Strategies are tried in priority order and the first
//! one to succeed is remembered, so that logout reverses exactly what login
//! did.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vault_auth::auth::{AuthMethod, EnvAuthMethod};
//! use vault_auth::client::{Session, VaultHttp};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), vault_auth::Error> {
//!     let transport = VaultHttp::from_env()?;
//!     let mut session = Session::new(transport);
//!
//!     let mut auth = EnvAuthMethod::from_env();
//!     auth.login(&mut session).await?;
//!
//!     // ... use session.write(..) against authenticated endpoints ...
//!
//!     auth.logout(&mut session).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Picking a single strategy
//!
//! Every strategy can also be used on its own:
//!
//! ```rust,no_run
//! use vault_auth::auth::{AppRoleAuth, AuthMethod};
//! # async fn example(session: &mut vault_auth::client::Session) -> vault_auth::Result<()> {
//! let mut approle = AppRoleAuth::new("my-role-id", "my-secret-id", "");
//! approle.login(session).await?;
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod auth;
pub mod client;
pub mod env;
pub mod prelude;

pub use auth::{
    AppIdAuth, AppRoleAuth, AuthConfigurable, AuthMethod, EnvAuthMethod, GitHubAuth,
    KubernetesAuth, SupportsAuthConfiguration, TokenAuth, UserPassAuth, with_auth_method,
};
pub use client::{Secret, SecretAuth, Session, VaultHttp, VaultTransport};
pub use env::{EnvSource, MemoryEnv, OsEnv, resolve_value};

use std::path::PathBuf;

/// Error type for vault-auth operations.
///
/// Every variant carries enough context (method name, path, attempted
/// endpoint) to diagnose a failed negotiation without internal logging.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A required parameter resolved to empty through every layer.
    #[error("{method} auth failure: no {field} provided")]
    MissingParameter {
        method: &'static str,
        field: &'static str,
    },

    /// A credential file exists but holds no usable content.
    #[error("{method} auth failure: file {path:?} is empty")]
    EmptyCredentialFile {
        method: &'static str,
        path: PathBuf,
    },

    /// Reading a local credential file failed.
    #[error("failed to read credential file {path:?}: {source}")]
    CredentialFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A write against a Vault endpoint failed.
    #[error("vault write to {path} failed: {source}")]
    Exchange {
        path: String,
        #[source]
        source: Box<Error>,
    },

    /// Vault returned an error response.
    #[error("vault error (HTTP {status}): {}", errors.join("; "))]
    Api { status: u16, errors: Vec<String> },

    /// Network connectivity or request failed.
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// File system operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse an address or response.
    #[error("parse error: {0}")]
    Parse(String),

    /// A login exchange succeeded but the response carried no client token.
    #[error("{method} login response contained no client token")]
    MissingClientToken { method: &'static str },

    /// A strategy's login exchange failed.
    #[error("{method} login failed: {source}")]
    Login {
        method: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// A strategy's revoke exchange failed during logout.
    #[error("{method} logout failed: {source}")]
    Logout {
        method: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// Every configured strategy failed.
    #[error("unable to authenticate with vault by any configured method. Tried: {}", attempts.join(", "))]
    AllMethodsFailed { attempts: Vec<String> },

    /// Logout was requested but no strategy is currently bound.
    #[error("not logged in: no auth method is bound to this session")]
    NotLoggedIn,

    /// Authentication failed for a reason outside the other variants.
    #[error("authentication failed: {message}")]
    Auth { message: String },
}

/// Coarse classification of [`Error`] variants, for callers that branch on
/// failure class rather than the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A required parameter was missing or unusable; no backend call was made.
    Configuration,
    /// A local file read failed before any backend call.
    LocalIo,
    /// The login or revoke exchange failed at the transport/protocol layer.
    Backend,
    /// Every strategy in a composite failed.
    Aggregate,
    /// Session-state errors (nothing bound, invalid handle use).
    Session,
}

impl Error {
    pub fn auth(message: impl Into<String>) -> Self {
        Error::Auth {
            message: message.into(),
        }
    }

    pub(crate) fn missing(method: &'static str, field: &'static str) -> Self {
        Error::MissingParameter { method, field }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::MissingParameter { .. } | Error::EmptyCredentialFile { .. } => {
                ErrorCategory::Configuration
            }
            Error::CredentialFile { .. } | Error::Io(_) => ErrorCategory::LocalIo,
            Error::Exchange { .. }
            | Error::Api { .. }
            | Error::Network(_)
            | Error::Json(_)
            | Error::Parse(_)
            | Error::MissingClientToken { .. } => ErrorCategory::Backend,
            Error::Login { source, .. } | Error::Logout { source, .. } => source.category(),
            Error::AllMethodsFailed { .. } => ErrorCategory::Aggregate,
            Error::NotLoggedIn | Error::Auth { .. } => ErrorCategory::Session,
        }
    }
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_message() {
        let err = Error::missing("approle", "role_id");
        assert_eq!(err.to_string(), "approle auth failure: no role_id provided");
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_exchange_wraps_source() {
        let inner = Error::Api {
            status: 403,
            errors: vec!["permission denied".into()],
        };
        let err = Error::Exchange {
            path: "auth/approle/login".into(),
            source: Box::new(inner),
        };
        assert!(err.to_string().contains("auth/approle/login"));
        assert_eq!(err.category(), ErrorCategory::Backend);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_login_category_follows_source() {
        let err = Error::Login {
            method: "github",
            source: Box::new(Error::missing("github", "token")),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_aggregate_message_lists_attempts() {
        let err = Error::AllMethodsFailed {
            attempts: vec![
                "approle: no role_id provided".into(),
                "github: no token provided".into(),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("approle"));
        assert!(msg.contains("github"));
        assert_eq!(err.category(), ErrorCategory::Aggregate);
    }
}

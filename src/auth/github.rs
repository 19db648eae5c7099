//! GitHub authentication.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::AuthMethod;
use super::exchange::{remote_auth, revoke_token};
use crate::client::Session;
use crate::env::{EnvSource, OsEnv, resolve_value};
use crate::{Error, Result};

pub const ENV_GITHUB_TOKEN: &str = "VAULT_AUTH_GITHUB_TOKEN";
pub const ENV_GITHUB_MOUNT: &str = "VAULT_AUTH_GITHUB_MOUNT";

const METHOD: &str = "github";
const DEFAULT_MOUNT: &str = "github";

/// Authenticates with the GitHub auth method.
///
/// An empty token resolves at login time from `$VAULT_AUTH_GITHUB_TOKEN`.
/// The mount defaults to `$VAULT_AUTH_GITHUB_MOUNT` or "github".
///
/// See also <https://www.vaultproject.io/docs/auth/github>
#[derive(Debug)]
pub struct GitHubAuth {
    token: String,
    mount: String,
    source: Arc<dyn EnvSource>,
}

impl GitHubAuth {
    pub fn new(token: impl Into<String>, mount: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            mount: mount.into(),
            source: Arc::new(OsEnv::new()),
        }
    }

    /// Replace the environment source, for virtualized lookups.
    pub fn with_source(mut self, source: Arc<dyn EnvSource>) -> Self {
        self.source = source;
        self
    }
}

#[async_trait]
impl AuthMethod for GitHubAuth {
    fn name(&self) -> &'static str {
        METHOD
    }

    async fn login(&mut self, session: &mut Session) -> Result<()> {
        let token = resolve_value(&self.token, ENV_GITHUB_TOKEN, "", &*self.source);
        if token.is_empty() {
            return Err(Error::missing(METHOD, "token"));
        }

        let mount = resolve_value(&self.mount, ENV_GITHUB_MOUNT, DEFAULT_MOUNT, &*self.source);

        let secret = remote_auth(session, &mount, "", json!({"token": token}))
            .await
            .map_err(|e| Error::Login {
                method: METHOD,
                source: Box::new(e),
            })?;

        let token = secret
            .client_token()
            .ok_or(Error::MissingClientToken { method: METHOD })?;
        session.set_token(token);

        Ok(())
    }

    async fn logout(&mut self, session: &mut Session) -> Result<()> {
        revoke_token(session).await
    }
}

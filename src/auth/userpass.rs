//! UserPass authentication.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::AuthMethod;
use super::exchange::{remote_auth, revoke_token};
use crate::client::Session;
use crate::env::{EnvSource, OsEnv, resolve_value};
use crate::{Error, Result};

pub const ENV_USERNAME: &str = "VAULT_AUTH_USERNAME";
pub const ENV_PASSWORD: &str = "VAULT_AUTH_PASSWORD";
pub const ENV_USERPASS_MOUNT: &str = "VAULT_AUTH_USERPASS_MOUNT";

const METHOD: &str = "userpass";
const DEFAULT_MOUNT: &str = "userpass";

/// Authenticates with the UserPass auth method.
///
/// Empty fields resolve at login time from `$VAULT_AUTH_USERNAME` and
/// `$VAULT_AUTH_PASSWORD`. The mount defaults to `$VAULT_AUTH_USERPASS_MOUNT`
/// or "userpass". The username travels in the login URL, not the body.
///
/// See also <https://www.vaultproject.io/docs/auth/userpass>
#[derive(Debug)]
pub struct UserPassAuth {
    username: String,
    password: String,
    mount: String,
    source: Arc<dyn EnvSource>,
}

impl UserPassAuth {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        mount: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
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
impl AuthMethod for UserPassAuth {
    fn name(&self) -> &'static str {
        METHOD
    }

    async fn login(&mut self, session: &mut Session) -> Result<()> {
        let username = resolve_value(&self.username, ENV_USERNAME, "", &*self.source);
        if username.is_empty() {
            return Err(Error::missing(METHOD, "username"));
        }

        let password = resolve_value(&self.password, ENV_PASSWORD, "", &*self.source);
        if password.is_empty() {
            return Err(Error::missing(METHOD, "password"));
        }

        let mount = resolve_value(&self.mount, ENV_USERPASS_MOUNT, DEFAULT_MOUNT, &*self.source);

        let secret = remote_auth(session, &mount, &username, json!({"password": password}))
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

//! AppRole authentication.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::AuthMethod;
use super::exchange::{remote_auth, revoke_token};
use crate::client::Session;
use crate::env::{EnvSource, OsEnv, resolve_value};
use crate::{Error, Result};

pub const ENV_ROLE_ID: &str = "VAULT_ROLE_ID";
pub const ENV_SECRET_ID: &str = "VAULT_SECRET_ID";
pub const ENV_APPROLE_MOUNT: &str = "VAULT_AUTH_APPROLE_MOUNT";

const METHOD: &str = "approle";
const DEFAULT_MOUNT: &str = "approle";

/// Authenticates with the AppRole auth method.
///
/// Empty fields resolve at login time from `$VAULT_ROLE_ID` and
/// `$VAULT_SECRET_ID`. The mount defaults to `$VAULT_AUTH_APPROLE_MOUNT` or
/// "approle".
///
/// See also <https://www.vaultproject.io/docs/auth/approle>
#[derive(Debug)]
pub struct AppRoleAuth {
    role_id: String,
    secret_id: String,
    mount: String,
    source: Arc<dyn EnvSource>,
}

impl AppRoleAuth {
    pub fn new(
        role_id: impl Into<String>,
        secret_id: impl Into<String>,
        mount: impl Into<String>,
    ) -> Self {
        Self {
            role_id: role_id.into(),
            secret_id: secret_id.into(),
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
impl AuthMethod for AppRoleAuth {
    fn name(&self) -> &'static str {
        METHOD
    }

    async fn login(&mut self, session: &mut Session) -> Result<()> {
        let role_id = resolve_value(&self.role_id, ENV_ROLE_ID, "", &*self.source);
        if role_id.is_empty() {
            return Err(Error::missing(METHOD, "role_id"));
        }

        let secret_id = resolve_value(&self.secret_id, ENV_SECRET_ID, "", &*self.source);
        if secret_id.is_empty() {
            return Err(Error::missing(METHOD, "secret_id"));
        }

        let mount = resolve_value(&self.mount, ENV_APPROLE_MOUNT, DEFAULT_MOUNT, &*self.source);

        let secret = remote_auth(
            session,
            &mount,
            "",
            json!({"role_id": role_id, "secret_id": secret_id}),
        )
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

//! AppID authentication (deprecated).

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::AuthMethod;
use super::exchange::{remote_auth, revoke_token};
use crate::client::Session;
use crate::env::{EnvSource, OsEnv, resolve_value};
use crate::{Error, Result};

pub const ENV_APP_ID: &str = "VAULT_APP_ID";
pub const ENV_USER_ID: &str = "VAULT_USER_ID";
pub const ENV_APP_ID_MOUNT: &str = "VAULT_AUTH_APP_ID_MOUNT";

const METHOD: &str = "app-id";
const DEFAULT_MOUNT: &str = "app-id";

/// Authenticates with the legacy AppID auth method.
///
/// Deprecated upstream: transition to [`AppRoleAuth`](super::AppRoleAuth)
/// instead - see <https://www.vaultproject.io/docs/auth/app-id>. Kept as the
/// lowest-precedence fallback for servers that still mount it.
///
/// Empty fields resolve at login time from `$VAULT_APP_ID` and
/// `$VAULT_USER_ID`. The mount defaults to `$VAULT_AUTH_APP_ID_MOUNT` or
/// "app-id". The app id travels in the login URL, not the body.
#[derive(Debug)]
pub struct AppIdAuth {
    app_id: String,
    user_id: String,
    mount: String,
    source: Arc<dyn EnvSource>,
}

impl AppIdAuth {
    pub fn new(
        app_id: impl Into<String>,
        user_id: impl Into<String>,
        mount: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            user_id: user_id.into(),
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
impl AuthMethod for AppIdAuth {
    fn name(&self) -> &'static str {
        METHOD
    }

    async fn login(&mut self, session: &mut Session) -> Result<()> {
        let app_id = resolve_value(&self.app_id, ENV_APP_ID, "", &*self.source);
        if app_id.is_empty() {
            return Err(Error::missing(METHOD, "app_id"));
        }

        let user_id = resolve_value(&self.user_id, ENV_USER_ID, "", &*self.source);
        if user_id.is_empty() {
            return Err(Error::missing(METHOD, "user_id"));
        }

        let mount = resolve_value(&self.mount, ENV_APP_ID_MOUNT, DEFAULT_MOUNT, &*self.source);

        let secret = remote_auth(session, &mount, &app_id, json!({"user_id": user_id}))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::FakeTransport;
    use crate::env::MemoryEnv;

    #[tokio::test]
    async fn test_missing_app_id_fails() {
        let transport = FakeTransport::shared();
        let mut session = Session::with_transport(transport.clone());

        let mut auth = AppIdAuth::new("", "", "").with_source(Arc::new(MemoryEnv::new()));
        let err = auth.login(&mut session).await.unwrap_err();

        assert_eq!(err.to_string(), "app-id auth failure: no app_id provided");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_user_id_fails() {
        let mut session = Session::with_transport(FakeTransport::shared());

        let source = MemoryEnv::new().with_var(ENV_APP_ID, "app");
        let mut auth = AppIdAuth::new("", "", "").with_source(Arc::new(source));
        let err = auth.login(&mut session).await.unwrap_err();

        assert_eq!(err.to_string(), "app-id auth failure: no user_id provided");
    }

    #[tokio::test]
    async fn test_app_id_embedded_in_path() {
        let transport = FakeTransport::shared();
        transport.push_token("s.appid");
        let mut session = Session::with_transport(transport.clone());

        let source = MemoryEnv::new()
            .with_var(ENV_APP_ID, "my-app")
            .with_var(ENV_USER_ID, "my-user");
        let mut auth = AppIdAuth::new("", "", "").with_source(Arc::new(source));

        auth.login(&mut session).await.unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.path, "auth/app-id/login/my-app");
        assert_eq!(call.body, Some(serde_json::json!({"user_id": "my-user"})));
        assert!(session.is_authenticated());
    }
}

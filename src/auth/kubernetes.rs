//! Kubernetes authentication.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::AuthMethod;
use super::exchange::{remote_auth, revoke_token};
use crate::client::Session;
use crate::env::{EnvSource, OsEnv, resolve_value};
use crate::{Error, Result};

pub const ENV_ROLE: &str = "VAULT_AUTH_ROLE";
pub const ENV_SATOKEN_PATH: &str = "VAULT_AUTH_SATOKEN_PATH";
pub const ENV_KUBERNETES_MOUNT: &str = "VAULT_AUTH_KUBERNETES_MOUNT";

const METHOD: &str = "kubernetes";
const DEFAULT_MOUNT: &str = "kubernetes";
const DEFAULT_SATOKEN_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";

/// Authenticates with the Kubernetes auth method.
///
/// An empty role resolves at login time from `$VAULT_AUTH_ROLE`. The
/// service-account token is read from the path in `$VAULT_AUTH_SATOKEN_PATH`,
/// defaulting to the in-cluster mount point. The mount defaults to
/// `$VAULT_AUTH_KUBERNETES_MOUNT` or "kubernetes".
///
/// The token file is re-read on every login; an unreadable path is fatal,
/// as is a file with no usable content.
///
/// See also <https://www.vaultproject.io/docs/auth/kubernetes>
#[derive(Debug)]
pub struct KubernetesAuth {
    role: String,
    sa_token_path: String,
    mount: String,
    source: Arc<dyn EnvSource>,
}

impl KubernetesAuth {
    pub fn new(
        role: impl Into<String>,
        sa_token_path: impl Into<String>,
        mount: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            sa_token_path: sa_token_path.into(),
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
impl AuthMethod for KubernetesAuth {
    fn name(&self) -> &'static str {
        METHOD
    }

    async fn login(&mut self, session: &mut Session) -> Result<()> {
        let role = resolve_value(&self.role, ENV_ROLE, "", &*self.source);
        if role.is_empty() {
            return Err(Error::missing(METHOD, "role"));
        }

        let sa_token_path = PathBuf::from(resolve_value(
            &self.sa_token_path,
            ENV_SATOKEN_PATH,
            DEFAULT_SATOKEN_PATH,
            &*self.source,
        ));

        let sa_token = self
            .source
            .read_file(&sa_token_path)
            .map_err(|e| Error::CredentialFile {
                path: sa_token_path.clone(),
                source: e,
            })?;
        if sa_token.trim().is_empty() {
            return Err(Error::EmptyCredentialFile {
                method: METHOD,
                path: sa_token_path,
            });
        }

        let mount = resolve_value(&self.mount, ENV_KUBERNETES_MOUNT, DEFAULT_MOUNT, &*self.source);

        let secret = remote_auth(session, &mount, "", json!({"role": role, "saToken": sa_token}))
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
    use crate::ErrorCategory;
    use crate::client::testing::FakeTransport;
    use crate::env::MemoryEnv;

    #[tokio::test]
    async fn test_missing_role_fails() {
        let transport = FakeTransport::shared();
        let mut session = Session::with_transport(transport.clone());

        let mut auth = KubernetesAuth::new("", "", "").with_source(Arc::new(MemoryEnv::new()));
        let err = auth.login(&mut session).await.unwrap_err();

        assert_eq!(err.to_string(), "kubernetes auth failure: no role provided");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_sa_token_fails() {
        let transport = FakeTransport::shared();
        let mut session = Session::with_transport(transport.clone());

        let source = MemoryEnv::new().with_var(ENV_ROLE, "app");
        let mut auth = KubernetesAuth::new("", "", "").with_source(Arc::new(source));
        let err = auth.login(&mut session).await.unwrap_err();

        assert_eq!(err.category(), ErrorCategory::LocalIo);
        assert!(err.to_string().contains("serviceaccount/token"));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_whitespace_only_sa_token_fails() {
        let transport = FakeTransport::shared();
        let mut session = Session::with_transport(transport.clone());

        let source = MemoryEnv::new()
            .with_var(ENV_ROLE, "app")
            .with_var(ENV_SATOKEN_PATH, "/custom/token")
            .with_file("/custom/token", "  \n");
        let mut auth = KubernetesAuth::new("", "", "").with_source(Arc::new(source));
        let err = auth.login(&mut session).await.unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.to_string().contains("/custom/token"));
        assert_eq!(transport.call_count(), 0);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_with_sa_token() {
        let transport = FakeTransport::shared();
        transport.push_token("s.kube");
        let mut session = Session::with_transport(transport.clone());

        let source = MemoryEnv::new()
            .with_var(ENV_ROLE, "app")
            .with_file(DEFAULT_SATOKEN_PATH, "eyJhbGciOi...");
        let mut auth = KubernetesAuth::new("", "", "").with_source(Arc::new(source));

        auth.login(&mut session).await.unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.path, "auth/kubernetes/login");
        assert_eq!(
            call.body,
            Some(serde_json::json!({"role": "app", "saToken": "eyJhbGciOi..."}))
        );
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_custom_sa_token_path() {
        let transport = FakeTransport::shared();
        transport.push_token("s.kube");
        let mut session = Session::with_transport(transport.clone());

        let source = MemoryEnv::new().with_file("/tmp/sa-token", "jwt");
        let mut auth =
            KubernetesAuth::new("app", "/tmp/sa-token", "kube2").with_source(Arc::new(source));

        auth.login(&mut session).await.unwrap();

        assert_eq!(transport.calls()[0].path, "auth/kube2/login");
    }
}

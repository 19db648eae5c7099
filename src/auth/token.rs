//! Token authentication.

use std::sync::Arc;

use async_trait::async_trait;

use super::AuthMethod;
use crate::client::Session;
use crate::env::{EnvSource, OsEnv, resolve_value};
use crate::{Error, Result};

pub const ENV_VAULT_TOKEN: &str = "VAULT_TOKEN";

const METHOD: &str = "token";
const TOKEN_FILE: &str = ".vault-token";

/// Authenticates with an existing token.
///
/// An empty token resolves at login time from `$VAULT_TOKEN`, then from the
/// `~/.vault-token` file. No backend call is made to acquire the token, and
/// logout is purely local: the token is cleared, never revoked.
///
/// See also <https://www.vaultproject.io/docs/auth/token>
#[derive(Debug)]
pub struct TokenAuth {
    token: String,
    source: Arc<dyn EnvSource>,
}

impl TokenAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
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
impl AuthMethod for TokenAuth {
    fn name(&self) -> &'static str {
        METHOD
    }

    async fn login(&mut self, session: &mut Session) -> Result<()> {
        let token = resolve_value(&self.token, ENV_VAULT_TOKEN, "", &*self.source);
        if !token.is_empty() {
            session.set_token(token);
            return Ok(());
        }

        let home = self
            .source
            .home_dir()
            .ok_or_else(|| Error::auth("token auth failure: could not determine home directory"))?;
        let path = home.join(TOKEN_FILE);

        let token = self
            .source
            .read_file(&path)
            .map_err(|e| Error::CredentialFile {
                path: path.clone(),
                source: e,
            })?;

        session.set_token(token);

        Ok(())
    }

    async fn logout(&mut self, session: &mut Session) -> Result<()> {
        // nothing to revoke; the token was never issued to us
        session.clear_token();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCategory;
    use crate::client::testing::FakeTransport;
    use crate::env::MemoryEnv;
    use secrecy::ExposeSecret;

    #[tokio::test]
    async fn test_explicit_token() {
        let transport = FakeTransport::shared();
        let mut session = Session::with_transport(transport.clone());

        let mut auth = TokenAuth::new("s.explicit").with_source(Arc::new(MemoryEnv::new()));
        auth.login(&mut session).await.unwrap();

        assert_eq!(session.token().unwrap().expose_secret(), "s.explicit");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_token_from_environment() {
        let transport = FakeTransport::shared();
        let mut session = Session::with_transport(transport.clone());

        let source = MemoryEnv::new().with_var(ENV_VAULT_TOKEN, "abc");
        let mut auth = TokenAuth::new("").with_source(Arc::new(source));
        auth.login(&mut session).await.unwrap();

        assert_eq!(session.token().unwrap().expose_secret(), "abc");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_token_from_home_file() {
        let mut session = Session::with_transport(FakeTransport::shared());

        let source = MemoryEnv::new()
            .with_home("/home/app")
            .with_file("/home/app/.vault-token", "s.from-file");
        let mut auth = TokenAuth::new("").with_source(Arc::new(source));
        auth.login(&mut session).await.unwrap();

        assert_eq!(session.token().unwrap().expose_secret(), "s.from-file");
    }

    #[tokio::test]
    async fn test_unreadable_token_file_fails() {
        let mut session = Session::with_transport(FakeTransport::shared());

        let source = MemoryEnv::new().with_home("/home/app");
        let mut auth = TokenAuth::new("").with_source(Arc::new(source));
        let err = auth.login(&mut session).await.unwrap_err();

        assert!(err.to_string().contains(".vault-token"));
        assert_eq!(err.category(), ErrorCategory::LocalIo);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_no_home_directory_fails() {
        let mut session = Session::with_transport(FakeTransport::shared());

        let mut auth = TokenAuth::new("").with_source(Arc::new(MemoryEnv::new()));
        assert!(auth.login(&mut session).await.is_err());
    }

    #[tokio::test]
    async fn test_logout_is_local_and_never_fails() {
        let transport = FakeTransport::shared();
        let mut session = Session::with_transport(transport.clone());

        let mut auth = TokenAuth::new("s.explicit").with_source(Arc::new(MemoryEnv::new()));
        auth.login(&mut session).await.unwrap();
        auth.logout(&mut session).await.unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(transport.call_count(), 0);
    }
}

//! Composite negotiator over an ordered list of auth methods.

use std::sync::Arc;

use async_trait::async_trait;

use super::{
    AppIdAuth, AppRoleAuth, AuthMethod, GitHubAuth, KubernetesAuth, TokenAuth, UserPassAuth,
};
use crate::client::Session;
use crate::env::{EnvSource, OsEnv};
use crate::{Error, Result};

/// Which member, if any, a previous login succeeded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    Idle,
    Bound(usize),
}

/// Tries auth methods in priority order and remembers the winner.
///
/// Insertion order is precedence and is immutable once built. While bound,
/// further logins are no-ops and logout delegates to the bound member only;
/// logout returns the negotiator to idle on every outcome, so a later login
/// may renegotiate from the top.
///
/// The default ordering prefers methods whose misconfiguration fails fast
/// with no network round trip, before file-based and legacy methods:
/// AppRole, GitHub, UserPass, Token, Kubernetes, AppId.
///
/// Login/logout pairs must be serialized per instance; use one negotiator
/// per session rather than sharing across tasks.
#[derive(Debug)]
pub struct EnvAuthMethod {
    methods: Vec<Box<dyn AuthMethod>>,
    binding: Binding,
}

impl EnvAuthMethod {
    /// Create a negotiator over an explicit ordered list.
    pub fn new(methods: Vec<Box<dyn AuthMethod>>) -> Self {
        Self {
            methods,
            binding: Binding::Idle,
        }
    }

    /// Append a method at the lowest precedence.
    pub fn with(mut self, method: impl AuthMethod + 'static) -> Self {
        self.methods.push(Box::new(method));
        self
    }

    /// The default negotiator, resolving everything from the process
    /// environment.
    pub fn from_env() -> Self {
        Self::with_source(Arc::new(OsEnv::new()))
    }

    /// The default negotiator with an injected environment source.
    pub fn with_source(source: Arc<dyn EnvSource>) -> Self {
        Self::new(vec![
            Box::new(AppRoleAuth::new("", "", "").with_source(source.clone())),
            Box::new(GitHubAuth::new("", "").with_source(source.clone())),
            Box::new(UserPassAuth::new("", "", "").with_source(source.clone())),
            Box::new(TokenAuth::new("").with_source(source.clone())),
            Box::new(KubernetesAuth::new("", "", "").with_source(source.clone())),
            Box::new(AppIdAuth::new("", "", "").with_source(source)),
        ])
    }

    /// Name of the method a previous login bound to, if any.
    pub fn bound_method(&self) -> Option<&'static str> {
        match self.binding {
            Binding::Bound(index) => Some(self.methods[index].name()),
            Binding::Idle => None,
        }
    }
}

#[async_trait]
impl AuthMethod for EnvAuthMethod {
    fn name(&self) -> &'static str {
        "env"
    }

    async fn login(&mut self, session: &mut Session) -> Result<()> {
        if let Binding::Bound(_) = self.binding {
            return Ok(());
        }

        let mut attempts = Vec::with_capacity(self.methods.len());

        for (index, method) in self.methods.iter_mut().enumerate() {
            match method.login(session).await {
                Ok(()) => {
                    tracing::debug!(method = method.name(), "vault auth method succeeded");
                    self.binding = Binding::Bound(index);
                    return Ok(());
                }
                Err(e) => {
                    tracing::debug!(method = method.name(), error = %e, "vault auth method failed");
                    attempts.push(format!("{}: {}", method.name(), e));
                }
            }
        }

        Err(Error::AllMethodsFailed { attempts })
    }

    async fn logout(&mut self, session: &mut Session) -> Result<()> {
        // return to idle on every outcome so a later login can renegotiate
        match std::mem::replace(&mut self.binding, Binding::Idle) {
            Binding::Bound(index) => {
                let method = &mut self.methods[index];
                let name = method.name();

                method.logout(session).await.map_err(|e| Error::Logout {
                    method: name,
                    source: Box::new(e),
                })
            }
            Binding::Idle => Err(Error::NotLoggedIn),
        }
    }
}

//! Vault session handle and wire transport.
//!
//! [`Session`] is the mutable binding between a caller and one Vault
//! connection: it owns the current token and threads it through every
//! logical write. Auth strategies mutate the session; they never talk to
//! the transport directly.

mod secret;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use secret::{Secret, SecretAuth};
pub use transport::{VaultHttp, VaultTransport};

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::Result;

/// One authenticated connection to Vault.
///
/// Holds at most one token at a time; setting a new token overwrites any
/// previous one. Created by the caller before any auth strategy runs,
/// mutated by strategies during login/logout.
pub struct Session {
    transport: Arc<dyn VaultTransport>,
    token: Option<SecretString>,
}

impl Session {
    /// Create an unauthenticated session over `transport`.
    pub fn new(transport: impl VaultTransport + 'static) -> Self {
        Self::with_transport(Arc::new(transport))
    }

    /// Create an unauthenticated session over a shared transport.
    pub fn with_transport(transport: Arc<dyn VaultTransport>) -> Self {
        Self {
            transport,
            token: None,
        }
    }

    /// Install `token` as the active token, replacing any previous one.
    pub fn set_token(&mut self, token: impl Into<String>) {
        tracing::debug!("session token set");
        self.token = Some(SecretString::from(token.into()));
    }

    /// Drop the active token, leaving the session unauthenticated.
    pub fn clear_token(&mut self) {
        if self.token.take().is_some() {
            tracing::debug!("session token cleared");
        }
    }

    /// The active token, if any.
    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Perform one logical write, authenticated with the current token.
    ///
    /// Dropping the returned future aborts the in-flight request without
    /// mutating session state.
    pub async fn write(&self, path: &str, body: Option<Value>) -> Result<Option<Secret>> {
        let token = self.token.as_ref().map(|t| t.expose_secret().to_string());
        self.transport
            .write(path, token.as_deref(), body.as_ref())
            .await
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .finish_non_exhaustive()
    }
}

//! Authentication method trait.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::Result;
use crate::client::Session;

/// One method of exchanging locally-known credentials for a Vault token.
///
/// Construction never validates; an all-empty strategy is valid and resolves
/// everything from the environment at login time. Login and logout take
/// `&mut self` so callers serialize the pair per instance; a login future
/// dropped mid-exchange aborts the request without mutating the session.
#[async_trait]
pub trait AuthMethod: Send + Sync + Debug {
    /// Strategy name for logging and error aggregation.
    fn name(&self) -> &'static str;

    /// Acquire a token and install it on `session`.
    async fn login(&mut self, session: &mut Session) -> Result<()>;

    /// Revoke the token acquired by a previous login and clear it from
    /// `session`. Local cleanup happens even when the revoke call fails.
    async fn logout(&mut self, session: &mut Session) -> Result<()>;
}

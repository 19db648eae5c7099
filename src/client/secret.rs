//! Vault response types.

use serde::Deserialize;
use serde_json::Value;

/// A logical response from Vault.
///
/// Auth strategies only ever inspect the `auth` block; secret data payloads
/// are passed through untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct Secret {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub lease_id: Option<String>,
    #[serde(default)]
    pub lease_duration: u64,
    #[serde(default)]
    pub renewable: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub auth: Option<SecretAuth>,
}

impl Secret {
    /// The issued client token, when this response came from a login
    /// endpoint.
    pub fn client_token(&self) -> Option<&str> {
        self.auth.as_ref().map(|auth| auth.client_token.as_str())
    }
}

/// The `auth` block of a login response.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretAuth {
    pub client_token: String,
    #[serde(default)]
    pub accessor: Option<String>,
    #[serde(default)]
    pub policies: Vec<String>,
    #[serde(default)]
    pub lease_duration: u64,
    #[serde(default)]
    pub renewable: bool,
}

//! Wire transport against the Vault HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::Secret;
use crate::{Error, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_ADDR: &str = "https://127.0.0.1:8200";

/// Environment variable naming the Vault server address.
pub const ENV_VAULT_ADDR: &str = "VAULT_ADDR";

/// One authenticated logical write against the backend.
///
/// This is the whole wire boundary the auth core consumes: strategies never
/// read secret data, only auth-exchange responses.
#[async_trait]
pub trait VaultTransport: Send + Sync {
    /// Write `body` to the logical `path`, authenticated with `token` when
    /// present. Responses without a body yield `Ok(None)`.
    async fn write(
        &self,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Option<Secret>>;
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<String>,
}

/// [`VaultTransport`] over the Vault HTTP API (`/v1/<path>`).
#[derive(Debug, Clone)]
pub struct VaultHttp {
    base: Url,
    http: reqwest::Client,
}

impl VaultHttp {
    /// Create a transport for the Vault server at `addr`.
    pub fn new(addr: impl AsRef<str>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(Error::Network)?;

        Self::with_http(addr, http)
    }

    /// Create a transport reusing an existing reqwest client.
    pub fn with_http(addr: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let mut addr = addr.as_ref().to_string();
        if !addr.ends_with('/') {
            addr.push('/');
        }

        let base = Url::parse(&addr)
            .map_err(|e| Error::Parse(format!("invalid vault address {addr:?}: {e}")))?;

        Ok(Self { base, http })
    }

    /// Create a transport from `$VAULT_ADDR`, falling back to the standard
    /// local address when unset.
    pub fn from_env() -> Result<Self> {
        let addr = std::env::var(ENV_VAULT_ADDR).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        Self::new(addr)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(&format!("v1/{path}"))
            .map_err(|e| Error::Parse(format!("invalid vault path {path:?}: {e}")))
    }
}

#[async_trait]
impl VaultTransport for VaultHttp {
    async fn write(
        &self,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Option<Secret>> {
        let url = self.endpoint(path)?;

        let mut request = self.http.post(url);
        if let Some(token) = token {
            request = request.header("X-Vault-Token", token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let errors = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.errors)
                .unwrap_or_else(|_| vec![text]);

            return Err(Error::Api {
                status: status.as_u16(),
                errors,
            });
        }

        let text = response.text().await?;
        if text.is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&text)?))
    }
}

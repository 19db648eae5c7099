//! Shared login/revoke exchange helpers.

use serde_json::Value;

use crate::client::{Secret, Session};
use crate::{Error, Result};

const REVOKE_PATH: &str = "auth/token/revoke-self";

/// Perform one login write against `auth/<mount>/login[/<extra>]`.
///
/// `extra` carries the identity segment for methods that embed it in the
/// URL path (app-id, userpass); it is empty for the others.
pub(crate) async fn remote_auth(
    session: &Session,
    mount: &str,
    extra: &str,
    body: Value,
) -> Result<Secret> {
    let path = if extra.is_empty() {
        format!("auth/{mount}/login")
    } else {
        format!("auth/{mount}/login/{extra}")
    };

    let secret = session
        .write(&path, Some(body))
        .await
        .map_err(|e| Error::Exchange {
            path: path.clone(),
            source: Box::new(e),
        })?;

    secret.ok_or_else(|| Error::Exchange {
        path,
        source: Box::new(Error::auth("login response was empty")),
    })
}

/// Best-effort self-revocation: write to the revoke endpoint, then clear the
/// session token regardless of the outcome. The write error, if any, is
/// returned after the clear.
pub(crate) async fn revoke_token(session: &mut Session) -> Result<()> {
    let result = session.write(REVOKE_PATH, None).await;

    session.clear_token();

    result.map(|_| ()).map_err(|e| Error::Exchange {
        path: REVOKE_PATH.to_string(),
        source: Box::new(e),
    })
}

//! Authentication strategies for acquiring a Vault token.
//!
//! Provides one strategy per supported auth method:
//! - **Token**: explicit token, `$VAULT_TOKEN`, or the `~/.vault-token` file
//! - **AppRole**: role id / secret id exchange
//! - **GitHub**: personal access token exchange
//! - **UserPass**: username / password exchange
//! - **Kubernetes**: service-account token exchange
//! - **AppId**: deprecated legacy app id / user id exchange
//!
//! [`EnvAuthMethod`] negotiates across all of them in priority order,
//! remembering the winner so logout reverses exactly what login did.

mod app_id;
mod approle;
mod capability;
mod chain;
mod exchange;
mod github;
mod kubernetes;
mod method;
mod token;
mod userpass;

pub use app_id::AppIdAuth;
pub use approle::AppRoleAuth;
pub use capability::{AuthConfigurable, SupportsAuthConfiguration, with_auth_method};
pub use chain::EnvAuthMethod;
pub use github::GitHubAuth;
pub use kubernetes::KubernetesAuth;
pub use method::AuthMethod;
pub use token::TokenAuth;
pub use userpass::UserPassAuth;

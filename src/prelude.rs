//! Prelude module for convenient imports.
//!
//! Re-exports the types and traits most callers need to negotiate a Vault
//! token.
//!
//! # Usage
//!
//! ```rust
//! use vault_auth::prelude::*;
//! ```

pub use crate::Error;
pub use crate::ErrorCategory;
pub use crate::Result;

// Strategies and the negotiator
pub use crate::auth::{
    AppIdAuth, AppRoleAuth, AuthMethod, EnvAuthMethod, GitHubAuth, KubernetesAuth, TokenAuth,
    UserPassAuth,
};

// Session and transport
pub use crate::client::{Secret, Session, VaultHttp, VaultTransport};

// Environment sources
pub use crate::env::{EnvSource, MemoryEnv, OsEnv};

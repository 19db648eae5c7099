//! Optional auth-configuration capability.
//!
//! Generic code often holds a backend handle without knowing whether that
//! backend can be configured with a custom auth method. The capability is
//! modeled as a narrow optional interface: the entry point queries for it
//! and falls back to a no-op when absent.

use super::AuthMethod;

/// Backends that can be configured with a custom auth method.
///
/// Note that configuring one is not required when `$VAULT_TOKEN` is set.
pub trait SupportsAuthConfiguration {
    /// Install `method` as the backend's auth method.
    fn set_auth_method(&mut self, method: Box<dyn AuthMethod>);
}

/// Capability query for [`SupportsAuthConfiguration`].
///
/// Implement this on any handle type that may wrap an auth-configurable
/// backend; the default answer is "no capability".
pub trait AuthConfigurable {
    fn auth_configuration(&mut self) -> Option<&mut dyn SupportsAuthConfiguration> {
        None
    }
}

/// Configure `target` with `method` if it supports auth configuration.
///
/// Returns `true` when the method was installed; otherwise the target is
/// left untouched and `false` is returned.
pub fn with_auth_method<T>(target: &mut T, method: Box<dyn AuthMethod>) -> bool
where
    T: AuthConfigurable + ?Sized,
{
    match target.auth_configuration() {
        Some(configurable) => {
            configurable.set_auth_method(method);
            true
        }
        None => false,
    }
}

//! Environment and file lookups behind an injectable source.
//!
//! Every configuration value a strategy needs resolves through the same
//! layered rule: explicit value, then environment variable, then default,
//! first non-empty wins. The environment is read through [`EnvSource`] so
//! lookups can be virtualized in tests instead of touching process state.

mod memory;
mod os;

pub use memory::MemoryEnv;
pub use os::OsEnv;

use std::fmt::Debug;
use std::io;
use std::path::{Path, PathBuf};

/// Source of environment variables and local files.
///
/// Implementations must be cheap to query; every login re-reads from
/// scratch, nothing is cached across calls.
pub trait EnvSource: Send + Sync + Debug {
    /// Look up a single named variable. `None` means unset.
    fn var(&self, name: &str) -> Option<String>;

    /// Read the full contents of a file.
    fn read_file(&self, path: &Path) -> io::Result<String>;

    /// The user's home directory, if one can be determined.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Look up `name` through `source`, honoring `<NAME>_FILE` indirection: when
/// the variable itself is unset but `<NAME>_FILE` names a readable file, the
/// file's contents (trailing whitespace trimmed) are the value.
pub fn lookup(source: &dyn EnvSource, name: &str) -> Option<String> {
    if let Some(value) = source.var(name)
        && !value.is_empty()
    {
        return Some(value);
    }

    let file_var = format!("{name}_FILE");
    let path = source.var(&file_var).filter(|p| !p.is_empty())?;
    let contents = source.read_file(Path::new(&path)).ok()?;

    Some(contents.trim_end().to_string())
}

/// Resolve a configuration value: explicit > environment > default.
///
/// Explicit values are returned unchanged, with no trimming or validation.
/// An empty result means "unset"; validation belongs to the caller.
pub fn resolve_value(explicit: &str, env_var: &str, default: &str, source: &dyn EnvSource) -> String {
    if !explicit.is_empty() {
        return explicit.to_string();
    }

    if let Some(value) = lookup(source, env_var)
        && !value.is_empty()
    {
        return value;
    }

    default.to_string()
}

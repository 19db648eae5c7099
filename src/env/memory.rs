//! In-memory environment source for tests and sandboxed lookups.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use super::EnvSource;

/// Map-backed [`EnvSource`] with virtual files and an optional fake home
/// directory. Lookups never touch process state, so tests using it can run
/// in parallel.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnv {
    vars: HashMap<String, String>,
    files: HashMap<PathBuf, String>,
    home: Option<PathBuf>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Place a virtual file at `path`.
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Set the home directory reported by [`EnvSource::home_dir`].
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }
}

impl EnvSource for MemoryEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such file: {path:?}"))
        })
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}

//! Process environment source.

use std::io;
use std::path::{Path, PathBuf};

use directories::UserDirs;

use super::EnvSource;

/// [`EnvSource`] backed by the real process environment and filesystem.
#[derive(Debug, Clone, Default)]
pub struct OsEnv;

impl OsEnv {
    pub fn new() -> Self {
        Self
    }
}

impl EnvSource for OsEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }
}

//! Test helpers for unit tests
//!
//! Guards that change process-wide state (working directory, environment)
//! for the duration of a test and restore it on drop. Tests using them must
//! be marked `#[serial]`. For integration tests, see
//! `tests/integration_test_helpers.rs`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Changes the current directory and restores the original when dropped,
/// even if the test panics.
pub struct DirGuard {
    original_dir: PathBuf,
}

impl DirGuard {
    /// Create `path` if needed and change into it.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let path = path.as_ref();
        fs::create_dir_all(path)?;
        let original_dir = std::env::current_dir()?;
        std::env::set_current_dir(path)?;
        Ok(DirGuard { original_dir })
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

/// Sets (or removes) an environment variable and restores the previous
/// value when dropped.
pub struct EnvGuard {
    key: &'static str,
    previous: Option<OsString>,
}

impl EnvGuard {
    pub fn set(key: &'static str, value: &str) -> Self {
        let previous = std::env::var_os(key);
        std::env::set_var(key, value);
        EnvGuard { key, previous }
    }

    pub fn remove(key: &'static str) -> Self {
        let previous = std::env::var_os(key);
        std::env::remove_var(key);
        EnvGuard { key, previous }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.previous {
            Some(value) => std::env::set_var(self.key, value),
            None => std::env::remove_var(self.key),
        }
    }
}

//! Locating the external shader compiler executable
//!
//! The search-path scan is OS-coupled, so it sits behind a small trait
//! that tests can swap for a fixed-path implementation.

use std::ffi::OsString;
use std::path::PathBuf;

/// Name of the dxc executable on this platform
#[cfg(windows)]
pub const DXC_EXE: &str = "dxc.exe";
#[cfg(not(windows))]
pub const DXC_EXE: &str = "dxc";

/// Finds an executable by name
pub trait ExecutableLocator {
    /// Full path to the executable, or None if it cannot be found
    fn locate(&self, exe_name: &str) -> Option<PathBuf>;
}

/// Locator that scans the process environment's search-path variable.
///
/// The variable key is matched case-insensitively since its casing is
/// not predictable across platforms and shells. The first directory
/// containing the executable wins.
#[derive(Debug, Default)]
pub struct PathEnvLocator;

impl PathEnvLocator {
    pub fn new() -> Self {
        Self
    }

    fn search_path(&self) -> Option<OsString> {
        std::env::vars_os().find_map(|(key, value)| {
            let key = key.to_string_lossy();
            key.eq_ignore_ascii_case("path").then_some(value)
        })
    }
}

impl ExecutableLocator for PathEnvLocator {
    fn locate(&self, exe_name: &str) -> Option<PathBuf> {
        let search_path = self.search_path()?;
        std::env::split_paths(&search_path)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.join(exe_name))
            .find(|candidate| candidate.is_file())
    }
}

/// Locator returning a fixed path, for tests
#[derive(Debug)]
pub struct FixedLocator {
    path: Option<PathBuf>,
}

impl FixedLocator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A locator that never finds anything
    pub fn missing() -> Self {
        Self { path: None }
    }
}

impl ExecutableLocator for FixedLocator {
    fn locate(&self, _exe_name: &str) -> Option<PathBuf> {
        self.path.clone()
    }
}

//! HLSL header dependency resolution
//!
//! Scans shader sources for `#include` directives and resolves them
//! against the file's own directory and the configured include
//! directories. Results are cached per file by modification time so a
//! build only rescans files that changed.
//!
//! The cache is owned by one build invocation and passed by reference;
//! there is no process-global state.

use crate::error::{BuildError, BuildResult};
use std::collections::{BTreeSet, HashMap};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;
use tracing::debug;

/// Cached scan result for one source file
#[derive(Debug, Clone)]
struct CacheEntry {
    mtime: SystemTime,
    result: BTreeSet<PathBuf>,
}

/// Per-build dependency cache, keyed by source file path
#[derive(Debug, Default)]
pub struct DependencyCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl DependencyCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the set of headers `file` includes, directly or through
    /// other scans of the same file earlier in this build.
    ///
    /// Unresolved includes are skipped without error; the compiler
    /// reports truly missing headers itself. I/O errors reading `file`
    /// propagate.
    pub async fn get_dependencies(
        &mut self,
        file: &Path,
        include_dirs: &[PathBuf],
    ) -> BuildResult<BTreeSet<PathBuf>> {
        debug!("Checking header dependencies for {}", file.display());

        let metadata = fs::metadata(file)
            .await
            .map_err(|e| BuildError::io(format!("reading metadata of {}", file.display()), e))?;
        let mtime = metadata
            .modified()
            .map_err(|e| BuildError::io(format!("reading mtime of {}", file.display()), e))?;

        // Reuse the entry while the recorded mtime has not gone
        // backward. Equal mtimes reuse the entry even if the contents
        // were rewritten within the filesystem clock's resolution; this
        // matches the staleness model of the rest of the build.
        if let Some(entry) = self.entries.get(file) {
            if mtime <= entry.mtime {
                return Ok(entry.result.clone());
            }
        }

        let bytes = fs::read(file)
            .await
            .map_err(|e| BuildError::io(format!("reading {}", file.display()), e))?;
        let contents = String::from_utf8_lossy(&bytes);

        let mut result = BTreeSet::new();
        let own_dir = file.parent().map(Path::to_path_buf).unwrap_or_default();

        for header in contents.lines().filter_map(parse_include) {
            for dir in std::iter::once(&own_dir).chain(include_dirs) {
                let candidate = dir.join(header);
                match fs::metadata(&candidate).await {
                    Ok(meta) if !meta.is_dir() => {
                        result.insert(normalize(&candidate));
                    }
                    _ => {}
                }
            }
        }

        self.entries.insert(
            file.to_path_buf(),
            CacheEntry {
                mtime,
                result: result.clone(),
            },
        );

        Ok(result)
    }
}

/// Parse one line as an include directive.
///
/// Accepts `#include "name"` and `#include <name>` with optional
/// leading whitespace and whitespace after the `#`; at least one
/// whitespace character must separate `include` from the delimiter.
fn parse_include(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('#')?;
    let rest = rest.trim_start().strip_prefix("include")?;

    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() {
        return None;
    }

    let close = match trimmed.chars().next()? {
        '"' => '"',
        '<' => '>',
        _ => return None,
    };

    let name = &trimmed[1..trimmed[1..].find(close)? + 1];
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    Some(name)
}

/// Lexically normalize a path: fold `.` away and collapse `..` into
/// the preceding component where possible. Does not touch the
/// filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component.as_os_str());
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

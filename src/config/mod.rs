//! Manifest loading for shaderbuild

pub mod schema;

pub use schema::{
    AssetCopy, CompileConfig, DebugLevel, Manifest, OptimizationLevel, ProjectConfig,
    StageEntryPoints, StageProfiles,
};

use crate::error::{BuildError, BuildResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Default manifest file name, looked up in the current directory
pub const MANIFEST_NAME: &str = "shaders.toml";

/// Load a manifest and resolve its relative paths against the
/// manifest's own directory.
pub async fn load_manifest(path: &Path) -> BuildResult<Manifest> {
    if !path.exists() {
        return Err(BuildError::ManifestNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| BuildError::io(format!("reading manifest {}", path.display()), e))?;

    let manifest: Manifest = toml::from_str(&content).map_err(|e| BuildError::ManifestInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let base = manifest_base_dir(path)?;
    debug!("Loaded manifest {} (base {})", path.display(), base.display());
    Ok(manifest.resolve_paths(&base))
}

/// Directory the manifest's relative paths are resolved against
fn manifest_base_dir(path: &Path) -> BuildResult<PathBuf> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
        _ => std::env::current_dir().map_err(|e| BuildError::io("getting current directory", e)),
    }
}

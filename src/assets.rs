//! Static asset copies run after a successful build
//!
//! Assets are copied flat (by basename) into their destination root.
//! A copy is skipped when the destination already exists and is not
//! older than the source, so repeated builds only touch changed files.

use crate::config::AssetCopy;
use crate::error::{BuildError, BuildResult};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

/// Run all configured asset copies. Returns the number of files
/// actually copied (skipped files don't count).
pub async fn copy_assets(assets: &[AssetCopy]) -> BuildResult<usize> {
    let mut copied = 0;
    for asset in assets {
        copied += copy_one(&asset.source, &asset.dest).await?;
    }
    Ok(copied)
}

async fn copy_one(source: &Path, dest_root: &Path) -> BuildResult<usize> {
    let metadata = fs::metadata(source)
        .await
        .map_err(|_| BuildError::PathNotFound(source.to_path_buf()))?;

    if metadata.is_dir() {
        let mut copied = 0;
        let mut entries = fs::read_dir(source)
            .await
            .map_err(|e| BuildError::io(format!("reading directory {}", source.display()), e))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| BuildError::io(format!("reading directory {}", source.display()), e))?
        {
            let path = entry.path();
            if path.is_file() {
                copied += copy_file(&path, dest_root).await?;
            }
        }
        Ok(copied)
    } else {
        copy_file(source, dest_root).await
    }
}

/// Copy one file into `dest_root`, newer-wins. Returns 1 if the file
/// was copied, 0 if it was up to date.
async fn copy_file(source: &Path, dest_root: &Path) -> BuildResult<usize> {
    let file_name = source
        .file_name()
        .ok_or_else(|| BuildError::PathNotFound(source.to_path_buf()))?;
    let dest = dest_root.join(file_name);

    if let Ok(dest_meta) = fs::metadata(&dest).await {
        let src_meta = fs::metadata(source)
            .await
            .map_err(|e| BuildError::io(format!("reading metadata of {}", source.display()), e))?;
        match (src_meta.modified(), dest_meta.modified()) {
            (Ok(src_mtime), Ok(dest_mtime)) if src_mtime <= dest_mtime => {
                debug!("Asset up to date: {}", dest.display());
                return Ok(0);
            }
            _ => {}
        }
    }

    fs::create_dir_all(dest_root)
        .await
        .map_err(|e| BuildError::io(format!("creating directory {}", dest_root.display()), e))?;

    info!("Copying asset {} -> {}", source.display(), dest.display());
    fs::copy(source, &dest)
        .await
        .map_err(|e| BuildError::io(format!("copying {}", source.display()), e))?;
    Ok(1)
}

//! Clean command - remove compiled shader artifacts

use crate::config::Manifest;
use crate::error::{BuildError, BuildResult};
use crate::ui;
use tokio::fs;
use tracing::info;

/// Execute the clean command
pub async fn execute(manifest: &Manifest) -> BuildResult<()> {
    let output_dir = manifest.shader_output_dir();

    if !output_dir.exists() {
        ui::step_skip("Nothing to clean");
        return Ok(());
    }

    info!("Removing {}", output_dir.display());
    fs::remove_dir_all(&output_dir)
        .await
        .map_err(|e| BuildError::io(format!("removing {}", output_dir.display()), e))?;

    ui::step_ok_detail("Cleaned shader output", &output_dir.display().to_string());
    Ok(())
}

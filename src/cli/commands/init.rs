//! Init command - create a starter shaders.toml

use crate::cli::args::InitArgs;
use crate::config::MANIFEST_NAME;
use crate::error::{BuildError, BuildResult};
use crate::ui;
use tokio::fs;

/// Template for the project manifest
const INIT_TEMPLATE: &str = r#"# Shaderbuild project manifest
# Shader files are named by stage: Name.vs.hlsl, Name.ps.hlsl,
# Name.gs.hlsl, Name.hs.hlsl, Name.ds.hlsl, Name.cs.hlsl

[project]
name = "shaders"
sources = ["Shaders"]
output_dir = "build"
# context = "d3d12"        # optional subdirectory under build/shaders

[compile]
optimization = "disabled"  # disabled, size, speed, max
debug = "disabled"         # disabled, embedded-symbols, external-symbols, external-symbols-plus
defines = []
include_dirs = []
custom_flags = []

# [profiles]
# compute = "cs_6_6"

# [entry_points]
# compute = "Main"

# [[assets]]
# source = "Assets/Meshes"
# dest = "build/assets"
"#;

/// Execute the init command
pub async fn execute(args: InitArgs) -> BuildResult<()> {
    let target_dir = match args.path {
        Some(ref p) => p.clone(),
        None => {
            std::env::current_dir().map_err(|e| BuildError::io("getting current directory", e))?
        }
    };

    let manifest_path = target_dir.join(MANIFEST_NAME);

    if manifest_path.exists() && !args.force {
        return Err(BuildError::User(format!(
            "{} already exists. Use --force to overwrite.",
            manifest_path.display()
        )));
    }

    if !target_dir.exists() {
        fs::create_dir_all(&target_dir)
            .await
            .map_err(|e| BuildError::io(format!("creating directory {}", target_dir.display()), e))?;
    }

    fs::write(&manifest_path, INIT_TEMPLATE)
        .await
        .map_err(|e| BuildError::io(format!("writing {}", manifest_path.display()), e))?;

    ui::step_ok_detail("Created manifest", &manifest_path.display().to_string());
    Ok(())
}

//! Build command - compile every shader in the project

use crate::cli::args::BuildArgs;
use crate::compiler::{CompileJob, HlslCompiler, PathEnvLocator};
use crate::config::Manifest;
use crate::deps::DependencyCache;
use crate::error::{BuildError, BuildResult};
use crate::assets;
use crate::ui::{self, CompileProgress, UiContext};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;
use tracing::{debug, info};

/// Execute the build command
pub async fn execute(args: BuildArgs, manifest: &Manifest) -> BuildResult<()> {
    let ctx = UiContext::detect();

    let compiler = HlslCompiler::new(manifest, &PathEnvLocator::new())?;
    let sources = discover_sources(&manifest.project.sources).await?;

    if sources.is_empty() {
        ui::step_skip("No shader sources found");
        return Ok(());
    }

    fs::create_dir_all(compiler.output_dir()).await.map_err(|e| {
        BuildError::io(
            format!("creating directory {}", compiler.output_dir().display()),
            e,
        )
    })?;

    let mut cache = DependencyCache::new();
    let mut progress = CompileProgress::new(&ctx, &manifest.project.name, sources.len() as u64);
    let mut compiled = 0;

    for source in &sources {
        progress.on_file(source);

        let job = compiler.job(source)?;
        let deps = cache
            .get_dependencies(source, compiler.include_dirs())
            .await?;

        if !args.force && up_to_date(source, &deps, &job).await {
            debug!("Up to date: {}", source.display());
            continue;
        }

        compiler.run(&job).await?;
        compiled += 1;
    }

    progress.finish();

    let copied = assets::copy_assets(&manifest.assets).await?;
    if copied > 0 {
        info!("Copied {} asset file(s)", copied);
    }

    ui::step_ok_detail(
        "Build finished",
        &format!("{} compiled, {} up to date", compiled, sources.len() - compiled),
    );
    Ok(())
}

/// Collect .hlsl files under the configured source paths, sorted for
/// reproducible build order.
pub async fn discover_sources(paths: &[PathBuf]) -> BuildResult<Vec<PathBuf>> {
    let mut sources = BTreeSet::new();

    for path in paths {
        let metadata = match fs::metadata(path).await {
            Ok(meta) => meta,
            // Configured source dirs may not exist in every checkout
            Err(_) => {
                debug!("Source path does not exist: {}", path.display());
                continue;
            }
        };

        if metadata.is_dir() {
            collect_dir(path, &mut sources).await?;
        } else if is_shader_source(path) {
            sources.insert(path.clone());
        }
    }

    Ok(sources.into_iter().collect())
}

async fn collect_dir(root: &Path, sources: &mut BTreeSet<PathBuf>) -> BuildResult<()> {
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|e| BuildError::io(format!("reading directory {}", dir.display()), e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| BuildError::io(format!("reading directory {}", dir.display()), e))?
        {
            let path = entry.path();
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| BuildError::io(format!("reading type of {}", path.display()), e))?;

            if file_type.is_dir() {
                pending.push(path);
            } else if is_shader_source(&path) {
                sources.insert(path);
            }
        }
    }

    Ok(())
}

fn is_shader_source(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".hlsl"))
}

/// A shader is up to date when every output exists and none is older
/// than the source or any resolved header.
async fn up_to_date(source: &Path, deps: &BTreeSet<PathBuf>, job: &CompileJob) -> bool {
    let Some(newest_input) = newest_mtime(std::iter::once(source).chain(deps.iter().map(PathBuf::as_path))).await
    else {
        return false;
    };

    for output in job.outputs() {
        match fs::metadata(&output).await.and_then(|m| m.modified()) {
            Ok(out_mtime) if newest_input <= out_mtime => {}
            _ => return false,
        }
    }
    true
}

async fn newest_mtime<'a>(paths: impl Iterator<Item = &'a Path>) -> Option<SystemTime> {
    let mut newest = None;
    for path in paths {
        let mtime = fs::metadata(path).await.and_then(|m| m.modified()).ok()?;
        if newest.is_none_or(|current| current < mtime) {
            newest = Some(mtime);
        }
    }
    newest
}

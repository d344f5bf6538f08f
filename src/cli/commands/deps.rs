//! Deps command - print resolved header dependencies

use crate::cli::args::{DepsArgs, OutputFormat};
use crate::cli::commands::build::discover_sources;
use crate::config::Manifest;
use crate::deps::DependencyCache;
use crate::error::BuildResult;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Execute the deps command
pub async fn execute(args: DepsArgs, manifest: &Manifest) -> BuildResult<()> {
    let files = if args.files.is_empty() {
        discover_sources(&manifest.project.sources).await?
    } else {
        args.files
    };

    let mut cache = DependencyCache::new();
    let mut resolved: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();

    for file in &files {
        let deps = cache
            .get_dependencies(file, &manifest.compile.include_dirs)
            .await?;
        resolved.insert(file.clone(), deps.into_iter().collect());
    }

    match args.format {
        OutputFormat::Plain => {
            let single = resolved.len() == 1;
            for (file, deps) in &resolved {
                if !single {
                    println!("{}:", file.display());
                }
                for dep in deps {
                    if single {
                        println!("{}", dep.display());
                    } else {
                        println!("  {}", dep.display());
                    }
                }
            }
        }
        OutputFormat::Json => {
            let map: BTreeMap<String, Vec<String>> = resolved
                .iter()
                .map(|(file, deps)| {
                    (
                        file.display().to_string(),
                        deps.iter().map(|d| d.display().to_string()).collect(),
                    )
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
    }

    Ok(())
}

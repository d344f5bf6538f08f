//! Shaderbuild - HLSL Shader Build Driver
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use shaderbuild::cli::{Cli, Commands};
use shaderbuild::config::{self, MANIFEST_NAME};
use shaderbuild::error::BuildResult;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> BuildResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("shaderbuild=warn"),
        1 => EnvFilter::new("shaderbuild=info"),
        _ => EnvFilter::new("shaderbuild=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Init command doesn't need an existing manifest
    if let Commands::Init(args) = cli.command {
        return shaderbuild::cli::commands::init(args).await;
    }

    let manifest_path = cli
        .manifest
        .unwrap_or_else(|| PathBuf::from(MANIFEST_NAME));
    let manifest = config::load_manifest(&manifest_path).await?;

    match cli.command {
        Commands::Init(_) => unreachable!("Init handled above"),
        Commands::Build(args) => shaderbuild::cli::commands::build(args, &manifest).await,
        Commands::Deps(args) => shaderbuild::cli::commands::deps(args, &manifest).await,
        Commands::Clean => shaderbuild::cli::commands::clean(&manifest).await,
    }
}

//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shaderbuild - HLSL shader build driver
///
/// Compiles HLSL shaders with dxc, tracking header dependencies
/// so unchanged shaders are not rebuilt.
#[derive(Parser, Debug)]
#[command(name = "shaderbuild")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Manifest file path (defaults to ./shaders.toml)
    #[arg(short, long, global = true, env = "SHADERBUILD_MANIFEST")]
    pub manifest: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile all shaders in the project
    Build(BuildArgs),

    /// Show resolved header dependencies
    Deps(DepsArgs),

    /// Remove compiled shader artifacts
    Clean,

    /// Create a starter shaders.toml manifest
    Init(InitArgs),
}

/// Arguments for the build command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Recompile everything, ignoring up-to-date outputs
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the deps command
#[derive(Parser, Debug)]
pub struct DepsArgs {
    /// Shader files to inspect (defaults to all project sources)
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "plain")]
    pub format: OutputFormat,
}

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite existing shaders.toml
    #[arg(short, long)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

/// Output format for the deps command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// One path per line
    Plain,
    /// JSON object keyed by source file
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_build() {
        let cli = Cli::parse_from(["shaderbuild", "build", "--force"]);
        match cli.command {
            Commands::Build(args) => assert!(args.force),
            _ => panic!("expected Build command"),
        }
    }

    #[test]
    fn cli_parses_deps_with_files() {
        let cli = Cli::parse_from(["shaderbuild", "deps", "Foo.ps.hlsl", "--format", "json"]);
        match cli.command {
            Commands::Deps(args) => {
                assert_eq!(args.files, vec![PathBuf::from("Foo.ps.hlsl")]);
                assert!(matches!(args.format, OutputFormat::Json));
            }
            _ => panic!("expected Deps command"),
        }
    }

    #[test]
    fn cli_parses_clean() {
        let cli = Cli::parse_from(["shaderbuild", "clean"]);
        assert!(matches!(cli.command, Commands::Clean));
    }

    #[test]
    fn cli_manifest_flag_is_global() {
        let cli = Cli::parse_from(["shaderbuild", "build", "--manifest", "demo/shaders.toml"]);
        assert_eq!(cli.manifest, Some(PathBuf::from("demo/shaders.toml")));
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["shaderbuild", "build"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["shaderbuild", "-vv", "build"]);
        assert_eq!(cli.verbose, 2);
    }
}

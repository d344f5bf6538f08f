//! Invocation builder for the external dxc shader compiler
//!
//! Maps project settings to a dxc command line and runs it once per
//! shader file. The argument order is fixed so invocations are
//! reproducible across runs.

pub mod locate;

pub use locate::{ExecutableLocator, FixedLocator, PathEnvLocator, DXC_EXE};

use crate::config::{
    CompileConfig, DebugLevel, Manifest, OptimizationLevel, StageEntryPoints, StageProfiles,
};
use crate::error::{BuildError, BuildResult};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// GPU pipeline stage a shader source file targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Pixel,
    Geometry,
    Hull,
    Domain,
    Compute,
}

impl ShaderStage {
    const ALL: [ShaderStage; 6] = [
        Self::Vertex,
        Self::Pixel,
        Self::Geometry,
        Self::Hull,
        Self::Domain,
        Self::Compute,
    ];

    /// Filename suffix marking this stage, e.g. `.cs.hlsl`
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Vertex => ".vs.hlsl",
            Self::Pixel => ".ps.hlsl",
            Self::Geometry => ".gs.hlsl",
            Self::Hull => ".hs.hlsl",
            Self::Domain => ".ds.hlsl",
            Self::Compute => ".cs.hlsl",
        }
    }

    /// Infer the stage from a file's naming convention
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        Self::ALL.into_iter().find(|stage| name.ends_with(stage.suffix()))
    }
}

/// One shader compilation: input, inferred stage, output artifacts
#[derive(Debug, Clone)]
pub struct CompileJob {
    pub input: PathBuf,
    pub stage: ShaderStage,
    pub binary: PathBuf,
    pub debug_info: Option<PathBuf>,
}

impl CompileJob {
    /// All artifact paths this job produces
    pub fn outputs(&self) -> Vec<PathBuf> {
        let mut outputs = vec![self.binary.clone()];
        if let Some(ref pdb) = self.debug_info {
            outputs.push(pdb.clone());
        }
        outputs
    }
}

/// Builds and runs dxc invocations for one project
pub struct HlslCompiler {
    exe_path: PathBuf,
    project: String,
    compile: CompileConfig,
    profiles: StageProfiles,
    entry_points: StageEntryPoints,
    output_dir: PathBuf,
}

impl HlslCompiler {
    /// Set up a compiler for the project described by `manifest`.
    ///
    /// Fails when the dxc executable cannot be located; the build
    /// cannot proceed without a compiler.
    pub fn new(manifest: &Manifest, locator: &dyn ExecutableLocator) -> BuildResult<Self> {
        let exe_path = locator
            .locate(DXC_EXE)
            .ok_or_else(|| BuildError::CompilerNotFound {
                exe: DXC_EXE.to_string(),
            })?;
        debug!("Using shader compiler at {}", exe_path.display());

        Ok(Self {
            exe_path,
            project: manifest.project.name.clone(),
            compile: manifest.compile.clone(),
            profiles: manifest.profiles.clone(),
            entry_points: manifest.entry_points.clone(),
            output_dir: manifest.shader_output_dir(),
        })
    }

    /// Include directories the dependency scanner probes after the
    /// file's own directory
    pub fn include_dirs(&self) -> &[PathBuf] {
        &self.compile.include_dirs
    }

    /// Directory receiving compiled artifacts
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Describe the compilation of `input`: inferred stage plus the
    /// artifact paths. A file matching no stage suffix is a
    /// configuration error.
    pub fn job(&self, input: &Path) -> BuildResult<CompileJob> {
        let stage = ShaderStage::from_path(input)
            .ok_or_else(|| BuildError::UnknownShaderStage(input.to_path_buf()))?;

        let name = input
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| BuildError::UnknownShaderStage(input.to_path_buf()))?;
        // from_path already proved the suffix is present
        let stem = name.strip_suffix(stage.suffix()).unwrap_or(name);

        let binary = self.output_dir.join(format!("{stem}.sbin"));
        let debug_info = self
            .compile
            .debug
            .external_symbols()
            .then(|| self.output_dir.join(format!("{stem}.pdb")));

        Ok(CompileJob {
            input: input.to_path_buf(),
            stage,
            binary,
            debug_info,
        })
    }

    /// Full dxc argument vector for `job`, in fixed order: defaults,
    /// optimization, debug, entry point, profile, custom flags,
    /// defines, include directories, output files, input file.
    pub fn command_args(&self, job: &CompileJob) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-nologo".into()];

        args.push(self.optimization_arg().into());
        args.extend(self.debug_args().iter().map(|&a| a.into()));

        args.push("-E".into());
        args.push(self.entry_points.get(job.stage).into());
        args.push("-T".into());
        args.push(self.profiles.get(job.stage).into());

        args.extend(self.compile.custom_flags.iter().map(Into::into));

        for define in &self.compile.defines {
            args.push("-D".into());
            args.push(define.into());
        }
        for dir in &self.compile.include_dirs {
            args.push("-I".into());
            args.push(dir.into());
        }

        args.push("-Fo".into());
        args.push(job.binary.clone().into());
        if let Some(ref pdb) = job.debug_info {
            args.push("-Fd".into());
            args.push(pdb.clone().into());
        }

        args.push(job.input.clone().into());
        args
    }

    /// Run dxc for `job`, synchronously from the build's point of
    /// view. Stdout/stderr are inherited; only the exit code is
    /// interpreted.
    pub async fn run(&self, job: &CompileJob) -> BuildResult<Vec<PathBuf>> {
        info!("Compiling {}", job.input.display());

        let status = Command::new(&self.exe_path)
            .args(self.command_args(job))
            .status()
            .await
            .map_err(|e| BuildError::io(format!("running {}", self.exe_path.display()), e))?;

        match status.code() {
            Some(0) => Ok(job.outputs()),
            Some(code) => Err(BuildError::CompileFailed {
                project: self.project.clone(),
                file: job.input.clone(),
                code,
            }),
            None => Err(BuildError::CompilerSignaled {
                file: job.input.clone(),
            }),
        }
    }

    fn optimization_arg(&self) -> &'static str {
        match self.compile.optimization {
            OptimizationLevel::Size => "-O1",
            OptimizationLevel::Speed => "-O2",
            OptimizationLevel::Max => "-O3",
            _ => "-Od",
        }
    }

    fn debug_args(&self) -> &'static [&'static str] {
        match self.compile.debug {
            DebugLevel::Disabled => &["-Qstrip_debug", "-Qstrip_reflect"],
            DebugLevel::EmbeddedSymbols => &["-Zi", "-Qembed_debug"],
            // External symbols, written to a separate .pdb via -Fd
            _ => &["-Zi"],
        }
    }
}

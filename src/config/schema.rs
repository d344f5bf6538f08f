//! Manifest schema for shaderbuild
//!
//! Projects are described by a `shaders.toml` manifest next to the
//! shader sources. Every field has a default so an empty manifest is
//! valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::compiler::ShaderStage;

/// Root manifest structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Project identity and layout
    pub project: ProjectConfig,

    /// Compiler settings
    pub compile: CompileConfig,

    /// Target profile per shader stage
    pub profiles: StageProfiles,

    /// Entry point name per shader stage
    pub entry_points: StageEntryPoints,

    /// Static asset copies run after a successful build
    pub assets: Vec<AssetCopy>,
}

/// Project identity and layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project name, reported in build failures
    pub name: String,

    /// Directories (or individual files) scanned for .hlsl sources
    pub sources: Vec<PathBuf>,

    /// Root directory for build artifacts
    pub output_dir: PathBuf,

    /// Optional subdirectory under `<output_dir>/shaders` for artifacts
    pub context: Option<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "shaders".to_string(),
            sources: vec![PathBuf::from("Shaders")],
            output_dir: PathBuf::from("build"),
            context: None,
        }
    }
}

/// Compiler settings shared by every shader in the project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    /// Optimization level
    pub optimization: OptimizationLevel,

    /// Debug symbol level
    pub debug: DebugLevel,

    /// Preprocessor defines passed with -D
    pub defines: Vec<String>,

    /// Header include directories passed with -I
    pub include_dirs: Vec<PathBuf>,

    /// Extra flags appended verbatim after the standard ones
    pub custom_flags: Vec<String>,
}

/// Optimization level, mapped to a single dxc flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizationLevel {
    #[default]
    Disabled,
    Size,
    Speed,
    Max,
}

/// Debug symbol level, mapped to dxc flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DebugLevel {
    #[default]
    Disabled,
    EmbeddedSymbols,
    ExternalSymbols,
    ExternalSymbolsPlus,
}

impl DebugLevel {
    /// Whether symbols are written to a separate .pdb artifact
    pub fn external_symbols(self) -> bool {
        matches!(self, Self::ExternalSymbols | Self::ExternalSymbolsPlus)
    }
}

/// Target profile per shader stage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StageProfiles {
    pub vertex: String,
    pub pixel: String,
    pub geometry: String,
    pub hull: String,
    pub domain: String,
    pub compute: String,
}

impl Default for StageProfiles {
    fn default() -> Self {
        Self {
            vertex: "vs_6_0".to_string(),
            pixel: "ps_6_0".to_string(),
            geometry: "gs_6_0".to_string(),
            hull: "hs_6_0".to_string(),
            domain: "ds_6_0".to_string(),
            compute: "cs_6_0".to_string(),
        }
    }
}

impl StageProfiles {
    /// Profile string for a stage
    pub fn get(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Pixel => &self.pixel,
            ShaderStage::Geometry => &self.geometry,
            ShaderStage::Hull => &self.hull,
            ShaderStage::Domain => &self.domain,
            ShaderStage::Compute => &self.compute,
        }
    }
}

/// Entry point name per shader stage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StageEntryPoints {
    pub vertex: String,
    pub pixel: String,
    pub geometry: String,
    pub hull: String,
    pub domain: String,
    pub compute: String,
}

impl Default for StageEntryPoints {
    fn default() -> Self {
        Self {
            vertex: "VertexMain".to_string(),
            pixel: "PixelMain".to_string(),
            geometry: "GeometryMain".to_string(),
            hull: "HullMain".to_string(),
            domain: "DomainMain".to_string(),
            compute: "ComputeMain".to_string(),
        }
    }
}

impl StageEntryPoints {
    /// Entry point name for a stage
    pub fn get(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Pixel => &self.pixel,
            ShaderStage::Geometry => &self.geometry,
            ShaderStage::Hull => &self.hull,
            ShaderStage::Domain => &self.domain,
            ShaderStage::Compute => &self.compute,
        }
    }
}

/// A single asset copy: every file under `source` (or the file itself)
/// is copied flat into `dest`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetCopy {
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl Manifest {
    /// Resolve all relative paths in the manifest against `base`,
    /// usually the directory containing the manifest file.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let absolutize = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };

        self.project.sources = self.project.sources.into_iter().map(absolutize).collect();
        self.project.output_dir = absolutize(self.project.output_dir);
        self.compile.include_dirs = self
            .compile
            .include_dirs
            .into_iter()
            .map(absolutize)
            .collect();
        for asset in &mut self.assets {
            let source = std::mem::take(&mut asset.source);
            let dest = std::mem::take(&mut asset.dest);
            asset.source = absolutize(source);
            asset.dest = absolutize(dest);
        }
        self
    }

    /// Directory receiving compiled shader artifacts:
    /// `<output_dir>/shaders[/<context>]`
    pub fn shader_output_dir(&self) -> PathBuf {
        let mut dir = self.project.output_dir.join("shaders");
        if let Some(ref context) = self.project.context {
            dir = dir.join(context);
        }
        dir
    }
}

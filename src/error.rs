//! Error types for shaderbuild
//!
//! All modules use `BuildResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for shaderbuild operations
pub type BuildResult<T> = Result<T, BuildError>;

/// All errors that can occur in shaderbuild
#[derive(Error, Debug)]
pub enum BuildError {
    // Configuration errors
    #[error("Manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    #[error("Invalid manifest at {path}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    #[error("Unknown shader stage for file: {0}")]
    UnknownShaderStage(PathBuf),

    #[error("Shader compiler not found: {exe} is not on the search path")]
    CompilerNotFound { exe: String },

    // Compile errors
    #[error("Shader compilation failed for {file} in project {project} (exit code {code})")]
    CompileFailed {
        project: String,
        file: PathBuf,
        code: i32,
    },

    #[error("Compiler terminated by signal: {file}")]
    CompilerSignaled { file: PathBuf },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl BuildError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::CompilerNotFound { .. } => {
                Some("Install the DirectX Shader Compiler and make sure dxc is on your PATH")
            }
            Self::ManifestNotFound(_) => Some("Run: shaderbuild init"),
            Self::UnknownShaderStage(_) => {
                Some("Shader files must end in .vs.hlsl, .ps.hlsl, .gs.hlsl, .hs.hlsl, .ds.hlsl or .cs.hlsl")
            }
            _ => None,
        }
    }
}

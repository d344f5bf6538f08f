//! Shaderbuild - HLSL Shader Build Driver
//!
//! Compiles HLSL shaders with dxc, tracking header dependencies
//! so unchanged shaders are not rebuilt.

pub mod assets;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod deps;
pub mod error;
pub mod ui;

pub use error::{BuildError, BuildResult};

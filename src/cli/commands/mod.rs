//! CLI command implementations

pub mod build;
pub mod clean;
pub mod deps;
pub mod init;

pub use build::execute as build;
pub use clean::execute as clean;
pub use deps::execute as deps;
pub use init::execute as init;

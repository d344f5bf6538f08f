//! Terminal output helpers

pub mod context;
pub mod progress;

pub use context::UiContext;
pub use progress::CompileProgress;

use console::style;

/// Display a success step
pub fn step_ok(message: &str) {
    println!("  {} {}", style("[OK]").green(), message);
}

/// Display a success step with detail
pub fn step_ok_detail(message: &str, detail: &str) {
    println!("  {} {} ({})", style("[OK]").green(), message, detail);
}

/// Display a skipped step
pub fn step_skip(message: &str) {
    println!("  {} {}", style("[SKIP]").dim(), message);
}

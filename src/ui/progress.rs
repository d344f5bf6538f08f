//! Progress reporting for compile runs, with CI fallback

use super::context::UiContext;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Progress bar over the project's shader file list.
///
/// Shows an indicatif bar in interactive mode, plain text in CI.
pub struct CompileProgress {
    bar: Option<ProgressBar>,
    total: u64,
    done: u64,
}

impl CompileProgress {
    /// Create a progress indicator for `total` shader files
    pub fn new(ctx: &UiContext, project: &str, total: u64) -> Self {
        let bar = if ctx.use_fancy_output() {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("  {spinner:.cyan} Compiling {prefix}  {bar:20.cyan/dim} {pos}/{len} {msg:.dim}  {elapsed:.dim}")
                    .unwrap()
                    .progress_chars("━╸─"),
            );
            bar.set_prefix(project.to_string());
            Some(bar)
        } else {
            None
        };
        Self {
            bar,
            total,
            done: 0,
        }
    }

    /// Mark one shader as starting
    pub fn on_file(&mut self, file: &Path) {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.done += 1;

        if let Some(ref bar) = self.bar {
            bar.set_message(name);
            bar.set_position(self.done);
        } else {
            println!("  [{}/{}] {}", self.done, self.total, name);
        }
    }

    /// Finish and clear the progress bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

// Progress bar for reading the definition file, using indicatif.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;

#[derive(Clone, Copy)]
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    // Create a new manager. If enabled=false, no bars are created.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    // Create a bar for file-byte progress with a label.
    pub fn new_file_bar(&self, path: &Path, label: &str) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let bar = ProgressBar::new(size);
        if let Ok(style) = progress_style() {
            bar.set_style(style.progress_chars("█ "));
        }
        bar.set_prefix(label.to_string());
        Some(bar)
    }
}

fn progress_style() -> Result<ProgressStyle, indicatif::style::TemplateError> {
    ProgressStyle::with_template("{prefix:20} {bytes:>10}/{total_bytes:<10} [{bar:40}] {percent:>3}%")
}

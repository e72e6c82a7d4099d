use std::io;
use std::path::{Path, PathBuf};

/// Ordered list of segment files for the ffmpeg concat demuxer.
/// Exists only for the duration of one assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    entries: Vec<PathBuf>,
}

impl Manifest {
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// One `file '<path>'` line per entry, in order
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|path| format!("file '{}'\n", escape(path)))
            .collect()
    }

    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.render())
    }
}

/// Single quotes cannot appear inside a quoted concat path; close the quote,
/// emit an escaped quote and reopen.
fn escape(path: &Path) -> String {
    path.to_string_lossy().replace('\'', r"'\''")
}

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Lossless concatenation of already-encoded segments.
///
/// Implementations copy compressed frames in manifest order and never
/// re-encode; every segment must share the same codec parameters.
#[async_trait]
pub trait Concatenator: Send + Sync {
    async fn concat(&self, manifest: &Path, output: &Path) -> Result<(), String>;
}

/// Runs `ffmpeg -f concat -safe 0 -i <manifest> -c copy <output>`
pub struct FfmpegConcatenator {
    program: PathBuf,
}

impl FfmpegConcatenator {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }

    fn args(manifest: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-hide_banner",
            "-loglevel",
            "error",
            "-y",
            "-f",
            "concat",
            "-safe",
            "0",
            "-i",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        args.push(manifest.as_os_str().to_owned());
        args.extend(["-c", "copy"].iter().map(OsString::from));
        args.push(output.as_os_str().to_owned());
        args
    }

    /// Keep the last few meaningful stderr lines for the error message
    fn summarize_stderr(stderr: &str) -> String {
        let lines: Vec<&str> = stderr
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.is_empty() {
            return "no diagnostic output".to_string();
        }
        lines[lines.len().saturating_sub(5)..].join("; ")
    }
}

#[async_trait]
impl Concatenator for FfmpegConcatenator {
    async fn concat(&self, manifest: &Path, output: &Path) -> Result<(), String> {
        tracing::debug!(
            program = %self.program.display(),
            manifest = %manifest.display(),
            output = %output.display(),
            "Running concat demuxer"
        );

        let result = Command::new(&self.program)
            .args(Self::args(manifest, output))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| format!("Failed to run {}: {}", self.program.display(), e))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let summary = Self::summarize_stderr(&stderr);
            tracing::error!(
                status = %result.status,
                stderr = %summary,
                "ffmpeg concat failed"
            );
            return Err(format!("ffmpeg exited with {}: {}", result.status, summary));
        }

        Ok(())
    }
}

//! FFmpeg execution adapter
//!
//! Runs the `ffmpeg` program as a child process, one clip per invocation,
//! using stream copy so no re-encoding happens.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Lines of ffmpeg stderr kept in error messages
const STDERR_TAIL_LINES: usize = 5;

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    program: PathBuf,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter running `program`
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments for cutting `range` out of `input` into `output`
    ///
    /// `-ss`/`-to` are input options, so both are positions in the source
    /// timeline and the end is exclusive.
    pub fn clip_arguments(input: &Path, range: &ClipRange, output: &Path) -> Vec<String> {
        vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-y".to_string(),
            "-ss".to_string(),
            range.start.to_string(),
            "-to".to_string(),
            range.end.to_string(),
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-c".to_string(),
            "copy".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }

    fn stderr_tail(stderr: &[u8]) -> String {
        let text = String::from_utf8_lossy(stderr);
        let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
        let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
        lines[start..].join("\n")
    }
}

#[async_trait]
impl TranscodePort for FFmpegAdapter {
    async fn check_available(&self) -> Result<(), DomainError> {
        let output = Command::new(&self.program)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                DomainError::Transcode(format!(
                    "Failed to run '{}': {}. Is FFmpeg installed?",
                    self.program.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(DomainError::Transcode(format!(
                "'{} -version' exited with {}",
                self.program.display(),
                output.status
            )));
        }
        Ok(())
    }

    async fn extract(
        &self,
        input: &Path,
        range: &ClipRange,
        output: &Path,
    ) -> Result<(), DomainError> {
        let args = Self::clip_arguments(input, range, output);
        debug!(program = %self.program.display(), ?args, "Running transcoder");

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                DomainError::Transcode(format!(
                    "Failed to run '{}': {}",
                    self.program.display(),
                    e
                ))
            })?;

        if !result.status.success() {
            return Err(DomainError::Transcode(format!(
                "{} exited with {}: {}",
                self.program.display(),
                result.status,
                Self::stderr_tail(&result.stderr)
            )));
        }

        // The staging file may already exist empty, so require content
        let produced = tokio::fs::metadata(output)
            .await
            .map(|metadata| metadata.is_file() && metadata.len() > 0)
            .unwrap_or(false);
        if !produced {
            return Err(DomainError::Transcode(format!(
                "No output written to {}",
                output.display()
            )));
        }

        Ok(())
    }
}

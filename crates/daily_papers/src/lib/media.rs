//! External encoder seam. The pipeline only ever needs two fixed command
//! shapes: WAV -> MP3, and looped still image + MP3 -> MP4.

use std::{future::Future, path::Path};

use tokio::process::Command;

/// Narrow interface over the external audio/video encoder so the binary is a
/// substitutable collaborator.
pub trait Encoder {
    fn wav_to_mp3(&self, wav: &Path, mp3: &Path) -> impl Future<Output = anyhow::Result<()>> + Send;

    fn compose_video(
        &self,
        mp3: &Path,
        image: &Path,
        mp4: &Path,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum FfmpegError {
    #[error("encoder binary `{0}` not found on search path")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encoder exited with code {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },
    #[error("encoder did not produce expected file: {0}")]
    MissingOutput(String),
}

/// ffmpeg invoked as a subprocess, run to completion per call.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: String,
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegEncoder {
    pub fn new() -> Self {
        Self {
            program: "ffmpeg".into(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    async fn run(&self, cmd: &mut Command) -> Result<(), FfmpegError> {
        let output = cmd.output().await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FfmpegError::NotFound(self.program.clone()),
            _ => FfmpegError::Io(e),
        })?;

        if !output.status.success() {
            return Err(FfmpegError::Failed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn transcode_to_mp3(&self, wav: &Path, mp3: &Path) -> Result<(), FfmpegError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-y")
            .arg("-i")
            .arg(wav)
            .arg("-vn")
            .arg("-acodec")
            .arg("libmp3lame")
            .args(["-q:a", "2"])
            .arg(mp3);
        self.run(&mut cmd).await?;

        if !mp3.exists() {
            return Err(FfmpegError::MissingOutput(mp3.display().to_string()));
        }
        Ok(())
    }

    /// Loops the still image for the duration of the audio; the audio track
    /// is stream-copied, not re-encoded.
    #[tracing::instrument(skip(self))]
    async fn mux_video(&self, mp3: &Path, image: &Path, mp4: &Path) -> Result<(), FfmpegError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-y")
            .args(["-loop", "1"])
            .arg("-i")
            .arg(image)
            .arg("-i")
            .arg(mp3)
            .args(["-c:v", "libx264"])
            .args(["-c:a", "copy"])
            .arg("-shortest")
            .args(["-pix_fmt", "yuv420p"])
            .arg(mp4);
        self.run(&mut cmd).await?;

        if !mp4.exists() {
            return Err(FfmpegError::MissingOutput(mp4.display().to_string()));
        }
        Ok(())
    }
}

impl Encoder for FfmpegEncoder {
    async fn wav_to_mp3(&self, wav: &Path, mp3: &Path) -> anyhow::Result<()> {
        Ok(self.transcode_to_mp3(wav, mp3).await?)
    }

    async fn compose_video(&self, mp3: &Path, image: &Path, mp4: &Path) -> anyhow::Result<()> {
        Ok(self.mux_video(mp3, image, mp4).await?)
    }
}

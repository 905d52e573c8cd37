pub mod builder;

use std::path::{Path, PathBuf};

use anyhow::Context;
use arxiv_client::{Paper, PaperIndex};
use chrono::NaiveDate;

use crate::{
    config::PrivacyStatus,
    llm::{PaperSelector, ScriptWriter, SpeechSynthesizer},
    media::Encoder,
    upload::VideoHost,
};

// The core podcast generation pipeline: paper selection, script generation,
// speech synthesis, video composition, upload. Strictly sequential; any
// stage failure aborts the run.
pub struct PodcastPipeline<I, S, W, T, E, U>
where
    I: PaperIndex + Send + Sync + 'static,
    S: PaperSelector + Send + Sync + 'static,
    W: ScriptWriter + Send + Sync + 'static,
    T: SpeechSynthesizer + Send + Sync + 'static,
    E: Encoder + Send + Sync + 'static,
    U: VideoHost + Send + Sync + 'static,
{
    workdir: PathBuf,
    background_image: PathBuf,
    target_date: NaiveDate,
    max_candidates: usize,
    privacy: PrivacyStatus,
    upload_enabled: bool,
    index: I,
    selector: S,
    script_writer: W,
    synthesizer: T,
    encoder: E,
    video_host: U,
}

impl<I, S, W, T, E, U> PodcastPipeline<I, S, W, T, E, U>
where
    I: PaperIndex + Send + Sync + 'static,
    S: PaperSelector + Send + Sync + 'static,
    W: ScriptWriter + Send + Sync + 'static,
    T: SpeechSynthesizer + Send + Sync + 'static,
    E: Encoder + Send + Sync + 'static,
    U: VideoHost + Send + Sync + 'static,
{
    /// Queries the day's submission window and has the selection model pick
    /// one paper, which is then re-fetched by id for its full metadata.
    #[tracing::instrument(skip(self))]
    async fn pick_paper(&self) -> anyhow::Result<Paper> {
        let candidates = self
            .index
            .search_window(self.target_date, self.max_candidates)
            .await
            .context("Failed to search the preprint index")?;
        anyhow::ensure!(
            !candidates.is_empty(),
            "no candidate papers for {}",
            self.target_date
        );
        tracing::info!(count = candidates.len(), "Selecting from candidates");

        let selection = self
            .selector
            .select_paper(&candidates)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to select a paper: {e:?}"))?;

        self.index
            .fetch_by_id(&selection.arxiv_id)
            .await
            .context("Failed to fetch the selected paper")
    }

    #[tracing::instrument(skip(self))]
    async fn generate_script(&self, pdf_path: &Path) -> anyhow::Result<String> {
        let pdf = tokio::fs::read(pdf_path)
            .await
            .context("Failed to read downloaded PDF")?;

        let script = self
            .script_writer
            .write_script(&pdf)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to generate script: {e:?}"))?;
        anyhow::ensure!(
            !script.trim().is_empty(),
            "script generator returned an empty transcript"
        );

        Ok(script)
    }

    #[tracing::instrument(skip(self, script))]
    async fn generate_audio(&self, script: &str, wav_path: &Path) -> anyhow::Result<()> {
        let audio = self
            .synthesizer
            .synthesize(script)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to synthesize audio: {e:?}"))?;
        anyhow::ensure!(
            !audio.data.is_empty(),
            "synthesis stream carried no audio data"
        );

        let wav = audio.into_wav();
        tokio::fs::write(wav_path, &wav)
            .await
            .context("Failed to write WAV file")?;
        tracing::info!(bytes = wav.len(), path = %wav_path.display(), "Wrote audio");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(date = %self.target_date))]
    pub async fn run(self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.background_image.exists(),
            "background image not found: {}",
            self.background_image.display()
        );
        tokio::fs::create_dir_all(&self.workdir)
            .await
            .context("Failed to create working directory")?;

        let paper = self.pick_paper().await?;
        tracing::info!(arxiv_id = %paper.arxiv_id, title = %paper.title, "Paper chosen");

        let pdf_path = self.workdir.join("paper.pdf");
        self.index
            .download_pdf(&paper, &pdf_path)
            .await
            .context("Failed to download paper PDF")?;

        let script = self.generate_script(&pdf_path).await?;
        tokio::fs::write(self.workdir.join("transcript.txt"), &script)
            .await
            .context("Failed to write transcript")?;

        let wav_path = self.workdir.join("podcast.wav");
        self.generate_audio(&script, &wav_path).await?;

        let mp3_path = self.workdir.join("podcast.mp3");
        self.encoder
            .wav_to_mp3(&wav_path, &mp3_path)
            .await
            .context("Failed to transcode WAV to MP3")?;

        let mp4_path = self.workdir.join("podcast.mp4");
        self.encoder
            .compose_video(&mp3_path, &self.background_image, &mp4_path)
            .await
            .context("Failed to compose video")?;

        if self.upload_enabled {
            let video_id = self
                .video_host
                .upload(&mp4_path, &paper, self.privacy)
                .await
                .context("Failed to upload video")?;
            tracing::info!(%video_id, "Pipeline complete");
        } else {
            tracing::info!(video = %mp4_path.display(), "Pipeline complete, upload skipped");
        }

        Ok(())
    }
}

/// The upload stage is optional; the unit host stands in when it is
/// disabled and is never invoked.
impl VideoHost for () {
    async fn upload(
        &self,
        _video: &Path,
        _paper: &Paper,
        _privacy: PrivacyStatus,
    ) -> anyhow::Result<String> {
        anyhow::bail!("upload stage is disabled")
    }
}

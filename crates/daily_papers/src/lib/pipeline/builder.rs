use std::path::PathBuf;

use arxiv_client::PaperIndex;
use chrono::NaiveDate;

use crate::{
    config::{Config, PrivacyStatus},
    llm::{PaperSelector, ScriptWriter, SpeechSynthesizer},
    media::Encoder,
    upload::VideoHost,
    PodcastPipeline,
};

pub struct PodcastPipelineBuilder<I = (), S = (), W = (), T = (), E = (), U = ()> {
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

impl PodcastPipelineBuilder {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            background_image: PathBuf::from("assets/background.png"),
            target_date: Config::default_target_date(),
            max_candidates: 500,
            privacy: PrivacyStatus::Private,
            upload_enabled: false,
            index: (),
            selector: (),
            script_writer: (),
            synthesizer: (),
            encoder: (),
            video_host: (),
        }
    }
}

impl<I, S, W, T, E, U> PodcastPipelineBuilder<I, S, W, T, E, U> {
    pub fn index<I2: PaperIndex + Send + Sync + 'static>(
        self,
        index: I2,
    ) -> PodcastPipelineBuilder<I2, S, W, T, E, U> {
        PodcastPipelineBuilder {
            workdir: self.workdir,
            background_image: self.background_image,
            target_date: self.target_date,
            max_candidates: self.max_candidates,
            privacy: self.privacy,
            upload_enabled: self.upload_enabled,
            index,
            selector: self.selector,
            script_writer: self.script_writer,
            synthesizer: self.synthesizer,
            encoder: self.encoder,
            video_host: self.video_host,
        }
    }

    pub fn selector<S2: PaperSelector + Send + Sync + 'static>(
        self,
        selector: S2,
    ) -> PodcastPipelineBuilder<I, S2, W, T, E, U> {
        PodcastPipelineBuilder {
            workdir: self.workdir,
            background_image: self.background_image,
            target_date: self.target_date,
            max_candidates: self.max_candidates,
            privacy: self.privacy,
            upload_enabled: self.upload_enabled,
            index: self.index,
            selector,
            script_writer: self.script_writer,
            synthesizer: self.synthesizer,
            encoder: self.encoder,
            video_host: self.video_host,
        }
    }

    pub fn script_writer<W2: ScriptWriter + Send + Sync + 'static>(
        self,
        script_writer: W2,
    ) -> PodcastPipelineBuilder<I, S, W2, T, E, U> {
        PodcastPipelineBuilder {
            workdir: self.workdir,
            background_image: self.background_image,
            target_date: self.target_date,
            max_candidates: self.max_candidates,
            privacy: self.privacy,
            upload_enabled: self.upload_enabled,
            index: self.index,
            selector: self.selector,
            script_writer,
            synthesizer: self.synthesizer,
            encoder: self.encoder,
            video_host: self.video_host,
        }
    }

    pub fn synthesizer<T2: SpeechSynthesizer + Send + Sync + 'static>(
        self,
        synthesizer: T2,
    ) -> PodcastPipelineBuilder<I, S, W, T2, E, U> {
        PodcastPipelineBuilder {
            workdir: self.workdir,
            background_image: self.background_image,
            target_date: self.target_date,
            max_candidates: self.max_candidates,
            privacy: self.privacy,
            upload_enabled: self.upload_enabled,
            index: self.index,
            selector: self.selector,
            script_writer: self.script_writer,
            synthesizer,
            encoder: self.encoder,
            video_host: self.video_host,
        }
    }

    pub fn encoder<E2: Encoder + Send + Sync + 'static>(
        self,
        encoder: E2,
    ) -> PodcastPipelineBuilder<I, S, W, T, E2, U> {
        PodcastPipelineBuilder {
            workdir: self.workdir,
            background_image: self.background_image,
            target_date: self.target_date,
            max_candidates: self.max_candidates,
            privacy: self.privacy,
            upload_enabled: self.upload_enabled,
            index: self.index,
            selector: self.selector,
            script_writer: self.script_writer,
            synthesizer: self.synthesizer,
            encoder,
            video_host: self.video_host,
        }
    }

    /// Enables the upload stage with the given host.
    pub fn video_host<U2: VideoHost + Send + Sync + 'static>(
        self,
        video_host: U2,
    ) -> PodcastPipelineBuilder<I, S, W, T, E, U2> {
        PodcastPipelineBuilder {
            workdir: self.workdir,
            background_image: self.background_image,
            target_date: self.target_date,
            max_candidates: self.max_candidates,
            privacy: self.privacy,
            upload_enabled: true,
            index: self.index,
            selector: self.selector,
            script_writer: self.script_writer,
            synthesizer: self.synthesizer,
            encoder: self.encoder,
            video_host,
        }
    }

    pub fn background_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.background_image = path.into();
        self
    }

    pub fn target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = date;
        self
    }

    pub fn max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    pub fn privacy(mut self, privacy: PrivacyStatus) -> Self {
        self.privacy = privacy;
        self
    }
}

impl<I, S, W, T, E, U> PodcastPipelineBuilder<I, S, W, T, E, U>
where
    I: PaperIndex + Send + Sync + 'static,
    S: PaperSelector + Send + Sync + 'static,
    W: ScriptWriter + Send + Sync + 'static,
    T: SpeechSynthesizer + Send + Sync + 'static,
    E: Encoder + Send + Sync + 'static,
    U: VideoHost + Send + Sync + 'static,
{
    pub fn build(self) -> PodcastPipeline<I, S, W, T, E, U> {
        PodcastPipeline {
            workdir: self.workdir,
            background_image: self.background_image,
            target_date: self.target_date,
            max_candidates: self.max_candidates,
            privacy: self.privacy,
            upload_enabled: self.upload_enabled,
            index: self.index,
            selector: self.selector,
            script_writer: self.script_writer,
            synthesizer: self.synthesizer,
            encoder: self.encoder,
            video_host: self.video_host,
        }
    }
}

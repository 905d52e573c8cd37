pub mod audio;
mod config;
mod llm;
pub mod media;
mod pipeline;
pub mod tracing;
pub mod upload;

pub use config::{Config, PrivacyStatus, UploadConfig};
pub use llm::gemini;
pub use llm::{PaperSelector, ScriptWriter, Selection, SpeechSynthesizer, SynthesizedAudio};
pub use media::{Encoder, FfmpegEncoder};
pub use pipeline::{builder::PodcastPipelineBuilder, PodcastPipeline};
pub use upload::{VideoHost, YouTubeClient};

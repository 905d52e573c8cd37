use std::path::PathBuf;

use anyhow::Context;
use arxiv_client::ArxivClient;
use chrono::NaiveDate;
use clap::Parser;
use daily_papers::{
    gemini::GeminiClient, tracing::init_tracing_subscriber, Config, FfmpegEncoder,
    PodcastPipelineBuilder, PrivacyStatus, UploadConfig, YouTubeClient,
};

#[derive(Parser)]
#[command(name = "daily-papers", about = "AI research paper podcast generator")]
struct Cli {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY")]
    gemini_api_key: String,

    /// Model that picks the day's paper
    #[arg(long, env = "GEMINI_SELECTOR_MODEL")]
    selector_model: String,

    /// Model that writes the podcast script
    #[arg(long, env = "GEMINI_SCRIPT_MODEL")]
    script_model: String,

    /// Speech synthesis model
    #[arg(long, env = "GEMINI_TTS_MODEL")]
    tts_model: String,

    /// Submission date to search (YYYY-MM-DD); defaults to three days ago
    #[arg(long, env = "PAPER_DATE")]
    paper_date: Option<NaiveDate>,

    /// Maximum candidate papers to fetch for the day
    #[arg(long, env = "MAX_CANDIDATES", default_value = "500")]
    max_candidates: usize,

    /// Working directory for pipeline artifacts
    #[arg(long, env = "WORKDIR", default_value = "./data")]
    workdir: PathBuf,

    /// Still image used as the video track
    #[arg(long, env = "BACKGROUND_IMAGE", default_value = "assets/background.png")]
    background_image: PathBuf,

    /// Generate the video but do not upload it
    #[arg(long)]
    skip_upload: bool,

    #[arg(long, env = "YOUTUBE_CLIENT_ID")]
    youtube_client_id: Option<String>,

    #[arg(long, env = "YOUTUBE_CLIENT_SECRET")]
    youtube_client_secret: Option<String>,

    #[arg(long, env = "YOUTUBE_REFRESH_TOKEN")]
    youtube_refresh_token: Option<String>,

    /// Privacy status for the uploaded video
    #[arg(long, env = "YOUTUBE_VIDEO_PRIVACY_STATUS", value_enum, default_value_t = PrivacyStatus::Private)]
    privacy: PrivacyStatus,
}

fn resolve_config(cli: Cli) -> anyhow::Result<Config> {
    let upload = if cli.skip_upload {
        None
    } else {
        Some(UploadConfig {
            client_id: cli
                .youtube_client_id
                .context("YOUTUBE_CLIENT_ID not set")?,
            client_secret: cli
                .youtube_client_secret
                .context("YOUTUBE_CLIENT_SECRET not set")?,
            refresh_token: cli
                .youtube_refresh_token
                .context("YOUTUBE_REFRESH_TOKEN not set")?,
            privacy: cli.privacy,
        })
    };

    Ok(Config {
        gemini_api_key: cli.gemini_api_key,
        selector_model: cli.selector_model,
        script_model: cli.script_model,
        tts_model: cli.tts_model,
        target_date: cli.paper_date.unwrap_or_else(Config::default_target_date),
        max_candidates: cli.max_candidates,
        workdir: cli.workdir,
        background_image: cli.background_image,
        upload,
    })
}

async fn run_pipeline(config: Config) -> anyhow::Result<()> {
    let arxiv = ArxivClient::new();
    let gemini = GeminiClient::new(
        config.gemini_api_key.as_str(),
        config.selector_model.as_str(),
        config.script_model.as_str(),
        config.tts_model.as_str(),
    );

    let builder = PodcastPipelineBuilder::new(&config.workdir)
        .index(arxiv)
        .selector(gemini.clone())
        .script_writer(gemini.clone())
        .synthesizer(gemini)
        .encoder(FfmpegEncoder::new())
        .background_image(&config.background_image)
        .target_date(config.target_date)
        .max_candidates(config.max_candidates);

    match config.upload {
        Some(upload) => {
            let youtube = YouTubeClient::new(
                upload.client_id.as_str(),
                upload.client_secret.as_str(),
                upload.refresh_token.as_str(),
            );
            builder
                .privacy(upload.privacy)
                .video_host(youtube)
                .build()
                .run()
                .await
        }
        None => builder.build().run().await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let config = resolve_config(cli)?;
    tracing::info!(date = %config.target_date, "Running podcast pipeline...");
    run_pipeline(config).await
}

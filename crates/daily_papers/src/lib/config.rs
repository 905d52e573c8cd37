use std::path::PathBuf;

use chrono::{Duration, NaiveDate, Utc};

/// Immutable configuration resolved once at startup and handed to the
/// pipeline builder. No global state.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub selector_model: String,
    pub script_model: String,
    pub tts_model: String,
    /// The 24-hour submission window to search.
    pub target_date: NaiveDate,
    pub max_candidates: usize,
    pub workdir: PathBuf,
    pub background_image: PathBuf,
    /// `None` when the upload stage is disabled.
    pub upload: Option<UploadConfig>,
}

impl Config {
    /// arXiv listings lag a few days behind submission.
    pub fn default_target_date() -> NaiveDate {
        (Utc::now() - Duration::days(3)).date_naive()
    }
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub privacy: PrivacyStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PrivacyStatus {
    Public,
    Unlisted,
    Private,
}

impl PrivacyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyStatus::Public => "public",
            PrivacyStatus::Unlisted => "unlisted",
            PrivacyStatus::Private => "private",
        }
    }
}

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use arxiv_client::Paper;
use daily_papers::{PrivacyStatus, VideoHost};

#[derive(Clone)]
pub struct MockVideoHost {
    pub video_id: String,
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
    pub fail_with: Option<String>,
}

impl MockVideoHost {
    pub fn new(video_id: &str) -> Self {
        Self {
            video_id: video_id.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new("")
        }
    }
}

impl VideoHost for MockVideoHost {
    async fn upload(
        &self,
        video: &Path,
        _paper: &Paper,
        _privacy: PrivacyStatus,
    ) -> anyhow::Result<String> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.calls.lock().unwrap().push(video.to_path_buf());
        Ok(self.video_id.clone())
    }
}

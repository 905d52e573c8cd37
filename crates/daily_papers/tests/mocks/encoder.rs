use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use daily_papers::Encoder;

#[derive(Clone)]
pub struct MockEncoder {
    /// One entry per invocation, e.g. `wav_to_mp3` / `compose_video`.
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl Default for MockEncoder {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }
}

impl MockEncoder {
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl Encoder for MockEncoder {
    async fn wav_to_mp3(&self, _wav: &Path, mp3: &Path) -> anyhow::Result<()> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.calls.lock().unwrap().push("wav_to_mp3".into());
        std::fs::write(mp3, b"mock mp3")?;
        Ok(())
    }

    async fn compose_video(&self, _mp3: &Path, _image: &Path, mp4: &Path) -> anyhow::Result<()> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.calls.lock().unwrap().push("compose_video".into());
        std::fs::write(mp4, b"mock mp4")?;
        Ok(())
    }
}

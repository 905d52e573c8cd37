use std::sync::{Arc, Mutex};

use daily_papers::{SpeechSynthesizer, SynthesizedAudio};

#[derive(Clone)]
pub struct MockSynthesizer {
    pub data: Vec<u8>,
    pub mime_type: Option<String>,
    /// Scripts seen per call.
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockSynthesizer {
    pub fn new(data: Vec<u8>, mime_type: &str) -> Self {
        Self {
            data,
            mime_type: Some(mime_type.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new(Vec::new(), "audio/L16;rate=24000")
        }
    }
}

impl SpeechSynthesizer for MockSynthesizer {
    type Error = anyhow::Error;

    async fn synthesize(&self, script: &str) -> Result<SynthesizedAudio, Self::Error> {
        self.calls.lock().unwrap().push(script.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(SynthesizedAudio {
            data: self.data.clone(),
            mime_type: self.mime_type.clone(),
        })
    }
}

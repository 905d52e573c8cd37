use std::sync::{Arc, Mutex};

use daily_papers::ScriptWriter;

#[derive(Clone)]
pub struct MockScriptWriter {
    pub script: String,
    /// PDF payload sizes seen per call.
    pub calls: Arc<Mutex<Vec<usize>>>,
    pub fail_with: Option<String>,
}

impl MockScriptWriter {
    pub fn new(script: &str) -> Self {
        Self {
            script: script.to_string(),
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

impl ScriptWriter for MockScriptWriter {
    type Error = anyhow::Error;

    async fn write_script(&self, pdf_bytes: &[u8]) -> Result<String, Self::Error> {
        self.calls.lock().unwrap().push(pdf_bytes.len());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.script.clone())
    }
}

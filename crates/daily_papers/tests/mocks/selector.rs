use std::sync::{Arc, Mutex};

use arxiv_client::Paper;
use daily_papers::{PaperSelector, Selection};

#[derive(Clone)]
pub struct MockSelector {
    pub arxiv_id: String,
    /// Candidate counts seen per call.
    pub calls: Arc<Mutex<Vec<usize>>>,
    pub fail_with: Option<String>,
}

impl MockSelector {
    pub fn picking(arxiv_id: &str) -> Self {
        Self {
            arxiv_id: arxiv_id.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::picking("")
        }
    }
}

impl PaperSelector for MockSelector {
    type Error = anyhow::Error;

    async fn select_paper(&self, candidates: &[Paper]) -> Result<Selection, Self::Error> {
        self.calls.lock().unwrap().push(candidates.len());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(Selection {
            title: "mock pick".into(),
            reason_for_choice: "looked interesting".into(),
            arxiv_id: self.arxiv_id.clone(),
        })
    }
}

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use arxiv_client::{Paper, PaperIndex};
use chrono::NaiveDate;

#[derive(Clone)]
pub struct MockPaperIndex {
    pub papers: Vec<Paper>,
    pub search_calls: Arc<Mutex<Vec<NaiveDate>>>,
    pub downloads: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockPaperIndex {
    pub fn with_papers(papers: Vec<Paper>) -> Self {
        Self {
            papers,
            search_calls: Arc::new(Mutex::new(Vec::new())),
            downloads: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::with_papers(Vec::new())
        }
    }
}

impl PaperIndex for MockPaperIndex {
    async fn search_window(&self, day: NaiveDate, _max_results: usize) -> anyhow::Result<Vec<Paper>> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.search_calls.lock().unwrap().push(day);
        Ok(self.papers.clone())
    }

    async fn fetch_by_id(&self, arxiv_id: &str) -> anyhow::Result<Paper> {
        self.papers
            .iter()
            .find(|p| p.arxiv_id == arxiv_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no paper with id {}", arxiv_id))
    }

    async fn download_pdf(&self, paper: &Paper, dest: &Path) -> anyhow::Result<()> {
        self.downloads.lock().unwrap().push(paper.arxiv_id.clone());
        std::fs::write(dest, b"%PDF-1.5 fake paper body")?;
        Ok(())
    }
}

use chrono::{DateTime, Utc};

/// A single arXiv paper candidate. Lives for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Paper {
    /// Short id as it appears after `/abs/`, e.g. `2401.12345v1`.
    pub arxiv_id: String,
    pub title: String,
    pub authors: Vec<String>,
    /// Abstract text from the feed entry.
    pub summary: String,
    pub pdf_url: Option<String>,
    pub published: Option<DateTime<Utc>>,
}

impl Paper {
    /// Renders the candidate as the structured text block fed to the
    /// selection model.
    pub fn prompt_block(&self) -> String {
        format!(
            "Title: {}\nAuthors: {}\narXiv ID: {}\nSummary: {}\n----------------------------------------\n",
            self.title,
            self.authors.join(", "),
            self.arxiv_id,
            self.summary,
        )
    }
}

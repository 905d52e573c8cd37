use std::{future::Future, path::Path};

use chrono::NaiveDate;

use crate::{atom, paper::Paper};

const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Read-only view of the preprint index used by the pipeline. Implemented by
/// [`ArxivClient`] and by test doubles.
pub trait PaperIndex {
    fn search_window(
        &self,
        day: NaiveDate,
        max_results: usize,
    ) -> impl Future<Output = anyhow::Result<Vec<Paper>>> + Send;

    fn fetch_by_id(&self, arxiv_id: &str) -> impl Future<Output = anyhow::Result<Paper>> + Send;

    fn download_pdf(
        &self,
        paper: &Paper,
        dest: &Path,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum ArxivError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("arXiv API returned status {status}")]
    Api { status: u16 },
    #[error("no papers found for {date}")]
    NoCandidates { date: NaiveDate },
    #[error("no paper found with arXiv id {id}")]
    NotFound { id: String },
    #[error("paper {id} has no PDF URL")]
    MissingPdfUrl { id: String },
    #[error("PDF download failed with status {status}")]
    Download { status: u16 },
    #[error("downloaded file is not a valid PDF")]
    InvalidPdf,
}

/// Client for the arXiv export API.
#[derive(Debug, Clone)]
pub struct ArxivClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for ArxivClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ArxivClient {
    const CATEGORIES: [&'static str; 2] = ["cs.AI", "cs.LG"];

    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: "http://export.arxiv.org".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<Vec<Paper>, ArxivError> {
        let resp = self
            .client
            .get(format!("{}/api/query", self.base_url))
            .query(params)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to query arXiv"))?;

        if !resp.status().is_success() {
            return Err(ArxivError::Api {
                status: resp.status().as_u16(),
            });
        }

        let feed = resp.text().await?;
        Ok(atom::parse_feed(&feed))
    }

    /// Fetches the AI papers submitted within the 24-hour window of `day`,
    /// newest first.
    #[tracing::instrument(skip(self))]
    pub async fn search_window(
        &self,
        day: NaiveDate,
        max_results: usize,
    ) -> Result<Vec<Paper>, ArxivError> {
        let category_query = Self::CATEGORIES
            .iter()
            .map(|cat| format!("cat:{cat}"))
            .collect::<Vec<_>>()
            .join(" OR ");
        let stamp = day.format("%Y%m%d");
        let search_query =
            format!("({category_query}) AND submittedDate:[{stamp}000000 TO {stamp}235959]");

        let papers = self
            .query(&[
                ("search_query", search_query.as_str()),
                ("sortBy", "submittedDate"),
                ("sortOrder", "descending"),
                ("start", "0"),
                ("max_results", &max_results.to_string()),
            ])
            .await?;

        if papers.is_empty() {
            return Err(ArxivError::NoCandidates { date: day });
        }

        tracing::info!(count = papers.len(), date = %day, "Fetched papers");
        Ok(papers)
    }

    /// Looks up a single paper by its short arXiv id.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_by_id(&self, arxiv_id: &str) -> Result<Paper, ArxivError> {
        let papers = self.query(&[("id_list", arxiv_id)]).await?;

        papers.into_iter().next().ok_or_else(|| ArxivError::NotFound {
            id: arxiv_id.to_string(),
        })
    }

    /// Downloads the paper's PDF to `dest`. The first four bytes must carry
    /// the PDF magic number; a file failing the check is deleted.
    #[tracing::instrument(skip(self, paper), fields(id = %paper.arxiv_id))]
    pub async fn download_pdf(&self, paper: &Paper, dest: &Path) -> Result<(), ArxivError> {
        let url = paper.pdf_url.as_deref().ok_or_else(|| ArxivError::MissingPdfUrl {
            id: paper.arxiv_id.clone(),
        })?;

        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ArxivError::Download {
                status: resp.status().as_u16(),
            });
        }

        let bytes = resp.bytes().await?;
        write_validated_pdf(&bytes, dest).await?;

        tracing::info!(bytes = bytes.len(), path = %dest.display(), "Downloaded PDF");
        Ok(())
    }
}

/// Writes the downloaded bytes to `dest`, deleting the file again if the
/// payload does not begin with the PDF magic number.
async fn write_validated_pdf(bytes: &[u8], dest: &Path) -> Result<(), ArxivError> {
    tokio::fs::write(dest, bytes).await?;

    if !bytes.starts_with(PDF_MAGIC) {
        tokio::fs::remove_file(dest).await?;
        return Err(ArxivError::InvalidPdf);
    }

    Ok(())
}

impl PaperIndex for ArxivClient {
    async fn search_window(&self, day: NaiveDate, max_results: usize) -> anyhow::Result<Vec<Paper>> {
        Ok(ArxivClient::search_window(self, day, max_results).await?)
    }

    async fn fetch_by_id(&self, arxiv_id: &str) -> anyhow::Result<Paper> {
        Ok(ArxivClient::fetch_by_id(self, arxiv_id).await?)
    }

    async fn download_pdf(&self, paper: &Paper, dest: &Path) -> anyhow::Result<()> {
        Ok(ArxivClient::download_pdf(self, paper, dest).await?)
    }
}

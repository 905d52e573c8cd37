//! YouTube upload stage: refresh-token exchange followed by a resumable,
//! chunked upload. No partial-upload recovery across process restarts.

use std::{future::Future, path::Path};

use arxiv_client::Paper;
use itertools::Itertools;
use reqwest::header::{CONTENT_RANGE, LOCATION};
use serde::Deserialize;
use serde_json::json;

use crate::config::PrivacyStatus;

/// Video platform seam. Returns the hosted video's identifier.
pub trait VideoHost {
    fn upload(
        &self,
        video: &Path,
        paper: &Paper,
        privacy: PrivacyStatus,
    ) -> impl Future<Output = anyhow::Result<String>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum YouTubeError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("token response carried no access token")]
    MissingAccessToken,
    #[error("upload session response carried no Location header")]
    NoSessionUri,
    #[error("final upload response carried no video id")]
    MissingVideoId,
}

pub struct YouTubeClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    token_url: String,
    upload_url: String,
}

impl YouTubeClient {
    const CHUNK_SIZE: usize = 8 * 1024 * 1024;
    const CATEGORY_SCIENCE_TECH: &'static str = "28";
    const TAGS: [&'static str; 6] = [
        "AI",
        "Machine Learning",
        "Research",
        "Podcast",
        "Daily Papers",
        "Artificial Intelligence",
    ];

    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
            token_url: "https://oauth2.googleapis.com/token".into(),
            upload_url: "https://www.googleapis.com/upload/youtube/v3/videos".into(),
        }
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    pub fn with_upload_url(mut self, url: impl Into<String>) -> Self {
        self.upload_url = url.into();
        self
    }

    /// Exchanges the long-lived refresh token for a short-lived access token.
    async fn exchange_refresh_token(&self) -> Result<String, YouTubeError> {
        let resp = self
            .client
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", self.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Token exchange request failed"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(YouTubeError::Api { status, message });
        }

        let token: TokenResponse = resp.json().await?;
        token
            .access_token
            .ok_or(YouTubeError::MissingAccessToken)
    }

    #[tracing::instrument(skip(self, paper), fields(video = %video.display()))]
    async fn upload_video(
        &self,
        video: &Path,
        paper: &Paper,
        privacy: PrivacyStatus,
    ) -> Result<String, YouTubeError> {
        let access_token = self.exchange_refresh_token().await?;
        let bytes = tokio::fs::read(video).await?;
        let total = bytes.len();

        let body = json!({
            "snippet": {
                "title": build_title(&paper.title),
                "description": build_description(paper),
                "tags": Self::TAGS,
                "categoryId": Self::CATEGORY_SCIENCE_TECH,
            },
            "status": { "privacyStatus": privacy.as_str() },
        });

        let resp = self
            .client
            .post(format!(
                "{}?uploadType=resumable&part=snippet,status",
                self.upload_url
            ))
            .bearer_auth(&access_token)
            .header("X-Upload-Content-Length", total)
            .header("X-Upload-Content-Type", "video/mp4")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(YouTubeError::Api { status, message });
        }

        let session_uri = resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or(YouTubeError::NoSessionUri)?;

        let mut start = 0;
        while start < total {
            let end = (start + Self::CHUNK_SIZE).min(total);
            let resp = self
                .client
                .put(&session_uri)
                .bearer_auth(&access_token)
                .header(CONTENT_RANGE, format!("bytes {}-{}/{}", start, end - 1, total))
                .body(bytes[start..end].to_vec())
                .send()
                .await?;

            match resp.status().as_u16() {
                // 308 Resume Incomplete: the chunk landed, keep going.
                308 => {
                    start = end;
                    tracing::info!(percent = 100 * start / total, "Upload progress");
                }
                200 | 201 => {
                    let uploaded: UploadResponse = resp.json().await?;
                    let id = uploaded.id.ok_or(YouTubeError::MissingVideoId)?;
                    tracing::info!(
                        video_id = %id,
                        url = %format!("https://www.youtube.com/watch?v={id}"),
                        "Video uploaded"
                    );
                    return Ok(id);
                }
                status => {
                    let message = resp.text().await.unwrap_or_default();
                    return Err(YouTubeError::Api { status, message });
                }
            }
        }

        Err(YouTubeError::MissingVideoId)
    }
}

impl VideoHost for YouTubeClient {
    async fn upload(
        &self,
        video: &Path,
        paper: &Paper,
        privacy: PrivacyStatus,
    ) -> anyhow::Result<String> {
        Ok(self.upload_video(video, paper, privacy).await?)
    }
}

const TITLE_MAX_CHARS: usize = 85;
const TITLE_TRUNCATE_AT: usize = 80;
const TITLE_SUFFIX: &str = " (AI Podcast)";

/// Paper title truncated to a fixed character budget, then tagged.
fn build_title(paper_title: &str) -> String {
    let trimmed = paper_title.trim();
    let title = if trimmed.chars().count() >= TITLE_MAX_CHARS {
        let head: String = trimmed.chars().take(TITLE_TRUNCATE_AT).collect();
        format!("{head}...")
    } else {
        trimmed.to_string()
    };
    format!("{title}{TITLE_SUFFIX}")
}

fn build_description(paper: &Paper) -> String {
    let published = paper
        .published
        .map(|dt| dt.date_naive().to_string())
        .unwrap_or_else(|| "today".into());
    let url = paper.pdf_url.as_deref().unwrap_or("URL not available");

    format!(
        "Daily Papers podcast for {published}\n\n\
         Today's paper: {title}\n\
         Paper URL: {url}\n\
         Paper Authors: {authors}\n\n\
         Daily Papers is an AI-generated podcast discussing the latest research papers \
         in artificial intelligence and machine learning.\n\n\
         #AI #MachineLearning #Research #Podcast #DailyPapers",
        title = paper.title.trim(),
        authors = paper.authors.iter().join(", "),
    )
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn long_title_is_truncated_with_ellipsis() {
        let long = "x".repeat(100);
        let title = build_title(&long);
        assert!(title.starts_with(&"x".repeat(80)));
        assert!(title.contains("..."));
        assert!(title.ends_with(TITLE_SUFFIX));
        assert!(title.chars().count() <= TITLE_MAX_CHARS + TITLE_SUFFIX.chars().count());
        assert_eq!(
            title.chars().count(),
            80 + 3 + TITLE_SUFFIX.chars().count()
        );
    }

    #[test]
    fn short_title_is_kept_whole() {
        assert_eq!(
            build_title("  Small Models, Big Dreams  "),
            "Small Models, Big Dreams (AI Podcast)"
        );
    }

    #[test]
    fn description_embeds_paper_metadata() {
        let paper = Paper {
            arxiv_id: "2401.12345v1".into(),
            title: "Scaling Laws".into(),
            authors: vec!["Ada Lovelace".into(), "Alan Turing".into()],
            summary: String::new(),
            pdf_url: Some("http://arxiv.org/pdf/2401.12345v1".into()),
            published: Some(Utc.with_ymd_and_hms(2024, 1, 22, 18, 0, 0).unwrap()),
        };

        let description = build_description(&paper);
        assert!(description.contains("Daily Papers podcast for 2024-01-22"));
        assert!(description.contains("Today's paper: Scaling Laws"));
        assert!(description.contains("Paper URL: http://arxiv.org/pdf/2401.12345v1"));
        assert!(description.contains("Paper Authors: Ada Lovelace, Alan Turing"));
    }

    #[test]
    fn description_survives_missing_metadata() {
        let paper = Paper {
            arxiv_id: "2401.12345v1".into(),
            title: "Scaling Laws".into(),
            authors: vec![],
            summary: String::new(),
            pdf_url: None,
            published: None,
        };

        let description = build_description(&paper);
        assert!(description.contains("Paper URL: URL not available"));
    }
}

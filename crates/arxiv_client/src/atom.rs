//! Atom feed extraction for the arXiv export API.
//!
//! The feed is treated as text and the entries pulled out with regexes;
//! entries missing a usable id or title are skipped rather than failing the
//! whole feed.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::paper::Paper;

static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<entry>(.*?)</entry>").unwrap());
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<title[^>]*>(.*?)</title>").unwrap());
static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<id>(.*?)</id>").unwrap());
static SUMMARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<summary[^>]*>(.*?)</summary>").unwrap());
static PUBLISHED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<published>([^<]*)</published>").unwrap());
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<name>(.*?)</name>").unwrap());
static PDF_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<link[^>]*title="pdf"[^>]*href="([^"]+)""#).unwrap());

/// Parses every `<entry>` of an arXiv Atom feed into a [`Paper`].
#[tracing::instrument(skip(feed))]
pub fn parse_feed(feed: &str) -> Vec<Paper> {
    let mut papers = Vec::new();

    for entry in ENTRY_RE.captures_iter(feed) {
        let body = &entry[1];

        let Some(id_url) = ID_RE.captures(body).map(|c| c[1].trim().to_string()) else {
            tracing::warn!("Skipping feed entry without an <id> tag");
            continue;
        };
        let Some(title) = TITLE_RE
            .captures(body)
            .map(|c| normalize_whitespace(&unescape(&c[1])))
        else {
            tracing::warn!(id = %id_url, "Skipping feed entry without a <title> tag");
            continue;
        };

        let arxiv_id = short_id(&id_url);
        let summary = SUMMARY_RE
            .captures(body)
            .map(|c| normalize_whitespace(&unescape(&c[1])))
            .unwrap_or_default();
        let authors = NAME_RE
            .captures_iter(body)
            .map(|c| normalize_whitespace(&unescape(&c[1])))
            .collect();
        let published = PUBLISHED_RE.captures(body).and_then(|c| {
            DateTime::parse_from_rfc3339(c[1].trim())
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        });
        let pdf_url = PDF_LINK_RE
            .captures(body)
            .map(|c| c[1].to_string())
            .or_else(|| derive_pdf_url(&id_url));

        papers.push(Paper {
            arxiv_id,
            title,
            authors,
            summary,
            pdf_url,
            published,
        });
    }

    papers
}

/// `http://arxiv.org/abs/2401.12345v1` -> `2401.12345v1`
fn short_id(id_url: &str) -> String {
    id_url
        .rsplit('/')
        .next()
        .unwrap_or(id_url)
        .trim()
        .to_string()
}

fn derive_pdf_url(id_url: &str) -> Option<String> {
    id_url
        .contains("/abs/")
        .then(|| id_url.replace("/abs/", "/pdf/"))
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// arXiv wraps titles and abstracts across lines with leading indentation.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

use std::{fmt::Debug, future::Future};

use arxiv_client::Paper;
use serde::Deserialize;

/// Picks the single paper out of the day's candidates worth a podcast
/// episode.
pub trait PaperSelector {
    type Error: Debug;

    fn select_paper(
        &self,
        candidates: &[Paper],
    ) -> impl Future<Output = Result<Selection, Self::Error>> + Send;
}

/// Structured selection returned by the model.
#[derive(Debug, Clone, Deserialize)]
pub struct Selection {
    pub title: String,
    pub reason_for_choice: String,
    pub arxiv_id: String,
}

//! # arXiv Client
//!
//! Read-only client for the arXiv export API: category/date-window searches,
//! id lookups, and PDF downloads. The Atom feed is consumed as text and the
//! entries extracted leniently; entries that cannot be parsed are skipped.

mod atom;
mod client;
mod paper;

pub use client::{ArxivClient, ArxivError, PaperIndex};
pub use paper::Paper;

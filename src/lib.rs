//! Scrape "now showing" titles from cinema websites and reconcile them with a
//! canonical movie catalog.
//!
//! Pipeline: per-cinema [`extractor::SourceExtractor`] runs are fanned out by
//! [`orchestrator::scrape_all`], merged by [`aggregate::unique`] and resolved
//! against the catalog by [`matcher::match_catalog`].
//! [`pipeline::run_scrape_and_match`] ties it all together.

use serde::{Deserialize, Serialize};

pub mod aggregate;
pub mod cinemas;
pub mod config;
pub mod error;
pub mod events;
pub mod extractor;
pub mod fetch;
pub mod matcher;
pub mod normalize;
pub mod orchestrator;
pub mod pipeline;
pub mod similarity;
pub mod strategy;

pub use error::{Result, ScrapeError};

/// A candidate title found on one cinema site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedMovie {
    pub title: String,
    /// Cinema identifier, e.g. "vox".
    pub source: String,
}

/// Outcome of scraping one cinema. `movies` is empty, never absent, when the
/// source failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    pub cinema: String,
    pub movies_found: usize,
    pub movies: Vec<ScrapedMovie>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl ScrapeResult {
    pub fn ok(cinema: &str, movies: Vec<ScrapedMovie>) -> Self {
        Self {
            cinema: cinema.to_string(),
            movies_found: movies.len(),
            movies,
            error: None,
        }
    }

    pub fn failed(cinema: &str, error: impl ToString) -> Self {
        Self {
            cinema: cinema.to_string(),
            movies_found: 0,
            movies: Vec::new(),
            error: Some(error.to_string()),
        }
    }
}

/// One row of the caller's canonical catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
}

/// A scraped title resolved to a catalog row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedMovie {
    /// Catalog id.
    pub id: String,
    /// Catalog title.
    pub title: String,
    /// Scraped title that matched.
    pub matched_with: String,
    pub source: String,
    pub similarity: f64,
}

/// Full report returned to the caller of [`pipeline::run_scrape_and_match`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeAndMatchResult {
    pub scrape_results: Vec<ScrapeResult>,
    pub total_scraped: usize,
    pub unique_titles: usize,
    pub matched_movies: Vec<MatchedMovie>,
    pub unmatched_titles: Vec<String>,
    /// Scraped aliases of catalog rows already claimed earlier in the run.
    #[serde(default)]
    pub duplicate_titles: Vec<String>,
    /// RFC 3339, UTC.
    pub timestamp: String,
}

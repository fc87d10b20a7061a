//! Generic source extractor.
//!
//! One engine handles every cinema: walk the profile's candidate URLs in
//! order, run all extraction strategies over the first page that yields
//! titles, filter and dedup the results.

use crate::ScrapedMovie;
use crate::error::{Result, ScrapeError};
use crate::events::{EventSink, ScrapeEvent};
use crate::fetch::{PageFetcher, RawPage};
use crate::normalize::dedup_key;
use crate::strategy::{
    ExtractionStrategy, JsonLdStrategy, ScriptRegexStrategy, SelectorStrategy, is_plausible_title,
};
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Everything that differs between two cinema sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CinemaProfile {
    /// Short identifier used as `source` on every scraped title, e.g. "vox".
    pub id: String,
    /// Human readable name.
    #[serde(default)]
    pub name: String,
    /// Listing pages, tried in order until one yields titles.
    pub urls: Vec<String>,
    /// CSS selectors for movie card titles, most specific first.
    #[serde(default)]
    pub selectors: Vec<String>,
    /// JSON keys whose string values are read out of inline scripts.
    #[serde(default = "default_script_keys")]
    pub script_keys: Vec<String>,
}

pub fn default_script_keys() -> Vec<String> {
    ["title", "name", "movieTitle"]
        .iter()
        .map(|k| k.to_string())
        .collect()
}

pub struct SourceExtractor {
    profile: CinemaProfile,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    fetcher: Arc<dyn PageFetcher>,
    sink: Arc<dyn EventSink>,
}

impl SourceExtractor {
    pub fn new(
        profile: CinemaProfile,
        fetcher: Arc<dyn PageFetcher>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self> {
        let mut strategies: Vec<Box<dyn ExtractionStrategy>> = Vec::new();
        if !profile.selectors.is_empty() {
            strategies.push(Box::new(SelectorStrategy::new(&profile.selectors)?));
        }
        if !profile.script_keys.is_empty() {
            strategies.push(Box::new(ScriptRegexStrategy::new(&profile.script_keys)?));
        }
        strategies.push(Box::new(JsonLdStrategy));

        Ok(Self {
            profile,
            strategies,
            fetcher,
            sink,
        })
    }

    pub fn profile(&self) -> &CinemaProfile {
        &self.profile
    }

    /// Titles from the first candidate URL that yields any.
    ///
    /// Only fails when every URL failed to fetch; reachable pages without
    /// titles give an empty list.
    #[instrument(level = "info", skip_all, fields(cinema = %self.profile.id))]
    pub async fn extract(&self) -> Result<Vec<ScrapedMovie>> {
        let cinema = &self.profile.id;
        let mut failures = 0usize;

        for url in &self.profile.urls {
            self.sink.record(ScrapeEvent::UrlTried {
                cinema: cinema.clone(),
                url: url.clone(),
            });

            let page = match self.fetcher.fetch(url).await {
                Ok(page) => page,
                Err(e) => {
                    failures += 1;
                    self.sink.record(ScrapeEvent::FetchFailed {
                        cinema: cinema.clone(),
                        url: url.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            self.sink.record(ScrapeEvent::PageFetched {
                cinema: cinema.clone(),
                url: url.clone(),
                status: page.status,
                html_len: page.html.len(),
            });

            let movies = self.extract_page(&page);
            if !movies.is_empty() {
                self.sink.record(ScrapeEvent::SourceFinished {
                    cinema: cinema.clone(),
                    url: Some(url.clone()),
                    titles: movies.len(),
                });
                return Ok(movies);
            }
        }

        if !self.profile.urls.is_empty() && failures == self.profile.urls.len() {
            return Err(ScrapeError::AllUrlsFailed {
                cinema: cinema.clone(),
                attempts: failures,
            });
        }

        self.sink.record(ScrapeEvent::SourceFinished {
            cinema: cinema.clone(),
            url: None,
            titles: 0,
        });
        Ok(Vec::new())
    }

    /// Union of every strategy's candidates, filtered and deduplicated.
    pub fn extract_page(&self, page: &RawPage) -> Vec<ScrapedMovie> {
        let document = Html::parse_document(&page.html);
        let mut seen = HashSet::new();
        let mut movies = Vec::new();

        for strategy in &self.strategies {
            let candidates = strategy.extract(&document);
            debug!(
                cinema = %self.profile.id,
                strategy = strategy.name(),
                candidates = candidates.len(),
                "Strategy finished"
            );
            for candidate in candidates {
                if !is_plausible_title(&candidate.title, strategy.max_title_len()) {
                    continue;
                }
                if !seen.insert(dedup_key(&candidate.title)) {
                    continue;
                }
                self.sink.record(ScrapeEvent::TitleFound {
                    cinema: self.profile.id.clone(),
                    title: candidate.title.clone(),
                    strategy: candidate.strategy,
                });
                movies.push(ScrapedMovie {
                    title: candidate.title,
                    source: self.profile.id.clone(),
                });
            }
        }
        movies
    }
}

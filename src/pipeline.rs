use crate::aggregate::unique;
use crate::config::Config;
use crate::error::Result;
use crate::events::EventSink;
use crate::extractor::SourceExtractor;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::matcher::match_catalog;
use crate::orchestrator::{CinemaSource, scrape_all};
use crate::{CatalogEntry, ScrapeAndMatchResult};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tracing::{info, instrument};

/// One extractor per configured cinema, sharing a single HTTP client.
pub fn build_sources(
    config: &Config,
    sink: Arc<dyn EventSink>,
) -> Result<Vec<Arc<dyn CinemaSource>>> {
    let fetcher: Arc<dyn PageFetcher> =
        Arc::new(HttpFetcher::new(&config.user_agent, config.request_timeout())?);
    config
        .cinemas
        .iter()
        .map(|profile| {
            let extractor = SourceExtractor::new(profile.clone(), fetcher.clone(), sink.clone())?;
            Ok(Arc::new(extractor) as Arc<dyn CinemaSource>)
        })
        .collect()
}

/// Scrape every source, merge the titles and reconcile them with `catalog`.
///
/// Never fails: broken sources show up as errored entries in
/// `scrape_results` and the rest of the report is built from what succeeded.
#[instrument(level = "info", skip_all, fields(catalog = catalog.len(), threshold = threshold))]
pub async fn run_scrape_and_match(
    sources: &[Arc<dyn CinemaSource>],
    catalog: &[CatalogEntry],
    threshold: f64,
) -> ScrapeAndMatchResult {
    let scrape_results = scrape_all(sources).await;
    let total_scraped: usize = scrape_results.iter().map(|r| r.movies_found).sum();

    let titles = unique(&scrape_results);
    let outcome = match_catalog(&titles, catalog, threshold);

    info!(
        total_scraped,
        unique = titles.len(),
        matched = outcome.matched.len(),
        unmatched = outcome.unmatched.len(),
        duplicates = outcome.duplicates.len(),
        "Scrape and match finished"
    );

    ScrapeAndMatchResult {
        scrape_results,
        total_scraped,
        unique_titles: titles.len(),
        matched_movies: outcome.matched,
        unmatched_titles: outcome.unmatched,
        duplicate_titles: outcome.duplicates,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MemorySink;
    use crate::orchestrator::tests::StubSource;

    fn dune_catalog() -> Vec<CatalogEntry> {
        vec![CatalogEntry {
            id: "42".into(),
            title: "Dune: Part Two".into(),
        }]
    }

    #[tokio::test]
    async fn test_aliases_across_sources_match_once() {
        let sources: Vec<Arc<dyn CinemaSource>> = vec![
            Arc::new(StubSource {
                id: "vox",
                titles: vec!["Dune: Part Two"],
            }),
            Arc::new(StubSource {
                id: "cineco",
                titles: vec!["Dune Part 2"],
            }),
        ];

        let report = run_scrape_and_match(&sources, &dune_catalog(), 0.7).await;

        assert_eq!(report.scrape_results.len(), 2);
        assert_eq!(report.total_scraped, 2);
        assert_eq!(report.matched_movies.len(), 1);
        assert_eq!(report.matched_movies[0].id, "42");
        assert_eq!(report.matched_movies[0].source, "vox");
        assert!(report.unmatched_titles.is_empty());
        assert_eq!(report.duplicate_titles, vec!["Dune Part 2 (cineco)".to_string()]);
    }

    #[tokio::test]
    async fn test_no_sources_gives_empty_report() {
        let report = run_scrape_and_match(&[], &dune_catalog(), 0.7).await;
        assert_eq!(report.total_scraped, 0);
        assert_eq!(report.unique_titles, 0);
        assert!(report.matched_movies.is_empty());
        assert!(report.unmatched_titles.is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(&report.timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_report_serializes_camel_case() {
        let sources: Vec<Arc<dyn CinemaSource>> = vec![Arc::new(StubSource {
            id: "vox",
            titles: vec!["Dune: Part Two", "Furiosa"],
        })];
        let report = run_scrape_and_match(&sources, &dune_catalog(), 0.7).await;
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["totalScraped"], 2);
        assert_eq!(json["uniqueTitles"], 2);
        assert_eq!(json["matchedMovies"][0]["matchedWith"], "Dune: Part Two");
        assert_eq!(json["unmatchedTitles"][0], "Furiosa (vox)");
        assert_eq!(json["scrapeResults"][0]["moviesFound"], 2);
        assert!(json["scrapeResults"][0].get("error").is_none());
    }

    #[test]
    fn test_build_sources_follows_config() {
        let mut config = Config::default();
        config.retain_cinemas(&["novo".to_string()]).unwrap();
        let sources = build_sources(&config, Arc::new(MemorySink::new())).unwrap();
        let ids: Vec<_> = sources.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["novo"]);
    }
}

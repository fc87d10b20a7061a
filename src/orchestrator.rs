use crate::error::{Result, ScrapeError};
use crate::extractor::SourceExtractor;
use crate::{ScrapeResult, ScrapedMovie};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// One cinema that can be scraped.
#[async_trait::async_trait]
pub trait CinemaSource: Send + Sync {
    /// Identifier reported as `cinema` / `source`.
    fn id(&self) -> &str;

    async fn scrape(&self) -> Result<Vec<ScrapedMovie>>;
}

#[async_trait::async_trait]
impl CinemaSource for SourceExtractor {
    fn id(&self) -> &str {
        &self.profile().id
    }

    async fn scrape(&self) -> Result<Vec<ScrapedMovie>> {
        self.extract().await
    }
}

/// Scrape every source concurrently and wait for all of them.
///
/// Always returns one result per source, in input order. A source that errors
/// or panics yields an empty result carrying the error message.
#[instrument(level = "info", skip_all, fields(sources = sources.len()))]
pub async fn scrape_all(sources: &[Arc<dyn CinemaSource>]) -> Vec<ScrapeResult> {
    let handles = sources.iter().map(|source| {
        let source = Arc::clone(source);
        let cinema = source.id().to_string();
        let handle = tokio::spawn(async move { source.scrape().await });
        async move {
            match handle.await {
                Ok(Ok(movies)) => {
                    info!(%cinema, found = movies.len(), "Scrape finished");
                    ScrapeResult::ok(&cinema, movies)
                }
                Ok(Err(e)) => {
                    warn!(%cinema, error = %e, "Scrape failed");
                    ScrapeResult::failed(&cinema, e)
                }
                Err(join_err) => {
                    let e = ScrapeError::Task {
                        cinema: cinema.clone(),
                        reason: join_err.to_string(),
                    };
                    warn!(%cinema, error = %e, "Scrape task aborted");
                    ScrapeResult::failed(&cinema, e)
                }
            }
        }
    });

    join_all(handles).await
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) struct StubSource {
        pub id: &'static str,
        pub titles: Vec<&'static str>,
    }

    #[async_trait::async_trait]
    impl CinemaSource for StubSource {
        fn id(&self) -> &str {
            self.id
        }

        async fn scrape(&self) -> Result<Vec<ScrapedMovie>> {
            Ok(self
                .titles
                .iter()
                .map(|t| ScrapedMovie {
                    title: t.to_string(),
                    source: self.id.to_string(),
                })
                .collect())
        }
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl CinemaSource for FailingSource {
        fn id(&self) -> &str {
            "broken"
        }

        async fn scrape(&self) -> Result<Vec<ScrapedMovie>> {
            Err(ScrapeError::AllUrlsFailed {
                cinema: "broken".into(),
                attempts: 3,
            })
        }
    }

    struct PanickingSource;

    #[async_trait::async_trait]
    impl CinemaSource for PanickingSource {
        fn id(&self) -> &str {
            "panics"
        }

        async fn scrape(&self) -> Result<Vec<ScrapedMovie>> {
            panic!("markup changed");
        }
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let sources: Vec<Arc<dyn CinemaSource>> = vec![
            Arc::new(StubSource {
                id: "vox",
                titles: vec!["Oppenheimer", "Barbie"],
            }),
            Arc::new(FailingSource),
            Arc::new(PanickingSource),
            Arc::new(StubSource {
                id: "reel",
                titles: vec![],
            }),
        ];

        let results = scrape_all(&sources).await;
        assert_eq!(results.len(), 4);

        let cinemas: Vec<_> = results.iter().map(|r| r.cinema.as_str()).collect();
        assert_eq!(cinemas, vec!["vox", "broken", "panics", "reel"]);

        assert_eq!(results[0].movies_found, 2);
        assert!(results[0].error.is_none());

        for failed in &results[1..3] {
            assert_eq!(failed.movies_found, 0);
            assert!(failed.movies.is_empty());
            assert!(!failed.error.as_deref().unwrap_or("").is_empty());
        }

        assert_eq!(results[3].movies_found, 0);
        assert!(results[3].error.is_none());
    }

    #[tokio::test]
    async fn test_hung_source_times_out_without_stalling_others() {
        use crate::events::MemorySink;
        use crate::extractor::{CinemaProfile, default_script_keys};
        use crate::fetch::{DEFAULT_USER_AGENT, HttpFetcher};
        use mockito::Server;
        use std::io::Write;
        use std::time::{Duration, Instant};

        let mut server = Server::new_async().await;
        let _hung = server
            .mock("GET", "/now-showing")
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_secs(4));
                w.write_all(b"<h3 class=\"movie-title\">Late Title</h3>")
            })
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(DEFAULT_USER_AGENT, Duration::from_secs(1)).unwrap();
        let slow = SourceExtractor::new(
            CinemaProfile {
                id: "slow".into(),
                name: String::new(),
                urls: vec![format!("{}/now-showing", server.url())],
                selectors: vec![".movie-title".into()],
                script_keys: default_script_keys(),
            },
            Arc::new(fetcher),
            Arc::new(MemorySink::new()),
        )
        .unwrap();

        let sources: Vec<Arc<dyn CinemaSource>> = vec![
            Arc::new(slow),
            Arc::new(StubSource {
                id: "fast",
                titles: vec!["Wicked"],
            }),
        ];

        let started = Instant::now();
        let results = scrape_all(&sources).await;
        let elapsed = started.elapsed();

        assert!(elapsed < Duration::from_secs(3), "took {elapsed:?}");
        assert_eq!(results[0].cinema, "slow");
        assert_eq!(results[0].movies_found, 0);
        assert!(results[0].error.is_some());
        assert_eq!(results[1].movies[0].title, "Wicked");
        assert!(results[1].error.is_none());
    }

    #[tokio::test]
    async fn test_no_sources() {
        assert!(scrape_all(&[]).await.is_empty());
    }
}

//! Extraction diagnostics.
//!
//! The extractor reports what it tried and what it found as [`ScrapeEvent`]s
//! through an [`EventSink`]. Production runs forward them to `tracing`; tests
//! and callers that want to inspect a run can collect them with
//! [`MemorySink`].

use std::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeEvent {
    UrlTried {
        cinema: String,
        url: String,
    },
    PageFetched {
        cinema: String,
        url: String,
        status: u16,
        html_len: usize,
    },
    FetchFailed {
        cinema: String,
        url: String,
        error: String,
    },
    TitleFound {
        cinema: String,
        title: String,
        strategy: String,
    },
    SourceFinished {
        cinema: String,
        url: Option<String>,
        titles: usize,
    },
}

pub trait EventSink: Send + Sync {
    fn record(&self, event: ScrapeEvent);
}

/// Forwards every event to `tracing` with structured fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: ScrapeEvent) {
        match event {
            ScrapeEvent::UrlTried { cinema, url } => {
                debug!(%cinema, %url, "Trying candidate URL");
            }
            ScrapeEvent::PageFetched {
                cinema,
                url,
                status,
                html_len,
            } => {
                info!(%cinema, %url, status, html_len, "Fetched listing page");
            }
            ScrapeEvent::FetchFailed { cinema, url, error } => {
                warn!(%cinema, %url, %error, "Candidate URL failed");
            }
            ScrapeEvent::TitleFound {
                cinema,
                title,
                strategy,
            } => {
                debug!(%cinema, %title, %strategy, "Found title");
            }
            ScrapeEvent::SourceFinished {
                cinema,
                url,
                titles,
            } => {
                info!(%cinema, url = ?url, titles, "Source finished");
            }
        }
    }
}

/// Keeps every event in memory, in the order it was recorded.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ScrapeEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ScrapeEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: ScrapeEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

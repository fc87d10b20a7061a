use crate::similarity::similarity;
use crate::{CatalogEntry, MatchedMovie, ScrapedMovie};
use std::collections::HashSet;
use tracing::debug;

pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Result of one matching run.
///
/// `unmatched` and `duplicates` together hold every title that reached no
/// unclaimed catalog row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    pub matched: Vec<MatchedMovie>,
    /// Scraped titles with no catalog row at or above the threshold,
    /// formatted as `"<title> (<source>)"`.
    pub unmatched: Vec<String>,
    /// Scraped titles whose only qualifying catalog rows were already claimed
    /// by an earlier title, in the same format as `unmatched`.
    pub duplicates: Vec<String>,
}

fn annotate(movie: &ScrapedMovie) -> String {
    format!("{} ({})", movie.title, movie.source)
}

/// Greedily assign each scraped title to its best unclaimed catalog row.
///
/// Titles are processed in input order; a claimed row is never offered again.
/// Ties go to the earliest catalog row.
pub fn match_catalog(
    scraped: &[ScrapedMovie],
    catalog: &[CatalogEntry],
    threshold: f64,
) -> MatchOutcome {
    let mut claimed: HashSet<&str> = HashSet::new();
    let mut outcome = MatchOutcome::default();

    for movie in scraped {
        let mut best: Option<(&CatalogEntry, f64)> = None;
        let mut blocked = false;

        for entry in catalog {
            let score = similarity(&movie.title, &entry.title);
            if claimed.contains(entry.id.as_str()) {
                blocked |= score >= threshold;
                continue;
            }
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((entry, score));
            }
        }

        match best {
            Some((entry, score)) if score >= threshold => {
                debug!(scraped = %movie.title, catalog = %entry.title, score, "Matched");
                claimed.insert(entry.id.as_str());
                outcome.matched.push(MatchedMovie {
                    id: entry.id.clone(),
                    title: entry.title.clone(),
                    matched_with: movie.title.clone(),
                    source: movie.source.clone(),
                    similarity: score,
                });
            }
            _ if blocked => {
                debug!(scraped = %movie.title, "Best catalog row already claimed");
                outcome.duplicates.push(annotate(movie));
            }
            _ => outcome.unmatched.push(annotate(movie)),
        }
    }

    outcome
}

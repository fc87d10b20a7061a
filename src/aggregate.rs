use crate::normalize::normalize;
use crate::{ScrapeResult, ScrapedMovie};
use std::collections::HashSet;

/// Merge per-source results into one list, keeping the first occurrence of
/// each normalized title. Sources earlier in `results` own the display title.
pub fn unique(results: &[ScrapeResult]) -> Vec<ScrapedMovie> {
    let mut seen = HashSet::new();
    results
        .iter()
        .flat_map(|result| result.movies.iter())
        .filter(|movie| seen.insert(normalize(&movie.title)))
        .cloned()
        .collect()
}

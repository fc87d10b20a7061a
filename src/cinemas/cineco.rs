//! Cineco. WordPress theme with film cards and an occasional JSON-LD
//! `ItemList` of movies.

use crate::extractor::CinemaProfile;

pub const ID: &str = "cineco";

const URLS: &[&str] = &[
    "https://www.cineco.net/",
    "https://www.cineco.net/movies/",
    "https://www.cineco.net/now-showing/",
    "https://www.cineco.net/films/",
];

const SELECTORS: &[&str] = &[
    ".film-title",
    ".movie-title",
    ".entry-title a",
    "article.film h2",
    "article.movie h2",
    ".film-card h3",
    "[class*='film'] h3",
    "[class*='movie'] h3",
    ".film-poster img[alt]",
    ".movie-poster img[alt]",
];

const SCRIPT_KEYS: &[&str] = &["title", "name", "movieTitle", "film_title"];

pub fn profile() -> CinemaProfile {
    CinemaProfile {
        id: ID.to_string(),
        name: "Cineco".to_string(),
        urls: URLS.iter().map(|u| u.to_string()).collect(),
        selectors: SELECTORS.iter().map(|s| s.to_string()).collect(),
        script_keys: SCRIPT_KEYS.iter().map(|k| k.to_string()).collect(),
    }
}

//! Reel Cinemas (Dubai).

use crate::extractor::CinemaProfile;

pub const ID: &str = "reel";

const URLS: &[&str] = &[
    "https://www.reelcinemas.com/en-ae/",
    "https://www.reelcinemas.com/en-ae/movies",
    "https://www.reelcinemas.com/en-ae/now-showing",
];

const SELECTORS: &[&str] = &[
    ".movie-box .movie-name",
    ".movie-block h3",
    ".now-showing .title",
    "[class*='movie'] h2",
    "[class*='movie'] h3",
    "[class*='film'] .title",
    ".card h3",
    ".card h5",
    "[class*='movie'] img[alt]",
];

const SCRIPT_KEYS: &[&str] = &["title", "name", "movieTitle", "FilmTitle"];

pub fn profile() -> CinemaProfile {
    CinemaProfile {
        id: ID.to_string(),
        name: "Reel Cinemas".to_string(),
        urls: URLS.iter().map(|u| u.to_string()).collect(),
        selectors: SELECTORS.iter().map(|s| s.to_string()).collect(),
        script_keys: SCRIPT_KEYS.iter().map(|k| k.to_string()).collect(),
    }
}

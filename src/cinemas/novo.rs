//! Novo Cinemas. Mostly client rendered; titles usually come from the
//! hydration script or JSON-LD rather than markup.

use crate::extractor::CinemaProfile;

pub const ID: &str = "novo";

const URLS: &[&str] = &[
    "https://uae.novocinemas.com/",
    "https://uae.novocinemas.com/movies",
    "https://uae.novocinemas.com/now-showing",
];

const SELECTORS: &[&str] = &[
    ".movie-list .movie-name",
    ".movies-grid .movie-title",
    ".film-card h3",
    ".film-card h4",
    "[class*='movie'] h3",
    "[class*='movie'] h4",
    "[class*='Movie'] h3",
    ".swiper-slide img[alt]",
    "img[class*='poster'][alt]",
];

const SCRIPT_KEYS: &[&str] = &["title", "movieName", "movieTitle", "name"];

pub fn profile() -> CinemaProfile {
    CinemaProfile {
        id: ID.to_string(),
        name: "Novo Cinemas".to_string(),
        urls: URLS.iter().map(|u| u.to_string()).collect(),
        selectors: SELECTORS.iter().map(|s| s.to_string()).collect(),
        script_keys: SCRIPT_KEYS.iter().map(|k| k.to_string()).collect(),
    }
}

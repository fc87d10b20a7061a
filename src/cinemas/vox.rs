//! VOX Cinemas (UAE). Listing cards are server rendered; the "what's on"
//! page also embeds a JSON blob with `movieTitle` keys.

use crate::extractor::CinemaProfile;

pub const ID: &str = "vox";

const URLS: &[&str] = &[
    "https://uae.voxcinemas.com/",
    "https://uae.voxcinemas.com/movies/whatson",
    "https://uae.voxcinemas.com/movies",
    "https://uae.voxcinemas.com/showtimes",
];

const SELECTORS: &[&str] = &[
    ".movie-compare h3",
    "article.movie-summary h3",
    ".movie-card .movie-title",
    ".movie-item h3",
    "[class*='movie'] h2",
    "[class*='movie'] h3",
    "[class*='film'] h3",
    "a[href*='/movies/'] img[alt]",
    "img.poster[alt]",
];

const SCRIPT_KEYS: &[&str] = &["movieTitle", "title", "name"];

pub fn profile() -> CinemaProfile {
    CinemaProfile {
        id: ID.to_string(),
        name: "VOX Cinemas".to_string(),
        urls: URLS.iter().map(|u| u.to_string()).collect(),
        selectors: SELECTORS.iter().map(|s| s.to_string()).collect(),
        script_keys: SCRIPT_KEYS.iter().map(|k| k.to_string()).collect(),
    }
}

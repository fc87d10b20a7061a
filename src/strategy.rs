//! Independent techniques for pulling candidate titles out of a listing page.
//!
//! Cinema sites render "now showing" in very different ways: server-side
//! cards, JSON hydrated by inline scripts, or schema.org JSON-LD. Each
//! technique lives behind [`ExtractionStrategy`] and the extractor unions
//! whatever they all find.

use crate::error::{Result, ScrapeError};
use crate::normalize::clean_whitespace;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

/// Upper bound for titles read from markup or JSON-LD.
pub const MAX_TITLE_LEN: usize = 100;
/// Upper bound for titles pulled out of inline scripts by regex.
pub const MAX_SCRIPT_TITLE_LEN: usize = 80;
const MIN_TITLE_LEN: usize = 2;

static SCRIPT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script").expect("Invalid script selector"));

static JSON_LD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("Invalid JSON-LD selector")
});

/// A title as found on the page, before filtering and dedup.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub title: String,
    pub strategy: String,
}

pub trait ExtractionStrategy: Send + Sync {
    /// Short label used in diagnostics.
    fn name(&self) -> &str;

    /// Longest title this strategy is trusted to produce.
    fn max_title_len(&self) -> usize {
        MAX_TITLE_LEN
    }

    fn extract(&self, document: &Html) -> Vec<Candidate>;
}

/// Length bounds plus a guard against URLs leaking in from regex matches.
pub fn is_plausible_title(title: &str, max_len: usize) -> bool {
    let len = title.chars().count();
    if len < MIN_TITLE_LEN || len > max_len {
        return false;
    }
    let lower = title.to_lowercase();
    !(lower.contains("http") || lower.contains("www"))
}

/// Runs an ordered list of CSS selectors; each match contributes its text, or
/// its `alt` attribute for images.
pub struct SelectorStrategy {
    selectors: Vec<(String, Selector)>,
}

impl SelectorStrategy {
    pub fn new<S: AsRef<str>>(selectors: &[S]) -> Result<Self> {
        let selectors = selectors
            .iter()
            .map(|raw| {
                let raw = raw.as_ref();
                Selector::parse(raw)
                    .map(|sel| (raw.to_string(), sel))
                    .map_err(|e| ScrapeError::Selector {
                        selector: raw.to_string(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { selectors })
    }
}

impl ExtractionStrategy for SelectorStrategy {
    fn name(&self) -> &str {
        "selector"
    }

    fn extract(&self, document: &Html) -> Vec<Candidate> {
        let mut found = Vec::new();
        for (raw, selector) in &self.selectors {
            for element in document.select(selector) {
                let text = if element.value().name() == "img" {
                    element.value().attr("alt").unwrap_or("").to_string()
                } else {
                    element.text().collect::<String>()
                };
                let title = clean_whitespace(&text);
                if title.is_empty() {
                    continue;
                }
                found.push(Candidate {
                    title,
                    strategy: format!("selector:{raw}"),
                });
            }
        }
        found
    }
}

/// Scans inline `<script>` bodies for `"key":"value"` pairs, for sites that
/// hydrate their listings from embedded JSON.
pub struct ScriptRegexStrategy {
    pattern: Regex,
}

impl ScriptRegexStrategy {
    pub fn new<S: AsRef<str>>(keys: &[S]) -> Result<Self> {
        if keys.is_empty() {
            return Err(ScrapeError::Config(
                "script strategy needs at least one key".into(),
            ));
        }
        let alternation = keys
            .iter()
            .map(|k| regex::escape(k.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(
            r#""(?:{alternation})"\s*:\s*"((?:[^"\\]|\\.)*)""#
        ))?;
        Ok(Self { pattern })
    }
}

impl ExtractionStrategy for ScriptRegexStrategy {
    fn name(&self) -> &str {
        "script"
    }

    fn max_title_len(&self) -> usize {
        MAX_SCRIPT_TITLE_LEN
    }

    fn extract(&self, document: &Html) -> Vec<Candidate> {
        let mut found = Vec::new();
        for script in document.select(&SCRIPT_SELECTOR) {
            let body: String = script.text().collect();
            for caps in self.pattern.captures_iter(&body) {
                // JSON escapes such as \/ and \u0026
                let Ok(raw) = serde_json::from_str::<String>(&format!("\"{}\"", &caps[1])) else {
                    continue;
                };
                let title = clean_whitespace(&raw);
                if !title.is_empty() {
                    found.push(Candidate {
                        title,
                        strategy: "script".to_string(),
                    });
                }
            }
        }
        found
    }
}

/// Reads `<script type="application/ld+json">` blocks and collects the
/// `name` of every node typed `Movie`, however deeply nested.
#[derive(Debug, Default)]
pub struct JsonLdStrategy;

impl ExtractionStrategy for JsonLdStrategy {
    fn name(&self) -> &str {
        "json-ld"
    }

    fn extract(&self, document: &Html) -> Vec<Candidate> {
        let mut names = Vec::new();
        for (index, block) in document.select(&JSON_LD_SELECTOR).enumerate() {
            let text: String = block.text().collect();
            match serde_json::from_str::<Value>(&text) {
                Ok(json) => collect_movie_names(&json, &mut names),
                Err(e) => debug!(block = index, error = %e, "Skipping malformed JSON-LD block"),
            }
        }
        names
            .into_iter()
            .map(|name| Candidate {
                title: clean_whitespace(&name),
                strategy: "json-ld".to_string(),
            })
            .filter(|c| !c.title.is_empty())
            .collect()
    }
}

fn is_movie_type(node: &serde_json::Map<String, Value>) -> bool {
    match node.get("@type") {
        Some(Value::String(t)) => t == "Movie",
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some("Movie")),
        _ => false,
    }
}

fn collect_movie_names(json: &Value, names: &mut Vec<String>) {
    match json {
        Value::Object(map) => {
            if is_movie_type(map)
                && let Some(name) = map.get("name").and_then(Value::as_str)
            {
                names.push(name.to_string());
            }
            for value in map.values() {
                collect_movie_names(value, names);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_movie_names(item, names);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn test_selector_strategy_reads_text_and_alt() {
        let html = Html::parse_document(
            r#"<div class="movie-card"><h3 class="movie-title">
                 Inside   Out 2 </h3></div>
               <div class="poster"><img class="film-poster" alt="Deadpool &amp; Wolverine" src="/a.jpg"></div>
               <img class="film-poster" src="/b.jpg">
               <h3 class="movie-title">Spider-Man<span>:</span> No Way <em>Home</em></h3>"#,
        );
        let strategy = SelectorStrategy::new(&[".movie-title", "img.film-poster"]).unwrap();
        let found = strategy.extract(&html);
        assert_eq!(
            titles(&found),
            vec!["Inside Out 2", "Spider-Man: No Way Home", "Deadpool & Wolverine"]
        );
        assert_eq!(found[0].strategy, "selector:.movie-title");
        assert_eq!(found[2].strategy, "selector:img.film-poster");
    }

    #[test]
    fn test_selector_strategy_rejects_bad_selector() {
        let err = SelectorStrategy::new(&["div[["]).err().unwrap();
        assert!(matches!(err, ScrapeError::Selector { .. }));
    }

    #[test]
    fn test_script_strategy_matches_configured_keys() {
        let html = Html::parse_document(
            r#"<script>
                 window.__DATA__ = {"movies":[{"movieTitle":"Twisters","id":1},
                   {"title" : "Alien: Romulus"},{"slug":"not-a-title"},
                   {"name":"x"},{"title":"Escaped \" quote"},
                   {"title":"AC\/DC Live"},{"movieTitle":"Fast \u0026 Furious"}]};
               </script>"#,
        );
        let strategy = ScriptRegexStrategy::new(&["title", "name", "movieTitle"]).unwrap();
        let found = strategy.extract(&html);
        assert_eq!(
            titles(&found),
            vec![
                "Twisters",
                "Alien: Romulus",
                "x",
                "Escaped \" quote",
                "AC/DC Live",
                "Fast & Furious"
            ]
        );
        assert_eq!(strategy.max_title_len(), MAX_SCRIPT_TITLE_LEN);
    }

    #[test]
    fn test_json_ld_walks_nested_nodes_and_skips_bad_blocks() {
        let html = Html::parse_document(
            r#"<script type="application/ld+json">{ not json </script>
               <script type="application/ld+json">
               {"@context":"https://schema.org","@graph":[
                  {"@type":"Movie","name":"Oppenheimer"},
                  {"@type":"ItemList","itemListElement":[
                     {"@type":"ListItem","item":{"@type":["Movie","CreativeWork"],"name":"Barbie"}}
                  ]},
                  {"@type":"Event","name":"Premiere night"}
               ]}
               </script>
               <script type="application/ld+json">[{"@type":"Movie","name":"Wicked"}]</script>"#,
        );
        let found = JsonLdStrategy.extract(&html);
        assert_eq!(titles(&found), vec!["Oppenheimer", "Barbie", "Wicked"]);
        assert!(found.iter().all(|c| c.strategy == "json-ld"));
    }

    #[test]
    fn test_plausible_title_bounds() {
        assert!(is_plausible_title("Up", MAX_TITLE_LEN));
        assert!(!is_plausible_title("U", MAX_TITLE_LEN));
        assert!(!is_plausible_title(&"x".repeat(101), MAX_TITLE_LEN));
        assert!(is_plausible_title(&"x".repeat(100), MAX_TITLE_LEN));
        assert!(!is_plausible_title(&"x".repeat(81), MAX_SCRIPT_TITLE_LEN));
        assert!(!is_plausible_title("https://cdn.example.com/poster.jpg", MAX_TITLE_LEN));
        assert!(!is_plausible_title("WWW.VOXCINEMAS.COM", MAX_TITLE_LEN));
    }
}

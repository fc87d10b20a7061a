use crate::cinemas;
use crate::error::{Result, ScrapeError};
use crate::extractor::CinemaProfile;
use crate::fetch::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::matcher::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Run configuration, usually read from a TOML file.
///
/// ```toml
/// threshold = 0.75
/// request_timeout_secs = 15
///
/// [[cinemas]]
/// id = "vox"
/// urls = ["https://uae.voxcinemas.com/movies/whatson"]
/// selectors = [".movie-compare h3"]
/// ```
///
/// A `cinemas` list replaces the built-in profiles entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Minimum similarity for a catalog match, in [0, 1].
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "cinemas::builtin")]
    pub cinemas: Vec<CinemaProfile>,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            request_timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            cinemas: cinemas::builtin(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ScrapeError::Config(format!(
                "threshold must be between 0 and 1, got {}",
                self.threshold
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ScrapeError::Config(
                "request_timeout_secs must be positive".into(),
            ));
        }
        for profile in &self.cinemas {
            if profile.id.trim().is_empty() {
                return Err(ScrapeError::Config("cinema with empty id".into()));
            }
            if profile.urls.is_empty() {
                return Err(ScrapeError::Config(format!(
                    "cinema {} has no candidate URLs",
                    profile.id
                )));
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Keep only the named cinemas. Unknown ids are an error.
    pub fn retain_cinemas(&mut self, ids: &[String]) -> Result<()> {
        if let Some(unknown) = ids
            .iter()
            .find(|id| !self.cinemas.iter().any(|p| &p.id == *id))
        {
            return Err(ScrapeError::Config(format!("unknown cinema: {unknown}")));
        }
        self.cinemas.retain(|p| ids.contains(&p.id));
        Ok(())
    }
}

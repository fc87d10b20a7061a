//! Built-in cinema profiles.
//!
//! | Id | Site | Notes |
//! |----|------|-------|
//! | `vox` | uae.voxcinemas.com | Server-rendered cards, `movieTitle` JSON |
//! | `novo` | uae.novocinemas.com | Client rendered, relies on scripts/JSON-LD |
//! | `reel` | reelcinemas.com | Card grid |
//! | `cineco` | cineco.net | WordPress film cards |
//!
//! Profiles only carry URLs, selectors and script keys; the shared
//! [`SourceExtractor`](crate::extractor::SourceExtractor) does the work.

pub mod cineco;
pub mod novo;
pub mod reel;
pub mod vox;

use crate::extractor::CinemaProfile;

/// All built-in profiles, in the order results are aggregated.
pub fn builtin() -> Vec<CinemaProfile> {
    vec![vox::profile(), cineco::profile(), novo::profile(), reel::profile()]
}

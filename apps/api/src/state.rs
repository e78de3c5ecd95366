use std::sync::Arc;

use crate::config::Config;
use crate::extraction::segmenter::HeadingLexicon;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Heading keyword lists used by the section segmenter. Loaded once at
    /// startup, optionally from a per-locale JSON file.
    pub lexicon: Arc<HeadingLexicon>,
}

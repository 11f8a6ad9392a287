use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::Classifier;
use crate::taxonomy::store::TaxonomyStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only warehouse access; a fresh snapshot is loaded per curation run.
    pub taxonomy: Arc<dyn TaxonomyStore>,
    pub classifier: Arc<dyn Classifier>,
    pub config: Config,
}

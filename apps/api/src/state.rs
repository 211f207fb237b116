use crate::history::store::AnalysisStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Analysis history over whichever key-value backend config selected.
    pub store: AnalysisStore,
}

use std::sync::Arc;

use crate::{
    db::{CatalogStore, MemorySummaryStore, SummaryStore},
    services::{
        GameTitleIndex, LexiconAnalyzer, PolarityAnalyzer, TextGenerator, TfIdfVectorizer,
        Vectorizer,
    },
};

/// Shared application state
///
/// Every collaborator is injected here; nothing in the engine reaches for globals.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub summaries: Arc<dyn SummaryStore>,
    pub generator: Arc<dyn TextGenerator>,
    pub vectorizer: Arc<dyn Vectorizer>,
    pub analyzer: Arc<dyn PolarityAnalyzer>,
    pub title_index: Arc<GameTitleIndex>,
}

impl AppState {
    /// Creates state with the default engine components and an in-memory summary store
    pub fn new(catalog: Arc<dyn CatalogStore>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            catalog,
            summaries: Arc::new(MemorySummaryStore::new()),
            generator,
            vectorizer: Arc::new(TfIdfVectorizer::new()),
            analyzer: Arc::new(LexiconAnalyzer::new()),
            title_index: Arc::new(GameTitleIndex::new()),
        }
    }

    /// Replaces the summary store
    pub fn with_summary_store(mut self, summaries: Arc<dyn SummaryStore>) -> Self {
        self.summaries = summaries;
        self
    }
}

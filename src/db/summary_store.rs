use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{error::AppResult, models::CachedSummary};

/// Storage for narrative summaries keyed by exact game title
///
/// `upsert` overwrites any previous entry for the title. Concurrent upserts resolve
/// last-writer-wins inside the backing store.
#[async_trait::async_trait]
pub trait SummaryStore: Send + Sync {
    async fn get(&self, game_title: &str) -> AppResult<Option<CachedSummary>>;

    async fn upsert(&self, game_title: &str, summary_text: &str, now: DateTime<Utc>)
        -> AppResult<()>;
}

/// Process-local summary store
#[derive(Default)]
pub struct MemorySummaryStore {
    entries: RwLock<HashMap<String, CachedSummary>>,
}

impl MemorySummaryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SummaryStore for MemorySummaryStore {
    async fn get(&self, game_title: &str) -> AppResult<Option<CachedSummary>> {
        Ok(self.entries.read().await.get(game_title).cloned())
    }

    async fn upsert(
        &self,
        game_title: &str,
        summary_text: &str,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        self.entries.write().await.insert(
            game_title.to_string(),
            CachedSummary {
                summary_text: summary_text.to_string(),
                updated_at: now,
            },
        );
        Ok(())
    }
}

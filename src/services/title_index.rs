use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::{db::CatalogStore, error::AppResult, models::Game};

/// Lowercased title lookup used to ground chat replies in catalog data
///
/// Owned by the application state rather than held in a global. A failed refresh
/// keeps whatever was loaded before.
#[derive(Default)]
pub struct GameTitleIndex {
    games: RwLock<BTreeMap<String, Game>>,
}

impl GameTitleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index directly from a list of games
    pub fn from_games(games: Vec<Game>) -> Self {
        Self {
            games: RwLock::new(index_by_title(games)),
        }
    }

    /// Reloads every title from the catalog, returning the number indexed
    pub async fn refresh(&self, catalog: &dyn CatalogStore) -> AppResult<usize> {
        let games = catalog.fetch_games().await?;
        let indexed = index_by_title(games);
        let count = indexed.len();
        *self.games.write().await = indexed;

        tracing::info!(games = count, "Loaded games into title index");
        Ok(count)
    }

    /// Games whose title appears anywhere in `message`, ignoring case
    pub async fn mentioned_in(&self, message: &str) -> Vec<Game> {
        let message = message.to_lowercase();
        self.games
            .read()
            .await
            .iter()
            .filter(|(title, _)| message.contains(title.as_str()))
            .map(|(_, game)| game.clone())
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }
}

fn index_by_title(games: Vec<Game>) -> BTreeMap<String, Game> {
    games
        .into_iter()
        .filter(|game| !game.title.trim().is_empty())
        .map(|game| (game.title.to_lowercase(), game))
        .collect()
}

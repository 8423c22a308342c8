use crate::{
    error::AppResult,
    models::{Game, Review},
};

/// Read-only view of the game catalog
///
/// Every call is a point-in-time read; no transaction spans several calls, so two
/// reads in one request may observe different catalog states.
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// All games, in catalog order
    async fn fetch_games(&self) -> AppResult<Vec<Game>>;

    /// Ids of the games a user owns
    async fn fetch_owned(&self, user_id: i64) -> AppResult<Vec<i64>>;

    /// Up to `limit` reviews for a game, most recent first
    async fn fetch_reviews(&self, game_id: i64, limit: i64) -> AppResult<Vec<Review>>;

    /// Total number of reviews for a game
    async fn count_reviews(&self, game_id: i64) -> AppResult<i64>;
}

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{CatalogStore, SummaryStore},
    error::AppResult,
    models::{CachedSummary, Game, Review},
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse and applies
/// any pending migrations from `migrations/`.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

/// Catalog reads against the `game`, `user_game` and `review` tables
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CatalogStore for PgCatalogStore {
    async fn fetch_games(&self) -> AppResult<Vec<Game>> {
        let games = sqlx::query_as::<_, Game>(
            r#"
            SELECT game_id, title, description, developer, publisher, cover_image_url
            FROM game
            ORDER BY game_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(games)
    }

    async fn fetch_owned(&self, user_id: i64) -> AppResult<Vec<i64>> {
        let owned = sqlx::query_scalar::<_, i64>(
            "SELECT game_id FROM user_game WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(owned)
    }

    async fn fetch_reviews(&self, game_id: i64, limit: i64) -> AppResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT game_id, review_text, created_date
            FROM review
            WHERE game_id = $1
            ORDER BY created_date DESC
            LIMIT $2
            "#,
        )
        .bind(game_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn count_reviews(&self, game_id: i64) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM review WHERE game_id = $1")
            .bind(game_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Summary cache backed by the `game_ai_summary` table
#[derive(Clone)]
pub struct PgSummaryStore {
    pool: PgPool,
}

impl PgSummaryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SummaryStore for PgSummaryStore {
    async fn get(&self, game_title: &str) -> AppResult<Option<CachedSummary>> {
        let entry = sqlx::query_as::<_, CachedSummary>(
            "SELECT summary_text, updated_at FROM game_ai_summary WHERE game_title = $1",
        )
        .bind(game_title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn upsert(
        &self,
        game_title: &str,
        summary_text: &str,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO game_ai_summary (game_title, summary_text, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (game_title)
            DO UPDATE SET summary_text = EXCLUDED.summary_text, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(game_title)
        .bind(summary_text)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

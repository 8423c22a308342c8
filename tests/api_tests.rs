use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::json;

use gamehub_intel::{
    create_router,
    db::CatalogStore,
    error::{AppError, AppResult},
    models::{Game, Review},
    services::TextGenerator,
    AppState,
};

/// In-memory catalog with fixed contents
#[derive(Default)]
struct FakeCatalog {
    games: Vec<Game>,
    owned: Vec<(i64, i64)>,
    reviews: Vec<Review>,
    offline: bool,
}

impl FakeCatalog {
    fn check(&self) -> AppResult<()> {
        if self.offline {
            return Err(AppError::DataUnavailable("catalog offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CatalogStore for FakeCatalog {
    async fn fetch_games(&self) -> AppResult<Vec<Game>> {
        self.check()?;
        Ok(self.games.clone())
    }

    async fn fetch_owned(&self, user_id: i64) -> AppResult<Vec<i64>> {
        self.check()?;
        Ok(self
            .owned
            .iter()
            .filter(|(user, _)| *user == user_id)
            .map(|(_, game)| *game)
            .collect())
    }

    async fn fetch_reviews(&self, game_id: i64, limit: i64) -> AppResult<Vec<Review>> {
        self.check()?;
        let mut reviews: Vec<Review> = self
            .reviews
            .iter()
            .filter(|r| r.game_id == game_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_date.cmp(&a.created_date));
        reviews.truncate(limit as usize);
        Ok(reviews)
    }

    async fn count_reviews(&self, game_id: i64) -> AppResult<i64> {
        self.check()?;
        Ok(self.reviews.iter().filter(|r| r.game_id == game_id).count() as i64)
    }
}

/// Echoes a fixed reply and counts calls
struct CountingGenerator {
    reply: Option<&'static str>,
    calls: AtomicUsize,
}

impl CountingGenerator {
    fn replying(reply: &'static str) -> Self {
        Self {
            reply: Some(reply),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl TextGenerator for CountingGenerator {
    async fn generate(&self, _prompt: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .map(str::to_string)
            .ok_or_else(|| AppError::Generation("model unreachable".to_string()))
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

fn game(game_id: i64, title: &str, description: &str) -> Game {
    Game {
        game_id,
        title: title.to_string(),
        description: Some(description.to_string()),
        developer: Some("Indie Studio".to_string()),
        publisher: None,
        cover_image_url: Some(format!("https://img.example/{}.png", game_id)),
    }
}

fn review(game_id: i64, text: &str, minutes_ago: i64) -> Review {
    Review {
        game_id,
        review_text: Some(text.to_string()),
        created_date: Utc::now() - Duration::minutes(minutes_ago),
    }
}

fn shooter_catalog() -> FakeCatalog {
    FakeCatalog {
        games: vec![
            game(1, "Bullet Rush", "fast paced shooter"),
            game(2, "Snail Sniper", "slow paced shooter"),
            game(3, "Harvest Days", "farming simulator"),
        ],
        owned: vec![(42, 1)],
        reviews: vec![
            review(2, "Amazing game, loved it!", 1),
            review(2, "Amazing game, loved it!", 2),
            review(2, "Terrible, crashes constantly", 3),
        ],
        offline: false,
    }
}

fn create_test_server(catalog: FakeCatalog, generator: Arc<CountingGenerator>) -> TestServer {
    let state = AppState::new(Arc::new(catalog), generator);
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(
        FakeCatalog::default(),
        Arc::new(CountingGenerator::replying("ok")),
    );
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_recommend_ranks_by_content_similarity() {
    let server = create_test_server(shooter_catalog(), Arc::new(CountingGenerator::replying("")));

    let response = server.post("/recommend").json(&json!({ "user_id": 42 })).await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0]["game_id"], 2);
    assert_eq!(recs[0]["reason"], "Bullet Rush");
    assert_eq!(recs[0]["cover_image_url"], "https://img.example/2.png");
    assert_eq!(recs[1]["game_id"], 3);
    assert_eq!(recs[1]["reason"], "General Popularity");
}

#[tokio::test]
async fn test_recommend_cold_start_returns_catalog_head() {
    let mut catalog = shooter_catalog();
    catalog.owned.clear();
    let server = create_test_server(catalog, Arc::new(CountingGenerator::replying("")));

    let response = server.post("/recommend").json(&json!({ "user_id": 42 })).await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let ids: Vec<i64> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["game_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_recommend_requires_user_id() {
    let server = create_test_server(shooter_catalog(), Arc::new(CountingGenerator::replying("")));

    let response = server.post("/recommend").json(&json!({})).await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "User ID required" }));
}

#[tokio::test]
async fn test_recommend_surfaces_data_unavailable() {
    let mut catalog = shooter_catalog();
    catalog.offline = true;
    let server = create_test_server(catalog, Arc::new(CountingGenerator::replying("")));

    let response = server.post("/recommend").json(&json!({ "user_id": 42 })).await;
    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_sentiment_scores_recent_reviews() {
    let server = create_test_server(shooter_catalog(), Arc::new(CountingGenerator::replying("")));

    let response = server.post("/sentiment").json(&json!({ "game_id": 2 })).await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["positive"], 2);
    assert_eq!(body["negative"], 1);
    assert_eq!(body["neutral"], 0);
    assert_eq!(body["total"], 3);
    assert_eq!(body["analyzed"], 3);
    assert!(body["score"].as_f64().unwrap() > 5.0);
}

#[tokio::test]
async fn test_sentiment_window_differs_from_true_total() {
    let mut catalog = shooter_catalog();
    catalog.reviews = (0..60).map(|i| review(9, "good fun", i)).collect();
    let server = create_test_server(catalog, Arc::new(CountingGenerator::replying("")));

    let body: serde_json::Value = server
        .post("/sentiment")
        .json(&json!({ "game_id": 9 }))
        .await
        .json();
    assert_eq!(body["analyzed"], 50);
    assert_eq!(body["total"], 60);
}

#[tokio::test]
async fn test_sentiment_without_reviews_is_zero() {
    let server = create_test_server(shooter_catalog(), Arc::new(CountingGenerator::replying("")));

    let response = server.post("/sentiment").json(&json!({ "game_id": 3 })).await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "positive": 0,
        "negative": 0,
        "neutral": 0,
        "score": 0.0,
        "total": 0,
        "analyzed": 0
    }));
}

#[tokio::test]
async fn test_sentiment_requires_game_id() {
    let server = create_test_server(shooter_catalog(), Arc::new(CountingGenerator::replying("")));
    let response = server.post("/sentiment").json(&json!({})).await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_summarize_caches_by_title() {
    let generator = Arc::new(CountingGenerator::replying("Snappy gunplay, short campaign."));
    let server = create_test_server(shooter_catalog(), generator.clone());

    let request = json!({ "game": "Snail Sniper", "reviews": ["fun", "too short"] });

    let first: serde_json::Value = server.post("/summarize").json(&request).await.json();
    let second: serde_json::Value = server.post("/summarize").json(&request).await.json();

    assert_eq!(first["summary"], "Snappy gunplay, short campaign.");
    assert_eq!(second, first);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);

    server
        .post("/summarize")
        .json(&json!({ "game": "Harvest Days", "reviews": [] }))
        .await
        .assert_status_ok();
    assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_summarize_degrades_when_generator_fails() {
    let generator = Arc::new(CountingGenerator::failing());
    let server = create_test_server(shooter_catalog(), generator.clone());

    let request = json!({ "game": "Snail Sniper", "reviews": ["fun"] });
    let response = server.post("/summarize").json(&request).await;
    response.assert_status_ok();
    response.assert_json(&json!({ "summary": "Unable to generate summary at this time." }));

    // nothing was cached, so the next call tries again
    server.post("/summarize").json(&request).await;
    assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_summarize_requires_game_title() {
    let generator = Arc::new(CountingGenerator::replying("unused"));
    let server = create_test_server(shooter_catalog(), generator.clone());

    server
        .post("/summarize")
        .json(&json!({ "reviews": ["fun"] }))
        .await
        .assert_status(axum::http::StatusCode::BAD_REQUEST);
    server
        .post("/summarize")
        .json(&json!({ "game": "  ", "reviews": ["fun"] }))
        .await
        .assert_status(axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_chat_uses_title_index() {
    let catalog = Arc::new(shooter_catalog());
    let generator = Arc::new(CountingGenerator::replying("[BUTTON: Play](/games/2)"));
    let state = AppState::new(catalog.clone(), generator);
    state.title_index.refresh(catalog.as_ref()).await.unwrap();
    let server = TestServer::new(create_router(state)).unwrap();

    let response = server
        .post("/chat")
        .json(&json!({ "message": "Is snail sniper any good?" }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "reply": "[BUTTON: Play](/games/2)" }));
}

#[tokio::test]
async fn test_chat_generator_failure_is_bad_gateway() {
    let server = create_test_server(shooter_catalog(), Arc::new(CountingGenerator::failing()));

    let response = server.post("/chat").json(&json!({ "message": "hello" })).await;
    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server(shooter_catalog(), Arc::new(CountingGenerator::replying("")));
    let id = "6f1c1f36-52a4-4c55-9a43-0c8a0f0b9f55";

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(id),
        )
        .await;
    assert_eq!(response.header("x-request-id"), id);
}

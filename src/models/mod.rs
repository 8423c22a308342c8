use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label used when no owned game explains a recommendation
pub const GENERAL_POPULARITY: &str = "General Popularity";

/// A game in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Game {
    pub game_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub cover_image_url: Option<String>,
}

impl Game {
    /// Description text, with a missing description read as empty
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// A single user review
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Review {
    pub game_id: i64,
    pub review_text: Option<String>,
    pub created_date: DateTime<Utc>,
}

/// A narrative summary stored in the summary cache
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct CachedSummary {
    pub summary_text: String,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Recommendations
// ============================================================================

/// Request body for `POST /recommend`
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// One recommended game, as returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedGame {
    pub game_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub reason: String,
}

/// Response body for `POST /recommend`
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendedGame>,
}

// ============================================================================
// Sentiment
// ============================================================================

/// Request body for `POST /sentiment`
#[derive(Debug, Deserialize)]
pub struct SentimentRequest {
    #[serde(default)]
    pub game_id: Option<i64>,
}

/// Response body for `POST /sentiment`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentResponse {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub score: f64,
    pub total: i64,
    pub analyzed: usize,
}

// ============================================================================
// Summaries
// ============================================================================

/// Request body for `POST /summarize`
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub game: String,
    #[serde(default)]
    pub reviews: Vec<String>,
}

/// Response body for `POST /summarize`
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

// ============================================================================
// Chat
// ============================================================================

/// Request body for `POST /chat`
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Page the user is looking at, e.g. "Page: /games/12 - Title: Elden Ring"
    #[serde(default = "default_chat_context")]
    pub context: String,
}

fn default_chat_context() -> String {
    "Unknown Page".to_string()
}

/// Response body for `POST /chat`
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

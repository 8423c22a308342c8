use crate::{
    db::CatalogStore,
    error::{AppError, AppResult},
    models::{Review, SentimentResponse},
    services::polarity::PolarityAnalyzer,
};

/// Number of most recent reviews scored per request
pub const REVIEW_WINDOW: i64 = 50;

const POSITIVE_THRESHOLD: f64 = 0.1;
const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Polarity scores cluster near zero; this stretch spreads them over the 1-10 scale
const POLARITY_STRETCH: f64 = 3.0;
const MIN_SCORE: f64 = 1.0;
const MAX_SCORE: f64 = 10.0;

/// Aggregated sentiment over a window of reviews
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentSummary {
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub average_polarity: f64,
    /// 1.0-10.0 when anything was analyzed, exactly 0 otherwise
    pub weighted_score: f64,
    pub analyzed_count: usize,
    pub true_total_count: i64,
}

impl SentimentSummary {
    pub fn with_true_total(mut self, true_total_count: i64) -> Self {
        self.true_total_count = true_total_count;
        self
    }
}

impl From<SentimentSummary> for SentimentResponse {
    fn from(summary: SentimentSummary) -> Self {
        Self {
            positive: summary.positive_count,
            negative: summary.negative_count,
            neutral: summary.neutral_count,
            score: summary.weighted_score,
            total: summary.true_total_count,
            analyzed: summary.analyzed_count,
        }
    }
}

/// Classifies each review and derives the bounded score
///
/// Reviews with empty or missing text are skipped and do not count towards the
/// average. If nothing is left to analyze the summary stays in the zero "no data"
/// state. `true_total_count` is left at 0 for the caller to fill in.
pub fn score(reviews: &[Review], analyzer: &dyn PolarityAnalyzer) -> SentimentSummary {
    let mut summary = SentimentSummary::default();
    let mut total_polarity = 0.0;

    for text in reviews
        .iter()
        .filter_map(|review| review.review_text.as_deref())
        .filter(|text| !text.trim().is_empty())
    {
        let polarity = analyzer.polarity(text);
        total_polarity += polarity;
        summary.analyzed_count += 1;

        if polarity > POSITIVE_THRESHOLD {
            summary.positive_count += 1;
        } else if polarity < NEGATIVE_THRESHOLD {
            summary.negative_count += 1;
        } else {
            summary.neutral_count += 1;
        }
    }

    if summary.analyzed_count == 0 {
        return summary;
    }

    summary.average_polarity = total_polarity / summary.analyzed_count as f64;
    summary.weighted_score = weighted_score(summary.average_polarity);
    summary
}

/// Maps an average polarity onto a 1.0-10.0 score with one decimal
pub fn weighted_score(average_polarity: f64) -> f64 {
    let raw = ((average_polarity * POLARITY_STRETCH) + 1.0) * 5.0;
    let clamped = raw.clamp(MIN_SCORE, MAX_SCORE);
    (clamped * 10.0).round() / 10.0
}

/// Scores the most recent reviews of a game and reports the full review count
pub async fn get_sentiment(
    catalog: &dyn CatalogStore,
    analyzer: &dyn PolarityAnalyzer,
    game_id: Option<i64>,
) -> AppResult<SentimentResponse> {
    let game_id = match game_id {
        Some(id) if id != 0 => id,
        _ => return Err(AppError::InvalidInput("Game ID required".to_string())),
    };

    let reviews = catalog.fetch_reviews(game_id, REVIEW_WINDOW).await?;
    if reviews.is_empty() {
        tracing::debug!(game_id, "No reviews to analyze");
        return Ok(SentimentSummary::default().into());
    }

    let summary = score(&reviews, analyzer);
    let true_total = catalog.count_reviews(game_id).await?;

    tracing::info!(
        game_id,
        fetched = reviews.len(),
        analyzed = summary.analyzed_count,
        total = true_total,
        score = summary.weighted_score,
        "Sentiment computed"
    );

    Ok(summary.with_true_total(true_total).into())
}

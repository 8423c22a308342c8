use chrono::{DateTime, Duration, Utc};

use crate::{db::SummaryStore, services::providers::TextGenerator};

/// How long a cached summary is served before it is regenerated
pub const SUMMARY_FRESHNESS_HOURS: i64 = 24;

/// Reviews included in the generation prompt
pub const MAX_PROMPT_REVIEWS: usize = 20;

/// Returned when the text generator cannot produce a summary
pub const DEGRADED_SUMMARY: &str = "Unable to generate summary at this time.";

/// Where a summary came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// Fresh cache entry, returned unchanged
    Cached(String),
    /// Newly generated (and stored, if the store accepted it)
    Generated(String),
    /// Generation failed; a fixed fallback message
    Degraded,
}

impl SummaryOutcome {
    pub fn text(&self) -> &str {
        match self {
            SummaryOutcome::Cached(text) | SummaryOutcome::Generated(text) => text,
            SummaryOutcome::Degraded => DEGRADED_SUMMARY,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            SummaryOutcome::Cached(text) | SummaryOutcome::Generated(text) => text,
            SummaryOutcome::Degraded => DEGRADED_SUMMARY.to_string(),
        }
    }
}

/// Builds the critic prompt from at most [`MAX_PROMPT_REVIEWS`] reviews
pub fn build_prompt(game_title: &str, reviews: &[String]) -> String {
    let reviews_text = reviews
        .iter()
        .take(MAX_PROMPT_REVIEWS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n- ");

    format!(
        r#"
You are an expert Game Critic.
Here are user reviews for the game "{game_title}":

- {reviews_text}

**TASK**:
Provide a **single, short paragraph** (maximum 3 sentences) summarizing these reviews.
Write it like a Google Maps place summary: mention the key vibes, one major pro, one major con (if any), and the general consensus.
Do NOT use bullet points or lists. Be extremely concise.
"#
    )
}

/// Returns a narrative summary for a game, served from the cache while fresh
///
/// Cache reads and writes are best-effort: a failed read is treated as a miss and a
/// failed write is logged, so the store can never fail the request. A failed
/// generation yields [`SummaryOutcome::Degraded`] and leaves the cache untouched.
pub async fn summarize(
    game_title: &str,
    reviews: &[String],
    store: &dyn SummaryStore,
    generator: &dyn TextGenerator,
    now: DateTime<Utc>,
) -> SummaryOutcome {
    match store.get(game_title).await {
        Ok(Some(entry)) if now - entry.updated_at < Duration::hours(SUMMARY_FRESHNESS_HOURS) => {
            tracing::info!(game = %game_title, updated_at = %entry.updated_at, "Summary cache hit");
            return SummaryOutcome::Cached(entry.summary_text);
        }
        Ok(Some(entry)) => {
            tracing::info!(game = %game_title, updated_at = %entry.updated_at, "Summary cache stale");
        }
        Ok(None) => {
            tracing::info!(game = %game_title, "Summary cache miss");
        }
        Err(e) => {
            tracing::warn!(game = %game_title, error = %e, "Summary cache unavailable, generating anyway");
        }
    }

    let prompt = build_prompt(game_title, reviews);
    let summary = match generator.generate(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(
                game = %game_title,
                provider = generator.name(),
                error = %e,
                "Summary generation failed"
            );
            return SummaryOutcome::Degraded;
        }
    };

    match store.upsert(game_title, &summary, now).await {
        Ok(()) => tracing::info!(game = %game_title, "Cached summary"),
        Err(e) => tracing::warn!(game = %game_title, error = %e, "Failed to cache summary"),
    }

    SummaryOutcome::Generated(summary)
}

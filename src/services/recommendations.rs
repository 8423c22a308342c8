use std::collections::HashSet;

use crate::{
    db::CatalogStore,
    error::{AppError, AppResult},
    models::{Game, RecommendedGame, GENERAL_POPULARITY},
    services::vectorizer::Vectorizer,
};

/// Maximum number of recommendations returned
pub const MAX_RECOMMENDATIONS: usize = 5;

/// A scored recommendation, pointing into the corpus by game id
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub game_id: i64,
    /// Sum of similarities to every owned game
    pub aggregate_score: f64,
    /// Owned game with the single largest positive similarity to this candidate
    pub reason_game_id: Option<i64>,
}

struct Accumulator {
    score: f64,
    best: f64,
    reason: Option<usize>,
}

/// Ranks non-owned games by their summed content similarity to the owned ones
///
/// With an empty corpus the result is empty. When the user owns nothing, or none of
/// the owned ids are in the corpus, the first [`MAX_RECOMMENDATIONS`] games are
/// returned in corpus order with no score and no reason.
pub fn recommend(
    owned_ids: &HashSet<i64>,
    corpus: &[Game],
    vectorizer: &dyn Vectorizer,
) -> Vec<Candidate> {
    if corpus.is_empty() {
        return Vec::new();
    }

    let owned_rows: Vec<usize> = corpus
        .iter()
        .enumerate()
        .filter(|(_, game)| owned_ids.contains(&game.game_id))
        .map(|(row, _)| row)
        .collect();

    if owned_rows.is_empty() {
        tracing::debug!(
            owned = owned_ids.len(),
            "No owned games in corpus, using catalog order fallback"
        );
        return popular_fallback(corpus);
    }

    let documents: Vec<&str> = corpus.iter().map(Game::description_text).collect();
    let similarities = vectorizer.fit_transform(&documents).similarity_matrix();

    let mut accumulators: Vec<Option<Accumulator>> = (0..corpus.len()).map(|_| None).collect();
    for &owned in &owned_rows {
        for (row, &sim) in similarities.row(owned).iter().enumerate() {
            if owned_ids.contains(&corpus[row].game_id) {
                continue;
            }

            let acc = accumulators[row].get_or_insert(Accumulator {
                score: 0.0,
                best: 0.0,
                reason: None,
            });
            acc.score += sim;
            // Strict improvement only: the earliest owned game keeps a tied maximum
            if sim > acc.best {
                acc.best = sim;
                acc.reason = Some(owned);
            }
        }
    }

    let mut candidates: Vec<Candidate> = accumulators
        .into_iter()
        .enumerate()
        .filter_map(|(row, acc)| {
            acc.map(|acc| Candidate {
                game_id: corpus[row].game_id,
                aggregate_score: acc.score,
                reason_game_id: acc.reason.map(|owned| corpus[owned].game_id),
            })
        })
        .collect();

    // Stable sort, so equal scores stay in corpus order
    candidates.sort_by(|a, b| b.aggregate_score.total_cmp(&a.aggregate_score));
    candidates.truncate(MAX_RECOMMENDATIONS);
    candidates
}

fn popular_fallback(corpus: &[Game]) -> Vec<Candidate> {
    corpus
        .iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|game| Candidate {
            game_id: game.game_id,
            aggregate_score: 0.0,
            reason_game_id: None,
        })
        .collect()
}

/// Resolves candidates back to catalog entries with a human-readable reason
pub fn explain(candidates: &[Candidate], corpus: &[Game]) -> Vec<RecommendedGame> {
    let title_of = |game_id: i64| {
        corpus
            .iter()
            .find(|game| game.game_id == game_id)
            .map(|game| game.title.clone())
    };

    candidates
        .iter()
        .filter_map(|candidate| {
            let game = corpus.iter().find(|game| game.game_id == candidate.game_id)?;
            let reason = candidate
                .reason_game_id
                .and_then(&title_of)
                .unwrap_or_else(|| GENERAL_POPULARITY.to_string());

            Some(RecommendedGame {
                game_id: game.game_id,
                title: game.title.clone(),
                description: game.description.clone(),
                cover_image_url: game.cover_image_url.clone(),
                reason,
            })
        })
        .collect()
}

/// Generates content-based recommendations for a user
///
/// Reads the owned set and a fresh catalog snapshot, then rebuilds the similarity
/// space from scratch. Store failures are surfaced as-is; nothing is retried.
pub async fn get_recommendations(
    catalog: &dyn CatalogStore,
    vectorizer: &dyn Vectorizer,
    user_id: Option<i64>,
) -> AppResult<Vec<RecommendedGame>> {
    let user_id = match user_id {
        Some(id) if id != 0 => id,
        _ => return Err(AppError::InvalidInput("User ID required".to_string())),
    };

    let owned: HashSet<i64> = catalog.fetch_owned(user_id).await?.into_iter().collect();
    let corpus = catalog.fetch_games().await?;

    let candidates = recommend(&owned, &corpus, vectorizer);

    tracing::info!(
        user_id,
        owned = owned.len(),
        corpus = corpus.len(),
        returned = candidates.len(),
        "Recommendations computed"
    );

    Ok(explain(&candidates, &corpus))
}

use log::debug;
use ndarray::{Array1, Axis};

use super::matrix::RatingMatrix;
use super::types::{Neighborhood, ScoredGameSet, SimilarityVector};
use crate::domain::GameId;
use crate::errors::{RecommendError, RecommendResult};

/// Score each candidate as
/// `sum(similarity(n) * normalized(n, game)) + mean(raw row of target)`.
///
/// An empty candidate list or neighbourhood yields an empty set. Candidates
/// outside the matrix columns are skipped.
pub fn score_candidates(
    normalized: &RatingMatrix,
    similarities: &SimilarityVector,
    neighbors: &Neighborhood,
    raw: &RatingMatrix,
    target: &str,
    candidates: &[GameId],
) -> RecommendResult<ScoredGameSet> {
    if candidates.is_empty() || neighbors.is_empty() {
        return Ok(ScoredGameSet::new());
    }

    if !normalized.shares_columns_with(raw) {
        return Err(RecommendError::InvalidInput(
            "raw and normalized matrices do not share game columns".to_string(),
        ));
    }

    let baseline = raw
        .row_mean(target)
        .ok_or_else(|| RecommendError::UserNotFound(target.to_string()))?;

    let (rows, weights) = collect_neighbor_weights(normalized, similarities, neighbors);
    if rows.is_empty() {
        return Ok(ScoredGameSet::new());
    }

    let opinions = normalized.values().select(Axis(0), &rows);
    let weighted = weights.dot(&opinions);

    let mut scores = ScoredGameSet::new();
    for game_id in candidates {
        match normalized.index().game_position(game_id) {
            Some(col) => {
                scores.insert(game_id.clone(), weighted[col] + baseline);
            }
            None => debug!("Skipping candidate {} with no ratings", game_id),
        }
    }

    Ok(scores)
}

fn collect_neighbor_weights(
    normalized: &RatingMatrix,
    similarities: &SimilarityVector,
    neighbors: &Neighborhood,
) -> (Vec<usize>, Array1<f64>) {
    let mut rows = Vec::with_capacity(neighbors.len());
    let mut weights = Vec::with_capacity(neighbors.len());

    for user_id in neighbors {
        let position = normalized.index().user_position(user_id);
        if let (Some(row), Some(similarity)) = (position, similarities.get(user_id)) {
            rows.push(row);
            weights.push(similarity);
        }
    }

    (rows, Array1::from_vec(weights))
}

use super::types::{Neighborhood, SimilarityVector};

/// Users correlating strictly above `threshold`, never the target itself.
/// Undefined similarities are skipped.
pub fn select_neighbors(similarities: &SimilarityVector, target: &str, threshold: f64) -> Neighborhood {
    similarities
        .iter()
        .filter(|(user_id, _)| *user_id != target)
        .filter_map(|(user_id, similarity)| similarity.map(|s| (user_id, s)))
        .filter(|(_, similarity)| *similarity > threshold)
        .map(|(user_id, _)| user_id.to_string())
        .collect()
}

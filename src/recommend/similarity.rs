use log::debug;
use ndarray::ArrayView1;

use super::matrix::RatingMatrix;
use super::types::SimilarityVector;
use crate::errors::{RecommendError, RecommendResult};

/// Below this a vector counts as constant
const MIN_VARIANCE: f64 = 1e-12;

/// Pearson correlation of two equal-length vectors.
///
/// Returns `None` when the correlation is undefined: a constant (zero
/// variance) vector, an empty vector, or vectors of different lengths.
pub fn similarity(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Option<f64> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let mean_a = a.mean()?;
    let mean_b = b.mean()?;

    let mut covariance = 0.0;
    let mut variance_a = 0.0;
    let mut variance_b = 0.0;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        covariance += dx * dy;
        variance_a += dx * dx;
        variance_b += dy * dy;
    }

    if variance_a <= MIN_VARIANCE || variance_b <= MIN_VARIANCE {
        return None;
    }

    let r = covariance / (variance_a * variance_b).sqrt();
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Correlate the target's row with every row of `matrix`, the target's own
/// row included.
pub fn users_similarity_all(target: &str, matrix: &RatingMatrix) -> RecommendResult<SimilarityVector> {
    let target_row = matrix
        .row(target)
        .ok_or_else(|| RecommendError::UserNotFound(target.to_string()))?;

    let similarities: SimilarityVector = matrix
        .users()
        .iter()
        .zip(matrix.values().rows())
        .map(|(user_id, row)| (user_id.clone(), similarity(target_row.view(), row)))
        .collect();

    debug!(
        "Computed {} similarities for user {} over {} games",
        similarities.len(),
        target,
        matrix.games().len()
    );

    Ok(similarities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Rating, ScoreColumn};
    use ndarray::array;

    #[test]
    fn test_identical_vectors_correlate_fully() {
        let a = array![5.0, 1.0, 3.0, 0.0];
        let r = similarity(a.view(), a.view()).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_opposite_vectors() {
        let a = array![5.0, 1.0];
        let b = array![1.0, 5.0];
        let r = similarity(a.view(), b.view()).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_vectors_are_undefined() {
        let flat = array![3.0, 3.0, 3.0];
        let other = array![1.0, 2.0, 3.0];

        assert_eq!(similarity(flat.view(), other.view()), None);
        assert_eq!(similarity(other.view(), flat.view()), None);
        assert_eq!(similarity(flat.view(), flat.view()), None);
    }

    #[test]
    fn test_degenerate_shapes_are_undefined() {
        let a = array![1.0, 2.0];
        let b = array![1.0, 2.0, 3.0];
        let empty = ndarray::Array1::<f64>::zeros(0);

        assert_eq!(similarity(a.view(), b.view()), None);
        assert_eq!(similarity(empty.view(), empty.view()), None);
    }

    #[test]
    fn test_defined_values_stay_in_range() {
        let rows = [
            array![4.0, 0.0, 2.5, 1.0, 5.0],
            array![0.0, 3.0, 3.5, 0.0, 1.0],
            array![1e9, -1e9, 3.0, 7.0, 0.5],
            array![0.1, 0.2, 0.3, 0.4, 0.5],
        ];
        for a in &rows {
            for b in &rows {
                if let Some(r) = similarity(a.view(), b.view()) {
                    assert!((-1.0..=1.0).contains(&r));
                }
            }
        }
    }

    #[test]
    fn test_users_similarity_all_includes_target() {
        let ratings = vec![
            Rating::uniform("u1", "g1", 5.0),
            Rating::uniform("u1", "g2", 1.0),
            Rating::uniform("u2", "g1", 5.0),
            Rating::uniform("u2", "g2", 1.0),
            Rating::uniform("u3", "g1", 1.0),
            Rating::uniform("u3", "g2", 5.0),
        ];
        let matrix = RatingMatrix::build(&ratings, ScoreColumn::Overall).unwrap();

        let similarities = users_similarity_all("u1", &matrix).unwrap();

        assert_eq!(similarities.len(), 3);
        assert!((similarities.get("u1").unwrap() - 1.0).abs() < 1e-12);
        assert!((similarities.get("u2").unwrap() - 1.0).abs() < 1e-12);
        assert!((similarities.get("u3").unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_target() {
        let matrix = RatingMatrix::build(&[Rating::uniform("u1", "g1", 1.0)], ScoreColumn::Overall).unwrap();
        let err = users_similarity_all("ghost", &matrix).unwrap_err();
        assert!(matches!(err, RecommendError::UserNotFound(ref id) if id == "ghost"));
    }
}

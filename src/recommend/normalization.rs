use std::collections::HashMap;

use crate::domain::{Rating, ScoreColumn};

/// Below this a user's ratings count as constant
const MIN_STD_DEV: f64 = 1e-12;

/// Per-user z-score of `column`; other columns are copied as-is.
///
/// A user whose ratings do not vary (including a single rating) maps to 0.
pub fn normalize_ratings(ratings: &[Rating], column: ScoreColumn) -> Vec<Rating> {
    let stats = calculate_user_stats(ratings, column);

    ratings
        .iter()
        .map(|rating| {
            let mut normalized = rating.clone();
            let value = stats
                .get(rating.user_id.as_str())
                .map(|s| s.transform(rating.score(column)))
                .unwrap_or(0.0);
            normalized.set_score(column, value);
            normalized
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct UserStats {
    mean: f64,
    std_dev: f64,
}

impl UserStats {
    fn transform(&self, score: f64) -> f64 {
        if self.std_dev > MIN_STD_DEV {
            (score - self.mean) / self.std_dev
        } else {
            0.0
        }
    }
}

fn calculate_user_stats(ratings: &[Rating], column: ScoreColumn) -> HashMap<&str, UserStats> {
    group_scores(ratings, column)
        .into_iter()
        .map(|(user_id, scores)| {
            let mean = calculate_mean(&scores);
            let std_dev = calculate_variance(&scores, mean).sqrt();
            (user_id, UserStats { mean, std_dev })
        })
        .collect()
}

fn group_scores(ratings: &[Rating], column: ScoreColumn) -> HashMap<&str, Vec<f64>> {
    let mut groups: HashMap<&str, Vec<f64>> = HashMap::new();
    for rating in ratings {
        groups
            .entry(rating.user_id.as_str())
            .or_default()
            .push(rating.score(column));
    }
    groups
}

fn calculate_mean(scores: &[f64]) -> f64 {
    scores.iter().sum::<f64>() / scores.len() as f64
}

fn calculate_variance(scores: &[f64], mean: f64) -> f64 {
    let sum_sq_diff: f64 = scores.iter().map(|&s| (s - mean).powi(2)).sum();
    sum_sq_diff / scores.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overall(ratings: &[Rating], user: &str) -> Vec<f64> {
        ratings
            .iter()
            .filter(|r| r.user_id == user)
            .map(|r| r.overall_score)
            .collect()
    }

    #[test]
    fn test_z_score_per_user() {
        let ratings = vec![
            Rating::uniform("u1", "g1", 5.0),
            Rating::uniform("u1", "g2", 1.0),
            Rating::uniform("u2", "g1", 2.0),
            Rating::uniform("u2", "g2", 4.0),
            Rating::uniform("u2", "g3", 3.0),
        ];

        let normalized = normalize_ratings(&ratings, ScoreColumn::Overall);

        assert_eq!(overall(&normalized, "u1"), vec![1.0, -1.0]);

        let u2 = overall(&normalized, "u2");
        let std_dev = (2.0f64 / 3.0).sqrt();
        assert!((u2[0] + 1.0 / std_dev).abs() < 1e-9);
        assert!((u2[1] - 1.0 / std_dev).abs() < 1e-9);
        assert!(u2[2].abs() < 1e-9);
    }

    #[test]
    fn test_constant_and_single_ratings_become_zero() {
        let ratings = vec![
            Rating::uniform("flat", "g1", 3.0),
            Rating::uniform("flat", "g2", 3.0),
            Rating::uniform("solo", "g1", 4.0),
        ];

        let normalized = normalize_ratings(&ratings, ScoreColumn::Overall);

        assert!(normalized.iter().all(|r| r.overall_score == 0.0));
    }

    #[test]
    fn test_only_selected_column_changes() {
        let ratings = vec![
            Rating::uniform("u1", "g1", 5.0),
            Rating::uniform("u1", "g2", 1.0),
        ];

        let normalized = normalize_ratings(&ratings, ScoreColumn::Visual);

        assert_eq!(normalized[0].visual_score, 1.0);
        assert_eq!(normalized[0].overall_score, 5.0);
        assert_eq!(normalized[1].gameplay_score, 1.0);
    }
}

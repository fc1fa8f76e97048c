//! NASA Asymmetric Scoring Function
//!
//! Evaluation metric for RUL predictions. Late predictions (engine fails
//! before the predicted cycle) are penalized more heavily than early ones.
//! Training-side metric only; the serving path exposes just the clamp.

/// Sum of asymmetric penalties over prediction errors
/// (error = predicted - actual). Lower is better.
pub fn nasa_score(errors: impl IntoIterator<Item = f64>) -> f64 {
    errors
        .into_iter()
        .map(|e| {
            if e < 0.0 {
                (-e / 13.0).exp() - 1.0
            } else {
                (e / 10.0).exp() - 1.0
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_predictions_score_zero() {
        assert_eq!(nasa_score(vec![0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_late_costs_more_than_early() {
        let early = nasa_score(vec![-10.0]);
        let late = nasa_score(vec![10.0]);
        assert!(late > early);
        assert!(early > 0.0);
    }
}

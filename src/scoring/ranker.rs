// Weighted signal aggregation and ranking.
//
// The formula is a plain weighted sum over the four signals:
//
//   score = thematic·w_t + intent·w_i + mesh·w_m + readability·w_r
//
// The weights are expected to sum to ~1.0. Drift is logged, never
// rejected: an audit with slightly-off weights is still more useful
// than no audit.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::{Candidate, SignalScores};

/// Tolerance for the weight-sum invariant.
const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Per-signal weights for the aggregate score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeightConfig {
    pub thematic: f64,
    pub intent: f64,
    pub mesh: f64,
    pub readability: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            thematic: 0.4,
            intent: 0.3,
            mesh: 0.2,
            readability: 0.1,
        }
    }
}

impl WeightConfig {
    pub fn sum(&self) -> f64 {
        self.thematic + self.intent + self.mesh + self.readability
    }
}

/// Ranks keyword candidates by their weighted aggregate score.
///
/// Immutable once constructed; safe to share read-only across
/// concurrent analysis requests.
#[derive(Debug, Clone)]
pub struct KeywordRanker {
    weights: WeightConfig,
}

impl KeywordRanker {
    /// Build a ranker, warning (not failing) when the weights drift
    /// from summing to 1.0.
    pub fn new(weights: WeightConfig) -> Self {
        let sum = weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            warn!(
                weight_sum = sum,
                "signal weights do not sum to 1.0; ranking proceeds with the supplied weights"
            );
        }
        Self { weights }
    }

    pub fn weights(&self) -> &WeightConfig {
        &self.weights
    }

    /// Weighted sum over the configured signals. A signal that was
    /// never computed sits at 0.0 and contributes nothing.
    pub fn calculate_score(&self, signals: &SignalScores) -> f64 {
        signals.thematic * self.weights.thematic
            + signals.intent * self.weights.intent
            + signals.mesh * self.weights.mesh
            + signals.readability * self.weights.readability
    }

    /// Attach aggregate scores and return a stable descending sort.
    ///
    /// Ties keep their original relative order, which keeps ranking
    /// deterministic for equal-scored candidates.
    pub fn rank_keywords(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        for candidate in &mut candidates {
            candidate.score = self.calculate_score(&candidate.signals);
        }
        // sort_by is stable; reversing the comparison gives descending
        // order without disturbing ties
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates
    }
}

impl Default for KeywordRanker {
    fn default() -> Self {
        Self::new(WeightConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(keyword: &str, signals: SignalScores) -> Candidate {
        Candidate {
            signals,
            ..Candidate::new(keyword, 1)
        }
    }

    #[test]
    fn worked_example_scores_exactly_077() {
        let ranker = KeywordRanker::new(WeightConfig::default());
        let signals = SignalScores {
            thematic: 0.9,
            intent: 0.8,
            mesh: 0.5,
            readability: 0.7,
        };
        // 0.9·0.4 + 0.8·0.3 + 0.5·0.2 + 0.7·0.1 = 0.77
        assert!((ranker.calculate_score(&signals) - 0.77).abs() < 1e-12);
    }

    #[test]
    fn score_is_linear_in_signals() {
        let ranker = KeywordRanker::default();
        let signals = SignalScores {
            thematic: 0.2,
            intent: 0.4,
            mesh: 0.1,
            readability: 0.3,
        };
        let scaled = SignalScores {
            thematic: 0.4,
            intent: 0.8,
            mesh: 0.2,
            readability: 0.6,
        };
        let base = ranker.calculate_score(&signals);
        let doubled = ranker.calculate_score(&scaled);
        assert!((doubled - 2.0 * base).abs() < 1e-12);
    }

    #[test]
    fn missing_signals_contribute_zero() {
        let ranker = KeywordRanker::default();
        let only_thematic = SignalScores {
            thematic: 1.0,
            ..Default::default()
        };
        assert!((ranker.calculate_score(&only_thematic) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn ranking_sorts_descending() {
        let ranker = KeywordRanker::default();
        let ranked = ranker.rank_keywords(vec![
            candidate(
                "faible",
                SignalScores {
                    thematic: 0.1,
                    ..Default::default()
                },
            ),
            candidate(
                "fort",
                SignalScores {
                    thematic: 0.9,
                    ..Default::default()
                },
            ),
        ]);
        assert_eq!(ranked[0].keyword, "fort");
        assert_eq!(ranked[1].keyword, "faible");
    }

    #[test]
    fn ties_preserve_original_order() {
        let ranker = KeywordRanker::default();
        let same = SignalScores {
            thematic: 0.5,
            ..Default::default()
        };
        let ranked = ranker.rank_keywords(vec![
            candidate("premier", same),
            candidate("deuxième", same),
            candidate("troisième", same),
        ]);
        let order: Vec<&str> = ranked.iter().map(|c| c.keyword.as_str()).collect();
        assert_eq!(order, vec!["premier", "deuxième", "troisième"]);
    }

    #[test]
    fn skewed_weights_still_rank() {
        // Sum is 2.0 — warned about, never rejected
        let ranker = KeywordRanker::new(WeightConfig {
            thematic: 1.0,
            intent: 0.5,
            mesh: 0.3,
            readability: 0.2,
        });
        let signals = SignalScores {
            thematic: 0.5,
            intent: 0.2,
            mesh: 0.1,
            readability: 0.1,
        };
        assert!(ranker.calculate_score(&signals) > 0.0);
    }
}

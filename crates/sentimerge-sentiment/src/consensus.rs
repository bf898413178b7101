//! Consensus verdict for entities reported by both providers.

use crate::types::{MergedEntities, MergedEntity, OverallSentiment};

/// Scores within `±NEUTRAL_BAND` (inclusive) count as neutral.
pub const NEUTRAL_BAND: f64 = 0.1;

/// Classify a pair of provider scores. The first matching rule wins:
///
/// 1. both within the neutral band: [`OverallSentiment::Neutral`]
/// 2. both strictly positive: [`OverallSentiment::Positive`]
/// 3. both strictly negative: [`OverallSentiment::Negative`]
/// 4. anything else: [`OverallSentiment::Unsure`]
///
/// Rule 1 runs first, so `(0.05, 0.3)` is `Positive` but `(0.1, -0.1)` is
/// `Neutral`.
#[must_use]
pub fn overall_sentiment(aws_score: f64, gcp_score: f64) -> OverallSentiment {
    if aws_score.abs() <= NEUTRAL_BAND && gcp_score.abs() <= NEUTRAL_BAND {
        OverallSentiment::Neutral
    } else if aws_score > 0.0 && gcp_score > 0.0 {
        OverallSentiment::Positive
    } else if aws_score < 0.0 && gcp_score < 0.0 {
        OverallSentiment::Negative
    } else {
        OverallSentiment::Unsure
    }
}

impl MergedEntity {
    /// Returns the entity with its verdict set when both scores are present.
    #[must_use]
    pub fn classified(mut self) -> Self {
        self.overall_sentiment = match (self.aws_score, self.gcp_score) {
            (Some(aws), Some(gcp)) => Some(overall_sentiment(aws, gcp)),
            _ => None,
        };
        self
    }
}

impl MergedEntities {
    /// Assigns verdicts to every entry, in both lists, that has both scores.
    #[must_use]
    pub fn classify(self) -> Self {
        Self {
            common_entities: self
                .common_entities
                .into_iter()
                .map(MergedEntity::classified)
                .collect(),
            entities: self
                .entities
                .into_iter()
                .map(MergedEntity::classified)
                .collect(),
        }
    }
}

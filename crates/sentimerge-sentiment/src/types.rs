//! Entity records at each stage of the pipeline.
//!
//! Provider records ([`AwsEntity`], [`GcpEntity`]) keep each provider's own
//! shape. [`NormalizedEntity`] is provider-agnostic. [`MergedEntities`] is the
//! serialized result.

use serde::Serialize;

/// Positive/negative sentiment pair for one AWS mention. Each value is in
/// `[0, 1]`; they need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SentimentScore {
    pub positive: f64,
    pub negative: f64,
}

/// One occurrence of an entity as reported by AWS Comprehend.
#[derive(Debug, Clone, PartialEq)]
pub struct Mention {
    pub text: String,
    /// Model confidence that the mention is relevant, `[0, 1]`.
    pub score: f64,
    /// Confidence that this mention belongs with the rest of its group, `[0, 1]`.
    pub group_score: f64,
    pub sentiments: SentimentScore,
}

/// A group of mentions AWS Comprehend believes refer to the same entity.
///
/// E.g. in "the coffee was great, but it was cold", "coffee" and "it" are two
/// mentions in one group.
#[derive(Debug, Clone, PartialEq)]
pub struct AwsEntity {
    /// Text of the group's descriptive mention, or empty when AWS gave none.
    pub text: String,
    pub mentions: Vec<Mention>,
}

/// Aggregated sentiment of all mentions of a GCP entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GcpSentiment {
    /// `[-1, 1]`, negative to positive.
    pub score: f64,
    /// `[0, inf)`, strength of the sentiment regardless of sign.
    pub magnitude: f64,
}

/// An entity as reported by Google Cloud Natural Language.
#[derive(Debug, Clone, PartialEq)]
pub struct GcpEntity {
    pub name: String,
    /// Relevance of the entity to the whole text, `[0, 1]`.
    pub salience: f64,
    pub sentiment: GcpSentiment,
}

/// One provider's score for one distinct entity text, roughly in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEntity {
    pub text: String,
    pub score: f64,
}

/// Consensus sentiment of an entity seen by both providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OverallSentiment {
    /// Providers disagree, or not confident enough to decide.
    Unsure,
    Positive,
    Negative,
    /// Both providers are within the neutral band.
    Neutral,
}

/// An entity with the scores of every provider that reported it.
///
/// At least one of `aws_score` and `gcp_score` is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedEntity {
    pub text: String,
    pub aws_score: Option<f64>,
    pub gcp_score: Option<f64>,
    /// Set only when both scores are present.
    pub overall_sentiment: Option<OverallSentiment>,
}

impl MergedEntity {
    /// Whether both providers reported this entity.
    #[must_use]
    pub fn is_common(&self) -> bool {
        self.aws_score.is_some() && self.gcp_score.is_some()
    }
}

/// Result of one analysis.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MergedEntities {
    /// Entities reported by both providers, in the same order as `entities`.
    pub common_entities: Vec<MergedEntity>,
    /// Entities reported by either provider, sorted by text.
    pub entities: Vec<MergedEntity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_entities_serialize_with_expected_keys() {
        let entity = MergedEntity {
            text: "coffee".to_string(),
            aws_score: Some(0.5),
            gcp_score: None,
            overall_sentiment: None,
        };
        let merged = MergedEntities {
            common_entities: vec![],
            entities: vec![entity],
        };
        let json = serde_json::to_value(&merged).expect("serialize");
        assert_eq!(json["common_entities"], serde_json::json!([]));
        assert_eq!(json["entities"][0]["text"], "coffee");
        assert_eq!(json["entities"][0]["aws_score"], 0.5);
        assert!(json["entities"][0]["gcp_score"].is_null());
        assert!(json["entities"][0]["overall_sentiment"].is_null());
    }

    #[test]
    fn overall_sentiment_serializes_as_label() {
        for (verdict, label) in [
            (OverallSentiment::Unsure, "Unsure"),
            (OverallSentiment::Positive, "Positive"),
            (OverallSentiment::Negative, "Negative"),
            (OverallSentiment::Neutral, "Neutral"),
        ] {
            let json = serde_json::to_value(verdict).expect("serialize");
            assert_eq!(json, label);
        }
    }

    #[test]
    fn is_common_requires_both_scores() {
        let mut entity = MergedEntity {
            text: "pizza".to_string(),
            aws_score: Some(0.1),
            gcp_score: None,
            overall_sentiment: None,
        };
        assert!(!entity.is_common());
        entity.gcp_score = Some(0.2);
        assert!(entity.is_common());
    }
}

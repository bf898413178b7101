//! Structural translation from provider wire types into provider records.
//!
//! No scoring happens here. Missing fields were already defaulted during
//! deserialization, so these conversions cannot fail.

use crate::providers::types::{
    AnalyzeEntitySentimentResponse, DetectTargetedSentimentResponse, TargetedSentimentEntity,
};
use crate::types::{AwsEntity, GcpEntity, GcpSentiment, Mention, SentimentScore};

/// Convert a Comprehend `DetectTargetedSentiment` response into entity groups.
///
/// A group's text is the text of the mention at the first
/// `DescriptiveMentionIndex`. Without one (or if it points past the mention
/// list) the text stays empty, and the normalizer will pool every such group
/// under `""`.
#[must_use]
pub fn convert_aws_response(response: &DetectTargetedSentimentResponse) -> Vec<AwsEntity> {
    response.entities.iter().map(convert_aws_entity).collect()
}

fn convert_aws_entity(raw: &TargetedSentimentEntity) -> AwsEntity {
    let text = raw
        .descriptive_mention_index
        .first()
        .and_then(|&index| raw.mentions.get(index))
        .map(|mention| mention.text.clone())
        .unwrap_or_default();

    if text.is_empty() {
        tracing::debug!(
            mentions = raw.mentions.len(),
            "AWS entity group has no descriptive mention; grouping under empty text"
        );
    }

    let mentions = raw
        .mentions
        .iter()
        .map(|m| Mention {
            text: m.text.clone(),
            score: m.score,
            group_score: m.group_score,
            sentiments: SentimentScore {
                positive: m.mention_sentiment.sentiment_score.positive,
                negative: m.mention_sentiment.sentiment_score.negative,
            },
        })
        .collect();

    AwsEntity { text, mentions }
}

/// Convert a Natural Language `analyzeEntitySentiment` response, one record
/// per reported entity.
#[must_use]
pub fn convert_gcp_response(response: &AnalyzeEntitySentimentResponse) -> Vec<GcpEntity> {
    response
        .entities
        .iter()
        .map(|raw| GcpEntity {
            name: raw.name.clone(),
            salience: raw.salience,
            sentiment: GcpSentiment {
                score: raw.sentiment.score,
                magnitude: raw.sentiment.magnitude,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn aws(value: serde_json::Value) -> DetectTargetedSentimentResponse {
        serde_json::from_value(value).expect("aws response")
    }

    fn gcp(value: serde_json::Value) -> AnalyzeEntitySentimentResponse {
        serde_json::from_value(value).expect("gcp response")
    }

    #[test]
    fn converts_aws_response_fields() {
        let entities = convert_aws_response(&aws(json!({
            "Entities": [{
                "DescriptiveMentionIndex": [0],
                "Mentions": [{
                    "Score": 0.999_994_993_209_838_9,
                    "GroupScore": 1,
                    "Text": "I",
                    "Type": "PERSON",
                    "MentionSentiment": {
                        "Sentiment": "NEUTRAL",
                        "SentimentScore": {
                            "Positive": 0,
                            "Negative": 0,
                            "Neutral": 1,
                            "Mixed": 0
                        }
                    },
                    "BeginOffset": 0,
                    "EndOffset": 1
                }]
            }]
        })));

        assert_eq!(
            entities,
            vec![AwsEntity {
                text: "I".to_string(),
                mentions: vec![Mention {
                    text: "I".to_string(),
                    score: 0.999_994_993_209_838_9,
                    group_score: 1.0,
                    sentiments: SentimentScore {
                        positive: 0.0,
                        negative: 0.0,
                    },
                }],
            }]
        );
    }

    #[test]
    fn aws_display_text_uses_first_descriptive_index() {
        let entities = convert_aws_response(&aws(json!({
            "Entities": [{
                "DescriptiveMentionIndex": [1, 0],
                "Mentions": [
                    { "Text": "it", "Score": 0.9, "GroupScore": 0.8 },
                    { "Text": "coffee", "Score": 0.9, "GroupScore": 1.0 }
                ]
            }]
        })));
        assert_eq!(entities[0].text, "coffee");
        assert_eq!(entities[0].mentions.len(), 2);
    }

    #[test]
    fn aws_display_text_empty_without_descriptive_index() {
        let entities = convert_aws_response(&aws(json!({
            "Entities": [
                { "Mentions": [{ "Text": "coffee" }] },
                { "DescriptiveMentionIndex": [], "Mentions": [{ "Text": "coke" }] }
            ]
        })));
        assert_eq!(entities.len(), 2);
        assert!(entities.iter().all(|e| e.text.is_empty()));
    }

    #[test]
    fn aws_display_text_empty_when_index_out_of_range() {
        let entities = convert_aws_response(&aws(json!({
            "Entities": [{
                "DescriptiveMentionIndex": [3],
                "Mentions": [{ "Text": "coffee" }]
            }]
        })));
        assert_eq!(entities[0].text, "");
    }

    #[test]
    fn converts_gcp_response_without_filtering() {
        let entities = convert_gcp_response(&gcp(json!({
            "entities": [
                {
                    "name": "coffee",
                    "type": "CONSUMER_GOOD",
                    "salience": 0.6,
                    "mentions": [],
                    "sentiment": { "score": -0.8, "magnitude": 0.9 }
                },
                { "name": "coffee", "salience": 0.1 }
            ],
            "language": "en"
        })));

        assert_eq!(
            entities,
            vec![
                GcpEntity {
                    name: "coffee".to_string(),
                    salience: 0.6,
                    sentiment: GcpSentiment {
                        score: -0.8,
                        magnitude: 0.9,
                    },
                },
                GcpEntity {
                    name: "coffee".to_string(),
                    salience: 0.1,
                    sentiment: GcpSentiment::default(),
                },
            ]
        );
    }

    #[test]
    fn empty_responses_convert_to_empty_lists() {
        assert!(convert_aws_response(&DetectTargetedSentimentResponse::default()).is_empty());
        assert!(convert_gcp_response(&AnalyzeEntitySentimentResponse::default()).is_empty());
    }
}

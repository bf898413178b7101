//! Wire types for the two provider APIs.
//!
//! Only the fields the pipeline reads are modeled; everything else (entity
//! types, offsets, metadata) is ignored. Every field falls back to its
//! default when it is missing or explicitly `null`, so a sparse payload still
//! deserializes. Google omits zero-valued fields from its JSON, so a missing
//! `score` must read as `0.0`.
//!
//! References:
//! - <https://docs.aws.amazon.com/comprehend/latest/APIReference/API_DetectTargetedSentiment.html>
//! - <https://cloud.google.com/natural-language/docs/reference/rest/v1/documents/analyzeEntitySentiment>

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ---------------------------------------------------------------------------
// AWS Comprehend: DetectTargetedSentiment
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct DetectTargetedSentimentRequest<'a> {
    #[serde(rename = "Text")]
    pub text: &'a str,
    #[serde(rename = "LanguageCode")]
    pub language_code: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DetectTargetedSentimentResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub entities: Vec<TargetedSentimentEntity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TargetedSentimentEntity {
    /// Indexes into `mentions` of the mentions that best describe the group.
    #[serde(deserialize_with = "null_as_default")]
    pub descriptive_mention_index: Vec<usize>,
    #[serde(deserialize_with = "null_as_default")]
    pub mentions: Vec<TargetedSentimentMention>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TargetedSentimentMention {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub score: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub group_score: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub mention_sentiment: MentionSentiment,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MentionSentiment {
    #[serde(deserialize_with = "null_as_default")]
    pub sentiment_score: MentionSentimentScore,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MentionSentimentScore {
    #[serde(deserialize_with = "null_as_default")]
    pub positive: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub negative: f64,
}

// ---------------------------------------------------------------------------
// Google Cloud Natural Language: documents:analyzeEntitySentiment
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyzeEntitySentimentRequest<'a> {
    pub document: Document<'a>,
    pub encoding_type: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct Document<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeEntitySentimentResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub entities: Vec<LanguageEntity>,
    /// Language the provider detected (or was told).
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LanguageEntity {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub salience: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub sentiment: LanguageSentiment,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LanguageSentiment {
    #[serde(deserialize_with = "null_as_default")]
    pub score: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub magnitude: f64,
}

//! Entity sentiment consensus for sentimerge.
//!
//! Sends text to AWS Comprehend (targeted sentiment) and Google Cloud Natural
//! Language (entity sentiment), converts both responses into a common
//! per-entity score, merges them by entity text, and labels entities seen by
//! both providers with a consensus verdict.
//!
//! The conversion, normalization, merge, and classification steps are pure;
//! see [`merge_provider_responses`]. [`SentimentAnalyzer`] adds the provider
//! calls on top.

pub mod adapters;
pub mod consensus;
pub mod error;
pub mod merge;
pub mod normalizer;
pub mod pipeline;
pub mod providers;
pub mod types;

pub use adapters::{convert_aws_response, convert_gcp_response};
pub use consensus::overall_sentiment;
pub use error::SentimentError;
pub use merge::merge_entities;
pub use normalizer::{arithmetic_mean, normalize_aws_sentiment, normalize_gcp_sentiment};
pub use pipeline::{merge_provider_responses, SentimentAnalyzer};
pub use providers::{ComprehendClient, NaturalLanguageClient};
pub use types::{
    AwsEntity, GcpEntity, GcpSentiment, MergedEntities, MergedEntity, Mention, NormalizedEntity,
    OverallSentiment, SentimentScore,
};

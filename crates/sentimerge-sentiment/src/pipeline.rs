//! Sentiment pipeline orchestration.

use std::time::Instant;

use sentimerge_core::ProviderConfig;

use crate::adapters::{convert_aws_response, convert_gcp_response};
use crate::error::SentimentError;
use crate::merge::merge_entities;
use crate::normalizer::{normalize_aws_sentiment, normalize_gcp_sentiment};
use crate::providers::{
    AnalyzeEntitySentimentResponse, ComprehendClient, DetectTargetedSentimentResponse,
    NaturalLanguageClient,
};
use crate::types::MergedEntities;

/// Run the pure part of the pipeline on raw provider responses.
///
/// 1. Convert both responses into provider records.
/// 2. Normalize each provider's records to one score per entity text.
/// 3. Merge the two lists by text.
/// 4. Assign a verdict to every entity both providers reported.
///
/// # Errors
///
/// Returns [`SentimentError::EmptyAggregation`] if an AWS entity text has no
/// mention cohesive enough to score.
pub fn merge_provider_responses(
    aws: &DetectTargetedSentimentResponse,
    gcp: &AnalyzeEntitySentimentResponse,
) -> Result<MergedEntities, SentimentError> {
    let aws_normalized = normalize_aws_sentiment(&convert_aws_response(aws))?;
    let gcp_normalized = normalize_gcp_sentiment(&convert_gcp_response(gcp))?;
    Ok(merge_entities(&aws_normalized, &gcp_normalized).classify())
}

/// Both provider clients behind one entry point.
pub struct SentimentAnalyzer {
    comprehend: ComprehendClient,
    natural_language: NaturalLanguageClient,
}

impl SentimentAnalyzer {
    #[must_use]
    pub fn new(comprehend: ComprehendClient, natural_language: NaturalLanguageClient) -> Self {
        Self {
            comprehend,
            natural_language,
        }
    }

    /// Builds both clients against their production endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if either HTTP client cannot be built.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, SentimentError> {
        Ok(Self::new(
            ComprehendClient::new(config)?,
            NaturalLanguageClient::new(config)?,
        ))
    }

    /// Analyze `text` with both providers and merge the results.
    ///
    /// The two provider calls run concurrently. If either fails, the whole
    /// analysis fails; there is no single-provider fallback.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::EmptyText`] if `text` is empty or whitespace.
    /// - Any provider error from [`ComprehendClient::detect_targeted_sentiment`]
    ///   or [`NaturalLanguageClient::analyze_entity_sentiment`].
    /// - [`SentimentError::EmptyAggregation`] from normalization.
    pub async fn analyze_sentiment(&self, text: &str) -> Result<MergedEntities, SentimentError> {
        if text.trim().is_empty() {
            return Err(SentimentError::EmptyText);
        }

        let started = Instant::now();
        let (aws, gcp) = tokio::try_join!(
            self.comprehend.detect_targeted_sentiment(text),
            self.natural_language.analyze_entity_sentiment(text),
        )?;

        let merged = merge_provider_responses(&aws, &gcp)?;

        tracing::info!(
            chars = text.chars().count(),
            aws_entities = aws.entities.len(),
            gcp_entities = gcp.entities.len(),
            merged = merged.entities.len(),
            common = merged.common_entities.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "sentiment analysis complete"
        );

        Ok(merged)
    }
}

//! HTTP client for Google Cloud Natural Language entity sentiment.

use std::time::Duration;

use reqwest::{Client, Url};
use sentimerge_core::ProviderConfig;

use super::retry::retry_with_backoff;
use super::types::{AnalyzeEntitySentimentRequest, AnalyzeEntitySentimentResponse, Document};
use crate::error::SentimentError;

pub(crate) const PROVIDER: &str = "gcp_language";

const DEFAULT_BASE_URL: &str = "https://language.googleapis.com";
const ANALYZE_PATH: &str = "v1/documents:analyzeEntitySentiment";

/// Client for `documents:analyzeEntitySentiment`, authenticated by API key.
pub struct NaturalLanguageClient {
    client: Client,
    endpoint: Url,
    max_retries: u32,
    retry_backoff_base_ms: u64,
}

impl NaturalLanguageClient {
    /// Creates a client pointed at the production Natural Language API.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self, SentimentError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SentimentError::InvalidEndpoint`] if `base_url` does not parse.
    pub fn with_base_url(config: &ProviderConfig, base_url: &str) -> Result<Self, SentimentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let raw = format!("{}/{ANALYZE_PATH}", base_url.trim_end_matches('/'));
        let mut endpoint = Url::parse(&raw).map_err(|e| SentimentError::InvalidEndpoint {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        endpoint
            .query_pairs_mut()
            .append_pair("key", &config.gcp_language_api_key);

        Ok(Self {
            client,
            endpoint,
            max_retries: config.max_retries,
            retry_backoff_base_ms: config.retry_backoff_base_ms,
        })
    }

    /// Runs entity sentiment analysis on plain UTF-8 `text`.
    ///
    /// The document language is left unset so the provider detects it.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::Provider`] if Google answers with a non-2xx status
    ///   (after retries for throttling and 5xx).
    /// - [`SentimentError::Http`] on network failure.
    /// - [`SentimentError::Json`] if the body is not the expected JSON.
    pub async fn analyze_entity_sentiment(
        &self,
        text: &str,
    ) -> Result<AnalyzeEntitySentimentResponse, SentimentError> {
        let request = AnalyzeEntitySentimentRequest {
            document: Document {
                kind: "PLAIN_TEXT",
                content: text,
            },
            encoding_type: "UTF8",
        };

        retry_with_backoff(PROVIDER, self.max_retries, self.retry_backoff_base_ms, || {
            self.send_once(&request)
        })
        .await
    }

    async fn send_once(
        &self,
        request: &AnalyzeEntitySentimentRequest<'_>,
    ) -> Result<AnalyzeEntitySentimentResponse, SentimentError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SentimentError::Provider {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| SentimentError::Json {
            context: "analyzeEntitySentiment response".to_string(),
            source: e,
        })
    }
}

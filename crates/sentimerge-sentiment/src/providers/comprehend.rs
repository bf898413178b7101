//! HTTP client for AWS Comprehend targeted sentiment.

use std::time::Duration;

use chrono::Utc;
use reqwest::{header, Client, Url};
use sentimerge_core::{AwsCredentials, ProviderConfig};

use super::retry::retry_with_backoff;
use super::sigv4::{sign_post, SigningParams};
use super::types::{DetectTargetedSentimentRequest, DetectTargetedSentimentResponse};
use crate::error::SentimentError;

pub(crate) const PROVIDER: &str = "aws_comprehend";

const SERVICE: &str = "comprehend";
const TARGET: &str = "Comprehend_20171127.DetectTargetedSentiment";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
/// English is the only language `DetectTargetedSentiment` supports.
const LANGUAGE_CODE: &str = "en";
/// Maximum UTF-8 text size accepted per request.
pub const MAX_TEXT_BYTES: usize = 5_000;

/// Client for the Comprehend `DetectTargetedSentiment` action.
///
/// Use [`ComprehendClient::new`] for the regional AWS endpoint or
/// [`ComprehendClient::with_base_url`] to point at a mock server in tests.
pub struct ComprehendClient {
    client: Client,
    credentials: AwsCredentials,
    region: String,
    endpoint: Url,
    max_retries: u32,
    retry_backoff_base_ms: u64,
}

impl ComprehendClient {
    /// Creates a client for `https://comprehend.{region}.amazonaws.com/`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self, SentimentError> {
        let endpoint = format!("https://comprehend.{}.amazonaws.com/", config.aws_region);
        Self::with_base_url(config, &endpoint)
    }

    /// Creates a client with a custom endpoint.
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

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised).map_err(|e| SentimentError::InvalidEndpoint {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            credentials: config.aws_credentials.clone(),
            region: config.aws_region.clone(),
            endpoint,
            max_retries: config.max_retries,
            retry_backoff_base_ms: config.retry_backoff_base_ms,
        })
    }

    /// Runs targeted sentiment analysis on English `text`.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::TextTooLarge`] if `text` exceeds [`MAX_TEXT_BYTES`].
    /// - [`SentimentError::Provider`] if AWS answers with a non-2xx status
    ///   (after retries for throttling and 5xx).
    /// - [`SentimentError::Http`] on network failure.
    /// - [`SentimentError::Json`] if the body is not the expected JSON.
    pub async fn detect_targeted_sentiment(
        &self,
        text: &str,
    ) -> Result<DetectTargetedSentimentResponse, SentimentError> {
        if text.len() > MAX_TEXT_BYTES {
            return Err(SentimentError::TextTooLarge {
                provider: PROVIDER,
                bytes: text.len(),
                limit: MAX_TEXT_BYTES,
            });
        }

        let payload = serde_json::to_vec(&DetectTargetedSentimentRequest {
            text,
            language_code: LANGUAGE_CODE,
        })
        .map_err(|e| SentimentError::Json {
            context: "DetectTargetedSentiment request".to_string(),
            source: e,
        })?;

        retry_with_backoff(PROVIDER, self.max_retries, self.retry_backoff_base_ms, || {
            self.send_once(&payload)
        })
        .await
    }

    async fn send_once(
        &self,
        payload: &[u8],
    ) -> Result<DetectTargetedSentimentResponse, SentimentError> {
        let signed = sign_post(
            &SigningParams {
                credentials: &self.credentials,
                region: &self.region,
                service: SERVICE,
                timestamp: Utc::now(),
            },
            &self.endpoint,
            &[("content-type", CONTENT_TYPE), ("x-amz-target", TARGET)],
            payload,
        )?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, CONTENT_TYPE)
            .header("x-amz-target", TARGET)
            .header("x-amz-date", &signed.amz_date)
            .header(header::AUTHORIZATION, &signed.authorization)
            .body(payload.to_vec())
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
            context: "DetectTargetedSentiment response".to_string(),
            source: e,
        })
    }
}

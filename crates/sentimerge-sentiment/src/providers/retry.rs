//! Retry with exponential back-off and jitter for provider calls.
//!
//! Only transient failures are retried: network timeouts, refused
//! connections, throttling (429) and 5xx responses. Every other error is
//! returned on the first attempt since each retry is billed again.

use std::future::Future;
use std::time::Duration;

use crate::error::SentimentError;

const MAX_DELAY_MS: u64 = 60_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
pub(crate) fn is_retriable(err: &SentimentError) -> bool {
    match err {
        SentimentError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        SentimentError::Provider { status, .. } => *status == 429 || *status >= 500,
        SentimentError::Json { .. }
        | SentimentError::InvalidEndpoint { .. }
        | SentimentError::Signing(_)
        | SentimentError::EmptyText
        | SentimentError::TextTooLarge { .. }
        | SentimentError::EmptyAggregation { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The delay before attempt `n + 1` is `backoff_base_ms × 2ⁿ⁻¹ ± 25 %`,
/// capped at 60 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    provider: &'static str,
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, SentimentError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SentimentError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    provider,
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient provider error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provider answered with a non-2xx status.
    #[error("{provider} returned status {status}: {body}")]
    Provider {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("JSON error for {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid provider endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("request signing failed: {0}")]
    Signing(String),

    #[error("text is empty")]
    EmptyText,

    #[error("text is {bytes} bytes; {provider} accepts at most {limit}")]
    TextTooLarge {
        provider: &'static str,
        bytes: usize,
        limit: usize,
    },

    /// Every observation for an entity was filtered out, so no mean exists.
    #[error("no qualifying data for entity '{text}'")]
    EmptyAggregation { text: String },
}

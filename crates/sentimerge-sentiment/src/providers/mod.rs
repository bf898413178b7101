//! Clients for the two sentiment providers and their wire types.

mod comprehend;
mod natural_language;
mod retry;
mod sigv4;
pub mod types;

pub use comprehend::{ComprehendClient, MAX_TEXT_BYTES};
pub use natural_language::NaturalLanguageClient;
pub use types::{AnalyzeEntitySentimentResponse, DetectTargetedSentimentResponse};

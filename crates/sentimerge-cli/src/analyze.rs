//! `analyze` command: run both providers directly and print the result.

use sentimerge_sentiment::{MergedEntities, SentimentAnalyzer};

/// Analyze `text` and print the merged entities to stdout.
///
/// Only provider credentials are needed; no database connection is made and
/// the monthly budget is not consulted.
///
/// # Errors
///
/// Returns an error if provider configuration is missing or either provider
/// call fails.
pub(crate) async fn run_analyze(text: &str, compact: bool) -> anyhow::Result<()> {
    let config = sentimerge_core::load_provider_config()?;
    let analyzer = SentimentAnalyzer::from_config(&config)?;

    let merged = analyzer.analyze_sentiment(text).await?;
    println!("{}", render(&merged, compact)?);
    Ok(())
}

pub(crate) fn render(merged: &MergedEntities, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(merged)
    } else {
        serde_json::to_string_pretty(merged)
    }
}

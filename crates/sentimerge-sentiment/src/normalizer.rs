//! Per-provider reduction to one comparable score per entity text.
//!
//! Both providers can report the same text more than once, so entries are
//! first grouped by text and then averaged.
//!
//! - AWS: every mention with `group_score >= 0.5` contributes
//!   `(positive - negative) * score`.
//! - GCP: every entity contributes `score * magnitude / (magnitude + 1)`,
//!   which maps magnitude from `[0, inf)` onto `[0, 1)`.

use std::collections::BTreeMap;

use crate::error::SentimentError;
use crate::types::{AwsEntity, GcpEntity, NormalizedEntity};

/// AWS mentions less cohesive with their group than this are ignored.
pub const MIN_GROUP_SCORE: f64 = 0.5;

/// Arithmetic mean, or `None` for an empty slice.
#[must_use]
pub fn arithmetic_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let len = values.len() as f64;
    Some(values.iter().sum::<f64>() / len)
}

fn group_by_text<'a, T>(
    items: &'a [T],
    text_of: impl Fn(&'a T) -> &'a str,
) -> BTreeMap<&'a str, Vec<&'a T>> {
    let mut groups: BTreeMap<&str, Vec<&T>> = BTreeMap::new();
    for item in items {
        groups.entry(text_of(item)).or_default().push(item);
    }
    groups
}

fn aggregate(text: &str, weighted: &[f64]) -> Result<NormalizedEntity, SentimentError> {
    let score = arithmetic_mean(weighted).ok_or_else(|| SentimentError::EmptyAggregation {
        text: text.to_string(),
    })?;
    Ok(NormalizedEntity {
        text: text.to_string(),
        score,
    })
}

/// Reduce AWS entity groups to one score per display text.
///
/// Groups sharing a display text are pooled: the score is the mean over the
/// union of their qualifying mentions.
///
/// # Errors
///
/// Returns [`SentimentError::EmptyAggregation`] if every mention for a text
/// falls below [`MIN_GROUP_SCORE`] (or the text has no mentions at all).
pub fn normalize_aws_sentiment(
    entities: &[AwsEntity],
) -> Result<Vec<NormalizedEntity>, SentimentError> {
    group_by_text(entities, |e| e.text.as_str())
        .into_iter()
        .map(|(text, group)| {
            let weighted: Vec<f64> = group
                .iter()
                .flat_map(|entity| &entity.mentions)
                .filter(|mention| mention.group_score >= MIN_GROUP_SCORE)
                .map(|mention| {
                    (mention.sentiments.positive - mention.sentiments.negative) * mention.score
                })
                .collect();
            aggregate(text, &weighted)
        })
        .collect()
}

/// Reduce GCP entities to one score per entity name.
///
/// # Errors
///
/// Never fails in practice: every group holds at least one entity. The
/// `Result` keeps both normalizers interchangeable.
pub fn normalize_gcp_sentiment(
    entities: &[GcpEntity],
) -> Result<Vec<NormalizedEntity>, SentimentError> {
    group_by_text(entities, |e| e.name.as_str())
        .into_iter()
        .map(|(text, group)| {
            let weighted: Vec<f64> = group
                .iter()
                .map(|entity| {
                    let magnitude = entity.sentiment.magnitude;
                    entity.sentiment.score * (magnitude / (magnitude + 1.0))
                })
                .collect();
            aggregate(text, &weighted)
        })
        .collect()
}

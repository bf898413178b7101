//! Merge of the two normalized entity lists by entity text.

use std::collections::BTreeMap;

use crate::types::{MergedEntities, MergedEntity, NormalizedEntity};

#[derive(Default)]
struct ScoreSlots {
    aws: Option<f64>,
    gcp: Option<f64>,
}

/// Combine per-provider scores into one entry per distinct text.
///
/// `entities` is sorted ascending by text. `common_entities` holds the entries
/// carrying both scores, in the same order. No verdicts are assigned here.
///
/// Each input list is expected to hold distinct texts already (the normalizers
/// guarantee it). If one repeats a text, the later score overwrites the earlier
/// one in that provider's slot.
#[must_use]
pub fn merge_entities(aws: &[NormalizedEntity], gcp: &[NormalizedEntity]) -> MergedEntities {
    let mut slots: BTreeMap<&str, ScoreSlots> = BTreeMap::new();
    for entity in aws {
        slots.entry(entity.text.as_str()).or_default().aws = Some(entity.score);
    }
    for entity in gcp {
        slots.entry(entity.text.as_str()).or_default().gcp = Some(entity.score);
    }

    let entities: Vec<MergedEntity> = slots
        .into_iter()
        .map(|(text, slot)| MergedEntity {
            text: text.to_string(),
            aws_score: slot.aws,
            gcp_score: slot.gcp,
            overall_sentiment: None,
        })
        .collect();

    let common_entities = entities
        .iter()
        .filter(|entity| entity.is_common())
        .cloned()
        .collect();

    MergedEntities {
        common_entities,
        entities,
    }
}

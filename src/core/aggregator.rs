//! Per-character aggregation
//!
//! Rolls the statistics of each sub-category up into canonical dungeon
//! identities and records the latest update time.

use crate::core::normalize::IdentityNormalizer;
use crate::core::types::{Category, CharacterAggregate, ExpansionReport};
use crate::error::EngineError;

/// Aggregate one character's category (consumes it to avoid cloning)
pub(crate) fn aggregate_character(
    character: &str,
    category: Category,
    normalizer: &IdentityNormalizer,
) -> Result<CharacterAggregate, EngineError> {
    let mut freshest_update: Option<i64> = None;
    let mut fallback_identities = 0;
    let mut expansions = Vec::with_capacity(category.sub_categories.len());

    for sub in category.sub_categories {
        let mut report = ExpansionReport::new(sub.name);

        for stat in sub.statistics {
            let identity = match normalizer.normalize(&stat.description) {
                Ok(identity) => identity,
                Err(err) => {
                    log::debug!("{character}: {err}; counting it under its full name");
                    fallback_identities += 1;
                    normalizer.fallback(&stat.description)
                }
            };
            report.add(identity, stat.quantity)?;

            if freshest_update.is_none_or(|ts| stat.updated_at > ts) {
                freshest_update = Some(stat.updated_at);
            }
        }

        expansions.push(report);
    }

    Ok(CharacterAggregate {
        character: character.to_string(),
        expansions,
        freshest_update,
        fallback_identities,
    })
}

//! Cross-character merging
//!
//! Folds per-character aggregates into one accumulator keyed by expansion
//! name. Final totals do not depend on the order characters arrive in.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::core::order::{ExpansionOrder, order_expansions};
use crate::core::types::{AggregateReport, CharacterAggregate, ExpansionReport, SkippedCharacter};
use crate::error::EngineError;

#[derive(Debug, Clone, Default)]
pub(crate) struct ReportAccumulator {
    expansions: HashMap<String, ExpansionReport>,
    freshest_update: Option<i64>,
    characters: Vec<String>,
    skipped: Vec<SkippedCharacter>,
    unparsed_identities: usize,
}

impl ReportAccumulator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_character(&mut self, aggregate: CharacterAggregate) -> Result<(), EngineError> {
        let CharacterAggregate {
            character,
            expansions,
            freshest_update,
            fallback_identities,
        } = aggregate;

        for report in expansions {
            self.add_expansion(report)?;
        }
        self.fold_timestamp(freshest_update);
        self.characters.push(character);
        self.unparsed_identities += fallback_identities;
        Ok(())
    }

    pub(crate) fn record_skip(&mut self, character: &str, error: impl ToString) {
        self.skipped.push(SkippedCharacter {
            character: character.to_string(),
            error: error.to_string(),
        });
    }

    /// Combine two accumulators built from disjoint sets of characters
    pub(crate) fn merge(&mut self, other: ReportAccumulator) -> Result<(), EngineError> {
        let ReportAccumulator {
            expansions,
            freshest_update,
            characters,
            skipped,
            unparsed_identities,
        } = other;

        for report in expansions.into_values() {
            self.add_expansion(report)?;
        }
        self.fold_timestamp(freshest_update);
        self.characters.extend(characters);
        self.skipped.extend(skipped);
        self.unparsed_identities += unparsed_identities;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn expansion(&self, name: &str) -> Option<&ExpansionReport> {
        self.expansions.get(name)
    }

    pub(crate) fn freshest_update(&self) -> Option<i64> {
        self.freshest_update
    }

    pub(crate) fn characters(&self) -> &[String] {
        &self.characters
    }

    /// Order expansions and freeze the result
    pub(crate) fn finalize(self, order: &ExpansionOrder) -> Result<AggregateReport, EngineError> {
        let expansions = order_expansions(self.expansions.into_values(), order);
        let grand_total = expansions
            .iter()
            .try_fold(0u64, |sum, e| sum.checked_add(e.total))
            .ok_or_else(|| EngineError::CountOverflow {
                scope: "grand total".to_string(),
            })?;
        let freshest_update = self
            .freshest_update
            .and_then(DateTime::<Utc>::from_timestamp_millis);

        Ok(AggregateReport {
            expansions,
            grand_total,
            freshest_update,
            characters: self.characters,
            skipped: self.skipped,
            unparsed_identities: self.unparsed_identities,
        })
    }

    fn add_expansion(&mut self, report: ExpansionReport) -> Result<(), EngineError> {
        match self.expansions.get_mut(report.expansion()) {
            Some(existing) => existing.absorb(report)?,
            None => {
                self.expansions.insert(report.expansion().to_string(), report);
            }
        }
        Ok(())
    }

    fn fold_timestamp(&mut self, candidate: Option<i64>) {
        self.freshest_update = match (self.freshest_update, candidate) {
            (Some(current), Some(ts)) => Some(current.max(ts)),
            (current, ts) => current.or(ts),
        };
    }
}

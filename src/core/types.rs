//! Core data types shared by the aggregation pipeline
//!
//! `Category` and below are validated views of the wire model. Everything
//! from `ExpansionReport` on is built by the engine itself.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::error::EngineError;

/// One achievement counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Statistic {
    pub(crate) description: String,
    pub(crate) quantity: u64,
    /// Unix time in milliseconds
    pub(crate) updated_at: i64,
}

/// Dungeon list of a single expansion
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SubCategory {
    pub(crate) name: String,
    pub(crate) statistics: Vec<Statistic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Category {
    pub(crate) name: String,
    pub(crate) sub_categories: Vec<SubCategory>,
}

/// Canonical per-dungeon completion tally
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DungeonCount {
    pub(crate) identity: String,
    pub(crate) count: u64,
}

/// Per-expansion rollup keyed by dungeon identity.
///
/// `total` is private and only moves together with a dungeon count, so it
/// always equals the sum of the counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ExpansionReport {
    expansion: String,
    total: u64,
    dungeons: HashMap<String, u64>,
}

impl ExpansionReport {
    pub(crate) fn new(expansion: impl Into<String>) -> Self {
        Self {
            expansion: expansion.into(),
            total: 0,
            dungeons: HashMap::new(),
        }
    }

    pub(crate) fn expansion(&self) -> &str {
        &self.expansion
    }

    #[cfg(test)]
    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    #[cfg(test)]
    pub(crate) fn count(&self, identity: &str) -> Option<u64> {
        self.dungeons.get(identity).copied()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.dungeons.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.dungeons.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn dungeons(&self) -> impl Iterator<Item = (&str, u64)> {
        self.dungeons.iter().map(|(id, count)| (id.as_str(), *count))
    }

    /// Add completions to an identity, inserting it on first sight.
    ///
    /// Every count is bounded by `total`, so checking the total is enough;
    /// on overflow nothing is modified.
    pub(crate) fn add(&mut self, identity: &str, count: u64) -> Result<(), EngineError> {
        self.total = self.checked_total(count)?;
        match self.dungeons.get_mut(identity) {
            Some(existing) => *existing += count,
            None => {
                self.dungeons.insert(identity.to_string(), count);
            }
        }
        Ok(())
    }

    /// Fold another report for the same expansion into this one
    pub(crate) fn absorb(&mut self, other: ExpansionReport) -> Result<(), EngineError> {
        self.total = self.checked_total(other.total)?;
        for (identity, count) in other.dungeons {
            *self.dungeons.entry(identity).or_default() += count;
        }
        Ok(())
    }

    fn checked_total(&self, count: u64) -> Result<u64, EngineError> {
        self.total
            .checked_add(count)
            .ok_or_else(|| EngineError::CountOverflow {
                scope: format!("expansion \"{}\"", self.expansion),
            })
    }

    /// Freeze into an ordered summary, dungeons sorted by identity
    pub(crate) fn into_summary(self) -> ExpansionSummary {
        let mut dungeons: Vec<DungeonCount> = self
            .dungeons
            .into_iter()
            .map(|(identity, count)| DungeonCount { identity, count })
            .collect();
        dungeons.sort_by(|a, b| a.identity.cmp(&b.identity));
        ExpansionSummary {
            expansion: self.expansion,
            total: self.total,
            dungeons,
        }
    }
}

/// Ordered, read-only form of an `ExpansionReport`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ExpansionSummary {
    pub(crate) expansion: String,
    pub(crate) total: u64,
    pub(crate) dungeons: Vec<DungeonCount>,
}

/// Result of aggregating one character's category
#[derive(Debug, Clone, Default)]
pub(crate) struct CharacterAggregate {
    pub(crate) character: String,
    pub(crate) expansions: Vec<ExpansionReport>,
    /// Latest statistic update in Unix milliseconds
    pub(crate) freshest_update: Option<i64>,
    /// Descriptions that did not match the identity pattern
    pub(crate) fallback_identities: usize,
}

/// A character left out of the report under the skip policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SkippedCharacter {
    pub(crate) character: String,
    pub(crate) error: String,
}

/// Whole-run result, ready for formatting
#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct AggregateReport {
    pub(crate) expansions: Vec<ExpansionSummary>,
    pub(crate) grand_total: u64,
    pub(crate) freshest_update: Option<DateTime<Utc>>,
    pub(crate) characters: Vec<String>,
    pub(crate) skipped: Vec<SkippedCharacter>,
    #[serde(skip_serializing)]
    pub(crate) unparsed_identities: usize,
}

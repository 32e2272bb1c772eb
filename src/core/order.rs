//! Chronological expansion ordering

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::core::types::{ExpansionReport, ExpansionSummary};

/// Release order used when no table is configured
pub(crate) const DEFAULT_EXPANSIONS: &[&str] = &[
    "Classic",
    "The Burning Crusade",
    "Wrath of the Lich King",
    "Cataclysm",
    "Mists of Pandaria",
    "Warlords of Draenor",
    "Legion",
    "Battle for Azeroth",
    "Shadowlands",
    "Dragonflight",
    "The War Within",
];

/// Immutable expansion name -> release rank table
#[derive(Debug, Clone)]
pub(crate) struct ExpansionOrder {
    ranks: HashMap<String, usize>,
}

impl Default for ExpansionOrder {
    fn default() -> Self {
        Self::new(DEFAULT_EXPANSIONS.iter().copied())
    }
}

impl ExpansionOrder {
    /// Build from names listed earliest to latest; a repeated name keeps its first rank
    pub(crate) fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ranks = HashMap::new();
        for name in names {
            let next = ranks.len();
            ranks.entry(name.into()).or_insert(next);
        }
        Self { ranks }
    }

    pub(crate) fn rank(&self, expansion: &str) -> Option<usize> {
        self.ranks.get(expansion).copied()
    }

    /// Known expansions by rank, then unknown ones by name
    pub(crate) fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.rank(a), self.rank(b)) {
            (Some(ra), Some(rb)) => ra.cmp(&rb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }
}

/// Sort expansions, drop the ones with no dungeon entries, and sort dungeons
pub(crate) fn order_expansions<I>(expansions: I, order: &ExpansionOrder) -> Vec<ExpansionSummary>
where
    I: IntoIterator<Item = ExpansionReport>,
{
    let mut reports: Vec<ExpansionReport> = expansions
        .into_iter()
        .filter(|report| !report.is_empty())
        .collect();
    reports.sort_by(|a, b| order.compare(a.expansion(), b.expansion()));
    reports.into_iter().map(ExpansionReport::into_summary).collect()
}

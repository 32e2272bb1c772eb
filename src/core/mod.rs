//! Statistics aggregation engine
//!
//! decoded response -> category -> per-character rollup -> merged, ordered report

mod aggregator;
mod extract;
mod merge;
mod normalize;
mod order;
mod response;
mod types;

pub(crate) use aggregator::aggregate_character;
pub(crate) use extract::extract_category;
pub(crate) use merge::ReportAccumulator;
pub(crate) use normalize::{IdentityNormalizer, IdentityPolicy};
pub(crate) use order::ExpansionOrder;
pub(crate) use response::StatsResponse;
pub(crate) use types::AggregateReport;
#[cfg(test)]
pub(crate) use types::{DungeonCount, ExpansionSummary, SkippedCharacter};

//! Category extraction and validation
//!
//! Picks the target category out of a decoded response and converts it into
//! the validated `Category` shape the aggregator works on.

use crate::core::response::{CategoryResponse, StatisticResponse, SubCategoryResponse};
use crate::core::types::{Category, Statistic, SubCategory};
use crate::error::EngineError;

/// Find the category named exactly `target` (case-sensitive) and validate it
pub(crate) fn extract_category(
    character: &str,
    categories: Vec<CategoryResponse>,
    target: &str,
) -> Result<Category, EngineError> {
    let Some(category) = categories.into_iter().find(|c| c.name == target) else {
        return Err(EngineError::CategoryNotFound {
            character: character.to_string(),
            category: target.to_string(),
        });
    };

    let Some(sub_categories) = category.sub_categories else {
        return Err(mismatch(
            character,
            format!("category \"{}\" has no sub_categories", category.name),
        ));
    };

    let sub_categories = sub_categories
        .into_iter()
        .map(|sub| convert_sub_category(character, sub))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Category {
        name: category.name,
        sub_categories,
    })
}

fn convert_sub_category(
    character: &str,
    sub: SubCategoryResponse,
) -> Result<SubCategory, EngineError> {
    let Some(statistics) = sub.statistics else {
        return Err(mismatch(
            character,
            format!("sub-category \"{}\" has no statistics", sub.name),
        ));
    };

    let statistics = statistics
        .into_iter()
        .map(|stat| convert_statistic(character, stat))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SubCategory {
        name: sub.name,
        statistics,
    })
}

fn convert_statistic(character: &str, stat: StatisticResponse) -> Result<Statistic, EngineError> {
    let Some(quantity) = to_quantity(stat.quantity) else {
        return Err(mismatch(
            character,
            format!("statistic \"{}\" has invalid quantity {}", stat.name, stat.quantity),
        ));
    };
    Ok(Statistic {
        description: stat.name,
        quantity,
        updated_at: stat.last_updated_timestamp,
    })
}

/// Completion counts arrive as JSON numbers; fractions truncate toward zero.
///
/// `u64::MAX as f64` rounds up to 2^64, so anything at or above it is out of range.
fn to_quantity(raw: f64) -> Option<u64> {
    if !raw.is_finite() || raw < 0.0 || raw >= u64::MAX as f64 {
        return None;
    }
    Some(raw.trunc() as u64)
}

fn mismatch(character: &str, detail: String) -> EngineError {
    EngineError::DecodeMismatch {
        character: character.to_string(),
        detail,
    }
}

//! Wire model of the character achievement-statistics endpoint
//!
//! Lists that only some categories carry are optional here; the category
//! extractor decides whether their absence is an error.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct StatsResponse {
    pub(crate) character: CharacterResponse,
    #[serde(default)]
    pub(crate) categories: Vec<CategoryResponse>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CharacterResponse {
    pub(crate) name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryResponse {
    pub(crate) name: String,
    pub(crate) sub_categories: Option<Vec<SubCategoryResponse>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubCategoryResponse {
    pub(crate) name: String,
    pub(crate) statistics: Option<Vec<StatisticResponse>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatisticResponse {
    pub(crate) name: String,
    /// Sent as a JSON number that is not always integral
    pub(crate) quantity: f64,
    /// Unix time in milliseconds
    pub(crate) last_updated_timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_nested_payload_and_ignores_ids() {
        let json = r#"{
            "character": {"name": "Niktonian", "id": 7},
            "categories": [
                {"id": 14807, "name": "Dungeons & Raids", "sub_categories": [
                    {"id": 14808, "name": "Classic", "statistics": [
                        {"id": 1, "name": "Ragefire Chasm (Normal)", "quantity": 3.0,
                         "last_updated_timestamp": 1700000000000}
                    ]}
                ]},
                {"id": 130, "name": "Character", "statistics": []}
            ]
        }"#;
        let resp: StatsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.character.name, "Niktonian");
        assert_eq!(resp.categories.len(), 2);
        let subs = resp.categories[0].sub_categories.as_ref().unwrap();
        let stats = subs[0].statistics.as_ref().unwrap();
        assert_eq!(stats[0].name, "Ragefire Chasm (Normal)");
        assert_eq!(stats[0].last_updated_timestamp, 1_700_000_000_000);
        assert!(resp.categories[1].sub_categories.is_none());
    }

    #[test]
    fn missing_categories_defaults_to_empty() {
        let resp: StatsResponse = serde_json::from_str(r#"{"character":{"name":"x"}}"#).unwrap();
        assert!(resp.categories.is_empty());
    }

    #[test]
    fn statistic_without_quantity_is_rejected() {
        let json = r#"{"name": "Deadmines (Normal)", "last_updated_timestamp": 1}"#;
        assert!(serde_json::from_str::<StatisticResponse>(json).is_err());
    }
}

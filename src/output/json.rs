use crate::core::AggregateReport;
use crate::error::AppError;

pub(crate) fn output_report_json(report: &AggregateReport) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DungeonCount, ExpansionSummary, SkippedCharacter};
    use chrono::{DateTime, Utc};

    #[test]
    fn json_shape() {
        let report = AggregateReport {
            expansions: vec![ExpansionSummary {
                expansion: "Classic".to_string(),
                total: 5,
                dungeons: vec![DungeonCount {
                    identity: "Ragefire Chasm".to_string(),
                    count: 5,
                }],
            }],
            grand_total: 5,
            freshest_update: DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000),
            characters: vec!["niktonian".to_string()],
            skipped: vec![SkippedCharacter {
                character: "audney".to_string(),
                error: "boom".to_string(),
            }],
            unparsed_identities: 2,
        };

        let json = output_report_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["grand_total"], 5);
        assert_eq!(value["expansions"][0]["expansion"], "Classic");
        assert_eq!(value["expansions"][0]["dungeons"][0]["identity"], "Ragefire Chasm");
        assert_eq!(value["expansions"][0]["dungeons"][0]["count"], 5);
        assert_eq!(value["characters"][0], "niktonian");
        assert_eq!(value["skipped"][0]["character"], "audney");
        assert!(
            value["freshest_update"]
                .as_str()
                .unwrap()
                .starts_with("2023-11-14T22:13:20")
        );
        assert!(value.get("unparsed_identities").is_none());
    }

    #[test]
    fn missing_freshness_is_null() {
        let json = output_report_json(&AggregateReport::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["freshest_update"].is_null());
        assert_eq!(value["expansions"].as_array().unwrap().len(), 0);
    }
}

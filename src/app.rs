use std::path::Path;
use std::time::Instant;

use crate::cli::{Cli, Commands, OnError};
use crate::config::{Config, read_dotenv};
use crate::consts::{DEFAULT_PLACEHOLDER, TARGET_CATEGORY};
use crate::core::{
    AggregateReport, ExpansionOrder, IdentityNormalizer, ReportAccumulator, aggregate_character,
    extract_category,
};
use crate::error::AppError;
use crate::output::{
    ReportTableOptions, format_report, output_report_json, print_report_table, render_file,
};
use crate::source::battlenet::{ApiClient, ApiSettings, Credentials};
use crate::source::{BattleNetSource, BoxedSource, FileSource, StatsSource};
use crate::utils::Timezone;

/// Fetch, extract and aggregate one character into its own accumulator
fn process_character(
    source: &dyn StatsSource,
    character: &str,
    normalizer: &IdentityNormalizer,
) -> Result<ReportAccumulator, AppError> {
    let response = source.fetch(character)?;
    log::debug!(
        "{character}: {} categories for {}",
        response.categories.len(),
        response.character.name
    );
    let category = extract_category(character, response.categories, TARGET_CATEGORY)?;
    let aggregate = aggregate_character(character, category, normalizer)?;

    let mut partial = ReportAccumulator::new();
    partial.add_character(aggregate)?;
    Ok(partial)
}

/// Run every character through the pipeline and merge the results.
///
/// Under `OnError::Skip` failed characters are recorded on the report; the
/// run still fails if none succeeded. Count overflow while merging always
/// fails the run.
pub(crate) fn build_report(
    source: &dyn StatsSource,
    characters: &[String],
    normalizer: &IdentityNormalizer,
    on_error: OnError,
    order: &ExpansionOrder,
) -> Result<AggregateReport, AppError> {
    let mut total = ReportAccumulator::new();
    let mut failures = 0;
    let mut last_error = String::new();

    for character in characters {
        let start = Instant::now();
        match process_character(source, character, normalizer) {
            Ok(partial) => {
                log::info!(
                    "{character}: loaded from {} in {}ms",
                    source.display_name(),
                    start.elapsed().as_millis()
                );
                total.merge(partial)?;
            }
            Err(err) => match on_error {
                OnError::Abort => return Err(err),
                OnError::Skip => {
                    log::warn!("Skipping {character}: {err}");
                    failures += 1;
                    last_error = err.to_string();
                    total.record_skip(character, &err);
                }
            },
        }
    }

    if failures > 0 && failures == characters.len() {
        return Err(AppError::AllCharactersFailed {
            count: failures,
            last: last_error,
        });
    }

    log::debug!(
        "Merged {} characters, freshest update {:?}",
        total.characters().len(),
        total.freshest_update()
    );

    let report = total.finalize(order)?;
    if report.unparsed_identities > 0 {
        log::warn!(
            "{} statistic names did not match the dungeon pattern and were counted under their full name",
            report.unparsed_identities
        );
    }
    Ok(report)
}

fn build_source(cli: &Cli) -> Result<BoxedSource, AppError> {
    if let Some(dir) = &cli.input_dir {
        log::debug!("Reading saved responses from {}", dir.display());
        return Ok(Box::new(FileSource::new(dir.clone())));
    }

    let dotenv = read_dotenv(Path::new(".env"));
    let credentials = Credentials::from_env(&dotenv)?;
    let client = ApiClient::connect(cli.region(), &credentials)?;
    Ok(Box::new(BattleNetSource::new(
        client,
        ApiSettings {
            region: cli.region().to_string(),
            realm: cli.realm().to_string(),
            locale: cli.locale().to_string(),
        },
    )))
}

pub(crate) fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    let characters: Vec<String> = cli
        .character_list()
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if characters.is_empty() {
        return Err(AppError::NoCharacters);
    }

    let timezone = Timezone::parse(cli.timezone.as_deref())?;
    let order = match &config.expansions {
        Some(names) => ExpansionOrder::new(names.iter().cloned()),
        None => ExpansionOrder::default(),
    };
    let normalizer = IdentityNormalizer::new(cli.merge_by().into());

    let source = build_source(cli)?;
    log::debug!("Using source: {}", source.name());

    let report = build_report(source.as_ref(), &characters, &normalizer, cli.on_error(), &order)?;

    match cli.command.clone().unwrap_or_default() {
        Commands::Report => {
            if cli.json {
                println!("{}", output_report_json(&report)?);
            } else {
                print!("{}", format_report(&report, timezone));
            }
        }
        Commands::Table => {
            if cli.json {
                println!("{}", output_report_json(&report)?);
            } else {
                print_report_table(
                    &report,
                    ReportTableOptions {
                        use_color: cli.use_color(),
                        timezone,
                    },
                );
            }
        }
        Commands::Render {
            template,
            output,
            placeholder,
        } => {
            let placeholder = placeholder
                .or_else(|| config.placeholder.clone())
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string());
            let body = format_report(&report, timezone);
            let replaced = render_file(&template, &output, &placeholder, &body)?;
            if replaced == 0 {
                log::warn!(
                    "Placeholder {placeholder} not found in {}; output written unchanged",
                    template.display()
                );
            }
            log::info!("Wrote {}", output.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{IdentityPolicy, StatsResponse};
    use crate::error::EngineError;
    use crate::source::decode_response;
    use std::collections::HashMap;

    struct MemorySource {
        bodies: HashMap<String, String>,
    }

    impl MemorySource {
        fn new(entries: &[(&str, String)]) -> Self {
            Self {
                bodies: entries
                    .iter()
                    .map(|(name, body)| (name.to_string(), body.clone()))
                    .collect(),
            }
        }
    }

    impl StatsSource for MemorySource {
        fn name(&self) -> &'static str {
            "memory"
        }

        fn fetch(&self, character: &str) -> Result<StatsResponse, AppError> {
            match self.bodies.get(character) {
                Some(body) => Ok(decode_response(character, body)?),
                None => Err(EngineError::DecodeMismatch {
                    character: character.to_string(),
                    detail: "no body".to_string(),
                }
                .into()),
            }
        }
    }

    fn body(name: &str, expansion: &str, description: &str, quantity: u64, ts: i64) -> String {
        serde_json::json!({
            "character": { "name": name },
            "categories": [{
                "id": 14807,
                "name": "Dungeons & Raids",
                "sub_categories": [{
                    "id": 14808,
                    "name": expansion,
                    "statistics": [{
                        "id": 1,
                        "name": description,
                        "last_updated_timestamp": ts,
                        "quantity": quantity
                    }]
                }]
            }]
        })
        .to_string()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn merges_characters_under_base_policy() {
        let source = MemorySource::new(&[
            ("a", body("A", "Classic", "Ragefire Chasm (Normal)", 3, 100)),
            ("b", body("B", "Classic", "Ragefire Chasm (Heroic)", 2, 200)),
        ]);
        let report = build_report(
            &source,
            &names(&["a", "b"]),
            &IdentityNormalizer::new(IdentityPolicy::Base),
            OnError::Abort,
            &ExpansionOrder::default(),
        )
        .unwrap();

        assert_eq!(report.grand_total, 5);
        assert_eq!(report.expansions.len(), 1);
        assert_eq!(report.expansions[0].dungeons.len(), 1);
        assert_eq!(report.expansions[0].dungeons[0].identity, "Ragefire Chasm");
        assert_eq!(report.freshest_update.unwrap().timestamp_millis(), 200);
        assert_eq!(report.characters, names(&["a", "b"]));
    }

    #[test]
    fn abort_policy_stops_on_first_failure() {
        let source = MemorySource::new(&[("a", body("A", "Classic", "Deadmines (Normal)", 1, 1))]);
        let err = build_report(
            &source,
            &names(&["a", "missing"]),
            &IdentityNormalizer::default(),
            OnError::Abort,
            &ExpansionOrder::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Engine(EngineError::DecodeMismatch { .. })));
    }

    #[test]
    fn skip_policy_records_failed_character() {
        let source = MemorySource::new(&[("a", body("A", "Classic", "Deadmines (Normal)", 4, 1))]);
        let report = build_report(
            &source,
            &names(&["a", "missing"]),
            &IdentityNormalizer::default(),
            OnError::Skip,
            &ExpansionOrder::default(),
        )
        .unwrap();
        assert_eq!(report.grand_total, 4);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].character, "missing");
    }

    #[test]
    fn skip_policy_fails_when_everything_fails() {
        let source = MemorySource::new(&[]);
        let err = build_report(
            &source,
            &names(&["x", "y"]),
            &IdentityNormalizer::default(),
            OnError::Skip,
            &ExpansionOrder::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::AllCharactersFailed { count: 2, .. }));
    }

    #[test]
    fn missing_category_is_reported() {
        let empty = r#"{"character":{"name":"A"},"categories":[{"id":1,"name":"Quests","sub_categories":[]}]}"#;
        let source = MemorySource::new(&[("a", empty.to_string())]);
        let err = build_report(
            &source,
            &names(&["a"]),
            &IdentityNormalizer::default(),
            OnError::Abort,
            &ExpansionOrder::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Engine(EngineError::CategoryNotFound { .. })
        ));
    }

    #[test]
    fn overflowing_counts_fail_instead_of_wrapping() {
        let huge = 10_000_000_000_000_000_000;
        let source = MemorySource::new(&[
            ("a", body("A", "Classic", "Deadmines (Normal)", huge, 1)),
            ("b", body("B", "Classic", "Deadmines (Normal)", huge, 2)),
        ]);
        let err = build_report(
            &source,
            &names(&["a", "b"]),
            &IdentityNormalizer::default(),
            OnError::Skip,
            &ExpansionOrder::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Engine(EngineError::CountOverflow { .. })
        ));
    }
}

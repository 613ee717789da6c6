//! Table-building pipelines.
//!
//! Candidate flow: fetch grid → normalize → cohort filter.
//! Interviewer flow: fetch roster + competency grid → normalize → keep
//! rostered columns → cohort filter → annotate levels → synthesize profiles
//! for roster-only interviewers.
//!
//! Both run per request against a fresh spreadsheet read; nothing is cached.

use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::sheets::SheetSource;
use crate::table::cohort::{self, CohortFlags, CohortPolicy};
use crate::table::merger::{annotate_levels, retain_rostered_columns, synthesize_missing};
use crate::table::normalizer::normalize;
use crate::table::roster::parse_roster;
use crate::table::CompetencyTable;

/// Resolves a department name to its competency spreadsheet id.
fn department_spreadsheet<'a>(config: &'a Config, department: &str) -> Result<&'a str, AppError> {
    config.department_spreadsheet(department).ok_or_else(|| {
        AppError::Validation(format!("Unknown department '{department}'"))
    })
}

/// Builds the candidate pool table for one department sheet.
pub async fn candidate_table(
    source: &dyn SheetSource,
    config: &Config,
    department: &str,
    sheet: &str,
    flags: CohortFlags,
) -> Result<CompetencyTable, AppError> {
    let spreadsheet_id = department_spreadsheet(config, department)?;
    let grid = source.grid(spreadsheet_id, sheet).await?;

    let mut table = normalize(&grid, config.competency_header_offset);
    cohort::apply(&mut table, CohortPolicy::Candidates, flags);

    info!(
        department,
        sheet,
        candidates = table.entity_columns().len(),
        skills = table.rows.len(),
        "built candidate table"
    );
    Ok(table)
}

/// Builds the interviewer pool table for one department sheet: the
/// intersection of the competency sheet and the interviewer roster, headers
/// annotated with seniority, roster-only interviewers synthesized in.
pub async fn interviewer_table(
    source: &dyn SheetSource,
    config: &Config,
    department: &str,
    sheet: &str,
    flags: CohortFlags,
) -> Result<CompetencyTable, AppError> {
    let spreadsheet_id = department_spreadsheet(config, department)?;

    let roster_grid = source.grid(&config.interviewer_spreadsheet_id, sheet).await?;
    let roster = parse_roster(&roster_grid, config.roster_header_offset)?;

    let grid = source.grid(spreadsheet_id, sheet).await?;
    let mut table = normalize(&grid, config.competency_header_offset);

    retain_rostered_columns(&mut table, &roster);
    // Sheet presence is judged before cohort filtering: an interviewer whose
    // column the filter drops must not be synthesized back in.
    let sheet_interviewers = table.entity_columns().to_vec();
    cohort::apply(&mut table, CohortPolicy::Interviewers, flags);
    annotate_levels(&mut table, &roster)?;
    synthesize_missing(&mut table, &roster, &sheet_interviewers);

    info!(
        department,
        sheet,
        interviewers = table.entity_columns().len(),
        skills = table.rows.len(),
        "built interviewer table"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Department;
    use crate::sheets::test_support::StaticSheetSource;
    use crate::table::roster::{EMPLOYEE_COLUMN, LEVEL_COLUMN};
    use crate::table::SKILL_COLUMN;

    fn test_config() -> Config {
        Config {
            openai_api_base: "http://localhost".to_string(),
            openai_api_key: "test".to_string(),
            model_name: "test-model".to_string(),
            sheets_api_key: "test".to_string(),
            departments: vec![Department {
                name: "Data Platform".to_string(),
                spreadsheet_id: "dp-sheet".to_string(),
            }],
            interviewer_spreadsheet_id: "interviewer-sheet".to_string(),
            competency_header_offset: 5,
            roster_header_offset: 0,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    /// Competency grid with the standard 5 preamble rows, header at row 5.
    fn competency_grid(header: &[&str], body: &[&[&str]]) -> Vec<Vec<String>> {
        let mut rows: Vec<Vec<String>> = (0..5).map(|_| vec![String::new()]).collect();
        rows.push(header.iter().map(|s| s.to_string()).collect());
        rows.extend(body.iter().map(|r| r.iter().map(|s| s.to_string()).collect()));
        rows
    }

    #[tokio::test]
    async fn test_candidate_table_scenario() {
        // Typical export: header at offset 5, one consultant column,
        // one blank skill row. Default flags exclude staffing and laboratory.
        let source = StaticSheetSource::default().with_sheet(
            "dp-sheet",
            "Python",
            competency_grid(
                &["Skill", "A", "B (cnslt)"],
                &[&["Rust", "3", "2"], &["", "1", "1"], &["SQL", "2", "3"]],
            ),
        );

        let table = candidate_table(
            &source,
            &test_config(),
            "Data Platform",
            "Python",
            CohortFlags::default(),
        )
        .await
        .unwrap();

        assert_eq!(table.columns, vec![SKILL_COLUMN, "A"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["Rust", "3"]);
    }

    #[tokio::test]
    async fn test_candidate_table_unknown_department() {
        let source = StaticSheetSource::default();
        let err = candidate_table(
            &source,
            &test_config(),
            "Nope",
            "Python",
            CohortFlags::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_candidate_table_missing_sheet_is_source_not_found() {
        let source = StaticSheetSource::default();
        let err = candidate_table(
            &source,
            &test_config(),
            "Data Platform",
            "Python",
            CohortFlags::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Source(_)));
    }

    #[tokio::test]
    async fn test_candidate_table_short_grid_yields_empty_table() {
        // Fewer rows than the header offset: "no data", not a fault.
        let source =
            StaticSheetSource::default().with_sheet("dp-sheet", "Python", grid(&[&["only row"]]));
        let table = candidate_table(
            &source,
            &test_config(),
            "Data Platform",
            "Python",
            CohortFlags::default(),
        )
        .await
        .unwrap();
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_interviewer_table_full_flow() {
        let source = StaticSheetSource::default()
            .with_sheet(
                "interviewer-sheet",
                "Python",
                grid(&[
                    &[EMPLOYEE_COLUMN, LEVEL_COLUMN],
                    &["Ivanov I.I.", "S1"],
                    &["Petrov P.P.", "J2"],
                    &["Новиков Н.Н.", "M2"],
                ]),
            )
            .with_sheet(
                "dp-sheet",
                "Python",
                competency_grid(
                    &["Skill", "Ivanov I.I.", "Stranger X.X.", "Petrov P.P."],
                    &[&["Rust", "3", "9", "3"], &["SQL", "1", "9", "2"]],
                ),
            );

        let table = interviewer_table(
            &source,
            &test_config(),
            "Data Platform",
            "Python",
            CohortFlags::default(),
        )
        .await
        .unwrap();

        // Stranger dropped (not rostered), survivors annotated, the
        // roster-only interviewer synthesized by majority vote.
        assert_eq!(
            table.columns,
            vec![
                SKILL_COLUMN,
                "Ivanov I.I. (S1)",
                "Petrov P.P. (J2)",
                "Новиков Н.Н. (M2)",
            ]
        );
        assert_eq!(table.rows[0], vec!["Rust", "3", "3", "3"]);
        // tie between "1" and "2" resolves to first-encountered "1"
        assert_eq!(table.rows[1], vec!["SQL", "1", "2", "1"]);
    }

    #[tokio::test]
    async fn test_interviewer_table_consultant_opt_in() {
        let roster = grid(&[
            &[EMPLOYEE_COLUMN, LEVEL_COLUMN],
            &["Ivanov I.I.", "S1"],
            &["Orlova O.O.", "M3"],
        ]);
        let competencies = competency_grid(
            &["Skill", "Ivanov I.I.", "cnslt - Orlova O.O."],
            &[&["Rust", "3", "4"]],
        );

        let excluded = StaticSheetSource::default()
            .with_sheet("interviewer-sheet", "Python", roster.clone())
            .with_sheet("dp-sheet", "Python", competencies.clone());
        let table = interviewer_table(
            &excluded,
            &test_config(),
            "Data Platform",
            "Python",
            CohortFlags::default(),
        )
        .await
        .unwrap();
        // the consultant has a sheet column, so excluding her cohort removes
        // her entirely — no synthesized stand-in
        assert_eq!(table.columns, vec![SKILL_COLUMN, "Ivanov I.I. (S1)"]);
        assert_eq!(table.rows[0], vec!["Rust", "3"]);

        let included = StaticSheetSource::default()
            .with_sheet("interviewer-sheet", "Python", roster)
            .with_sheet("dp-sheet", "Python", competencies);
        let table = interviewer_table(
            &included,
            &test_config(),
            "Data Platform",
            "Python",
            CohortFlags {
                consultant: true,
                ..CohortFlags::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(
            table.columns,
            vec![SKILL_COLUMN, "Ivanov I.I. (S1)", "cnslt - Orlova O.O. (M3)"]
        );
    }

    #[tokio::test]
    async fn test_interviewer_table_excluded_cohorts_stay_excluded() {
        // Rostered staffing and consultant interviewers with real sheet
        // columns: default flags must remove both for good, not replace them
        // with synthesized profiles stripped of their role markers.
        let source = StaticSheetSource::default()
            .with_sheet(
                "interviewer-sheet",
                "Python",
                grid(&[
                    &[EMPLOYEE_COLUMN, LEVEL_COLUMN],
                    &["Ivanov I.I.", "S1"],
                    &["Sidorov S.S.", "M1"],
                    &["Orlova O.O.", "M3"],
                ]),
            )
            .with_sheet(
                "dp-sheet",
                "Python",
                competency_grid(
                    &["Skill", "Ivanov I.I.", "staff - Sidorov S.S.", "cnslt - Orlova O.O."],
                    &[&["Rust", "3", "4", "5"]],
                ),
            );

        let table = interviewer_table(
            &source,
            &test_config(),
            "Data Platform",
            "Python",
            CohortFlags::default(),
        )
        .await
        .unwrap();

        assert_eq!(table.columns, vec![SKILL_COLUMN, "Ivanov I.I. (S1)"]);
        assert_eq!(table.rows[0], vec!["Rust", "3"]);
    }

    #[tokio::test]
    async fn test_interviewer_table_ambiguous_roster_is_rejected() {
        let source = StaticSheetSource::default()
            .with_sheet(
                "interviewer-sheet",
                "Python",
                grid(&[
                    &[EMPLOYEE_COLUMN, LEVEL_COLUMN],
                    &["Ivanov", "S1"],
                    &["Ivan", "J1"],
                ]),
            )
            .with_sheet(
                "dp-sheet",
                "Python",
                competency_grid(&["Skill", "Ivanov I.I."], &[&["Rust", "3"]]),
            );

        let err = interviewer_table(
            &source,
            &test_config(),
            "Data Platform",
            "Python",
            CohortFlags::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Merge(_)));
    }
}

//! Annotation merging — enriches an interviewer competency table with the
//! roster.
//!
//! Three passes: keep only columns backed by a roster entry, append each
//! interviewer's seniority code to their header, and synthesize a
//! majority-vote competency column for roster interviewers missing from the
//! sheet. The ranking prompt relies on the `(code)` suffix to weigh grades.

use thiserror::Error;
use tracing::{debug, warn};

use crate::table::markers::{contains_name, strip_consultant_prefix};
use crate::table::roster::RosterEntry;
use crate::table::CompetencyTable;

#[derive(Debug, Error)]
pub enum MergeError {
    /// A column survived roster filtering but no roster entry matches it.
    #[error("no roster entry matches column '{column}'")]
    NoRosterMatch { column: String },

    /// More than one roster entry matches a column header. Picking the first
    /// silently would annotate the wrong level, so this is rejected.
    #[error("column '{column}' matches multiple roster entries: {matches:?}")]
    AmbiguousRosterMatch {
        column: String,
        matches: Vec<String>,
    },
}

/// Keeps the skill column plus every entity column whose header contains a
/// roster entry's name. An interviewer pool is the intersection of "has a
/// competency record" and "is a listed interviewer".
pub fn retain_rostered_columns(table: &mut CompetencyTable, roster: &[RosterEntry]) {
    let to_drop: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, header)| !roster.iter().any(|entry| contains_name(header, &entry.name)))
        .map(|(i, _)| i)
        .collect();
    if !to_drop.is_empty() {
        debug!(dropped = to_drop.len(), "dropped non-rostered columns");
    }
    table.drop_columns(&to_drop);
}

/// Appends each surviving interviewer's level code to their column header:
/// `"Ivanov I.I."` becomes `"Ivanov I.I. (S1)"`. A `cnslt - ` prefix is
/// stripped before matching against the roster. Exactly one roster match per
/// column is required; zero or multiple matches abort the merge.
pub fn annotate_levels(
    table: &mut CompetencyTable,
    roster: &[RosterEntry],
) -> Result<(), MergeError> {
    for header in table.columns.iter_mut().skip(1) {
        let bare = strip_consultant_prefix(header);
        let matches: Vec<&RosterEntry> = roster
            .iter()
            .filter(|entry| contains_name(bare, &entry.name))
            .collect();

        let entry = match matches.as_slice() {
            [one] => one,
            [] => {
                return Err(MergeError::NoRosterMatch {
                    column: header.clone(),
                })
            }
            many => {
                return Err(MergeError::AmbiguousRosterMatch {
                    column: header.clone(),
                    matches: many.iter().map(|e| e.name.clone()).collect(),
                })
            }
        };

        *header = format!("{} ({})", header, entry.level);
    }
    Ok(())
}

/// Adds a synthesized competency column for every roster entry with no
/// column in the source sheet: each cell is the majority vote across the
/// existing entity cells of that row, with emptiness voting as its own
/// category. All synthesized columns vote over the same pre-existing column
/// set.
///
/// `sheet_headers` is the entity column set as it stood before cohort
/// filtering. An interviewer whose column the cohort filter dropped is still
/// present in the sheet — synthesizing them back in would undo the
/// exclusion, so presence is judged against `sheet_headers`, not against the
/// filtered table.
pub fn synthesize_missing(
    table: &mut CompetencyTable,
    roster: &[RosterEntry],
    sheet_headers: &[String],
) {
    let existing = table.columns.len();

    let missing: Vec<&RosterEntry> = roster
        .iter()
        .filter(|entry| {
            !sheet_headers
                .iter()
                .any(|header| contains_name(header, &entry.name))
        })
        .collect();

    for entry in missing {
        warn!(
            interviewer = %entry.name,
            "no competency record, synthesizing majority-vote profile"
        );
        let cells: Vec<String> = table
            .rows
            .iter()
            .map(|row| majority_vote(&row[1..existing]))
            .collect();
        table.push_column(format!("{} ({})", entry.name, entry.level), cells);
    }
}

/// Most frequent value; ties resolve to the first-encountered value in
/// column order. An empty slice yields an empty cell.
fn majority_vote(values: &[String]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value.as_str()) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }
    // strict > so that on a tie the first-encountered value stands
    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, n)| count > n) {
            best = Some((value, count));
        }
    }
    best.map(|(v, _)| v.to_string()).unwrap_or_default()
}

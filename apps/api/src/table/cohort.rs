//! Cohort filtering — includes or excludes role categories by column header.
//!
//! Candidate and interviewer pools have opposite rules for the same markers:
//! consultants never show up as candidates but may be opted into interviewer
//! pools; staffing and laboratory are opt-in for candidates and never
//! interview. Only columns are affected, rows never.

use serde::Deserialize;
use tracing::debug;

use crate::table::markers::{self, header_has_marker};
use crate::table::CompetencyTable;

/// Cohort inclusion flags as supplied by the caller. Every flag defaults to
/// excluded — the conservative pool.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CohortFlags {
    #[serde(default)]
    pub staffing: bool,
    #[serde(default)]
    pub laboratory: bool,
    #[serde(default)]
    pub consultant: bool,
}

/// Which side of the process the pool is built for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CohortPolicy {
    /// Consultants are always excluded; staffing and laboratory are opt-in.
    Candidates,
    /// Staffing and laboratory never interview; consultants are opt-in.
    Interviewers,
}

impl CohortPolicy {
    /// Markers whose columns must be dropped under this policy and flag set.
    fn excluded_markers(self, flags: CohortFlags) -> Vec<&'static str> {
        let mut excluded = Vec::new();
        match self {
            CohortPolicy::Candidates => {
                excluded.push(markers::CONSULTANT);
                if !flags.staffing {
                    excluded.push(markers::STAFFING);
                }
                if !flags.laboratory {
                    excluded.push(markers::LABORATORY);
                }
            }
            CohortPolicy::Interviewers => {
                excluded.push(markers::STAFFING);
                excluded.push(markers::LABORATORY);
                if !flags.consultant {
                    excluded.push(markers::CONSULTANT);
                }
            }
        }
        excluded
    }
}

/// Drops every entity column whose header matches a disabled cohort marker.
/// A column matching several excluded markers is removed once; zero matches
/// is a valid no-op.
pub fn apply(table: &mut CompetencyTable, policy: CohortPolicy, flags: CohortFlags) {
    let excluded = policy.excluded_markers(flags);
    let to_drop: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, header)| excluded.iter().any(|m| header_has_marker(header, m)))
        .map(|(i, _)| i)
        .collect();

    if !to_drop.is_empty() {
        debug!(policy = ?policy, dropped = to_drop.len(), "cohort filter dropped columns");
    }
    table.drop_columns(&to_drop);
}

//! Interviewer roster — the secondary sheet mapping interviewer names to
//! seniority levels.

use serde::Serialize;
use thiserror::Error;

use crate::table::Grid;

/// Header of the interviewer-name column in the roster sheet.
pub const EMPLOYEE_COLUMN: &str = "Сотрудник";
/// Header of the seniority-level column in the roster sheet.
pub const LEVEL_COLUMN: &str = "Уровень";

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("roster sheet is missing the '{0}' column")]
    MissingColumn(&'static str),
}

/// Seniority grades the ranking prompt explains to the model. Higher digit
/// within a grade means more competent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Seniority {
    J1,
    J2,
    J3,
    M1,
    M2,
    M3,
    S1,
    S2,
}

impl Seniority {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "J1" => Some(Seniority::J1),
            "J2" => Some(Seniority::J2),
            "J3" => Some(Seniority::J3),
            "M1" => Some(Seniority::M1),
            "M2" => Some(Seniority::M2),
            "M3" => Some(Seniority::M3),
            "S1" => Some(Seniority::S1),
            "S2" => Some(Seniority::S2),
            _ => None,
        }
    }
}

/// One interviewer from the roster sheet. The level is kept as the raw cell
/// text — the roster is externally owned and occasionally carries codes
/// outside the known vocabulary; they are passed through to the prompt
/// verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    pub name: String,
    pub level: String,
}

impl RosterEntry {
    pub fn seniority(&self) -> Option<Seniority> {
        Seniority::from_code(&self.level)
    }
}

/// Parses a roster grid: the row at `header_offset` names the columns, all
/// rows below it are entries. Entries with a blank name are dropped.
pub fn parse_roster(grid: &Grid, header_offset: usize) -> Result<Vec<RosterEntry>, RosterError> {
    let Some(header) = grid.get(header_offset) else {
        return Ok(vec![]);
    };

    let name_idx = find_column(header, EMPLOYEE_COLUMN)
        .ok_or(RosterError::MissingColumn(EMPLOYEE_COLUMN))?;
    let level_idx =
        find_column(header, LEVEL_COLUMN).ok_or(RosterError::MissingColumn(LEVEL_COLUMN))?;

    Ok(grid[header_offset + 1..]
        .iter()
        .filter_map(|row| {
            let name = row.get(name_idx)?.trim();
            if name.is_empty() {
                return None;
            }
            Some(RosterEntry {
                name: name.to_string(),
                level: row.get(level_idx).map(|s| s.trim().to_string()).unwrap_or_default(),
            })
        })
        .collect())
}

fn find_column(header: &[String], wanted: &str) -> Option<usize> {
    header.iter().position(|h| h.trim() == wanted)
}

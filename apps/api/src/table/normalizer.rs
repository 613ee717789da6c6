//! Table normalization — turns a raw spreadsheet export into a clean
//! competency table.
//!
//! Spreadsheet exports carry preamble rows above the real header (titles,
//! legends, merged cells), unlabeled columns ("Unnamed" after export), and
//! decorative rows with no skill label. All of that is stripped here; the
//! rest of the pipeline only ever sees the cleaned shape.

use tracing::debug;

use crate::table::{CompetencyTable, Grid, SKILL_COLUMN};

/// Marker a spreadsheet export puts on columns that had no header cell.
/// Matched case-sensitively: this is a literal sentinel, not a word.
const UNNAMED_SENTINEL: &str = "Unnamed";

/// Normalizes a raw grid into a [`CompetencyTable`].
///
/// `header_offset` is the row index of the column header row; everything
/// above it is preamble and everything below it is body. An offset beyond
/// the grid yields an empty table — "no data" is a value here, not a fault.
pub fn normalize(grid: &Grid, header_offset: usize) -> CompetencyTable {
    if header_offset >= grid.len() {
        debug!(
            header_offset,
            grid_rows = grid.len(),
            "header offset beyond grid, returning empty table"
        );
        return CompetencyTable::empty();
    }

    let header = &grid[header_offset];
    if header.is_empty() {
        return CompetencyTable::empty();
    }
    let width = header.len();

    // First column becomes the fixed skill label no matter what the sheet
    // called it; surviving columns keep their header text verbatim.
    let mut keep: Vec<usize> = vec![0];
    let mut columns: Vec<String> = vec![SKILL_COLUMN.to_string()];
    for (i, name) in header.iter().enumerate().skip(1) {
        if name.contains(UNNAMED_SENTINEL) {
            continue;
        }
        keep.push(i);
        columns.push(name.clone());
    }

    let rows: Vec<Vec<String>> = grid[header_offset + 1..]
        .iter()
        .filter(|row| {
            // A row without a skill label (missing or blank cell) carries
            // nothing rankable.
            row.first().map(|s| !s.trim().is_empty()).unwrap_or(false)
        })
        .map(|row| {
            keep.iter()
                .map(|&i| row.get(i).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    debug!(
        columns = columns.len(),
        rows = rows.len(),
        dropped_columns = width - keep.len(),
        "normalized grid"
    );

    CompetencyTable { columns, rows }
}

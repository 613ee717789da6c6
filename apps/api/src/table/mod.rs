//! Competency table core — the tabular model shared by every pipeline stage.
//!
//! A `CompetencyTable` maps skills (rows) to entities (columns): column 0 is
//! always the fixed skill label, every other column is a candidate or
//! interviewer, and each cell holds a proficiency marker (or is empty).
//! Tables are transient — rebuilt from the source spreadsheet per request,
//! never persisted.

pub mod cohort;
pub mod markers;
pub mod merger;
pub mod normalizer;
pub mod roster;

use serde::{Deserialize, Serialize};

/// Fixed label of the skill column. The normalizer renames the first source
/// column to this regardless of its original header text.
pub const SKILL_COLUMN: &str = "Навык";

/// A raw rectangular (possibly ragged) cell grid, exactly as the spreadsheet
/// source returns it. Rows shorter than the header are padded on demand.
pub type Grid = Vec<Vec<String>>;

/// Skill rows × named entity columns. Row order is the source order and is
/// significant: it is presented to the ranking model in this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetencyTable {
    /// `columns[0]` is [`SKILL_COLUMN`]; the rest are entity names.
    pub columns: Vec<String>,
    /// Each row has exactly `columns.len()` cells; `row[0]` is the skill label.
    pub rows: Vec<Vec<String>>,
}

impl CompetencyTable {
    pub fn empty() -> Self {
        Self {
            columns: vec![SKILL_COLUMN.to_string()],
            rows: vec![],
        }
    }

    /// Entity column headers (everything after the skill column).
    pub fn entity_columns(&self) -> &[String] {
        &self.columns[1..]
    }

    /// A table with no rows or no entity columns carries no data. This is a
    /// valid value, not an error — callers decide whether to block on it.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.len() <= 1
    }

    /// Drops the entity columns at the given indices (indices into
    /// `self.columns`; index 0 is never dropped).
    pub fn drop_columns(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }
        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|i| *i == 0 || !indices.contains(i))
            .collect();
        self.columns = keep.iter().map(|&i| self.columns[i].clone()).collect();
        for row in &mut self.rows {
            *row = keep.iter().map(|&i| row[i].clone()).collect();
        }
    }

    /// Appends an entity column. `cells` must have one value per row.
    pub fn push_column(&mut self, header: String, cells: Vec<String>) {
        debug_assert_eq!(cells.len(), self.rows.len());
        self.columns.push(header);
        for (row, cell) in self.rows.iter_mut().zip(cells) {
            row.push(cell);
        }
    }

    /// Serializes the table as a pipe-delimited markdown table — the
    /// human-readable form embedded in the ranking prompt.
    pub fn to_markdown(&self) -> String {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(col.chars().count()))
                    .max()
                    .unwrap_or(0)
                    .max(3)
            })
            .collect();

        let mut out = String::new();
        out.push_str(&render_row(&self.columns, &widths));
        // separator cells carry no padding: `|:----|`, matching the width of
        // a padded data cell
        out.push('|');
        for width in &widths {
            out.push(':');
            out.push_str(&"-".repeat(width + 1));
            out.push('|');
        }
        out.push('\n');
        for row in &self.rows {
            out.push_str(&render_row(row, &widths));
        }
        out
    }
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width.saturating_sub(cell.chars().count());
        line.push_str(&format!(" {}{} |", cell, " ".repeat(pad)));
    }
    line.push('\n');
    line
}


#[cfg(test)]
mod tests {
    use super::test_support::table;
    use super::*;

    #[test]
    fn test_empty_table_has_only_skill_column() {
        let t = CompetencyTable::empty();
        assert!(t.is_empty());
        assert_eq!(t.columns, vec![SKILL_COLUMN.to_string()]);
    }

    #[test]
    fn test_is_empty_with_rows_but_no_entities() {
        let t = table(&[SKILL_COLUMN], &[&["Rust"]]);
        assert!(t.is_empty());
    }

    #[test]
    fn test_drop_columns_preserves_skill_column() {
        let mut t = table(
            &[SKILL_COLUMN, "A", "B", "C"],
            &[&["Rust", "3", "2", "1"], &["SQL", "", "4", "5"]],
        );
        t.drop_columns(&[0, 2]);
        assert_eq!(t.columns, vec![SKILL_COLUMN, "A", "C"]);
        assert_eq!(t.rows[0], vec!["Rust", "3", "1"]);
        assert_eq!(t.rows[1], vec!["SQL", "", "5"]);
    }

    #[test]
    fn test_push_column_extends_every_row() {
        let mut t = table(&[SKILL_COLUMN, "A"], &[&["Rust", "3"], &["SQL", "2"]]);
        t.push_column("B".to_string(), vec!["1".to_string(), "4".to_string()]);
        assert_eq!(t.columns, vec![SKILL_COLUMN, "A", "B"]);
        assert_eq!(t.rows[0], vec!["Rust", "3", "1"]);
    }

    #[test]
    fn test_to_markdown_round_trips_entity_names() {
        let t = table(&[SKILL_COLUMN, "Ivanov I.I."], &[&["Rust", "3"]]);
        let md = t.to_markdown();
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains(SKILL_COLUMN));
        assert!(lines[0].contains("Ivanov I.I."));
        assert!(lines[1].starts_with("|:"));
        assert!(lines[2].contains("Rust"));
    }

    #[test]
    fn test_to_markdown_separator_row_shape() {
        let t = table(&[SKILL_COLUMN, "A"], &[&["Rust", "3"]]);
        let md = t.to_markdown();
        let lines: Vec<&str> = md.lines().collect();
        let separator = lines[1];
        assert!(separator.chars().all(|c| matches!(c, '|' | ':' | '-')));
        // every line is the same width, separator included
        assert_eq!(lines[0].chars().count(), separator.chars().count());
        assert_eq!(lines[2].chars().count(), separator.chars().count());
    }
}

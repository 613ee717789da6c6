//! Role-marker matching policy.
//!
//! Cohort membership is encoded as short tokens embedded in column headers
//! ("Petrov (cnslt)", "staff - Sidorov"). Matching is a case-insensitive
//! substring search over a fixed vocabulary — kept behind this module so the
//! rule can change without touching normalization or filtering logic. Do not
//! reach for regex unless the vocabulary grows.

/// Consultant marker. Candidates can never be consultants.
pub const CONSULTANT: &str = "cnslt";
/// Staffing-pool marker.
pub const STAFFING: &str = "staff";
/// Laboratory marker.
pub const LABORATORY: &str = "laba";

/// True if the header carries the marker anywhere in its text.
pub fn header_has_marker(header: &str, marker: &str) -> bool {
    header.to_lowercase().contains(&marker.to_lowercase())
}

/// Consultant columns may be shaped `cnslt - <name>`; roster matching and
/// exclusion lists work on the bare name. Returns the header unchanged when
/// no consultant prefix is present.
pub fn strip_consultant_prefix(header: &str) -> &str {
    let trimmed = header.trim();
    match trimmed.get(..CONSULTANT.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(CONSULTANT) => trimmed[CONSULTANT.len()..]
            .trim_start_matches([' ', '-'])
            .trim(),
        _ => trimmed,
    }
}

/// Case-insensitive "needle appears in haystack" — the single place roster
/// names are matched against column headers.
pub fn contains_name(header: &str, name: &str) -> bool {
    header.to_lowercase().contains(&name.trim().to_lowercase())
}

// Report namer: deterministic, collision-free artifact names.
//
// Purpose
// - Build base names per kind and period, and pick the lowest letter suffix
//   (starting at 'a') not already used by an existing report.
//
// Boundaries
// - Pure functions only. The atomic check-and-reserve against the store lives
//   behind ReportStore::reserve_name, which calls next_name under its lock.

use thiserror::Error;

use crate::core::report::{Period, ReportKind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamingError {
    #[error("all suffixes 'a'..'z' are taken for '{base}'")]
    SuffixesExhausted { base: String },
}

/// Base name for a report run, without the suffix.
/// Examples: `timesheet_weekly_report_2025_11_07`, `timesheet_monthly_report_2025_11`.
pub fn report_base_name(kind: ReportKind, period: &Period) -> String {
    format!("{}_{}", kind.name_prefix(), period.name_fragment())
}

/// Base name for the invoice artifact of a month: `invoices_2025_11`.
pub fn invoice_base_name(year: i32, month: u32) -> String {
    format!("invoices_{year:04}_{month:02}")
}

/// Pick `{base}_{suffix}` with the lowest unused letter. Deterministic and
/// idempotent: the same base and the same existing names yield the same name.
pub fn next_name(base: &str, existing: &[String]) -> Result<String, NamingError> {
    let used: Vec<char> = existing
        .iter()
        .filter_map(|name| used_suffix(base, name))
        .collect();

    ('a'..='z')
        .find(|letter| !used.contains(letter))
        .map(|letter| format!("{base}_{letter}"))
        .ok_or_else(|| NamingError::SuffixesExhausted {
            base: base.to_string(),
        })
}

fn used_suffix(base: &str, name: &str) -> Option<char> {
    let rest = name.strip_prefix(base)?.strip_prefix('_')?;
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_lowercase() => Some(letter),
        _ => None,
    }
}

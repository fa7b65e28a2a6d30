// Report and period types.
//
// Purpose
// - ReportKind and Period describe one aggregation run; Report is the
//   immutable result persisted by the store.
//
// Notes
// - A weekly period covers the 1st of the month through the as-of date, so
//   the month-scoped consistency rule always sees the containing month.
// - A monthly period covers the full calendar month.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::event::ValidatedEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Weekly,
    Monthly,
}

impl ReportKind {
    /// Stable prefix used for report names and persistence.
    pub fn name_prefix(self) -> &'static str {
        match self {
            ReportKind::Weekly => "timesheet_weekly_report",
            ReportKind::Monthly => "timesheet_monthly_report",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Period {
    /// 1st of the as-of date's month through the as-of date.
    Weekly { as_of: NaiveDate },
    /// A full calendar month.
    Monthly { year: i32, month: u32 },
}

impl Period {
    /// The containing month as (year, month).
    pub fn month(&self) -> (i32, u32) {
        match self {
            Period::Weekly { as_of } => (as_of.year(), as_of.month()),
            Period::Monthly { year, month } => (*year, *month),
        }
    }

    /// Inclusive date range the period covers.
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        match self {
            Period::Weekly { as_of } => (as_of.with_day(1).unwrap_or(*as_of), *as_of),
            Period::Monthly { year, month } => {
                let first = NaiveDate::from_ymd_opt(*year, *month, 1)
                    .unwrap_or_else(|| NaiveDate::from_ymd_opt(*year, 1, 1).unwrap());
                let last = last_day_of_month(*year, *month);
                (first, last)
            }
        }
    }

    /// Date fragment used in report names: YYYY_MM_DD for weekly periods,
    /// YYYY_MM for monthly ones.
    pub fn name_fragment(&self) -> String {
        match self {
            Period::Weekly { as_of } => as_of.format("%Y_%m_%d").to_string(),
            Period::Monthly { year, month } => format!("{year:04}_{month:02}"),
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 1).unwrap())
}

/// One aggregation run: generated name, creation timestamp and the ordered
/// validated events it covers. Immutable after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub kind: ReportKind,
    pub period: Period,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub events: Vec<ValidatedEvent>,
}

impl Report {
    pub fn accepted_events(&self) -> impl Iterator<Item = &ValidatedEvent> {
        self.events.iter().filter(|event| event.is_accepted())
    }

    pub fn conflict_count(&self) -> usize {
        self.events.iter().filter(|event| !event.is_accepted()).count()
    }
}

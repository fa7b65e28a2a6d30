// Ports define what the pipeline needs from the outside world, without
// implementing it.
//
// Purpose
// - CalendarSource: the fetch collaborator harvesting "XXX TIME CARD"
//   calendars for a date range.
// - ReportStore: persistence for reports and their events, including the
//   atomic check-and-reserve used by the report namer.
// - BillingPolicy: per-project hourly rates for invoice amounts.
//
// Boundaries
// - No concrete input or output here. Adapters implement these traits.
//
// Testing guidance
// - In-memory implementations live in adapters/in_memory.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::core::event::RawEvent;
use crate::core::naming::NamingError;
use crate::core::report::Report;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("calendar backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error("report not found: {0}")]
    NotFound(Uuid),

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Fetch raw events for the inclusive date range, already ordered by
    /// start timestamp.
    async fn fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawEvent>, FetchError>;
}

#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Atomically pick and reserve the next unused name for `base`.
    /// Two concurrent reservations must never return the same name.
    async fn reserve_name(&self, base: &str) -> Result<String, StoreError>;

    async fn save(&self, report: &Report) -> Result<(), StoreError>;

    async fn load(&self, id: Uuid) -> Result<Report, StoreError>;

    /// (project name, project id) pairs of accepted events persisted for the
    /// given month, for the month-scoped consistency rule.
    async fn month_project_pairs(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<(String, String)>, StoreError>;
}

/// Rate lookup for invoice amounts. Rates live outside the pipeline; a
/// project without a rate yields a line without an amount.
pub trait BillingPolicy: Send + Sync {
    fn hourly_rate(&self, project_id: &str) -> Option<f64>;
}

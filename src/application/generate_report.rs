// Report generation handler orchestrates one aggregation run.
//
// Responsibilities
// - Fetch raw events for the period (or accept an already-fetched batch).
// - Run the pipeline: parse, stages 1-2, month-scoped consistency.
// - Reserve the report name atomically, persist the report, return it.
//
// Boundaries
// - All rules live in core; this handler only sequences them and talks to
//   the ports. Deterministic given the same batch and store snapshot, aside
//   from the generated id/timestamp and the name reservation.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::application::errors::RunError;
use crate::core::event::RawEvent;
use crate::core::ports::{CalendarSource, ReportStore};
use crate::core::report::{Period, Report, ReportKind};
use crate::core::{consistency, naming, parser, validation};

pub struct GenerateReportHandler<Source, Store>
where
    Source: CalendarSource,
    Store: ReportStore,
{
    source: Arc<Source>,
    store: Arc<Store>,
}

impl<Source, Store> GenerateReportHandler<Source, Store>
where
    Source: CalendarSource,
    Store: ReportStore,
{
    pub fn new(source: Arc<Source>, store: Arc<Store>) -> Self {
        Self { source, store }
    }

    /// Fetch the period's events from the calendar source and generate.
    pub async fn run(&self, kind: ReportKind, period: Period) -> Result<Report, RunError> {
        let (start, end) = period.date_range();
        let raw_events = self.source.fetch(start, end).await?;
        tracing::info!(count = raw_events.len(), %start, %end, "fetched calendar events");
        self.generate(kind, period, raw_events).await
    }

    /// Generate a report from an already-fetched, already-ordered batch.
    pub async fn generate(
        &self,
        kind: ReportKind,
        period: Period,
        raw_events: Vec<RawEvent>,
    ) -> Result<Report, RunError> {
        match (kind, period) {
            (ReportKind::Weekly, Period::Weekly { .. }) => {}
            (ReportKind::Monthly, Period::Monthly { .. }) => {}
            _ => return Err(RunError::KindPeriodMismatch { kind, period }),
        }
        if raw_events.is_empty() {
            return Err(RunError::NoEvents);
        }

        let staged: Vec<_> = raw_events
            .into_iter()
            .map(parser::parse)
            .map(|event| {
                let outcome = validation::run_stages(&event);
                (event, outcome)
            })
            .collect();

        // Consistency is month-scoped: weekly runs validate against the
        // containing month's already-persisted accepted pairs.
        let (year, month) = period.month();
        let prior_pairs = self.store.month_project_pairs(year, month).await?;
        let events = consistency::resolve(staged, &prior_pairs);

        let accepted = events.iter().filter(|event| event.is_accepted()).count();
        let conflicts = events.len() - accepted;

        let base = naming::report_base_name(kind, &period);
        let name = self.store.reserve_name(&base).await?;

        let report = Report {
            id: Uuid::now_v7(),
            kind,
            period,
            name,
            created_at: Utc::now(),
            events,
        };
        self.store.save(&report).await?;

        tracing::info!(
            report = %report.name,
            accepted,
            conflicts,
            "report generated"
        );
        Ok(report)
    }
}

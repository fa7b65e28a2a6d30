// In memory implementation of the ReportStore port.
//
// Purpose
// - Support handler tests and local development without a database.
//
// Responsibilities
// - Keep reports in memory, keyed by id.
// - Serialize name allocation: next_name runs under the same lock that
//   records the reservation, so concurrent runs can never share a name.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::naming;
use crate::core::ports::{ReportStore, StoreError};
use crate::core::report::Report;

#[derive(Default)]
struct Inner {
    reports: HashMap<Uuid, Report>,
    reserved_names: Vec<String>,
}

#[derive(Default)]
pub struct InMemoryReportStore {
    inner: Mutex<Inner>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn report_count(&self) -> usize {
        self.inner.lock().await.reports.len()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn reserve_name(&self, base: &str) -> Result<String, StoreError> {
        let mut guard = self.inner.lock().await;
        let name = naming::next_name(base, &guard.reserved_names)?;
        guard.reserved_names.push(name.clone());
        Ok(name)
    }

    async fn save(&self, report: &Report) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().await;
        if !guard.reserved_names.contains(&report.name) {
            guard.reserved_names.push(report.name.clone());
        }
        guard.reports.insert(report.id, report.clone());
        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<Report, StoreError> {
        let guard = self.inner.lock().await;
        guard
            .reports
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn month_project_pairs(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<(String, String)>, StoreError> {
        let guard = self.inner.lock().await;
        let mut pairs = Vec::new();
        for report in guard.reports.values() {
            if report.period.month() != (year, month) {
                continue;
            }
            for validated in report.accepted_events() {
                if let Some(id) = &validated.event.project_id {
                    pairs.push((validated.event.project_name.clone(), id.clone()));
                }
            }
        }
        Ok(pairs)
    }
}

// Invoice generation handler: billable line items from a monthly report.
//
// Responsibilities
// - Aggregate the report's accepted events, derive one line per project, and
//   apply the injected billing policy for amounts.
// - Reserve the invoice artifact name atomically against the store.

use std::sync::Arc;

use crate::application::errors::RunError;
use crate::core::invoice::{self, InvoiceLine};
use crate::core::ports::{BillingPolicy, ReportStore};
use crate::core::report::{Report, ReportKind};
use crate::core::{aggregate, naming};

/// Result of one invoice run: the reserved artifact name and the lines.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceRun {
    pub artifact_name: String,
    pub lines: Vec<InvoiceLine>,
}

pub struct GenerateInvoicesHandler<Store, Policy>
where
    Store: ReportStore,
    Policy: BillingPolicy,
{
    store: Arc<Store>,
    policy: Arc<Policy>,
}

impl<Store, Policy> GenerateInvoicesHandler<Store, Policy>
where
    Store: ReportStore,
    Policy: BillingPolicy,
{
    pub fn new(store: Arc<Store>, policy: Arc<Policy>) -> Self {
        Self { store, policy }
    }

    pub async fn generate(&self, report: &Report) -> Result<InvoiceRun, RunError> {
        if report.kind != ReportKind::Monthly {
            return Err(RunError::NotMonthly(report.kind));
        }

        let aggregation = aggregate::aggregate(report.kind, &report.events);
        let lines = invoice::generate_lines(&aggregation.rows, |project_id| {
            self.policy.hourly_rate(project_id)
        });

        // A single project without a rate is tolerable; a policy that knows
        // none of the projects is a run-level failure.
        if !lines.is_empty() && lines.iter().all(|line| line.amount.is_none()) {
            return Err(RunError::NoRates);
        }

        let (year, month) = report.period.month();
        let artifact_name = self
            .store
            .reserve_name(&naming::invoice_base_name(year, month))
            .await?;

        tracing::info!(
            artifact = %artifact_name,
            projects = lines.len(),
            "invoices generated"
        );
        Ok(InvoiceRun {
            artifact_name,
            lines,
        })
    }
}

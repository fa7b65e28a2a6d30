use thiserror::Error;

use crate::core::ports::{FetchError, StoreError};
use crate::core::report::{Period, ReportKind};

/// Run-level failures. Per-event rejections are not errors; they ride along
/// inside the report as conflicts. A report that is empty because nothing
/// validated is a successful run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("no events fetched for the period")]
    NoEvents,

    #[error("no billing rate found for any project in the report")]
    NoRates,

    #[error("invoices require a monthly report, got {0:?}")]
    NotMonthly(ReportKind),

    #[error("report kind {kind:?} does not match period {period:?}")]
    KindPeriodMismatch { kind: ReportKind, period: Period },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

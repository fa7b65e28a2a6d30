// HTTP surface for the pipeline.
//
// Responsibilities
// - Expose report generation, invoice generation and a health probe.
// - Translate transport shapes to core types and RunError to status codes.
//
// Boundaries
// - No rules here. Handlers sequence the application layer only.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use tower_http::trace::TraceLayer;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::adapters::in_memory::in_memory_billing::FixedRateBilling;
use crate::adapters::in_memory::in_memory_calendar::InMemoryCalendarSource;
use crate::adapters::in_memory::in_memory_report_store::InMemoryReportStore;
use crate::application::errors::RunError;
use crate::application::generate_invoices::GenerateInvoicesHandler;
use crate::application::generate_report::GenerateReportHandler;
use crate::core::aggregate;
use crate::core::codes;
use crate::core::ports::{ReportStore, StoreError};
use crate::core::report::{Period, Report, ReportKind};

pub type ReportHandler = GenerateReportHandler<InMemoryCalendarSource, InMemoryReportStore>;
pub type InvoiceHandler = GenerateInvoicesHandler<InMemoryReportStore, FixedRateBilling>;

#[derive(Clone)]
pub struct AppState {
    pub report_handler: Arc<ReportHandler>,
    pub invoice_handler: Arc<InvoiceHandler>,
    pub store: Arc<InMemoryReportStore>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/reports/weekly", post(generate_weekly))
        .route("/v1/reports/monthly", post(generate_monthly))
        .route("/v1/invoices/generate", post(generate_invoices))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<RunError> for ApiError {
    fn from(error: RunError) -> Self {
        let status = match &error {
            RunError::NoEvents
            | RunError::NoRates
            | RunError::NotMonthly(_)
            | RunError::KindPeriodMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            RunError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            RunError::Fetch(_) | RunError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

#[derive(Debug, Deserialize)]
struct WeeklyRequest {
    /// As-of date; the report covers the 1st of its month through this day.
    date: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct MonthlyRequest {
    /// Target month in YYYY-MM form.
    month: String,
}

#[derive(Debug, Deserialize)]
struct InvoiceRequest {
    report_id: Uuid,
}

#[derive(Debug, Serialize)]
struct ConflictDto {
    employee_id: String,
    project: String,
    date: Option<NaiveDate>,
    verdict: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct ReportResponse {
    id: Uuid,
    name: String,
    kind: ReportKind,
    accepted_count: usize,
    conflict_count: usize,
    total_hours: f64,
    conflicts: Vec<ConflictDto>,
}

impl ReportResponse {
    fn from_report(report: &Report) -> Self {
        let aggregation = aggregate::aggregate(report.kind, &report.events);
        Self {
            id: report.id,
            name: report.name.clone(),
            kind: report.kind,
            accepted_count: report.events.len() - report.conflict_count(),
            conflict_count: report.conflict_count(),
            total_hours: aggregation.grand_total.num_seconds() as f64 / 3600.0,
            conflicts: aggregation
                .conflicts
                .into_iter()
                .map(|conflict| ConflictDto {
                    employee_id: conflict.employee_id,
                    project: conflict.project_label,
                    date: conflict.date,
                    verdict: conflict.verdict,
                    message: conflict.message,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct BreakdownDto {
    task: String,
    task_description: Option<&'static str>,
    phase: String,
    phase_description: Option<&'static str>,
    hours: f64,
}

#[derive(Debug, Serialize)]
struct InvoiceLineDto {
    project_id: String,
    project_name: String,
    hours: f64,
    amount: Option<f64>,
    breakdown: Vec<BreakdownDto>,
}

#[derive(Debug, Serialize)]
struct InvoiceResponse {
    artifact_name: String,
    lines: Vec<InvoiceLineDto>,
}

async fn generate_weekly(
    State(state): State<AppState>,
    Json(request): Json<WeeklyRequest>,
) -> Result<Json<ReportResponse>, ApiError> {
    let period = Period::Weekly {
        as_of: request.date,
    };
    let report = state
        .report_handler
        .run(ReportKind::Weekly, period)
        .await?;
    Ok(Json(ReportResponse::from_report(&report)))
}

async fn generate_monthly(
    State(state): State<AppState>,
    Json(request): Json<MonthlyRequest>,
) -> Result<Json<ReportResponse>, ApiError> {
    let (year, month) = parse_month(&request.month)?;
    let period = Period::Monthly { year, month };
    let report = state
        .report_handler
        .run(ReportKind::Monthly, period)
        .await?;
    Ok(Json(ReportResponse::from_report(&report)))
}

async fn generate_invoices(
    State(state): State<AppState>,
    Json(request): Json<InvoiceRequest>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let report = state
        .store
        .load(request.report_id)
        .await
        .map_err(RunError::from)?;
    let run = state.invoice_handler.generate(&report).await?;
    Ok(Json(InvoiceResponse {
        artifact_name: run.artifact_name,
        lines: run
            .lines
            .into_iter()
            .map(|line| InvoiceLineDto {
                hours: line.hours(),
                breakdown: line
                    .breakdown
                    .into_iter()
                    .map(|entry| BreakdownDto {
                        hours: entry.total.num_seconds() as f64 / 3600.0,
                        task_description: codes::task_description(&entry.task),
                        phase_description: codes::phase_description(&entry.phase),
                        task: entry.task,
                        phase: entry.phase,
                    })
                    .collect(),
                project_id: line.project_id,
                project_name: line.project_name,
                amount: line.amount,
            })
            .collect(),
    }))
}

fn parse_month(value: &str) -> Result<(i32, u32), ApiError> {
    let parsed = value
        .split_once('-')
        .and_then(|(year, month)| Some((year.parse::<i32>().ok()?, month.parse::<u32>().ok()?)))
        .filter(|(_, month)| (1..=12).contains(month));
    parsed.ok_or_else(|| ApiError::bad_request("expected month in YYYY-MM form"))
}

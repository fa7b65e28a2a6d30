use std::sync::Arc;

use timesheets::adapters::in_memory::in_memory_billing::FixedRateBilling;
use timesheets::adapters::in_memory::in_memory_calendar::InMemoryCalendarSource;
use timesheets::adapters::in_memory::in_memory_report_store::InMemoryReportStore;
use timesheets::application::generate_invoices::GenerateInvoicesHandler;
use timesheets::application::generate_report::GenerateReportHandler;
use timesheets::shell::config::Config;
use timesheets::shell::http::{self, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let addr = config.bind_addr()?;

    let calendar = Arc::new(InMemoryCalendarSource::default());
    let store = Arc::new(InMemoryReportStore::default());
    let billing = Arc::new(FixedRateBilling::default());

    let state = AppState {
        report_handler: Arc::new(GenerateReportHandler::new(calendar, Arc::clone(&store))),
        invoice_handler: Arc::new(GenerateInvoicesHandler::new(Arc::clone(&store), billing)),
        store,
    };

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, http::router(state)).await?;

    Ok(())
}

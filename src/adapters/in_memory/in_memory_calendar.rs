// In memory implementation of the CalendarSource port.
//
// Purpose
// - Serve a canned batch of raw events for tests and local development,
//   filtered to the requested date range like the remote service would.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::event::RawEvent;
use crate::core::ports::{CalendarSource, FetchError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryCalendarSource {
    events: Vec<RawEvent>,
}

impl InMemoryCalendarSource {
    pub fn new(events: Vec<RawEvent>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl CalendarSource for InMemoryCalendarSource {
    async fn fetch(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawEvent>, FetchError> {
        let mut batch: Vec<RawEvent> = self
            .events
            .iter()
            .filter(|event| match event.start {
                // Undated events pass through; the validator deals with them.
                None => true,
                Some(ts) => {
                    let date = ts.date_naive();
                    start <= date && date <= end
                }
            })
            .cloned()
            .collect();
        batch.sort_by_key(|event| event.start);
        Ok(batch)
    }
}

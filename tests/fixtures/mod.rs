use chrono::{DateTime, TimeZone, Utc};
use timesheets::core::event::RawEvent;

/// Builder for raw calendar events. Defaults to a valid regular-project
/// entry so tests only state what they care about.
#[derive(Debug, Clone)]
pub struct RawEventBuilder {
    subject: String,
    body: String,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    employee_id: String,
}

impl RawEventBuilder {
    pub fn new() -> Self {
        Self {
            subject: "Riverside Tower: P100".into(),
            body: "WID: W-1\nTask: DP\nPhase: DD".into(),
            start: Some(Utc.with_ymd_and_hms(2025, 11, 3, 9, 0, 0).unwrap()),
            end: Some(Utc.with_ymd_and_hms(2025, 11, 3, 17, 0, 0).unwrap()),
            employee_id: "JVH".into(),
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn on_day(mut self, year: i32, month: u32, day: u32, hours: u32) -> Self {
        self.start = Some(Utc.with_ymd_and_hms(year, month, day, 9, 0, 0).unwrap());
        self.end = Some(Utc.with_ymd_and_hms(year, month, day, 9 + hours, 0, 0).unwrap());
        self
    }

    pub fn employee(mut self, employee_id: impl Into<String>) -> Self {
        self.employee_id = employee_id.into();
        self
    }

    pub fn build(self) -> RawEvent {
        RawEvent {
            subject: self.subject,
            body: self.body,
            start: self.start,
            end: self.end,
            employee_id: self.employee_id,
        }
    }
}

// Domain records flowing through the pipeline.
//
// Purpose
// - RawEvent: the source record handed over by the calendar fetch collaborator.
// - ParsedEvent: structured fields extracted from a raw event. Created once by
//   the parser and never mutated; the validator attaches a verdict alongside.
// - Verdict: per-event accept/reject outcome with a human-readable message.
// - ValidatedEvent: the unit the aggregator consumes.
//
// Boundaries
// - Data only. Parsing lives in core::parser, rules in core::validation.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Source calendar event, owned by the fetch collaborator and passed by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub subject: String,
    pub body: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    /// Employee initials taken from the "XXX TIME CARD" calendar name.
    pub employee_id: String,
}

/// Structured fields extracted from one RawEvent. Absent or malformed source
/// fields are `None`; classifying them as errors is the validator's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEvent {
    pub project_name: String,
    pub project_id: Option<String>,
    pub task: Option<String>,
    pub phase: Option<String>,
    pub wid: Option<String>,
    pub employee_id: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl ParsedEvent {
    /// End minus start. Zero when either timestamp is missing.
    pub fn duration(&self) -> TimeDelta {
        match (self.start, self.end) {
            (Some(start), Some(end)) => end - start,
            _ => TimeDelta::zero(),
        }
    }

    pub fn hours(&self) -> f64 {
        self.duration().num_seconds() as f64 / 3600.0
    }

    pub fn event_date(&self) -> Option<NaiveDate> {
        self.start.map(|ts| ts.date_naive())
    }

    /// Display label: "Name: Id" for projects with an id, bare name otherwise.
    pub fn project_label(&self) -> String {
        match &self.project_id {
            Some(id) => format!("{}: {}", self.project_name, id),
            None => self.project_name.clone(),
        }
    }

    /// Key used for the month-scoped consistency rule.
    pub fn project_name_key(&self) -> String {
        self.project_name.trim().to_lowercase()
    }
}

/// Validation outcome attached per event. Immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "message")]
pub enum Verdict {
    Accepted,
    RejectedMissingField(String),
    RejectedInvalidCode(String),
    RejectedInconsistentProject(String),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Verdict::Accepted => None,
            Verdict::RejectedMissingField(msg)
            | Verdict::RejectedInvalidCode(msg)
            | Verdict::RejectedInconsistentProject(msg) => Some(msg),
        }
    }

    /// Stable label for persistence and logging.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Accepted => "accepted",
            Verdict::RejectedMissingField(_) => "missing_field",
            Verdict::RejectedInvalidCode(_) => "invalid_code",
            Verdict::RejectedInconsistentProject(_) => "inconsistent_project",
        }
    }
}

/// A parsed event plus its verdict. Only accepted events contribute to
/// aggregates; rejected ones are retained for the conflict report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedEvent {
    pub event: ParsedEvent,
    pub verdict: Verdict,
}

impl ValidatedEvent {
    pub fn is_accepted(&self) -> bool {
        self.verdict.is_accepted()
    }
}

// Aggregator: rolls validated events into summary and detail views.
//
// Purpose
// - Summary rows per (project, employee, task, phase) with summed durations,
//   plus totals by project, by employee, and a grand total (the pivot table).
// - Detail rows, one per accepted event, original timestamps preserved.
//   Monthly aggregations carry the detail view twice: independent "view" and
//   "edit" presentation copies for the two consumer workflows.
// - Conflicts: rejected events with verdict and message, ordered for the
//   notification output (employee, then project, then date).
//
// Invariant
// - Only accepted events enter sums; duration is neither lost nor counted
//   twice. Everything here is recomputable from the validated events.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::event::{ValidatedEvent, Verdict};
use crate::core::report::ReportKind;

/// Project identity within an aggregate. Non-project events (Office,
/// Vacation, ...) have no id; their name stands in as the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectKey {
    pub name: String,
    pub id: Option<String>,
}

impl ProjectKey {
    pub fn label(&self) -> String {
        match &self.id {
            Some(id) => format!("{}: {}", self.name, id),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRow {
    pub project: ProjectKey,
    pub employee_id: String,
    pub task: String,
    pub phase: String,
    pub total: TimeDelta,
}

impl AggregateRow {
    pub fn hours(&self) -> f64 {
        self.total.num_seconds() as f64 / 3600.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTotal {
    pub project: ProjectKey,
    pub total: TimeDelta,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeTotal {
    pub employee_id: String,
    pub total: TimeDelta,
}

/// One audit-trail row per accepted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub project: ProjectKey,
    pub date: Option<NaiveDate>,
    pub employee_id: String,
    pub task: String,
    pub phase: String,
    pub wid: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub duration: TimeDelta,
}

impl DetailRow {
    pub fn hours(&self) -> f64 {
        self.duration.num_seconds() as f64 / 3600.0
    }
}

/// A rejected event surfaced for the notification output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub employee_id: String,
    pub project_label: String,
    pub date: Option<NaiveDate>,
    pub verdict: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub rows: Vec<AggregateRow>,
    pub project_totals: Vec<ProjectTotal>,
    pub employee_totals: Vec<EmployeeTotal>,
    pub grand_total: TimeDelta,
    pub detail_view: Vec<DetailRow>,
    /// Second, independent detail copy; present on monthly aggregations only.
    pub detail_edit: Option<Vec<DetailRow>>,
    pub conflicts: Vec<Conflict>,
    /// Employees that reported events and had every one accepted.
    pub employees_without_conflicts: Vec<String>,
}

pub fn aggregate(kind: ReportKind, events: &[ValidatedEvent]) -> Aggregation {
    let mut sums: BTreeMap<(String, String, String, String), AggregateRow> = BTreeMap::new();
    let mut detail_view = Vec::new();
    let mut conflicts = Vec::new();
    let mut employees: BTreeMap<String, bool> = BTreeMap::new();

    for validated in events {
        let event = &validated.event;
        let clean = employees.entry(event.employee_id.clone()).or_insert(true);

        match &validated.verdict {
            Verdict::Accepted => {
                let project = ProjectKey {
                    name: event.project_name.clone(),
                    id: event.project_id.clone(),
                };
                let task = event.task.clone().unwrap_or_default();
                let phase = event.phase.clone().unwrap_or_default();

                let key = (
                    project.label().to_lowercase(),
                    event.employee_id.clone(),
                    task.clone(),
                    phase.clone(),
                );
                sums.entry(key)
                    .and_modify(|row| row.total = row.total + event.duration())
                    .or_insert_with(|| AggregateRow {
                        project: project.clone(),
                        employee_id: event.employee_id.clone(),
                        task: task.clone(),
                        phase: phase.clone(),
                        total: event.duration(),
                    });

                detail_view.push(DetailRow {
                    project,
                    date: event.event_date(),
                    employee_id: event.employee_id.clone(),
                    task,
                    phase,
                    wid: event.wid.clone(),
                    start: event.start,
                    end: event.end,
                    duration: event.duration(),
                });
            }
            verdict => {
                *clean = false;
                conflicts.push(Conflict {
                    employee_id: event.employee_id.clone(),
                    project_label: event.project_label(),
                    date: event.event_date(),
                    verdict: verdict.label().to_string(),
                    message: verdict.message().unwrap_or_default().to_string(),
                });
            }
        }
    }

    let rows: Vec<AggregateRow> = sums.into_values().collect();

    let mut project_totals: BTreeMap<String, ProjectTotal> = BTreeMap::new();
    let mut employee_totals: BTreeMap<String, TimeDelta> = BTreeMap::new();
    let mut grand_total = TimeDelta::zero();
    for row in &rows {
        project_totals
            .entry(row.project.label().to_lowercase())
            .and_modify(|total| total.total = total.total + row.total)
            .or_insert_with(|| ProjectTotal {
                project: row.project.clone(),
                total: row.total,
            });
        let employee_sum = employee_totals
            .entry(row.employee_id.clone())
            .or_insert_with(TimeDelta::zero);
        *employee_sum = *employee_sum + row.total;
        grand_total = grand_total + row.total;
    }

    conflicts.sort_by(|a, b| {
        (&a.employee_id, &a.project_label, a.date).cmp(&(&b.employee_id, &b.project_label, b.date))
    });

    let employees_without_conflicts = employees
        .into_iter()
        .filter_map(|(employee, clean)| clean.then_some(employee))
        .collect();

    let detail_edit = match kind {
        ReportKind::Monthly => Some(detail_view.clone()),
        ReportKind::Weekly => None,
    };

    Aggregation {
        rows,
        project_totals: project_totals.into_values().collect(),
        employee_totals: employee_totals
            .into_iter()
            .map(|(employee_id, total)| EmployeeTotal { employee_id, total })
            .collect(),
        grand_total,
        detail_view,
        detail_edit,
        conflicts,
        employees_without_conflicts,
    }
}

#[cfg(test)]
mod aggregator_tests {
    use super::*;
    use crate::core::event::{ParsedEvent, Verdict};
    use chrono::TimeZone;
    use rstest::rstest;

    fn accepted(
        name: &str,
        id: Option<&str>,
        employee: &str,
        task: &str,
        phase: &str,
        hours: i64,
    ) -> ValidatedEvent {
        let start = Utc.with_ymd_and_hms(2025, 11, 3, 9, 0, 0).unwrap();
        ValidatedEvent {
            event: ParsedEvent {
                project_name: name.to_string(),
                project_id: id.map(str::to_string),
                task: Some(task.to_string()),
                phase: Some(phase.to_string()),
                wid: Some("work".to_string()),
                employee_id: employee.to_string(),
                start: Some(start),
                end: Some(start + TimeDelta::hours(hours)),
            },
            verdict: Verdict::Accepted,
        }
    }

    fn rejected(name: &str, employee: &str, verdict: Verdict) -> ValidatedEvent {
        let mut validated = accepted(name, Some("P999"), employee, "DP", "SD", 2);
        validated.verdict = verdict;
        validated
    }

    #[rstest]
    fn it_should_sum_durations_per_key_without_loss() {
        let events = vec![
            accepted("Acme Corp", Some("P100"), "CES", "DP", "SD", 4),
            accepted("Acme Corp", Some("P100"), "CES", "DP", "SD", 2),
            accepted("Acme Corp", Some("P100"), "CES", "PM", "SD", 1),
            accepted("Acme Corp", Some("P100"), "JDO", "DP", "SD", 3),
            accepted("Beta LLC", Some("P200"), "CES", "D-D", "CD", 5),
        ];
        let aggregation = aggregate(ReportKind::Weekly, &events);

        assert_eq!(aggregation.rows.len(), 4);
        let key_row = aggregation
            .rows
            .iter()
            .find(|row| row.employee_id == "CES" && row.task == "DP")
            .unwrap();
        assert_eq!(key_row.total, TimeDelta::hours(6));

        // No loss, no double counting: rows sum to the accepted event sum.
        let row_sum: TimeDelta = aggregation
            .rows
            .iter()
            .fold(TimeDelta::zero(), |acc, row| acc + row.total);
        assert_eq!(row_sum, TimeDelta::hours(15));
        assert_eq!(aggregation.grand_total, TimeDelta::hours(15));

        let acme_total = aggregation
            .project_totals
            .iter()
            .find(|total| total.project.id.as_deref() == Some("P100"))
            .unwrap();
        assert_eq!(acme_total.total, TimeDelta::hours(10));

        let ces_total = aggregation
            .employee_totals
            .iter()
            .find(|total| total.employee_id == "CES")
            .unwrap();
        assert_eq!(ces_total.total, TimeDelta::hours(12));
    }

    #[rstest]
    fn it_should_exclude_rejected_events_from_sums() {
        let events = vec![
            accepted("Acme Corp", Some("P100"), "CES", "DP", "SD", 4),
            rejected(
                "Acme Corp",
                "CES",
                Verdict::RejectedInvalidCode("Invalid task code 'XX'".into()),
            ),
        ];
        let aggregation = aggregate(ReportKind::Weekly, &events);
        assert_eq!(aggregation.grand_total, TimeDelta::hours(4));
        assert_eq!(aggregation.detail_view.len(), 1);
        assert_eq!(aggregation.conflicts.len(), 1);
        assert_eq!(aggregation.conflicts[0].verdict, "invalid_code");
        assert_eq!(aggregation.conflicts[0].message, "Invalid task code 'XX'");
    }

    #[rstest]
    fn it_should_round_trip_accepted_events_through_the_detail_view() {
        let events = vec![
            accepted("Acme Corp", Some("P100"), "CES", "DP", "SD", 4),
            accepted("Beta LLC", Some("P200"), "JDO", "PM", "CA", 2),
        ];
        let aggregation = aggregate(ReportKind::Weekly, &events);

        let reconstructed: Vec<_> = aggregation
            .detail_view
            .iter()
            .map(|row| {
                (
                    row.project.label(),
                    row.employee_id.clone(),
                    row.task.clone(),
                    row.phase.clone(),
                    row.duration,
                )
            })
            .collect();
        let source: Vec<_> = events
            .iter()
            .map(|validated| {
                (
                    validated.event.project_label(),
                    validated.event.employee_id.clone(),
                    validated.event.task.clone().unwrap(),
                    validated.event.phase.clone().unwrap(),
                    validated.event.duration(),
                )
            })
            .collect();
        assert_eq!(reconstructed, source);
    }

    #[rstest]
    fn it_should_emit_two_independent_detail_copies_for_monthly_runs() {
        let events = vec![accepted("Acme Corp", Some("P100"), "CES", "DP", "SD", 4)];
        let weekly = aggregate(ReportKind::Weekly, &events);
        assert!(weekly.detail_edit.is_none());

        let monthly = aggregate(ReportKind::Monthly, &events);
        let edit = monthly.detail_edit.as_ref().unwrap();
        assert_eq!(edit, &monthly.detail_view);
    }

    #[rstest]
    fn it_should_order_conflicts_by_employee_project_and_date() {
        let events = vec![
            rejected(
                "Zeta",
                "JDO",
                Verdict::RejectedMissingField("Missing task code".into()),
            ),
            rejected(
                "Acme Corp",
                "CES",
                Verdict::RejectedMissingField("Missing task code".into()),
            ),
            rejected(
                "Beta LLC",
                "CES",
                Verdict::RejectedMissingField("Missing task code".into()),
            ),
            accepted("Acme Corp", Some("P100"), "AAA", "DP", "SD", 1),
        ];
        let aggregation = aggregate(ReportKind::Weekly, &events);

        let order: Vec<_> = aggregation
            .conflicts
            .iter()
            .map(|conflict| (conflict.employee_id.as_str(), conflict.project_label.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("CES", "Acme Corp: P999"),
                ("CES", "Beta LLC: P999"),
                ("JDO", "Zeta: P999"),
            ]
        );
        assert_eq!(aggregation.employees_without_conflicts, vec!["AAA"]);
    }

    #[rstest]
    fn it_should_produce_empty_aggregates_for_an_empty_period() {
        let aggregation = aggregate(ReportKind::Monthly, &[]);
        assert!(aggregation.rows.is_empty());
        assert!(aggregation.conflicts.is_empty());
        assert_eq!(aggregation.grand_total, TimeDelta::zero());
        assert_eq!(aggregation.detail_edit.as_deref(), Some(&[] as &[DetailRow]));
    }
}

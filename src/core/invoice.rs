// Invoice line generator: billable line items per project from a monthly
// aggregate.
//
// Purpose
// - Group a monthly report's aggregate rows by project id, sum billable hours
//   across employees, tasks and phases, and emit one line per project.
//
// Responsibilities
// - Filter out non-projects, rows without a project id, and non-positive
//   durations before grouping.
// - Rate application is injected; the generator itself only produces duration
//   totals. A project without a rate gets `amount: None`.

use chrono::TimeDelta;
use std::collections::BTreeMap;

use crate::core::aggregate::AggregateRow;
use crate::core::codes::categorize;

/// Hours for one (task, phase) combination within a project, for the
/// per-phase invoice breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskPhaseHours {
    pub task: String,
    pub phase: String,
    pub total: TimeDelta,
}

/// One billable line item per project.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLine {
    pub project_id: String,
    pub project_name: String,
    pub total: TimeDelta,
    /// hours x hourly rate; None when the billing policy has no rate.
    pub amount: Option<f64>,
    pub breakdown: Vec<TaskPhaseHours>,
}

impl InvoiceLine {
    pub fn hours(&self) -> f64 {
        self.total.num_seconds() as f64 / 3600.0
    }
}

/// Derive invoice lines from aggregate rows. `rate_for` maps a project id to
/// an hourly rate; it is the injected billing policy.
pub fn generate_lines(
    rows: &[AggregateRow],
    rate_for: impl Fn(&str) -> Option<f64>,
) -> Vec<InvoiceLine> {
    let mut by_project: BTreeMap<String, InvoiceLine> = BTreeMap::new();

    for row in rows {
        if !categorize(&row.project.name).is_billable() || row.total <= TimeDelta::zero() {
            continue;
        }
        let Some(project_id) = &row.project.id else {
            continue;
        };

        let line = by_project
            .entry(project_id.clone())
            .or_insert_with(|| InvoiceLine {
                project_id: project_id.clone(),
                project_name: row.project.name.clone(),
                total: TimeDelta::zero(),
                amount: None,
                breakdown: Vec::new(),
            });
        line.total = line.total + row.total;

        match line
            .breakdown
            .iter_mut()
            .find(|entry| entry.task == row.task && entry.phase == row.phase)
        {
            Some(entry) => entry.total = entry.total + row.total,
            None => line.breakdown.push(TaskPhaseHours {
                task: row.task.clone(),
                phase: row.phase.clone(),
                total: row.total,
            }),
        }
    }

    let mut lines: Vec<InvoiceLine> = by_project
        .into_values()
        .map(|mut line| {
            line.amount = rate_for(&line.project_id).map(|rate| rate * line.hours());
            line.breakdown
                .sort_by(|a, b| (&a.phase, &a.task).cmp(&(&b.phase, &b.task)));
            line
        })
        .collect();

    lines.sort_by(|a, b| {
        let a_key = (a.project_name.to_lowercase(), a.project_id.clone());
        let b_key = (b.project_name.to_lowercase(), b.project_id.clone());
        a_key.cmp(&b_key)
    });
    lines
}

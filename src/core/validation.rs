// Validator: stages 1 and 2 of the per-event rule engine.
//
// Purpose
// - Stage 1 (presence): classify the event by project category and reject
//   events missing required fields.
// - Stage 2 (codes): check task and phase codes against the per-category
//   tables in the code registry.
// - Stage 3 (project consistency) needs visibility across the whole period
//   and lives in core::consistency; it runs only over stage-2 passers.
//
// Responsibilities
// - Pure function of the parsed event. No input or output, no side effects.
// - Short-circuit: a stage-1 failure never reaches stage 2. All broken rules
//   of the failing stage are reported in one joined message.

use crate::core::codes::{
    OFFICE_PHASE_CODES, OFFICE_TASK_CODES, ProjectCategory, REGULAR_PHASE_CODES,
    REGULAR_TASK_CODES, categorize,
};
use crate::core::event::{ParsedEvent, Verdict};

/// Outcome of running stages 1-2 over one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// Both stages passed; the event proceeds to the consistency check.
    Passed,
    Rejected(Verdict),
}

impl StageOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, StageOutcome::Passed)
    }
}

/// Run the short-circuiting stage pipeline over one parsed event.
pub fn run_stages(event: &ParsedEvent) -> StageOutcome {
    let category = categorize(&event.project_name);

    if let Err(message) = presence_stage(event, category) {
        return StageOutcome::Rejected(Verdict::RejectedMissingField(message));
    }
    if let Err(message) = code_stage(event, category) {
        return StageOutcome::Rejected(Verdict::RejectedInvalidCode(message));
    }
    StageOutcome::Passed
}

/// Stage 1: task and phase are required for every category; regular projects
/// additionally need a project id to be billable at all.
pub fn presence_stage(event: &ParsedEvent, category: ProjectCategory) -> Result<(), String> {
    let mut errors = Vec::new();

    if event.task.is_none() {
        errors.push("Missing task code".to_string());
    }
    if event.phase.is_none() {
        errors.push("Missing phase code".to_string());
    }
    if category == ProjectCategory::Regular && event.project_id.is_none() {
        errors.push("Missing project id (expected 'Name: Id' subject)".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

/// Stage 2: per-category code tables. Presence was established in stage 1,
/// so both codes are unwrapped here via the accessors below.
pub fn code_stage(event: &ParsedEvent, category: ProjectCategory) -> Result<(), String> {
    let task = event.task.as_deref().unwrap_or_default();
    let phase = event.phase.as_deref().unwrap_or_default();
    let mut errors = Vec::new();

    match category {
        ProjectCategory::Office => {
            if !OFFICE_TASK_CODES.contains(&task) {
                errors.push(format!("Office must use task 'BD' or 'NA', got '{task}'"));
            }
            if !OFFICE_PHASE_CODES.contains(&phase) {
                errors.push(format!(
                    "Office must use phase 'NA', 'PD' or 'SD', got '{phase}'"
                ));
            }
        }
        ProjectCategory::OtherNonProject => {
            if task != "NA" {
                errors.push(format!("Non-project must use task 'NA', got '{task}'"));
            }
            if phase != "NA" {
                errors.push(format!("Non-project must use phase 'NA', got '{phase}'"));
            }
        }
        ProjectCategory::Meeting => {
            if task != "M" {
                errors.push(format!("Meeting must use task 'M', got '{task}'"));
            }
            if phase != "M" {
                errors.push(format!("Meeting must use phase 'M', got '{phase}'"));
            }
        }
        ProjectCategory::Regular => {
            if task == "NA" {
                errors.push("Regular project cannot use task 'NA'".to_string());
            } else if task == "BD" {
                errors.push("Task 'BD' is only valid for the Office project".to_string());
            } else if !REGULAR_TASK_CODES.contains(&task) {
                errors.push(format!("Invalid task code '{task}'"));
            }

            if phase == "NA" {
                errors.push("Regular project cannot use phase 'NA'".to_string());
            } else if !REGULAR_PHASE_CODES.contains(&phase) {
                errors.push(format!("Invalid phase code '{phase}'"));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

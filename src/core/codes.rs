// Static code registry: task codes, phase codes, and project categories.
//
// Purpose
// - Hold the fixed tables every validation rule is checked against.
// - Classify a project name into a category via an explicit prefix registry,
//   not ad hoc string heuristics.
//
// Boundaries
// - No input or output. Pure lookups only.

use std::fmt;

pub const VALID_TASK_CODES: [&str; 7] = ["BD", "DP", "PM", "3-D", "D-D", "M", "NA"];
pub const VALID_PHASE_CODES: [&str; 7] = ["PD", "SD", "DD", "CD", "CA", "M", "NA"];

/// Task codes allowed on regular (billable) project events.
/// BD is reserved for office time and NA for non-projects.
pub const REGULAR_TASK_CODES: [&str; 5] = ["DP", "PM", "3-D", "D-D", "M"];
pub const REGULAR_PHASE_CODES: [&str; 6] = ["PD", "SD", "DD", "CD", "CA", "M"];

pub const OFFICE_TASK_CODES: [&str; 2] = ["BD", "NA"];
pub const OFFICE_PHASE_CODES: [&str; 3] = ["NA", "PD", "SD"];

/// Category a calendar event's project name resolves to. Each category has
/// its own presence and code rules in the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectCategory {
    /// Internal office time ("Office").
    Office,
    /// Vacation, holiday, sick leave, personal time.
    OtherNonProject,
    /// Meetings harvested as their own pseudo-project.
    Meeting,
    /// A billable client project ("Name: Id").
    Regular,
}

impl ProjectCategory {
    pub fn is_billable(self) -> bool {
        matches!(self, ProjectCategory::Regular)
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProjectCategory::Office => "office",
            ProjectCategory::OtherNonProject => "non-project",
            ProjectCategory::Meeting => "meeting",
            ProjectCategory::Regular => "project",
        };
        f.write_str(label)
    }
}

const OFFICE_NAMES: [&str; 1] = ["office"];
const OTHER_NON_PROJECT_NAMES: [&str; 4] = ["vacation", "holiday", "sick", "personal time"];
const MEETING_NAMES: [&str; 2] = ["meeting", "meetings"];

/// Classify a project name (the text before the subject's first colon).
/// Matching is case-insensitive on the trimmed name.
pub fn categorize(project_name: &str) -> ProjectCategory {
    let name = project_name.trim().to_lowercase();
    if OFFICE_NAMES.contains(&name.as_str()) {
        ProjectCategory::Office
    } else if OTHER_NON_PROJECT_NAMES.contains(&name.as_str()) {
        ProjectCategory::OtherNonProject
    } else if MEETING_NAMES.contains(&name.as_str()) {
        ProjectCategory::Meeting
    } else {
        ProjectCategory::Regular
    }
}

pub fn is_valid_task(code: &str) -> bool {
    VALID_TASK_CODES.contains(&code)
}

pub fn is_valid_phase(code: &str) -> bool {
    VALID_PHASE_CODES.contains(&code)
}

/// Human-readable task descriptions used on invoice output.
pub fn task_description(code: &str) -> Option<&'static str> {
    match code {
        "DP" => Some("Design Principal"),
        "PM" => Some("Project Management"),
        "3-D" => Some("3D Model"),
        "D-D" => Some("Design and Documentation"),
        "M" => Some("Meetings"),
        _ => None,
    }
}

/// Human-readable phase descriptions used on invoice output.
pub fn phase_description(code: &str) -> Option<&'static str> {
    match code {
        "PD" => Some("Pre-Design"),
        "SD" => Some("Schematic Design"),
        "DD" => Some("Design Development"),
        "CD" => Some("Construction Documents"),
        "CA" => Some("Construction Administration"),
        "M" => Some("Meetings w/ Client or Contractor"),
        _ => None,
    }
}

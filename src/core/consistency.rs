// Consistency checker: stage 3 of the rule engine.
//
// Purpose
// - Enforce the month-scoped rule that a project name maps to exactly one
//   project id. Runs over the stage-2 passers of a batch, seeded with the
//   (name, id) pairs of previously persisted accepted events for the same
//   month, so weekly runs honor the rule across the containing month.
//
// Responsibilities
// - Downgrade every event carrying a conflicting name, not just the "second"
//   offender. No event is privileged by ordering.
// - Leave stage-1/2 verdicts untouched; consistency only runs over passers.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::event::{ParsedEvent, ValidatedEvent, Verdict};
use crate::core::validation::StageOutcome;

/// Resolve the final verdict for a batch of staged events.
///
/// `prior_pairs` are (project name, project id) pairs of accepted events
/// already persisted for the containing month.
pub fn resolve(
    staged: Vec<(ParsedEvent, StageOutcome)>,
    prior_pairs: &[(String, String)],
) -> Vec<ValidatedEvent> {
    let mut ids_by_name: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for (name, id) in prior_pairs {
        ids_by_name
            .entry(name.trim().to_lowercase())
            .or_default()
            .insert(id.clone());
    }
    for (event, outcome) in &staged {
        if outcome.passed()
            && let Some(id) = &event.project_id
        {
            ids_by_name
                .entry(event.project_name_key())
                .or_default()
                .insert(id.clone());
        }
    }

    staged
        .into_iter()
        .map(|(event, outcome)| {
            let verdict = match outcome {
                StageOutcome::Rejected(verdict) => verdict,
                StageOutcome::Passed => match conflict_message(&event, &ids_by_name) {
                    Some(message) => Verdict::RejectedInconsistentProject(message),
                    None => Verdict::Accepted,
                },
            };
            ValidatedEvent { event, verdict }
        })
        .collect()
}

fn conflict_message(
    event: &ParsedEvent,
    ids_by_name: &BTreeMap<String, BTreeSet<String>>,
) -> Option<String> {
    let ids = ids_by_name.get(&event.project_name_key())?;
    if ids.len() < 2 {
        return None;
    }
    let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
    Some(format!(
        "Project '{}' has multiple IDs: {}",
        event.project_name_key(),
        ids.join(", ")
    ))
}

// Event parser: RawEvent -> ParsedEvent.
//
// Purpose
// - Extract the project name and id from the subject ("Name: Id") and the
//   labeled WID / Task / Phase fields from the body.
//
// Responsibilities
// - Never fail. Absent or malformed fields parse to None; classifying them
//   is the validator's job.
// - Strip HTML bodies before scanning (tags become line breaks, matching how
//   the calendar service renders plain-text bodies).

use std::sync::OnceLock;

use regex::Regex;

use crate::core::event::{ParsedEvent, RawEvent};

fn html_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

pub fn parse(raw: RawEvent) -> ParsedEvent {
    let (project_name, project_id) = parse_subject(&raw.subject);
    let (wid, task, phase) = parse_body(&raw.body);

    ParsedEvent {
        project_name,
        project_id,
        task,
        phase,
        wid,
        employee_id: raw.employee_id.trim().to_uppercase(),
        start: raw.start,
        end: raw.end,
    }
}

/// Project name is the text before the first colon, the id the text after it.
/// A subject without a colon is all name (non-projects like "Vacation").
fn parse_subject(subject: &str) -> (String, Option<String>) {
    match subject.split_once(':') {
        Some((name, id)) => {
            let id = id.trim();
            (
                name.trim().to_string(),
                (!id.is_empty()).then(|| id.to_string()),
            )
        }
        None => (subject.trim().to_string(), None),
    }
}

/// Scan the body line by line for `WID:`, `Task:` and `Phase:` labels,
/// case-insensitive and whitespace-tolerant. The last occurrence of a label
/// wins.
fn parse_body(body: &str) -> (Option<String>, Option<String>, Option<String>) {
    let text = if body.contains('<') {
        html_tag_pattern().replace_all(body, "\n").into_owned()
    } else {
        body.to_string()
    };

    let mut wid = None;
    let mut task = None;
    let mut phase = None;

    for line in text.lines() {
        let line = line.trim();
        if let Some(value) = labeled_value(line, "WID:") {
            wid = Some(value.to_string());
        } else if let Some(value) = labeled_value(line, "TASK:") {
            task = Some(value.to_uppercase());
        } else if let Some(value) = labeled_value(line, "PHASE:") {
            phase = Some(value.to_uppercase());
        }
    }

    (wid, task, phase)
}

fn labeled_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let prefix = line.get(..label.len())?;
    if !prefix.eq_ignore_ascii_case(label) {
        return None;
    }
    let value = line[label.len()..].trim();
    (!value.is_empty()).then_some(value)
}

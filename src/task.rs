//! Task model for duke.
//!
//! A task is one of three kinds: a plain to-do, a deadline with a calendar
//! date, or an event with a free-form time window. Each task has a durable
//! one-line encoding used by the storage file:
//!
//! ```text
//! T | 0 | read book
//! D | 1 | return book | 2019-12-01
//! E | 0 | project meeting | Mon 2-4pm
//! ```
//!
//! Backslash and pipe characters inside free text are escaped with a
//! backslash, so the field separator is never ambiguous.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};

/// Separator between the description and the date of a deadline.
pub const DEADLINE_SEPARATOR: &str = "/by";
/// Separator between the description and the time window of an event.
pub const EVENT_SEPARATOR: &str = "/at";
/// Date format accepted and stored for deadlines.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const FIELD_SEPARATOR: &str = " | ";
const DEADLINE_EXAMPLE: &str = "2019-12-12";
const EVENT_EXAMPLE: &str = "Monday 3-4pm";

/// The three kinds of task, without their payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Todo,
    Deadline,
    Event,
}

impl TaskType {
    pub const ALL: [TaskType; 3] = [TaskType::Todo, TaskType::Deadline, TaskType::Event];

    /// Single-letter tag used in listings and in the storage file.
    pub fn tag(self) -> char {
        match self {
            TaskType::Todo => 'T',
            TaskType::Deadline => 'D',
            TaskType::Event => 'E',
        }
    }

    /// Command keyword that creates this kind of task.
    pub fn keyword(self) -> &'static str {
        match self {
            TaskType::Todo => "todo",
            TaskType::Deadline => "deadline",
            TaskType::Event => "event",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| tag.len() == 1 && tag.starts_with(kind.tag()))
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Variant-specific task data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskKind {
    Todo,
    Deadline { by: NaiveDate },
    Event { at: String },
}

impl TaskKind {
    pub fn task_type(&self) -> TaskType {
        match self {
            TaskKind::Todo => TaskType::Todo,
            TaskKind::Deadline { .. } => TaskType::Deadline,
            TaskKind::Event { .. } => TaskType::Event,
        }
    }
}

/// A single tracked task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub description: String,
    pub done: bool,
    #[serde(flatten)]
    pub kind: TaskKind,
}

impl Task {
    fn new(description: String, kind: TaskKind) -> Self {
        Self {
            description,
            done: false,
            kind,
        }
    }

    /// Build a task of the given type from the raw text following its keyword.
    pub fn create(task_type: TaskType, raw: &str) -> Result<Self> {
        match task_type {
            TaskType::Todo => Self::todo(raw),
            TaskType::Deadline => Self::deadline(raw),
            TaskType::Event => Self::event(raw),
        }
    }

    /// `read book`
    pub fn todo(raw: &str) -> Result<Self> {
        let description = require_description(raw, TaskType::Todo)?;
        Ok(Self::new(description, TaskKind::Todo))
    }

    /// `return book /by 2019-12-01`
    pub fn deadline(raw: &str) -> Result<Self> {
        let (description, date) = split_args(
            raw,
            TaskType::Deadline,
            DEADLINE_SEPARATOR,
            DEADLINE_EXAMPLE,
        )?;
        let by = parse_date(&date)?;
        Ok(Self::new(description, TaskKind::Deadline { by }))
    }

    /// `project meeting /at Mon 2-4pm`
    pub fn event(raw: &str) -> Result<Self> {
        let (description, at) =
            split_args(raw, TaskType::Event, EVENT_SEPARATOR, EVENT_EXAMPLE)?;
        Ok(Self::new(description, TaskKind::Event { at }))
    }

    pub fn task_type(&self) -> TaskType {
        self.kind.task_type()
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn unmark(&mut self) {
        self.done = false;
    }

    /// Status marker shown in listings.
    pub fn status_icon(&self) -> &'static str {
        if self.done {
            "X"
        } else {
            " "
        }
    }

    /// Human-readable line, e.g. `[D][ ] return book (by: 2019-12-01)`.
    pub fn display_text(&self) -> String {
        self.to_string()
    }

    /// Durable one-line encoding written to the storage file.
    pub fn format_text(&self) -> String {
        let mut fields = vec![
            self.task_type().tag().to_string(),
            if self.done { "1" } else { "0" }.to_string(),
            escape_field(&self.description),
        ];
        match &self.kind {
            TaskKind::Todo => {}
            TaskKind::Deadline { by } => fields.push(by.format(DATE_FORMAT).to_string()),
            TaskKind::Event { at } => fields.push(escape_field(at)),
        }
        fields.join(FIELD_SEPARATOR)
    }

    /// Decode a line produced by [`Task::format_text`].
    ///
    /// The decoded fields go through the same validation as user input, so a
    /// hand-edited line with an empty description or a bad date is rejected.
    pub fn parse_line(line: &str) -> Result<Self> {
        let fields = split_fields(line)?;
        let (tag, done, rest) = match fields.as_slice() {
            [tag, done, rest @ ..] => (tag.as_str(), done.as_str(), rest),
            _ => return Err(corrupt(line, "too few fields")),
        };

        let task_type =
            TaskType::from_tag(tag).ok_or_else(|| corrupt(line, "unknown type tag"))?;
        let done = match done {
            "1" => true,
            "0" => false,
            _ => return Err(corrupt(line, "done flag must be 0 or 1")),
        };

        let kind_fields = match task_type {
            TaskType::Todo => 1,
            TaskType::Deadline | TaskType::Event => 2,
        };
        if rest.len() != kind_fields {
            return Err(corrupt(line, "wrong number of fields"));
        }

        let description = require_description(&rest[0], task_type)?;
        let kind = match task_type {
            TaskType::Todo => TaskKind::Todo,
            TaskType::Deadline => TaskKind::Deadline {
                by: parse_date(&rest[1])?,
            },
            TaskType::Event => TaskKind::Event {
                at: require_field(&rest[1], task_type, EVENT_SEPARATOR, EVENT_EXAMPLE)?,
            },
        };

        Ok(Self {
            description,
            done,
            kind,
        })
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][{}] {}",
            self.task_type().tag(),
            self.status_icon(),
            self.description
        )?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {})", by.format(DATE_FORMAT)),
            TaskKind::Event { at } => write!(f, " (at: {at})"),
        }
    }
}

fn require_description(raw: &str, kind: TaskType) -> Result<String> {
    let description = raw.trim();
    if description.is_empty() {
        return Err(Error::EmptyDescription { kind });
    }
    Ok(description.to_string())
}

fn require_field(
    raw: &str,
    kind: TaskType,
    separator: &'static str,
    example: &'static str,
) -> Result<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(Error::MissingSeparator {
            kind,
            separator,
            example,
        });
    }
    Ok(value.to_string())
}

/// Split `<description> <separator> <value>`, checking both halves.
fn split_args(
    raw: &str,
    kind: TaskType,
    separator: &'static str,
    example: &'static str,
) -> Result<(String, String)> {
    let (description, value) =
        split_on_token(raw, separator).ok_or(Error::MissingSeparator {
            kind,
            separator,
            example,
        })?;
    let description = require_description(description, kind)?;
    let value = require_field(value, kind, separator, example)?;
    Ok((description, value))
}

/// Split at the first occurrence of `separator` standing as its own
/// whitespace-delimited token, so `chat/attend` or `/bye` never match.
fn split_on_token<'a>(raw: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    raw.match_indices(separator).find_map(|(start, _)| {
        let before = &raw[..start];
        let after = &raw[start + separator.len()..];
        let starts_token = before.chars().next_back().map_or(true, char::is_whitespace);
        let ends_token = after.chars().next().map_or(true, char::is_whitespace);
        (starts_token && ends_token).then_some((before, after))
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| Error::InvalidDate(raw.to_string()))
}

fn corrupt(line: &str, reason: &str) -> Error {
    Error::CorruptRecord(format!("{reason}: {line:?}"))
}

fn escape_field(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '|' => escaped.push_str("\\|"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn split_fields(line: &str) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('n') => current.push('\n'),
                Some('r') => current.push('\r'),
                Some(next @ ('\\' | '|')) => current.push(next),
                _ => return Err(corrupt(line, "bad escape sequence")),
            },
            '|' => fields.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    fields.push(current);

    Ok(fields
        .into_iter()
        .map(|field| trim_separator_padding(&field).to_string())
        .collect())
}

/// Strip the single spaces that [`FIELD_SEPARATOR`] puts around each field.
fn trim_separator_padding(field: &str) -> &str {
    let field = field.strip_prefix(' ').unwrap_or(field);
    field.strip_suffix(' ').unwrap_or(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, DATE_FORMAT).expect("valid date")
    }

    #[test]
    fn todo_trims_description() {
        let task = Task::todo("  read book ").expect("todo");
        assert_eq!(task.description, "read book");
        assert!(!task.done);
        assert_eq!(task.kind, TaskKind::Todo);
    }

    #[test]
    fn todo_rejects_blank_description() {
        let err = Task::todo("   ").unwrap_err();
        assert!(matches!(
            err,
            Error::EmptyDescription {
                kind: TaskType::Todo
            }
        ));
    }

    #[test]
    fn deadline_parses_date() {
        let task = Task::deadline("return book /by 2019-12-01").expect("deadline");
        assert_eq!(task.description, "return book");
        assert_eq!(
            task.kind,
            TaskKind::Deadline {
                by: date("2019-12-01")
            }
        );
        assert_eq!(task.display_text(), "[D][ ] return book (by: 2019-12-01)");
    }

    #[test]
    fn deadline_errors_are_distinct() {
        assert!(matches!(
            Task::deadline("return book").unwrap_err(),
            Error::MissingSeparator { separator: "/by", .. }
        ));
        assert!(matches!(
            Task::deadline("return book /by").unwrap_err(),
            Error::MissingSeparator { separator: "/by", .. }
        ));
        assert!(matches!(
            Task::deadline(" /by 2019-12-01").unwrap_err(),
            Error::EmptyDescription {
                kind: TaskType::Deadline
            }
        ));
        assert!(matches!(
            Task::deadline("return book /by tomorrow").unwrap_err(),
            Error::InvalidDate(ref raw) if raw == "tomorrow"
        ));
    }

    #[test]
    fn event_keeps_time_window_verbatim() {
        let task = Task::event("project meeting /at Mon 2-4pm").expect("event");
        assert_eq!(
            task.kind,
            TaskKind::Event {
                at: "Mon 2-4pm".to_string()
            }
        );
        assert_eq!(task.display_text(), "[E][ ] project meeting (at: Mon 2-4pm)");
    }

    #[test]
    fn event_requires_separator_and_description() {
        assert!(matches!(
            Task::event("project meeting").unwrap_err(),
            Error::MissingSeparator { separator: "/at", .. }
        ));
        assert!(matches!(
            Task::event("/at Mon").unwrap_err(),
            Error::EmptyDescription {
                kind: TaskType::Event
            }
        ));
    }

    #[test]
    fn separators_match_whole_tokens_only() {
        let task = Task::event("chat/attend /at Mon").expect("event");
        assert_eq!(task.description, "chat/attend");
        assert_eq!(
            task.kind,
            TaskKind::Event {
                at: "Mon".to_string()
            }
        );

        let task = Task::deadline("x /bye /by 2019-12-01").expect("deadline");
        assert_eq!(task.description, "x /bye");
        assert_eq!(
            task.kind,
            TaskKind::Deadline {
                by: date("2019-12-01")
            }
        );

        assert!(matches!(
            Task::deadline("return book /by2019-12-01").unwrap_err(),
            Error::MissingSeparator { separator: "/by", .. }
        ));
    }

    #[test]
    fn display_shows_done_marker() {
        let mut task = Task::todo("read book").expect("todo");
        assert_eq!(task.display_text(), "[T][ ] read book");
        task.mark_done();
        assert_eq!(task.display_text(), "[T][X] read book");
        task.unmark();
        assert_eq!(task.display_text(), "[T][ ] read book");
    }

    #[test]
    fn format_text_layout() {
        let mut task = Task::deadline("return book /by 2019-12-01").expect("deadline");
        task.mark_done();
        assert_eq!(task.format_text(), "D | 1 | return book | 2019-12-01");
        assert_eq!(
            Task::todo("read book").expect("todo").format_text(),
            "T | 0 | read book"
        );
    }

    #[test]
    fn encoding_round_trips_every_kind() {
        let mut done_event = Task::event("sync | review /at Fri 9\\10am").expect("event");
        done_event.mark_done();
        let tasks = vec![
            Task::todo("read book").expect("todo"),
            Task::deadline("return book /by 2019-12-01").expect("deadline"),
            done_event,
        ];

        for task in tasks {
            let decoded = Task::parse_line(&task.format_text()).expect("decode");
            assert_eq!(decoded, task);
        }
    }

    #[test]
    fn pipes_in_description_are_escaped() {
        let task = Task::todo("a | b").expect("todo");
        assert_eq!(task.format_text(), "T | 0 | a \\| b");
    }

    #[test]
    fn parse_line_rejects_corrupt_records() {
        let bad = [
            "",
            "T | 0",
            "X | 0 | read book",
            "T | 2 | read book",
            "T | 0 | read book | extra",
            "D | 0 | return book",
            "D | 0 | return book | someday",
            "E | 0 | meeting | ",
            "T | 0 |  ",
            "T | 0 | dangling \\",
        ];
        for line in bad {
            assert!(Task::parse_line(line).is_err(), "accepted {line:?}");
        }
    }

    #[test]
    fn task_type_lookup() {
        assert_eq!(TaskType::from_keyword("deadline"), Some(TaskType::Deadline));
        assert_eq!(TaskType::from_keyword("Deadline"), None);
        assert_eq!(TaskType::from_tag("E"), Some(TaskType::Event));
        assert_eq!(TaskType::from_tag("EE"), None);
    }
}

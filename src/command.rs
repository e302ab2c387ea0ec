//! Command parsing and execution.
//!
//! One input line becomes one [`Command`]. The first whitespace-delimited
//! token is the keyword (case-sensitive); the rest of the line is its
//! argument text. `find` takes that text verbatim, every other command
//! trims it.

use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::task::{Task, TaskType};
use crate::task_list::TaskList;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `todo ...`, `deadline ...`, `event ...`
    Add { task_type: TaskType, args: String },
    /// `list`
    List,
    /// `done N` / `mark N`
    Mark(usize),
    /// `unmark N`
    Unmark(usize),
    /// `delete N`
    Delete(usize),
    /// `find QUERY`
    Find(String),
    /// `bye` / `exit`
    Exit,
    /// Anything else; carries the unrecognised keyword.
    Invalid(String),
}

impl Command {
    /// Classify one raw input line.
    ///
    /// Fails only when an index command is given a missing or non-integer
    /// task number.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_start().trim_end_matches(['\r', '\n']);
        let (keyword, raw_rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest),
            None => (line, ""),
        };
        let rest = raw_rest.trim();

        if let Some(task_type) = TaskType::from_keyword(keyword) {
            return Ok(Command::Add {
                task_type,
                args: rest.to_string(),
            });
        }

        let command = match keyword {
            "list" => Command::List,
            "done" | "mark" => Command::Mark(parse_index(keyword, rest)?),
            "unmark" => Command::Unmark(parse_index(keyword, rest)?),
            "delete" => Command::Delete(parse_index(keyword, rest)?),
            "find" => Command::Find(raw_rest.to_string()),
            "bye" | "exit" => Command::Exit,
            other => Command::Invalid(other.to_string()),
        };
        Ok(command)
    }

    /// Whether the shell should stop after this command.
    pub fn is_exit(&self) -> bool {
        matches!(self, Command::Exit)
    }

    /// Run the command and return the response text.
    ///
    /// Input is validated before anything changes; on success the mutation is
    /// applied in memory and then the whole list is persisted.
    pub fn execute(self, tasks: &mut TaskList, storage: &Storage) -> Result<String> {
        match self {
            Command::Add { task_type, args } => {
                let task = Task::create(task_type, &args)?;
                let shown = task.display_text();
                tasks.add(task);
                storage.persist(tasks)?;
                Ok(format!(
                    "Got it. I've added this task:\n  {shown}\n{}",
                    count_line(tasks.len())
                ))
            }
            Command::List => Ok(list_text(tasks)),
            Command::Mark(index) => {
                let shown = tasks.mark_done(index)?.display_text();
                storage.persist(tasks)?;
                Ok(format!("Nice! I've marked this task as done:\n  {shown}"))
            }
            Command::Unmark(index) => {
                let shown = tasks.unmark(index)?.display_text();
                storage.persist(tasks)?;
                Ok(format!(
                    "OK, I've marked this task as not done yet:\n  {shown}"
                ))
            }
            Command::Delete(index) => {
                let removed = tasks.delete(index)?;
                storage.persist(tasks)?;
                Ok(format!(
                    "Noted. I've removed this task:\n  {removed}\n{}",
                    count_line(tasks.len())
                ))
            }
            Command::Find(query) => Ok(find_text(tasks, &query)),
            Command::Exit => Ok(FAREWELL.to_string()),
            Command::Invalid(keyword) => Err(Error::UnknownCommand(keyword)),
        }
    }
}

/// Farewell shown when the session ends.
pub const FAREWELL: &str = "Bye. Hope to see you again soon!";

fn parse_index(keyword: &str, rest: &str) -> Result<usize> {
    rest.parse::<usize>().map_err(|_| Error::InvalidTaskNumber {
        keyword: keyword.to_string(),
    })
}

fn count_line(count: usize) -> String {
    let noun = if count == 1 { "task" } else { "tasks" };
    format!("Now you have {count} {noun} in the list.")
}

fn list_text(tasks: &TaskList) -> String {
    if tasks.is_empty() {
        return "Your list is empty.".to_string();
    }
    let mut lines = vec!["Here are the tasks in your list:".to_string()];
    lines.extend(tasks.iter().map(|(index, task)| format!("{index}.{task}")));
    lines.join("\n")
}

fn find_text(tasks: &TaskList, query: &str) -> String {
    let found = tasks.find(query);
    if found.is_empty() {
        return "No matching tasks found.".to_string();
    }
    let mut lines = vec!["Here are the matching tasks in your list:".to_string()];
    lines.extend(found.iter().map(|(index, task)| format!("{index}.{task}")));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add_commands() {
        assert_eq!(
            Command::parse("todo read book").expect("parse"),
            Command::Add {
                task_type: TaskType::Todo,
                args: "read book".to_string()
            }
        );
        assert_eq!(
            Command::parse("deadline").expect("parse"),
            Command::Add {
                task_type: TaskType::Deadline,
                args: String::new()
            }
        );
    }

    #[test]
    fn parse_index_commands() {
        assert_eq!(Command::parse("done 2").expect("parse"), Command::Mark(2));
        assert_eq!(Command::parse("mark 2").expect("parse"), Command::Mark(2));
        assert_eq!(Command::parse("unmark 1").expect("parse"), Command::Unmark(1));
        assert_eq!(Command::parse("delete 3").expect("parse"), Command::Delete(3));
        assert_eq!(Command::parse("delete 0").expect("parse"), Command::Delete(0));
    }

    #[test]
    fn parse_rejects_bad_task_numbers() {
        for line in ["done", "done two", "delete -1", "unmark 1 2"] {
            assert!(
                matches!(
                    Command::parse(line),
                    Err(Error::InvalidTaskNumber { .. })
                ),
                "accepted {line:?}"
            );
        }
    }

    #[test]
    fn parse_keywords_are_case_sensitive() {
        assert_eq!(
            Command::parse("LIST").expect("parse"),
            Command::Invalid("LIST".to_string())
        );
        assert_eq!(
            Command::parse("").expect("parse"),
            Command::Invalid(String::new())
        );
    }

    #[test]
    fn parse_exit_aliases() {
        assert!(Command::parse("bye").expect("parse").is_exit());
        assert!(Command::parse("exit").expect("parse").is_exit());
        assert!(!Command::parse("list").expect("parse").is_exit());
    }

    #[test]
    fn find_keeps_query_text_verbatim() {
        assert_eq!(
            Command::parse("find old book").expect("parse"),
            Command::Find("old book".to_string())
        );
        assert_eq!(
            Command::parse("find book \n").expect("parse"),
            Command::Find("book ".to_string())
        );
        assert_eq!(
            Command::parse("find  book").expect("parse"),
            Command::Find(" book".to_string())
        );
        assert_eq!(
            Command::parse("find").expect("parse"),
            Command::Find(String::new())
        );
    }

    #[test]
    fn trailing_whitespace_is_ignored_outside_find() {
        assert_eq!(Command::parse("list  \r\n").expect("parse"), Command::List);
        assert_eq!(Command::parse("done 2 ").expect("parse"), Command::Mark(2));
        assert!(Command::parse("bye \n").expect("parse").is_exit());
    }

    #[test]
    fn count_line_pluralises() {
        assert_eq!(count_line(1), "Now you have 1 task in the list.");
        assert_eq!(count_line(2), "Now you have 2 tasks in the list.");
    }
}

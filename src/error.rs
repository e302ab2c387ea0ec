//! Error types for duke
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad input, bad configuration)
//! - 4: Operation failed (storage I/O)

use thiserror::Error;

use crate::task::TaskType;

/// Exit codes for the duke binary
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for duke operations
#[derive(Error, Debug)]
pub enum Error {
    // Input errors, reported back to the user as a response
    #[error("Please enter a valid description for the {kind}!")]
    EmptyDescription { kind: TaskType },

    #[error("Please enter a date (eg. {separator} {example})!")]
    MissingSeparator {
        kind: TaskType,
        separator: &'static str,
        example: &'static str,
    },

    #[error("Please enter valid date in YYYY-MM-DD format! ({0:?} is not one)")]
    InvalidDate(String),

    #[error("Please enter a valid task number (eg. {keyword} 2)!")]
    InvalidTaskNumber { keyword: String },

    #[error("Task {index} does not exist! You have {size} task(s) in the list.")]
    OutOfRange { index: usize, size: usize },

    #[error("Sorry, I don't know what {0:?} means. Please try again!")]
    UnknownCommand(String),

    // Faults (exit code 2 or 4)
    #[error("Corrupt task record: {0}")]
    CorruptRecord(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for errors caused by a malformed input line.
    ///
    /// These never leave the dispatcher; they become the response text.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyDescription { .. }
                | Error::MissingSeparator { .. }
                | Error::InvalidDate(_)
                | Error::InvalidTaskNumber { .. }
                | Error::OutOfRange { .. }
                | Error::UnknownCommand(_)
        )
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::EmptyDescription { .. }
            | Error::MissingSeparator { .. }
            | Error::InvalidDate(_)
            | Error::InvalidTaskNumber { .. }
            | Error::OutOfRange { .. }
            | Error::UnknownCommand(_)
            | Error::InvalidConfig(_)
            | Error::TomlParse(_) => exit_codes::USER_ERROR,

            Error::CorruptRecord(_) | Error::Io(_) | Error::Json(_) => {
                exit_codes::OPERATION_FAILED
            }
        }
    }

    /// Short machine-readable kind, used by the JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::EmptyDescription { .. } | Error::MissingSeparator { .. } => "malformed_task",
            Error::InvalidDate(_) => "invalid_date",
            Error::InvalidTaskNumber { .. } => "invalid_task_number",
            Error::OutOfRange { .. } => "out_of_range",
            Error::UnknownCommand(_) => "unknown_command",
            Error::InvalidConfig(_) | Error::TomlParse(_) => "invalid_config",
            Error::CorruptRecord(_) => "corrupt_record",
            Error::Io(_) | Error::Json(_) => "operation_failed",
        }
    }
}

/// Result type alias for duke operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_are_user_errors() {
        let err = Error::OutOfRange { index: 3, size: 2 };
        assert!(err.is_user_error());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert_eq!(
            err.to_string(),
            "Task 3 does not exist! You have 2 task(s) in the list."
        );
    }

    #[test]
    fn io_errors_are_faults() {
        let err = Error::from(std::io::Error::other("disk full"));
        assert!(!err.is_user_error());
        assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
        assert_eq!(err.kind(), "operation_failed");
    }

    #[test]
    fn missing_separator_names_the_separator() {
        let err = Error::MissingSeparator {
            kind: TaskType::Deadline,
            separator: "/by",
            example: "2019-12-12",
        };
        assert_eq!(err.to_string(), "Please enter a date (eg. /by 2019-12-12)!");
    }
}

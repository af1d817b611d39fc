//! Error types for the terminal core.
//!
//! [`CommandError`] is never surfaced as a failure: its `Display` text is the
//! line the user sees in the scrollback.

use thiserror::Error;

/// A command rejected its input. Formats as the terminal's reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Command '{0}' not found. Available commands: [ {} ]. Type 'help' for more.", available())]
    NotFound(String),

    #[error("bash: cd: too many arguments")]
    CdTooManyArguments,

    #[error("{0}: too many arguments")]
    TooManyArguments(&'static str),

    #[error("{0}: missing operand")]
    MissingOperand(&'static str),

    #[error("{command}: expected {expected} argument{}, got {got}", plural(.expected))]
    ArgumentCount {
        command: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("bash: cd: {0}: No such file or directory")]
    NoSuchDirectory(String),

    #[error("{command}: {name}: No such file or directory")]
    NoSuchFile { command: &'static str, name: String },

    #[error("{command}: {name}: Is a directory")]
    IsADirectory { command: &'static str, name: String },

    #[error("ls: cannot access '{0}': No such file or directory")]
    CannotAccess(String),

    #[error("Type 'cd' to go back 😅")]
    UpwardNavigation,

    #[error("bash /{0} : Permission denied 😏")]
    PermissionDenied(String),

    #[error("Nope! 🙃")]
    Refused,

    #[error("{0}: command not available")]
    Unavailable(&'static str),

    #[error("mkdir: operation not supported")]
    FolderUnsupported,

    #[error("todoist: command removed. Try \"github\" or \"about-nishant\" instead.")]
    Removed,
}

fn available() -> String {
    crate::commands::visible_names().collect::<Vec<_>>().join(", ")
}

fn plural(n: &usize) -> &'static str {
    if *n == 1 {
        ""
    } else {
        "s"
    }
}

/// Failure while building a session from host-supplied configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid terminal config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("filesystem root must be a directory")]
    RootNotDirectory,
}

/// Failure reported by a host collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("host does not provide this capability")]
    Unavailable,

    #[error("host callback failed: {0}")]
    Callback(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_count_plural() {
        let one = CommandError::ArgumentCount {
            command: "cat",
            expected: 1,
            got: 0,
        };
        assert_eq!(one.to_string(), "cat: expected 1 argument, got 0");

        let two = CommandError::ArgumentCount {
            command: "cp",
            expected: 2,
            got: 3,
        };
        assert_eq!(two.to_string(), "cp: expected 2 arguments, got 3");
    }

    #[test]
    fn test_not_found_lists_commands() {
        let msg = CommandError::NotFound("helpe".into()).to_string();
        assert!(msg.starts_with("Command 'helpe' not found."));
        assert!(msg.contains("help, "));
        assert!(msg.contains("cd"));
    }

    #[test]
    fn test_restricted_messages() {
        assert_eq!(
            CommandError::PermissionDenied("root".into()).to_string(),
            "bash /root : Permission denied 😏"
        );
        assert_eq!(CommandError::Refused.to_string(), "Nope! 🙃");
    }
}

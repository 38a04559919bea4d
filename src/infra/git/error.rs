//! Git error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("git {command} failed: {message}")]
    CommandFailed { command: String, message: String },
}

impl GitError {
    pub(super) fn command_failed(args: &[&str], message: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: args.join(" "),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GitError>;

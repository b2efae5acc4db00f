use thiserror::Error;

/// Every failure a command can end with.
///
/// The dispatcher turns each of these into a single user-facing line; none of
/// them terminate the command loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DbError {
    #[error("Error: table \"{0}\" does not exist.")]
    NotFound(String),
    #[error("Error: table \"{0}\" already exists.")]
    AlreadyExists(String),
    #[error("Invalid value: {0}. Please try again.")]
    Validation(String),
    #[error("Unknown command: {0}. Type 'help' for the list of commands.")]
    UnknownCommand(String),
    #[error("Operation cancelled.")]
    Cancelled,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type Result<T> = std::result::Result<T, DbError>;

impl DbError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
}

impl From<std::io::Error> for DbError {
    fn from(e: std::io::Error) -> Self { Self::Unexpected(e.to_string()) }
}

impl From<serde_json::Error> for DbError {
    fn from(e: serde_json::Error) -> Self { Self::Unexpected(e.to_string()) }
}

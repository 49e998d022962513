use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    #[error("Invalid input format: {line:?} must read `DESTINATION {separator} [PREDECESSOR]`")]
    Malformed { line: String, separator: String },

    #[error("The statement separator cannot be empty")]
    EmptySeparator,
}

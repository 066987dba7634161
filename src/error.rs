use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a candidate question list cannot become a `QuestionSet`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("question list is empty")]
    Empty,

    #[error("question {id} has {count} options, at least 2 are required")]
    TooFewOptions { id: u64, count: usize },

    #[error("question {id} marks option {correct_answer} as correct but has only {options} options")]
    CorrectAnswerOutOfRange {
        id: u64,
        correct_answer: i64,
        options: usize,
    },

    #[error("question id {id} is used more than once")]
    DuplicateId { id: u64 },
}

/// Which family an `ActionError` belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ActionErrorKind {
    InvalidAction,
    PreconditionViolation,
}

/// A rejected action. The session is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("option {index} does not exist, question has {options} options")]
    OptionOutOfRange { index: usize, options: usize },

    #[error("quiz is already completed")]
    QuizCompleted,

    #[error("quiz is not completed yet")]
    QuizNotCompleted,

    #[error("already at the first question")]
    NoPreviousQuestion,

    #[error("no answer selected for question {index}")]
    NoSelection { index: usize },

    #[error("timer tick for epoch {tick} does not match current epoch {current}")]
    StaleTick { tick: u64, current: u64 },
}

impl ActionError {
    pub fn kind(&self) -> ActionErrorKind {
        match self {
            ActionError::OptionOutOfRange { .. }
            | ActionError::QuizCompleted
            | ActionError::QuizNotCompleted => ActionErrorKind::InvalidAction,
            ActionError::NoPreviousQuestion
            | ActionError::NoSelection { .. }
            | ActionError::StaleTick { .. } => ActionErrorKind::PreconditionViolation,
        }
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read question file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse question file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid question data: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("malformed command: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown command {0:?}")]
    Unknown(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("failed to open log file: {0}")]
    Appender(#[from] std::io::Error),

    #[error("invalid logger configuration: {0}")]
    Config(String),

    #[error("logger already installed: {0}")]
    Init(#[from] log::SetLoggerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_errors_are_grouped_by_kind() {
        assert_eq!(
            ActionError::OptionOutOfRange {
                index: 4,
                options: 4
            }
            .kind(),
            ActionErrorKind::InvalidAction
        );
        assert_eq!(ActionError::QuizCompleted.kind(), ActionErrorKind::InvalidAction);
        assert_eq!(
            ActionError::NoPreviousQuestion.kind(),
            ActionErrorKind::PreconditionViolation
        );
        assert_eq!(
            ActionError::StaleTick { tick: 1, current: 2 }.kind(),
            ActionErrorKind::PreconditionViolation
        );
    }
}

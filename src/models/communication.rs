use serde::{Deserialize, Serialize};

use crate::{
    error::{ActionError, ActionErrorKind},
    handlers::quiz_handler::Action,
    models::snapshot::{QuizReview, QuizSnapshot},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "response", content = "data", rename_all = "camelCase")]
pub enum Response {
    Snapshot(QuizSnapshot),
    ActionRejected {
        reason: String,
        kind: ActionErrorKind,
    },
    QuizFinished(QuizReview),
}

impl From<&ActionError> for Response {
    fn from(error: &ActionError) -> Self {
        Response::ActionRejected {
            reason: error.to_string(),
            kind: error.kind(),
        }
    }
}

/// What the front end asks the session to do.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "command", content = "data", rename_all = "camelCase")]
pub enum Command {
    SelectAnswer { index: usize },
    GoNext,
    GoPrevious,
    Restart,
    Quit,
}

impl Command {
    /// `None` for `Quit`, which ends the front end rather than the session.
    pub fn into_action(self) -> Option<Action> {
        match self {
            Command::SelectAnswer { index } => Some(Action::SelectAnswer(index)),
            Command::GoNext => Some(Action::GoNext),
            Command::GoPrevious => Some(Action::GoPrevious),
            Command::Restart => Some(Action::Restart),
            Command::Quit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_use_tagged_json() {
        let command: Command =
            serde_json::from_str(r#"{"command":"selectAnswer","data":{"index":2}}"#).unwrap();
        assert_eq!(command, Command::SelectAnswer { index: 2 });

        let command: Command = serde_json::from_str(r#"{"command":"goPrevious"}"#).unwrap();
        assert_eq!(command.into_action(), Some(Action::GoPrevious));
    }

    #[test]
    fn rejection_carries_kind() {
        let response = Response::from(&ActionError::NoPreviousQuestion);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["response"], "actionRejected");
        assert_eq!(json["data"]["kind"], "preconditionViolation");
    }
}

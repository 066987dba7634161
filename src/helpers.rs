use std::{fs, path::Path};

use log::{info, warn};

use crate::{
    error::{CommandError, LoadError},
    models::{
        communication::Command,
        question::{default_question_set, QuestionInput, QuestionSet},
    },
};

pub fn parse_questions(data: &str) -> Result<QuestionSet, LoadError> {
    let inputs: Vec<QuestionInput> = serde_json::from_str(data)?;
    Ok(QuestionSet::new(inputs)?)
}

pub fn load_questions(path: &Path) -> Result<QuestionSet, LoadError> {
    let data = fs::read_to_string(path)?;
    parse_questions(&data)
}

/// Loads `path` if given, otherwise or on any failure the built-in set.
pub fn load_questions_or_default(path: Option<&Path>) -> QuestionSet {
    let path = match path {
        Some(path) => path,
        None => {
            info!("No question file given, using built-in questions");
            return default_question_set();
        }
    };

    match load_questions(path) {
        Ok(questions) => {
            info!(
                "Loaded {} questions from {}",
                questions.len(),
                path.display()
            );
            questions
        }
        Err(error) => {
            warn!(
                "Error loading questions from {}: {}, falling back to built-in questions",
                path.display(),
                error
            );
            default_question_set()
        }
    }
}

/// Accepts JSON commands as well as the terminal shorthand: an option letter
/// or 1-based number selects, `n`/`p`/`r`/`q` navigate.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let trimmed = line.trim();
    if trimmed.starts_with('{') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let lowered = trimmed.to_lowercase();
    let command = match lowered.as_str() {
        "n" | "next" => Command::GoNext,
        "p" | "prev" | "previous" => Command::GoPrevious,
        "r" | "restart" => Command::Restart,
        "q" | "quit" | "exit" => Command::Quit,
        other => match parse_option(other) {
            Some(index) => Command::SelectAnswer { index },
            None => return Err(CommandError::Unknown(trimmed.to_string())),
        },
    };
    Ok(command)
}

fn parse_option(input: &str) -> Option<usize> {
    if let Ok(number) = input.parse::<usize>() {
        return number.checked_sub(1);
    }
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_lowercase() => {
            Some(letter as usize - 'a' as usize)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use std::path::PathBuf;

    #[test]
    fn parses_question_json() {
        let set = parse_questions(
            r#"[
                {"id": 1, "question": "Sky colour?", "options": ["Blue", "Green"], "correctAnswer": 0},
                {"id": 2, "question": "Grass colour?", "options": ["Blue", "Green"], "correctAnswer": 1}
            ]"#,
        )
        .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn reports_validation_failures() {
        let error = parse_questions("[]").unwrap_err();
        assert!(matches!(
            error,
            LoadError::Validation(ValidationError::Empty)
        ));
        assert!(matches!(
            parse_questions("not json").unwrap_err(),
            LoadError::Json(_)
        ));
    }

    #[test]
    fn falls_back_to_built_in_questions() {
        let missing = PathBuf::from("/definitely/not/here/questions.json");
        assert_eq!(
            load_questions_or_default(Some(&missing)),
            default_question_set()
        );
        assert_eq!(load_questions_or_default(None), default_question_set());
    }

    #[test]
    fn parses_shorthand_commands() {
        assert_eq!(parse_command("n").unwrap(), Command::GoNext);
        assert_eq!(parse_command(" Previous ").unwrap(), Command::GoPrevious);
        assert_eq!(parse_command("r").unwrap(), Command::Restart);
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
        assert_eq!(
            parse_command("B").unwrap(),
            Command::SelectAnswer { index: 1 }
        );
        assert_eq!(
            parse_command("3").unwrap(),
            Command::SelectAnswer { index: 2 }
        );
    }

    #[test]
    fn parses_json_commands() {
        assert_eq!(
            parse_command(r#"{"command":"selectAnswer","data":{"index":0}}"#).unwrap(),
            Command::SelectAnswer { index: 0 }
        );
        assert!(matches!(
            parse_command(r#"{"command":"jump"}"#),
            Err(CommandError::Json(_))
        ));
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(matches!(parse_command("0"), Err(CommandError::Unknown(_))));
        assert!(matches!(parse_command("xyz"), Err(CommandError::Unknown(_))));
        assert!(matches!(parse_command(""), Err(CommandError::Unknown(_))));
    }
}
